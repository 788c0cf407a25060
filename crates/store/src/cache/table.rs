use super::entry::{CacheEntry, EntryId};
use super::find::{FindAnswer, FindOptions, TypeMatch};
use super::key::CacheKey;
use crate::record_set::RecordSet;
use crate::{codec, text};
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::{DNSClass, Name, RData, RecordType};
use rescache_domain::{CacheError, ResponseInfo, TrustLevel};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Per-type entry list, sorted ascending by trust. Five trust levels exist,
/// but almost every list holds one or two entries.
pub(crate) type EntryList = SmallVec<[EntryId; 2]>;
pub(crate) type TypeMap = FxHashMap<RecordType, EntryList>;

/// The in-memory resolver cache.
///
/// Maps (owner name, class) to per-type entry lists ranked by trust, backed
/// by an arena of every entry ever created. The arena index is the entry id:
/// ids are monotonic and slots are never reclaimed, so an id handed out once
/// keeps resolving even after the entry is superseded in the table.
///
/// All mutation takes `&mut self`; callers that share a cache across threads
/// own the locking policy.
#[derive(Debug, Default)]
pub struct Cache {
    table: FxHashMap<CacheKey, TypeMap>,
    entries: Vec<CacheEntry>,
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of (name, class) keys with cached data.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Total entries ever created, superseded ones included.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Direct id lookup into the arena.
    pub fn entry(&self, id: EntryId) -> Option<&CacheEntry> {
        self.entries.get(id.index())
    }

    /// Install a record set.
    ///
    /// A fresh entry is created (and keeps its arena slot) on every call.
    /// When the (name, class, type) list already holds an entry at the same
    /// trust, that entry is overwritten in place and keeps its id; otherwise
    /// the new entry is spliced into the list at its trust rank. Returns the
    /// id of the entry now visible in the table.
    pub fn add(
        &mut self,
        rrset: &RecordSet,
        trust: TrustLevel,
        respinfo: Option<ResponseInfo>,
        rcode: ResponseCode,
    ) -> EntryId {
        let respinfo = respinfo.unwrap_or_default();
        let new_id = self.create_entry(rrset.ttl(), rrset.rdatas_arc(), trust, respinfo, rcode);
        let key = CacheKey::new(rrset.name().clone(), rrset.class());
        let record_type = rrset.record_type();

        let same_trust = self
            .table
            .get(&key)
            .and_then(|types| types.get(&record_type))
            .and_then(|list| {
                list.iter()
                    .copied()
                    .find(|id| self.entries[id.index()].trust() == trust)
            });

        let id = match same_trust {
            Some(existing) => {
                let fresh = self.entries[new_id.index()].clone();
                self.entries[existing.index()].overwrite_from(&fresh);
                existing
            }
            None => {
                let rank = self
                    .table
                    .get(&key)
                    .and_then(|types| types.get(&record_type))
                    .map(|list| {
                        list.iter()
                            .position(|id| self.entries[id.index()].trust() > trust)
                            .unwrap_or(list.len())
                    })
                    .unwrap_or(0);
                self.table
                    .entry(key)
                    .or_default()
                    .entry(record_type)
                    .or_default()
                    .insert(rank, new_id);
                new_id
            }
        };

        debug!(
            name = %rrset.name(),
            record_type = %record_type,
            trust = ?trust,
            id = %id,
            "Cached record set"
        );
        id
    }

    /// Look up (name, class, type).
    ///
    /// Without `allow_no_answer` the most-trusted entry must be at answer
    /// trust or better. With it, an exact `trust` filter selects only that
    /// level, and no filter selects the most-trusted entry present. The
    /// filter is ignored unless `allow_no_answer` is set; callers are
    /// expected not to combine them.
    ///
    /// Misses of every kind return `None`, never an error.
    pub fn find(
        &self,
        name: &Name,
        class: DNSClass,
        record_type: RecordType,
        options: FindOptions,
        trust: Option<TrustLevel>,
    ) -> Option<FindAnswer> {
        let types = self.table.get(&CacheKey::new(name.clone(), class));
        let found = self.find_type(name, class, record_type, types, options, trust);

        if options.allow_cname && record_type != RecordType::CNAME {
            // A CNAME at the same key wins when it is at least as trusted as
            // the typed match.
            let cname = self.find_type(name, class, RecordType::CNAME, types, options, trust);
            if let Some(cname) = cname {
                let preferred = match &found {
                    Some(typed) => cname.trust <= typed.trust,
                    None => true,
                };
                if preferred {
                    return Some(cname.into_answer());
                }
            }
        }
        found.map(TypeMatch::into_answer)
    }

    /// Collect every type cached at (name, class); `None` for unknown keys.
    ///
    /// A single NXDOMAIN fact cancels all others: the result is then the
    /// NXDOMAIN rcode with one ANY-typed empty marker set. Otherwise the
    /// positive, non-empty sets are returned with `NoError`, or `NXRRSet`
    /// when nothing qualified.
    pub fn find_all(
        &self,
        name: &Name,
        class: DNSClass,
        options: FindOptions,
    ) -> Option<(ResponseCode, Vec<(RecordSet, EntryId)>)> {
        let types = self.table.get(&CacheKey::new(name.clone(), class))?;
        let mut rrsets = Vec::new();
        for (&record_type, list) in types {
            let id = if !options.allow_no_answer {
                match self.select_entry(list, TrustLevel::Answer, false) {
                    Some(id) => id,
                    None => continue,
                }
            } else {
                match list.first().copied() {
                    Some(id) => id,
                    None => continue,
                }
            };
            let entry = &self.entries[id.index()];

            if entry.rcode() == ResponseCode::NXDomain {
                let marker = RecordSet::empty(name.clone(), class, RecordType::ANY, entry.ttl());
                return Some((ResponseCode::NXDomain, vec![(marker, id)]));
            }

            if entry.is_negative() {
                continue;
            }
            let rrset = RecordSet::new(
                name.clone(),
                class,
                record_type,
                entry.ttl(),
                entry.rdatas_arc(),
            );
            rrsets.push((rrset, id));
        }

        let rcode = if rrsets.is_empty() {
            ResponseCode::NXRRSet
        } else {
            ResponseCode::NoError
        };
        Some((rcode, rrsets))
    }

    /// Refresh bookkeeping for one entry.
    ///
    /// `now == None` force-expires the entry and reports `true`. Otherwise
    /// the refresh timestamp moves to `now` exactly when the entry was
    /// expired; a still-live entry is left alone and reports `false`.
    /// Unknown ids report `false`.
    pub fn update(&mut self, id: EntryId, now: Option<u64>) -> bool {
        let Some(entry) = self.entries.get_mut(id.index()) else {
            return false;
        };
        match now {
            None => {
                entry.set_refreshed(None);
                true
            }
            Some(now) => {
                if entry.is_expired(now) {
                    entry.set_refreshed(Some(now));
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Write the whole table as a binary image.
    pub fn dump(&self, path: &Path) -> Result<(), CacheError> {
        let image = codec::serialize(self)?;
        let mut file = File::create(path)
            .map_err(|e| CacheError::Io(format!("cannot create {}: {}", path.display(), e)))?;
        file.write_all(&image)
            .map_err(|e| CacheError::Io(format!("cannot write {}: {}", path.display(), e)))?;
        info!(path = %path.display(), keys = self.len(), "Cache image written");
        Ok(())
    }

    /// Replace the whole cache from a binary image.
    ///
    /// The image is decoded into a fresh table first and swapped in only on
    /// full success; a failed load leaves the current content untouched.
    /// Entry ids restart from zero and refresh state is not carried over.
    pub fn load(&mut self, path: &Path) -> Result<(), CacheError> {
        let image = fs::read(path)
            .map_err(|e| CacheError::Io(format!("cannot read {}: {}", path.display(), e)))?;
        let fresh = codec::deserialize(&image)?;
        *self = fresh;
        info!(
            path = %path.display(),
            keys = self.len(),
            entries = self.entry_count(),
            "Cache image loaded"
        );
        Ok(())
    }

    /// Write the human-readable rendering of the whole table.
    pub fn dump_text(&self, path: &Path) -> Result<(), CacheError> {
        let mut file = File::create(path)
            .map_err(|e| CacheError::Io(format!("cannot create {}: {}", path.display(), e)))?;
        text::write_all(self, &mut file)
            .map_err(|e| CacheError::Io(format!("cannot write {}: {}", path.display(), e)))?;
        Ok(())
    }

    fn find_type(
        &self,
        name: &Name,
        class: DNSClass,
        record_type: RecordType,
        types: Option<&TypeMap>,
        options: FindOptions,
        trust: Option<TrustLevel>,
    ) -> Option<TypeMatch> {
        let list = types?.get(&record_type)?;
        let id = if !options.allow_no_answer {
            self.select_entry(list, TrustLevel::Answer, false)?
        } else if let Some(level) = trust {
            self.select_entry(list, level, true)?
        } else {
            list.first().copied()?
        };

        let entry = &self.entries[id.index()];
        if entry.is_negative() && !options.allow_negative {
            return None;
        }
        let rrset = RecordSet::new(
            name.clone(),
            class,
            record_type,
            entry.ttl(),
            entry.rdatas_arc(),
        );
        Some(TypeMatch {
            rcode: entry.rcode(),
            rrset,
            trust: entry.trust(),
            entry: id,
        })
    }

    /// First entry at exactly `trust`, or additionally any more-trusted
    /// entry when `exact` is false. Lists are sorted ascending by trust.
    fn select_entry(&self, list: &EntryList, trust: TrustLevel, exact: bool) -> Option<EntryId> {
        list.iter().copied().find(|id| {
            let level = self.entries[id.index()].trust();
            level == trust || (!exact && level < trust)
        })
    }

    pub(crate) fn create_entry(
        &mut self,
        ttl: u32,
        rdatas: Arc<[RData]>,
        trust: TrustLevel,
        respinfo: ResponseInfo,
        rcode: ResponseCode,
    ) -> EntryId {
        let id = EntryId(self.entries.len() as u32);
        self.entries
            .push(CacheEntry::new(ttl, rdatas, trust, respinfo, rcode, id));
        id
    }

    pub(crate) fn arena(&self) -> &[CacheEntry] {
        &self.entries
    }

    /// Iterate keys with their type maps, in table order.
    pub(crate) fn iter_keys(&self) -> impl Iterator<Item = (&CacheKey, &TypeMap)> {
        self.table.iter()
    }

    /// Iterate every (key, type, entry list) triple.
    pub(crate) fn iter_lists(&self) -> impl Iterator<Item = (&CacheKey, RecordType, &[EntryId])> {
        self.table.iter().flat_map(|(key, types)| {
            types
                .iter()
                .map(move |(&record_type, list)| (key, record_type, list.as_slice()))
        })
    }

    pub(crate) fn types_for(&self, key: &CacheKey) -> Option<&TypeMap> {
        self.table.get(key)
    }

    /// Drop whatever was stored at `key`; the deserializer calls this when a
    /// key record starts so a repeated key replaces rather than merges.
    pub(crate) fn reset_key(&mut self, key: CacheKey) {
        self.table.insert(key, TypeMap::default());
    }

    /// Install a decoded list for (key, type), re-sorting by trust.
    pub(crate) fn install_list(&mut self, key: CacheKey, record_type: RecordType, mut list: EntryList) {
        let entries = &self.entries;
        list.sort_by_key(|id| entries[id.index()].trust());
        self.table
            .entry(key)
            .or_default()
            .insert(record_type, list);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hickory_proto::rr::rdata::A;
    use std::net::Ipv4Addr;
    use std::str::FromStr;

    fn a_set(name: &str, ttl: u32, last_octet: u8) -> RecordSet {
        RecordSet::new(
            Name::from_str(name).unwrap(),
            DNSClass::IN,
            RecordType::A,
            ttl,
            vec![RData::A(A(Ipv4Addr::new(192, 0, 2, last_octet)))],
        )
    }

    #[test]
    fn lists_stay_sorted_by_trust() {
        let mut cache = Cache::new();
        let name = Name::from_str("ns.example.org.").unwrap();
        cache.add(&a_set("ns.example.org.", 60, 1), TrustLevel::Glue, None, ResponseCode::NoError);
        cache.add(&a_set("ns.example.org.", 60, 2), TrustLevel::Local, None, ResponseCode::NoError);
        cache.add(&a_set("ns.example.org.", 60, 3), TrustLevel::Answer, None, ResponseCode::NoError);

        let key = CacheKey::new(name, DNSClass::IN);
        let list = &cache.types_for(&key).unwrap()[&RecordType::A];
        let trusts: Vec<TrustLevel> = list
            .iter()
            .map(|id| cache.arena()[id.index()].trust())
            .collect();
        assert_eq!(
            trusts,
            vec![TrustLevel::Local, TrustLevel::Answer, TrustLevel::Glue]
        );
    }

    #[test]
    fn same_trust_add_overwrites_in_place() {
        let mut cache = Cache::new();
        let name = Name::from_str("www.example.org.").unwrap();
        let first = cache.add(&a_set("www.example.org.", 60, 1), TrustLevel::Answer, None, ResponseCode::NoError);
        let second = cache.add(&a_set("www.example.org.", 900, 2), TrustLevel::Answer, None, ResponseCode::NoError);

        // the visible entry keeps its original id with the new fields
        assert_eq!(first, second);
        let key = CacheKey::new(name, DNSClass::IN);
        assert_eq!(cache.types_for(&key).unwrap()[&RecordType::A].len(), 1);
        assert_eq!(cache.entry(first).unwrap().ttl(), 900);
        // both the live slot and the detached one stay addressable
        assert_eq!(cache.entry_count(), 2);
        assert_eq!(cache.entry(EntryId(1)).unwrap().ttl(), 900);
    }

    #[test]
    fn update_touches_only_expired_entries() {
        let mut cache = Cache::new();
        let id = cache.add(&a_set("www.example.org.", 100, 1), TrustLevel::Answer, None, ResponseCode::NoError);

        assert!(cache.update(id, Some(1000)));
        assert!(!cache.update(id, Some(1050)));
        assert!(cache.update(id, Some(1101)));
        assert_eq!(cache.entry(id).unwrap().last_refreshed(), Some(1101));
    }

    #[test]
    fn update_with_none_force_expires() {
        let mut cache = Cache::new();
        let id = cache.add(&a_set("www.example.org.", 100, 1), TrustLevel::Answer, None, ResponseCode::NoError);
        assert!(cache.update(id, Some(1000)));
        assert!(cache.update(id, None));
        assert_eq!(cache.entry(id).unwrap().last_refreshed(), None);
        assert!(cache.update(id, Some(1000)));
    }

    #[test]
    fn update_unknown_id_is_a_no_op() {
        let mut cache = Cache::new();
        assert!(!cache.update(EntryId(42), Some(1)));
    }
}
