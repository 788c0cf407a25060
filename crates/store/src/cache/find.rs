use super::entry::EntryId;
use crate::record_set::RecordSet;
use hickory_proto::op::ResponseCode;
use rescache_domain::TrustLevel;

/// Search options for cache lookups. Everything defaults to off.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FindOptions {
    /// Return negative (empty-payload) entries instead of treating them as
    /// misses.
    pub allow_negative: bool,
    /// Consider entries below answer trust. Must be set when a lookup
    /// filters on an exact trust level.
    pub allow_no_answer: bool,
    /// Substitute a CNAME entry at the same key when it is at least as
    /// trusted as the typed match.
    pub allow_cname: bool,
}

/// A successful lookup: the stored rcode, a materialized record set and the
/// id of the entry it was built from.
#[derive(Debug, Clone)]
pub struct FindAnswer {
    pub rcode: ResponseCode,
    pub rrset: RecordSet,
    pub entry: EntryId,
}

/// Per-type match, carrying the trust used for CNAME preference.
#[derive(Debug, Clone)]
pub(crate) struct TypeMatch {
    pub(crate) rcode: ResponseCode,
    pub(crate) rrset: RecordSet,
    pub(crate) trust: TrustLevel,
    pub(crate) entry: EntryId,
}

impl TypeMatch {
    pub(crate) fn into_answer(self) -> FindAnswer {
        FindAnswer {
            rcode: self.rcode,
            rrset: self.rrset,
            entry: self.entry,
        }
    }
}
