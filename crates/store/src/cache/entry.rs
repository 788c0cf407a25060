use hickory_proto::op::ResponseCode;
use hickory_proto::rr::RData;
use rescache_domain::{ResponseInfo, ResponseKind, TrustLevel};
use std::fmt;
use std::sync::Arc;

/// Handle to a cache entry in the arena.
///
/// Ids are assigned monotonically and stay valid for the life of the process,
/// including for entries later superseded by a same-trust overwrite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub(crate) u32);

impl EntryId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One ranked fact about a (name, class, type).
///
/// An empty payload list records the confirmed absence of data for the
/// covering type. The rcode is stored as its low byte, the way it travels in
/// the cache image.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    ttl: u32,
    rdatas: Arc<[RData]>,
    trust: TrustLevel,
    msg_len: u16,
    resp_kind: ResponseKind,
    rcode: u8,
    id: EntryId,
    last_refreshed: Option<u64>,
}

impl CacheEntry {
    pub(crate) fn new(
        ttl: u32,
        rdatas: Arc<[RData]>,
        trust: TrustLevel,
        respinfo: ResponseInfo,
        rcode: ResponseCode,
        id: EntryId,
    ) -> Self {
        Self {
            ttl,
            rdatas,
            trust,
            msg_len: respinfo.msg_len,
            resp_kind: respinfo.kind,
            rcode: rcode.low(),
            id,
            last_refreshed: None,
        }
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    pub fn rdatas(&self) -> &[RData] {
        &self.rdatas
    }

    pub(crate) fn rdatas_arc(&self) -> Arc<[RData]> {
        Arc::clone(&self.rdatas)
    }

    pub fn trust(&self) -> TrustLevel {
        self.trust
    }

    pub fn msg_len(&self) -> u16 {
        self.msg_len
    }

    pub fn resp_kind(&self) -> ResponseKind {
        self.resp_kind
    }

    pub fn rcode(&self) -> ResponseCode {
        u16::from(self.rcode).into()
    }

    pub(crate) fn rcode_byte(&self) -> u8 {
        self.rcode
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn last_refreshed(&self) -> Option<u64> {
        self.last_refreshed
    }

    /// True when the payload list is empty, i.e. this entry records an
    /// absence rather than data.
    pub fn is_negative(&self) -> bool {
        self.rdatas.is_empty()
    }

    /// Local entries are permanent. Anything else is expired until its
    /// refresh timestamp plus TTL covers `now`; an entry that was never
    /// refreshed is always expired.
    pub fn is_expired(&self, now: u64) -> bool {
        if self.trust.is_permanent() {
            return false;
        }
        match self.last_refreshed {
            None => true,
            Some(refreshed) => refreshed + u64::from(self.ttl) < now,
        }
    }

    pub(crate) fn set_refreshed(&mut self, now: Option<u64>) {
        self.last_refreshed = now;
    }

    /// Same-trust replacement: the slot keeps its id and refresh state.
    pub(crate) fn overwrite_from(&mut self, other: &CacheEntry) {
        self.ttl = other.ttl;
        self.rdatas = Arc::clone(&other.rdatas);
        self.trust = other.trust;
        self.msg_len = other.msg_len;
        self.resp_kind = other.resp_kind;
        self.rcode = other.rcode;
    }
}
