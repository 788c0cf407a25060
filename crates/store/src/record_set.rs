use hickory_proto::rr::{DNSClass, Name, RData, RecordType};
use std::fmt::Write as _;
use std::sync::Arc;

/// An owner name, class, type and TTL together with its typed payloads.
///
/// This is the unit the cache ingests and hands back: a thin wrapper over the
/// hickory wire types. An empty payload list represents a negative fact for
/// the covering type.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet {
    name: Name,
    class: DNSClass,
    record_type: RecordType,
    ttl: u32,
    rdatas: Arc<[RData]>,
}

impl RecordSet {
    pub fn new(
        name: Name,
        class: DNSClass,
        record_type: RecordType,
        ttl: u32,
        rdatas: impl Into<Arc<[RData]>>,
    ) -> Self {
        Self {
            name,
            class,
            record_type,
            ttl,
            rdatas: rdatas.into(),
        }
    }

    /// A set with no payloads, used for negative markers.
    pub fn empty(name: Name, class: DNSClass, record_type: RecordType, ttl: u32) -> Self {
        Self::new(name, class, record_type, ttl, Vec::new())
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn class(&self) -> DNSClass {
        self.class
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
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

    pub fn is_empty(&self) -> bool {
        self.rdatas.is_empty()
    }

    /// Zone-file style rendering, one line per payload.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for rdata in self.rdatas.iter() {
            let _ = writeln!(
                out,
                "{} {} {} {} {}",
                self.name, self.ttl, self.class, self.record_type, rdata
            );
        }
        out
    }
}
