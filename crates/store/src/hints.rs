//! Hardcoded root name-server bootstrap set.
//!
//! Installs the well-known `a`–`m.root-servers.net` NS set and its addresses
//! into a cache at local trust, through the ordinary `add` path.

use crate::cache::Cache;
use crate::record_set::RecordSet;
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::rdata::{A, AAAA, NS};
use hickory_proto::rr::{DNSClass, Name, RData, RecordType};
use rescache_domain::{CacheError, TrustLevel};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use tracing::info;

const ROOT_NS_TTL: u32 = 518_400;
const ROOT_ADDR_TTL: u32 = 3_600_000;

const ROOT_V4_ADDRS: &[(&str, Ipv4Addr)] = &[
    ("a", Ipv4Addr::new(198, 41, 0, 4)),
    ("b", Ipv4Addr::new(192, 228, 79, 201)),
    ("c", Ipv4Addr::new(192, 33, 4, 12)),
    ("d", Ipv4Addr::new(128, 8, 10, 90)),
    ("e", Ipv4Addr::new(192, 203, 230, 10)),
    ("f", Ipv4Addr::new(192, 5, 5, 241)),
    ("g", Ipv4Addr::new(192, 112, 36, 4)),
    ("h", Ipv4Addr::new(128, 63, 2, 53)),
    ("i", Ipv4Addr::new(192, 36, 148, 17)),
    ("j", Ipv4Addr::new(192, 58, 128, 30)),
    ("k", Ipv4Addr::new(193, 0, 14, 129)),
    ("l", Ipv4Addr::new(199, 7, 83, 42)),
    ("m", Ipv4Addr::new(202, 12, 27, 33)),
];

const ROOT_V6_ADDRS: &[(&str, Ipv6Addr)] = &[
    ("a", Ipv6Addr::new(0x2001, 0x503, 0xba3e, 0, 0, 0, 0x2, 0x30)),
    ("d", Ipv6Addr::new(0x2001, 0x500, 0x2d, 0, 0, 0, 0, 0xd)),
    ("f", Ipv6Addr::new(0x2001, 0x500, 0x2f, 0, 0, 0, 0, 0xf)),
    ("h", Ipv6Addr::new(0x2001, 0x500, 0x1, 0, 0, 0, 0x803f, 0x235)),
    ("i", Ipv6Addr::new(0x2001, 0x7fe, 0, 0, 0, 0, 0, 0x53)),
    ("k", Ipv6Addr::new(0x2001, 0x7fd, 0, 0, 0, 0, 0, 0x1)),
    ("l", Ipv6Addr::new(0x2001, 0x500, 0x3, 0, 0, 0, 0, 0x42)),
    ("m", Ipv6Addr::new(0x2001, 0xdc3, 0, 0, 0, 0, 0, 0x35)),
];

/// Install the root hints into `cache` at local trust.
pub fn install_root_hints(cache: &mut Cache) -> Result<(), CacheError> {
    let mut ns_rdatas = Vec::with_capacity(ROOT_V4_ADDRS.len());
    for (prefix, _) in ROOT_V4_ADDRS {
        ns_rdatas.push(RData::NS(NS(server_name(prefix)?)));
    }
    let ns_set = RecordSet::new(
        Name::root(),
        DNSClass::IN,
        RecordType::NS,
        ROOT_NS_TTL,
        ns_rdatas,
    );
    cache.add(&ns_set, TrustLevel::Local, None, ResponseCode::NoError);

    for (prefix, addr) in ROOT_V4_ADDRS {
        let set = RecordSet::new(
            server_name(prefix)?,
            DNSClass::IN,
            RecordType::A,
            ROOT_ADDR_TTL,
            vec![RData::A(A(*addr))],
        );
        cache.add(&set, TrustLevel::Local, None, ResponseCode::NoError);
    }
    for (prefix, addr) in ROOT_V6_ADDRS {
        let set = RecordSet::new(
            server_name(prefix)?,
            DNSClass::IN,
            RecordType::AAAA,
            ROOT_ADDR_TTL,
            vec![RData::AAAA(AAAA(*addr))],
        );
        cache.add(&set, TrustLevel::Local, None, ResponseCode::NoError);
    }

    info!(servers = ROOT_V4_ADDRS.len(), "Root hints installed");
    Ok(())
}

fn server_name(prefix: &str) -> Result<Name, CacheError> {
    let name = format!("{}.root-servers.net.", prefix);
    Name::from_str(&name).map_err(|e| CacheError::InvalidName(format!("{}: {}", name, e)))
}
