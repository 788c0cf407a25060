use hickory_proto::op::ResponseCode;
use hickory_proto::rr::{DNSClass, Name, RecordType};
use rescache_domain::TrustLevel;
use rescache_store::hints::install_root_hints;
use rescache_store::{Cache, FindOptions};
use std::str::FromStr;

#[test]
fn hints_install_ns_set_at_root() {
    let mut cache = Cache::new();
    install_root_hints(&mut cache).unwrap();

    let answer = cache
        .find(
            &Name::root(),
            DNSClass::IN,
            RecordType::NS,
            FindOptions::default(),
            None,
        )
        .unwrap();
    assert_eq!(answer.rcode, ResponseCode::NoError);
    assert_eq!(answer.rrset.ttl(), 518_400);
    assert_eq!(answer.rrset.rdatas().len(), 13);

    let entry = cache.entry(answer.entry).unwrap();
    assert_eq!(entry.trust(), TrustLevel::Local);
}

#[test]
fn hints_install_server_addresses() {
    let mut cache = Cache::new();
    install_root_hints(&mut cache).unwrap();

    // one key per server plus the root itself
    assert_eq!(cache.len(), 14);

    let a = cache
        .find(
            &Name::from_str("a.root-servers.net.").unwrap(),
            DNSClass::IN,
            RecordType::A,
            FindOptions::default(),
            None,
        )
        .unwrap();
    assert_eq!(a.rrset.ttl(), 3_600_000);
    assert_eq!(a.rrset.to_text().trim_end(), "a.root-servers.net. 3600000 IN A 198.41.0.4");

    let aaaa = cache
        .find(
            &Name::from_str("a.root-servers.net.").unwrap(),
            DNSClass::IN,
            RecordType::AAAA,
            FindOptions::default(),
            None,
        )
        .unwrap();
    assert_eq!(aaaa.rrset.rdatas().len(), 1);

    // only a subset of the servers carries an IPv6 address
    assert!(cache
        .find(
            &Name::from_str("b.root-servers.net.").unwrap(),
            DNSClass::IN,
            RecordType::AAAA,
            FindOptions::default(),
            None,
        )
        .is_none());
}

#[test]
fn hint_entries_never_expire() {
    let mut cache = Cache::new();
    install_root_hints(&mut cache).unwrap();

    let answer = cache
        .find(
            &Name::root(),
            DNSClass::IN,
            RecordType::NS,
            FindOptions::default(),
            None,
        )
        .unwrap();
    let id = answer.entry;
    assert!(!cache.entry(id).unwrap().is_expired(u64::MAX));
    assert!(!cache.update(id, Some(u64::MAX)));
}
