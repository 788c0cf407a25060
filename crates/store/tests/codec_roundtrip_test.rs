use hickory_proto::op::ResponseCode;
use hickory_proto::rr::rdata::{A, AAAA, CNAME, NS};
use hickory_proto::rr::{DNSClass, Name, RData, RecordType};
use rescache_domain::{ResponseInfo, ResponseKind, TrustLevel};
use rescache_store::{Cache, FindOptions, RecordSet};
use std::net::Ipv4Addr;
use std::str::FromStr;

fn name(s: &str) -> Name {
    Name::from_str(s).unwrap()
}

fn populated_cache() -> Cache {
    let mut cache = Cache::new();

    let www_a = RecordSet::new(
        name("www.example.org."),
        DNSClass::IN,
        RecordType::A,
        300,
        vec![
            RData::A(A(Ipv4Addr::new(192, 0, 2, 1))),
            RData::A(A(Ipv4Addr::new(192, 0, 2, 2))),
        ],
    );
    cache.add(
        &www_a,
        TrustLevel::Answer,
        Some(ResponseInfo::new(512, ResponseKind::FinalAnswerCompressed)),
        ResponseCode::NoError,
    );

    let www_a_glue = RecordSet::new(
        name("www.example.org."),
        DNSClass::IN,
        RecordType::A,
        60,
        vec![RData::A(A(Ipv4Addr::new(198, 51, 100, 7)))],
    );
    cache.add(
        &www_a_glue,
        TrustLevel::Glue,
        Some(ResponseInfo::new(200, ResponseKind::ReferralWithGlue)),
        ResponseCode::NoError,
    );

    let www_aaaa = RecordSet::new(
        name("www.example.org."),
        DNSClass::IN,
        RecordType::AAAA,
        600,
        vec![RData::AAAA(AAAA("2001:db8::7".parse().unwrap()))],
    );
    cache.add(&www_aaaa, TrustLevel::Answer, None, ResponseCode::NoError);

    let alias = RecordSet::new(
        name("web.example.org."),
        DNSClass::IN,
        RecordType::CNAME,
        900,
        vec![RData::CNAME(CNAME(name("www.example.org.")))],
    );
    cache.add(&alias, TrustLevel::Answer, None, ResponseCode::NoError);

    let zone_ns = RecordSet::new(
        name("example.org."),
        DNSClass::IN,
        RecordType::NS,
        86_400,
        vec![RData::NS(NS(name("ns1.example.org.")))],
    );
    cache.add(&zone_ns, TrustLevel::AuthAuthority, None, ResponseCode::NoError);

    let no_mx = RecordSet::empty(name("mail.example.org."), DNSClass::IN, RecordType::MX, 900);
    cache.add(
        &no_mx,
        TrustLevel::Answer,
        Some(ResponseInfo::new(80, ResponseKind::NxrrsetSoa)),
        ResponseCode::NXRRSet,
    );

    cache
}

/// Probe one (name, type, trust) through the public lookup API.
fn probe(
    cache: &Cache,
    owner: &str,
    record_type: RecordType,
    trust: TrustLevel,
) -> Option<(ResponseCode, u32, Vec<RData>)> {
    let options = FindOptions {
        allow_negative: true,
        allow_no_answer: true,
        ..FindOptions::default()
    };
    cache
        .find(&name(owner), DNSClass::IN, record_type, options, Some(trust))
        .map(|answer| {
            (
                answer.rcode,
                answer.rrset.ttl(),
                answer.rrset.rdatas().to_vec(),
            )
        })
}

#[test]
fn image_round_trips_every_entry() {
    let original = populated_cache();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache.db");
    original.dump(&path).unwrap();

    let mut restored = Cache::new();
    restored.load(&path).unwrap();

    assert_eq!(restored.len(), original.len());

    let probes = [
        ("www.example.org.", RecordType::A, TrustLevel::Answer),
        ("www.example.org.", RecordType::A, TrustLevel::Glue),
        ("www.example.org.", RecordType::AAAA, TrustLevel::Answer),
        ("web.example.org.", RecordType::CNAME, TrustLevel::Answer),
        ("example.org.", RecordType::NS, TrustLevel::AuthAuthority),
        ("mail.example.org.", RecordType::MX, TrustLevel::Answer),
    ];
    for (owner, record_type, trust) in probes {
        let before = probe(&original, owner, record_type, trust);
        let after = probe(&restored, owner, record_type, trust);
        assert!(before.is_some(), "missing probe {}/{:?}", owner, record_type);
        assert_eq!(before, after, "{}/{:?} diverged", owner, record_type);
    }

    // absent trust levels stay absent
    assert!(probe(&restored, "www.example.org.", RecordType::A, TrustLevel::Local).is_none());
}

#[test]
fn provenance_survives_the_image() {
    let original = populated_cache();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache.db");
    original.dump(&path).unwrap();

    let mut restored = Cache::new();
    restored.load(&path).unwrap();

    let options = FindOptions {
        allow_negative: true,
        ..FindOptions::default()
    };
    let answer = restored
        .find(
            &name("mail.example.org."),
            DNSClass::IN,
            RecordType::MX,
            options,
            None,
        )
        .unwrap();
    let entry = restored.entry(answer.entry).unwrap();
    assert_eq!(entry.msg_len(), 80);
    assert_eq!(entry.resp_kind(), ResponseKind::NxrrsetSoa);
    assert_eq!(entry.rcode(), ResponseCode::NXRRSet);
}

#[test]
fn refresh_state_is_not_persisted() {
    let mut original = populated_cache();
    let answer = original
        .find(
            &name("www.example.org."),
            DNSClass::IN,
            RecordType::A,
            FindOptions::default(),
            None,
        )
        .unwrap();
    assert!(original.update(answer.entry, Some(5000)));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache.db");
    original.dump(&path).unwrap();

    let mut restored = Cache::new();
    restored.load(&path).unwrap();
    let answer = restored
        .find(
            &name("www.example.org."),
            DNSClass::IN,
            RecordType::A,
            FindOptions::default(),
            None,
        )
        .unwrap();
    assert_eq!(restored.entry(answer.entry).unwrap().last_refreshed(), None);
}

#[test]
fn load_replaces_previous_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache.db");
    populated_cache().dump(&path).unwrap();

    let mut cache = Cache::new();
    let stale = RecordSet::new(
        name("stale.example.net."),
        DNSClass::IN,
        RecordType::A,
        30,
        vec![RData::A(A(Ipv4Addr::new(203, 0, 113, 9)))],
    );
    cache.add(&stale, TrustLevel::Answer, None, ResponseCode::NoError);

    cache.load(&path).unwrap();
    assert!(cache
        .find(
            &name("stale.example.net."),
            DNSClass::IN,
            RecordType::A,
            FindOptions::default(),
            None,
        )
        .is_none());
    assert!(cache
        .find(
            &name("www.example.org."),
            DNSClass::IN,
            RecordType::A,
            FindOptions::default(),
            None,
        )
        .is_some());
}

#[test]
fn failed_load_keeps_previous_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache.db");
    populated_cache().dump(&path).unwrap();

    // truncate the image so decoding fails mid-entry
    let image = std::fs::read(&path).unwrap();
    let broken = dir.path().join("broken.db");
    std::fs::write(&broken, &image[..image.len() - 5]).unwrap();

    let mut cache = Cache::new();
    let live = RecordSet::new(
        name("live.example.net."),
        DNSClass::IN,
        RecordType::A,
        30,
        vec![RData::A(A(Ipv4Addr::new(203, 0, 113, 10)))],
    );
    cache.add(&live, TrustLevel::Answer, None, ResponseCode::NoError);

    assert!(cache.load(&broken).is_err());
    assert!(cache
        .find(
            &name("live.example.net."),
            DNSClass::IN,
            RecordType::A,
            FindOptions::default(),
            None,
        )
        .is_some());
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut cache = Cache::new();
    let result = cache.load(&dir.path().join("absent.db"));
    assert!(matches!(result, Err(rescache_domain::CacheError::Io(_))));
}
