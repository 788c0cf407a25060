//! Human-readable rendering of cache content.
//!
//! A reporting format only; it does not round-trip. Negative entries come
//! out as a single comment line, positive entries as a provenance comment
//! followed by the set's zone-file rendering.

use crate::cache::{Cache, CacheKey, TypeMap};
use crate::record_set::RecordSet;
use hickory_proto::rr::{DNSClass, Name};
use std::io::{self, Write};

/// Write every key's entries.
pub fn write_all(cache: &Cache, out: &mut impl Write) -> io::Result<()> {
    for (key, types) in cache.iter_keys() {
        write_key(cache, out, key, types)?;
    }
    Ok(())
}

/// Write the entries stored for one (name, class), if any.
pub fn write_name_entry(
    cache: &Cache,
    out: &mut impl Write,
    name: &Name,
    class: DNSClass,
) -> io::Result<()> {
    let key = CacheKey::new(name.clone(), class);
    if let Some(types) = cache.types_for(&key) {
        write_key(cache, out, &key, types)?;
    }
    Ok(())
}

fn write_key(
    cache: &Cache,
    out: &mut impl Write,
    key: &CacheKey,
    types: &TypeMap,
) -> io::Result<()> {
    for (&record_type, list) in types {
        for &id in list.iter() {
            let entry = &cache.arena()[id.index()];
            if entry.is_negative() {
                writeln!(
                    out,
                    ";; [{}, TTL={}, msglen={}, resptype={}] {}/{}/{}",
                    entry.rcode(),
                    entry.ttl(),
                    entry.msg_len(),
                    entry.resp_kind() as u8,
                    key.name,
                    key.class,
                    record_type
                )?;
            } else {
                writeln!(
                    out,
                    ";; [msglen={}, resptype={}, trust={}]",
                    entry.msg_len(),
                    entry.resp_kind() as u8,
                    entry.trust() as u8
                )?;
                let rrset = RecordSet::new(
                    key.name.clone(),
                    key.class,
                    record_type,
                    entry.ttl(),
                    entry.rdatas_arc(),
                );
                write!(out, "{}", rrset.to_text())?;
            }
        }
    }
    Ok(())
}
