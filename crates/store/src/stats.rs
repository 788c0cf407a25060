//! Read-only statistics over cache content.
//!
//! TTL histograms and per-trust entry counts, computed by walking every live
//! entry list. `used_only` restricts the view to entries that have been
//! refreshed at least once.

use crate::cache::Cache;
use rescache_domain::TrustLevel;
use std::collections::BTreeMap;
use std::io::{self, Write};

type TtlHistogram = BTreeMap<u32, u64>;

fn bump(histogram: &mut TtlHistogram, ttl: u32) {
    *histogram.entry(ttl).or_insert(0) += 1;
}

/// Write the TTL histograms: all entries, answers, authority records, glue,
/// and the answer/authority entries that shadow a glue entry ("Non Glue").
pub fn write_ttl_histograms(cache: &Cache, out: &mut impl Write, used_only: bool) -> io::Result<()> {
    let mut total = TtlHistogram::new();
    let mut answer = TtlHistogram::new();
    let mut authority = TtlHistogram::new();
    let mut glue = TtlHistogram::new();
    let mut non_glue = TtlHistogram::new();

    for (_key, _record_type, list) in cache.iter_lists() {
        for &id in list {
            let entry = &cache.arena()[id.index()];
            if used_only && entry.last_refreshed().is_none() {
                continue;
            }
            bump(&mut total, entry.ttl());
            match entry.trust() {
                TrustLevel::Answer => bump(&mut answer, entry.ttl()),
                TrustLevel::AuthAuthority => bump(&mut authority, entry.ttl()),
                TrustLevel::Glue => {
                    bump(&mut glue, entry.ttl());
                    for &other_id in list {
                        let other = &cache.arena()[other_id.index()];
                        if used_only && other.last_refreshed().is_none() {
                            continue;
                        }
                        if matches!(
                            other.trust(),
                            TrustLevel::Answer | TrustLevel::AuthAuthority
                        ) {
                            bump(&mut non_glue, other.ttl());
                        }
                    }
                }
                _ => {}
            }
        }
    }

    let reports = [
        (&total, "All"),
        (&answer, "Answer"),
        (&authority, "Auth Authority"),
        (&glue, "Glue"),
        (&non_glue, "Non Glue"),
    ];
    for (histogram, desc) in reports {
        writeln!(out, "{} TTL histogram", desc)?;
        for (ttl, count) in histogram.iter() {
            writeln!(out, "{},{}", ttl, count)?;
        }
    }
    Ok(())
}

/// Write per-trust entry counts plus the number of glue entries shadowed by
/// an answer or authority entry in the same list.
pub fn write_trust_summary(cache: &Cache, out: &mut impl Write, used_only: bool) -> io::Result<()> {
    writeln!(out, "Cache content statistics")?;

    let mut counts: BTreeMap<u8, u64> = BTreeMap::new();
    let mut glue_overridden: u64 = 0;

    for (_key, _record_type, list) in cache.iter_lists() {
        for &id in list {
            let entry = &cache.arena()[id.index()];
            if used_only && entry.last_refreshed().is_none() {
                continue;
            }
            *counts.entry(entry.trust() as u8).or_insert(0) += 1;
            if entry.trust() == TrustLevel::Glue {
                for &other_id in list {
                    let other = &cache.arena()[other_id.index()];
                    if used_only && other.last_refreshed().is_none() {
                        continue;
                    }
                    if matches!(
                        other.trust(),
                        TrustLevel::Answer | TrustLevel::AuthAuthority
                    ) {
                        glue_overridden += 1;
                    }
                }
            }
        }
    }

    let labeled = [
        TrustLevel::Local,
        TrustLevel::Answer,
        TrustLevel::AuthAuthority,
        TrustLevel::Glue,
    ];
    for trust in labeled {
        if let Some(count) = counts.get(&(trust as u8)) {
            writeln!(out, "  {}: {}", trust.as_str(), count)?;
        }
    }
    writeln!(out, "  Glues overridden: {}", glue_overridden)?;
    Ok(())
}
