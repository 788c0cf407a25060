//! Binary image codec for the cache.
//!
//! The image is a sequence of key records, one per (owner name, class),
//! repeated until end of input. All integers are network byte order:
//!
//! ```text
//! u8      name_length
//! bytes   name_wire[name_length]      uncompressed wire-format owner name
//! bytes   class_wire[2]
//! u16     type_count
//! per type:
//!   bytes  type_wire[2]
//!   u8     entry_count                trust-ascending
//!   per entry:
//!     u8   rcode
//!     u32  ttl
//!     u16  msg_len
//!     u8   resp_kind
//!     u8   trust
//!     u16  rdata_count
//!     per rdata:
//!       u16   rdata_len
//!       bytes rdata_wire[rdata_len]
//! ```
//!
//! Names and rdata are emitted through fresh encoders so compression
//! pointers never appear and each field decodes standalone. There is no
//! checksum and no whole-file frame; end of stream is the only terminator,
//! and truncated input surfaces as a codec error from the fixed-width reads.

use crate::cache::{Cache, CacheKey, EntryList};
use hickory_proto::rr::{DNSClass, Name, RData, RecordType};
use hickory_proto::serialize::binary::{
    BinDecodable, BinDecoder, BinEncodable, BinEncoder, Restrict,
};
use rescache_domain::{CacheError, ResponseInfo, ResponseKind, TrustLevel};
use std::fmt::Display;

fn codec_err(err: impl Display) -> CacheError {
    CacheError::Codec(err.to_string())
}

/// Encode the whole table.
pub fn serialize(cache: &Cache) -> Result<Vec<u8>, CacheError> {
    let mut image = Vec::new();
    let mut encoder = BinEncoder::new(&mut image);

    for (key, types) in cache.iter_keys() {
        let name_wire = key.name.to_bytes().map_err(codec_err)?;
        encoder.emit_u8(name_wire.len() as u8).map_err(codec_err)?;
        encoder.emit_vec(&name_wire).map_err(codec_err)?;
        key.class.emit(&mut encoder).map_err(codec_err)?;
        encoder.emit_u16(types.len() as u16).map_err(codec_err)?;

        for (&record_type, list) in types {
            record_type.emit(&mut encoder).map_err(codec_err)?;
            encoder.emit_u8(list.len() as u8).map_err(codec_err)?;

            for &id in list.iter() {
                let entry = &cache.arena()[id.index()];
                encoder.emit_u8(entry.rcode_byte()).map_err(codec_err)?;
                encoder.emit_u32(entry.ttl()).map_err(codec_err)?;
                encoder.emit_u16(entry.msg_len()).map_err(codec_err)?;
                encoder
                    .emit_u8(entry.resp_kind() as u8)
                    .map_err(codec_err)?;
                encoder.emit_u8(entry.trust() as u8).map_err(codec_err)?;
                encoder
                    .emit_u16(entry.rdatas().len() as u16)
                    .map_err(codec_err)?;

                for rdata in entry.rdatas() {
                    let wire = rdata.to_bytes().map_err(codec_err)?;
                    encoder.emit_u16(wire.len() as u16).map_err(codec_err)?;
                    encoder.emit_vec(&wire).map_err(codec_err)?;
                }
            }
        }
    }

    drop(encoder);
    Ok(image)
}

/// Decode an image into a fresh cache.
///
/// Entries are rebuilt through the cache's normal creation path, so ids come
/// out sequential and refresh state starts cleared. Lists are re-sorted by
/// trust even though the image is expected pre-sorted.
pub fn deserialize(image: &[u8]) -> Result<Cache, CacheError> {
    let mut cache = Cache::new();
    let mut decoder = BinDecoder::new(image);

    while !decoder.is_empty() {
        let name_len = decoder.read_u8().map_err(codec_err)?.unverified() as usize;
        let name_wire = decoder.read_slice(name_len).map_err(codec_err)?.unverified();
        let name = Name::from_bytes(name_wire).map_err(codec_err)?;
        let class = DNSClass::read(&mut decoder).map_err(codec_err)?;
        let key = CacheKey::new(name, class);
        cache.reset_key(key.clone());

        let type_count = decoder.read_u16().map_err(codec_err)?.unverified();
        for _ in 0..type_count {
            let record_type = RecordType::read(&mut decoder).map_err(codec_err)?;
            let entry_count = decoder.read_u8().map_err(codec_err)?.unverified();

            let mut list = EntryList::new();
            for _ in 0..entry_count {
                let rcode = decoder.read_u8().map_err(codec_err)?.unverified();
                let ttl = decoder.read_u32().map_err(codec_err)?.unverified();
                let msg_len = decoder.read_u16().map_err(codec_err)?.unverified();
                let resp_kind =
                    ResponseKind::try_from(decoder.read_u8().map_err(codec_err)?.unverified())?;
                let trust =
                    TrustLevel::try_from(decoder.read_u8().map_err(codec_err)?.unverified())?;
                let rdata_count = decoder.read_u16().map_err(codec_err)?.unverified();

                let mut rdatas = Vec::with_capacity(rdata_count as usize);
                for _ in 0..rdata_count {
                    let rdata_len = decoder.read_u16().map_err(codec_err)?.unverified();
                    let wire = decoder
                        .read_slice(rdata_len as usize)
                        .map_err(codec_err)?
                        .unverified();
                    let mut rdata_decoder = BinDecoder::new(wire);
                    let rdata =
                        RData::read(&mut rdata_decoder, record_type, Restrict::new(rdata_len))
                            .map_err(codec_err)?;
                    rdatas.push(rdata);
                }

                let id = cache.create_entry(
                    ttl,
                    rdatas.into(),
                    trust,
                    ResponseInfo::new(msg_len, resp_kind),
                    u16::from(rcode).into(),
                );
                list.push(id);
            }
            cache.install_list(key.clone(), record_type, list);
        }
    }

    Ok(cache)
}
