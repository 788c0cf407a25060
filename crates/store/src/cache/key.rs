use hickory_proto::rr::{DNSClass, Name};

/// Cache key: owner name plus class.
///
/// Name hashing and equality in hickory are case-insensitive, so lookups see
/// one key per owner regardless of spelling.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub name: Name,
    pub class: DNSClass,
}

impl CacheKey {
    #[inline]
    pub fn new(name: Name, class: DNSClass) -> Self {
        Self { name, class }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn keys_ignore_owner_case() {
        let lower = CacheKey::new(Name::from_str("example.org.").unwrap(), DNSClass::IN);
        let upper = CacheKey::new(Name::from_str("EXAMPLE.ORG.").unwrap(), DNSClass::IN);
        assert_eq!(lower, upper);
    }

    #[test]
    fn class_separates_keys() {
        let name = Name::from_str("example.org.").unwrap();
        let in_key = CacheKey::new(name.clone(), DNSClass::IN);
        let ch_key = CacheKey::new(name, DNSClass::CH);
        assert_ne!(in_key, ch_key);
    }
}
