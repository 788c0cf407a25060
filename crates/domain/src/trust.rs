use crate::errors::CacheError;

/// Trust level of a cached fact (1 byte).
///
/// Lower values are more trustworthy; entry lists are kept sorted ascending
/// so the most trusted fact always comes first.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TrustLevel {
    /// Hand-installed record, never expires
    Local = 0,
    /// Authoritative direct answer
    Answer = 1,
    /// Authority-section record from an authoritative answer
    AuthAuthority = 2,
    /// Referral or glue
    Glue = 3,
    /// Additional-section record from an authoritative answer
    AuthAdditional = 4,
}

impl TrustLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "Local",
            Self::Answer => "Answer",
            Self::AuthAuthority => "Authority Records",
            Self::Glue => "Glue or Delegation",
            Self::AuthAdditional => "Additional Records",
        }
    }

    /// True for the trust level whose entries are exempt from TTL expiry.
    pub fn is_permanent(&self) -> bool {
        matches!(self, Self::Local)
    }
}

impl TryFrom<u8> for TrustLevel {
    type Error = CacheError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Local),
            1 => Ok(Self::Answer),
            2 => Ok(Self::AuthAuthority),
            3 => Ok(Self::Glue),
            4 => Ok(Self::AuthAdditional),
            other => Err(CacheError::InvalidTrustLevel(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_trustworthiness() {
        assert!(TrustLevel::Local < TrustLevel::Answer);
        assert!(TrustLevel::Answer < TrustLevel::AuthAuthority);
        assert!(TrustLevel::AuthAuthority < TrustLevel::Glue);
        assert!(TrustLevel::Glue < TrustLevel::AuthAdditional);
    }

    #[test]
    fn byte_round_trip() {
        for value in 0u8..=4 {
            let trust = TrustLevel::try_from(value).unwrap();
            assert_eq!(trust as u8, value);
        }
    }

    #[test]
    fn rejects_out_of_range_byte() {
        assert!(matches!(
            TrustLevel::try_from(5),
            Err(CacheError::InvalidTrustLevel(5))
        ));
    }

    #[test]
    fn only_local_is_permanent() {
        assert!(TrustLevel::Local.is_permanent());
        assert!(!TrustLevel::Answer.is_permanent());
        assert!(!TrustLevel::Glue.is_permanent());
    }
}
