use crate::errors::CacheError;

/// Shape of the DNS response message a cache entry was derived from (1 byte).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseKind {
    /// Entry not associated with any response message
    None = 0,
    FinalAnswerCompressed = 1,
    FinalAnswerUncompressed = 2,
    CnameAnswerCompressed = 3,
    CnameAnswerUncompressed = 4,
    AnswerUnexpected = 5,
    NxdomainSoa = 6,
    NxdomainNoAuth = 7,
    NxdomainUnexpected = 8,
    NxrrsetSoa = 9,
    NxrrsetNoAuth = 10,
    NxrrsetUnexpected = 11,
    ReferralWithGlue = 12,
    ReferralWithoutGlue = 13,
    ReferralUnexpected = 14,
    Unexpected = 15,
}

impl ResponseKind {
    pub fn description(&self) -> &'static str {
        match self {
            Self::None => "no response",
            Self::FinalAnswerCompressed => "answer compressed",
            Self::FinalAnswerUncompressed => "answer uncompressed",
            Self::CnameAnswerCompressed => "CNAME compressed",
            Self::CnameAnswerUncompressed => "CNAME uncompressed",
            Self::AnswerUnexpected => "answer, uncommon type",
            Self::NxdomainSoa => "NXDOMAIN with SOA",
            Self::NxdomainNoAuth => "NXDOMAIN with empty auth section",
            Self::NxdomainUnexpected => "NXDOMAIN, uncommon type",
            Self::NxrrsetSoa => "NXRRSET with SOA",
            Self::NxrrsetNoAuth => "NXRRSET with empty auth section",
            Self::NxrrsetUnexpected => "NXRRSET, uncommon type",
            Self::ReferralWithGlue => "referral with \"in-bailiwick\" glue",
            Self::ReferralWithoutGlue => "referral without \"in-bailiwick\" glue",
            Self::ReferralUnexpected => "referral, uncommon type",
            Self::Unexpected => "uncommon response",
        }
    }
}

impl TryFrom<u8> for ResponseKind {
    type Error = CacheError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::None,
            1 => Self::FinalAnswerCompressed,
            2 => Self::FinalAnswerUncompressed,
            3 => Self::CnameAnswerCompressed,
            4 => Self::CnameAnswerUncompressed,
            5 => Self::AnswerUnexpected,
            6 => Self::NxdomainSoa,
            7 => Self::NxdomainNoAuth,
            8 => Self::NxdomainUnexpected,
            9 => Self::NxrrsetSoa,
            10 => Self::NxrrsetNoAuth,
            11 => Self::NxrrsetUnexpected,
            12 => Self::ReferralWithGlue,
            13 => Self::ReferralWithoutGlue,
            14 => Self::ReferralUnexpected,
            15 => Self::Unexpected,
            other => return Err(CacheError::InvalidResponseKind(other)),
        })
    }
}

/// Provenance of the response message an entry came from.
///
/// `msg_len` is 0 and `kind` is [`ResponseKind::None`] for entries that were
/// installed directly rather than derived from a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseInfo {
    pub msg_len: u16,
    pub kind: ResponseKind,
}

impl ResponseInfo {
    pub fn new(msg_len: u16, kind: ResponseKind) -> Self {
        Self { msg_len, kind }
    }
}

impl Default for ResponseInfo {
    fn default() -> Self {
        Self {
            msg_len: 0,
            kind: ResponseKind::None,
        }
    }
}
