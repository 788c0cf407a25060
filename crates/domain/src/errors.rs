use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Invalid domain name: {0}")]
    InvalidName(String),

    #[error("Invalid trust level: {0}")]
    InvalidTrustLevel(u8),

    #[error("Invalid response kind: {0}")]
    InvalidResponseKind(u8),

    #[error("Cache image error: {0}")]
    Codec(String),

    #[error("I/O error: {0}")]
    Io(String),
}
