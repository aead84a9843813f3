use crate::container::Algorithm;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CryptError {
    #[error("Invalid key size: expected {expected} bytes, got {actual}")]
    InvalidKeySize { expected: usize, actual: usize },

    #[error("Unknown algorithm tag: 0x{0:02x}")]
    UnknownAlgorithmTag(u8),

    #[error("File was encrypted with {found}, not {expected}. Use the correct decryption algorithm")]
    AlgorithmMismatch {
        expected: Algorithm,
        found: Algorithm,
    },

    #[error("Input too short: {len} bytes")]
    TruncatedInput { len: usize },

    #[error("Authentication failed - invalid key or corrupted file")]
    AuthenticationFailure,

    #[error("File integrity check failed - stored digest {expected}, computed {actual}")]
    IntegrityMismatch { expected: String, actual: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, CryptError>;
