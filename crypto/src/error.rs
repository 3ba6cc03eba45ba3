use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("commitment must be {expected} bytes, got {actual}")]
    InvalidCommitmentLength { expected: usize, actual: usize },

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("entropy source unavailable: {0}")]
    Entropy(String),
}
