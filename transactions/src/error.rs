use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransactionError {
    #[error("{field} must be positive")]
    ZeroAmount { field: &'static str },

    #[error("identifier must not be empty")]
    EmptyIdentifier,

    #[error("identifier is {len} bytes, the limit is {max}")]
    IdentifierTooLong { len: usize, max: usize },

    #[error("nonce must not be empty")]
    EmptyNonce,

    #[error("commitment must be {expected} bytes, got {actual}")]
    InvalidCommitmentLength { expected: usize, actual: usize },

    #[error("malformed transaction json: {0}")]
    Json(String),
}
