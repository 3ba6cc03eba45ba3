//! Errors raised while constructing or validating core types.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid account address: {0}")]
    InvalidAddress(String),

    #[error("invalid registry parameter {name}: {reason}")]
    InvalidParam { name: &'static str, reason: String },

    #[error("unknown network: {0}")]
    UnknownNetwork(String),
}
