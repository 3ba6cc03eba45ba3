//! Listing identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Key under which the application queue is persisted in the ballot column.
/// No candidate may use it as its identifier.
pub const QUEUE_KEY: &str = "__queue__";

/// Longest identifier accepted, in bytes. Keeps every store key well under
/// LMDB's 511-byte key limit, including composite voter keys.
pub const MAX_IDENTIFIER_LEN: usize = 128;

/// The unique name of a candidate / listing.
///
/// Construction never fails: whether an identifier is acceptable for a new
/// candidacy is a registry rule, checked with [`Identifier::is_valid`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether this identifier collides with a key the store reserves.
    pub fn is_reserved(&self) -> bool {
        self.0 == QUEUE_KEY
    }

    pub fn is_too_long(&self) -> bool {
        self.0.len() > MAX_IDENTIFIER_LEN
    }

    /// Non-empty, at most [`MAX_IDENTIFIER_LEN`] bytes and not reserved.
    pub fn is_valid(&self) -> bool {
        !self.is_empty() && !self.is_too_long() && !self.is_reserved()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Identifier {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
