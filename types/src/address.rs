//! Account address type with `tcr_` prefix.

use crate::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A registry account address, always prefixed with `tcr_`.
///
/// Addresses arrive already authenticated; the registry only needs them to be
/// well-formed, comparable and usable as store keys.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountAddress(String);

impl AccountAddress {
    /// The standard prefix for all registry account addresses.
    pub const PREFIX: &'static str = "tcr_";

    /// Longest address accepted, in bytes, prefix included.
    pub const MAX_LEN: usize = 128;

    /// Create a new address from a raw string.
    ///
    /// # Panics
    /// Panics if the string is not a well-formed address. Use [`Self::parse`]
    /// for untrusted input.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(Self::is_well_formed(&s), "address must be tcr_<name>");
        Self(s)
    }

    /// Parse an address, rejecting malformed input.
    pub fn parse(raw: impl Into<String>) -> Result<Self, TypesError> {
        let s = raw.into();
        if Self::is_well_formed(&s) {
            Ok(Self(s))
        } else {
            Err(TypesError::InvalidAddress(s))
        }
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    fn is_well_formed(s: &str) -> bool {
        s.len() > Self::PREFIX.len()
            && s.len() <= Self::MAX_LEN
            && s.starts_with(Self::PREFIX)
            && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for AccountAddress {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<AccountAddress> for String {
    fn from(addr: AccountAddress) -> Self {
        addr.0
    }
}
