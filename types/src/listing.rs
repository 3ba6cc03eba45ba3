//! Accepted registry entries.

use crate::Identifier;
use serde::{Deserialize, Serialize};

/// An entry of the curated registry. Presence means the candidate was accepted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub identifier: Identifier,
    /// Approving vote weight at settlement (zero for unchallenged candidates).
    pub votes: u128,
}

impl Listing {
    pub fn new(identifier: Identifier, votes: u128) -> Self {
        Self { identifier, votes }
    }
}
