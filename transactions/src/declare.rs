//! Declare-candidacy transaction: an owner proposes a new listing.

use serde::{Deserialize, Serialize};
use tcr_types::{AccountAddress, Identifier};

/// The deposit stays locked for as long as the candidate exists and is
/// forfeited to the challenger if a challenge succeeds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclareCandidacyTx {
    pub owner: AccountAddress,
    pub identifier: Identifier,
    pub deposit: u128,
    #[serde(default)]
    pub details: String,
}

impl DeclareCandidacyTx {
    pub fn new(owner: AccountAddress, identifier: Identifier, deposit: u128) -> Self {
        Self {
            owner,
            identifier,
            deposit,
            details: String::new(),
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }
}
