//! Challenge transaction: contest a pending or listed candidate.

use serde::{Deserialize, Serialize};
use tcr_types::{AccountAddress, Identifier};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeTx {
    pub challenger: AccountAddress,
    pub identifier: Identifier,
    /// Must equal the candidate's bond.
    pub bond: u128,
}

impl ChallengeTx {
    pub fn new(challenger: AccountAddress, identifier: Identifier, bond: u128) -> Self {
        Self {
            challenger,
            identifier,
            bond,
        }
    }
}
