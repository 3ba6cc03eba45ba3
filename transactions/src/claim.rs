//! Claim-reward transaction: collect stake and reward after settlement.

use serde::{Deserialize, Serialize};
use tcr_types::{AccountAddress, Identifier};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRewardTx {
    pub voter: AccountAddress,
    pub identifier: Identifier,
}

impl ClaimRewardTx {
    pub fn new(voter: AccountAddress, identifier: Identifier) -> Self {
        Self { voter, identifier }
    }
}
