//! Commit and reveal transactions.

use serde::{Deserialize, Serialize};
use tcr_crypto::commit_vote;
use tcr_types::{AccountAddress, Identifier};

/// A sealed vote. Re-committing before the commit stage ends replaces the
/// previous commitment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitTx {
    pub voter: AccountAddress,
    pub identifier: Identifier,
    #[serde(with = "crate::hex_bytes")]
    pub commitment: Vec<u8>,
}

impl CommitTx {
    pub fn new(voter: AccountAddress, identifier: Identifier, commitment: Vec<u8>) -> Self {
        Self {
            voter,
            identifier,
            commitment,
        }
    }

    /// Seal `vote` under `nonce`. The voter must keep the nonce to reveal.
    pub fn sealed(voter: AccountAddress, identifier: Identifier, vote: bool, nonce: &[u8]) -> Self {
        let commitment = commit_vote(vote, nonce).as_bytes().to_vec();
        Self::new(voter, identifier, commitment)
    }
}

/// Opens a sealed vote and stakes `bond` as its weight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealTx {
    pub voter: AccountAddress,
    pub identifier: Identifier,
    pub vote: bool,
    #[serde(with = "crate::hex_bytes")]
    pub nonce: Vec<u8>,
    pub bond: u128,
}

impl RevealTx {
    pub fn new(
        voter: AccountAddress,
        identifier: Identifier,
        vote: bool,
        nonce: Vec<u8>,
        bond: u128,
    ) -> Self {
        Self {
            voter,
            identifier,
            vote,
            nonce,
            bond,
        }
    }
}
