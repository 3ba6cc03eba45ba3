//! Registry transaction types and their stateless validation.
//!
//! Transaction types:
//! - **DeclareCandidacy**: Owner locks a deposit to propose a listing
//! - **Challenge**: Challenger matches the candidate's bond to force a vote
//! - **Commit**: Voter seals a vote during the commit stage
//! - **Reveal**: Voter opens the sealed vote and stakes weight on it
//! - **Apply**: Anyone settles a candidate whose window has closed
//! - **ClaimReward**: Voter collects stake and reward after settlement

pub mod apply;
pub mod challenge;
pub mod claim;
pub mod declare;
pub mod error;
pub mod hex_bytes;
pub mod validation;
pub mod vote;

use serde::{Deserialize, Serialize};
use tcr_types::{AccountAddress, Identifier};

pub use apply::ApplyTx;
pub use challenge::ChallengeTx;
pub use claim::ClaimRewardTx;
pub use declare::DeclareCandidacyTx;
pub use error::TransactionError;
pub use validation::validate_transaction;
pub use vote::{CommitTx, RevealTx};

/// The unified transaction enum wrapping all registry transaction types.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transaction {
    DeclareCandidacy(DeclareCandidacyTx),
    Challenge(ChallengeTx),
    Commit(CommitTx),
    Reveal(RevealTx),
    Apply(ApplyTx),
    ClaimReward(ClaimRewardTx),
}

impl Transaction {
    /// Stable name of the transaction kind, used in logs and receipts.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DeclareCandidacy(_) => "declare_candidacy",
            Self::Challenge(_) => "challenge",
            Self::Commit(_) => "commit",
            Self::Reveal(_) => "reveal",
            Self::Apply(_) => "apply",
            Self::ClaimReward(_) => "claim_reward",
        }
    }

    /// The account that must authorize this transaction. Apply needs no
    /// signer: anyone may settle an expired candidate.
    pub fn signer(&self) -> Option<&AccountAddress> {
        match self {
            Self::DeclareCandidacy(tx) => Some(&tx.owner),
            Self::Challenge(tx) => Some(&tx.challenger),
            Self::Commit(tx) => Some(&tx.voter),
            Self::Reveal(tx) => Some(&tx.voter),
            Self::Apply(_) => None,
            Self::ClaimReward(tx) => Some(&tx.voter),
        }
    }

    /// The candidate this transaction targets.
    pub fn identifier(&self) -> &Identifier {
        match self {
            Self::DeclareCandidacy(tx) => &tx.identifier,
            Self::Challenge(tx) => &tx.identifier,
            Self::Commit(tx) => &tx.identifier,
            Self::Reveal(tx) => &tx.identifier,
            Self::Apply(tx) => &tx.identifier,
            Self::ClaimReward(tx) => &tx.identifier,
        }
    }

    /// Stateless checks; see [`validate_transaction`].
    pub fn validate_basic(&self) -> Result<(), TransactionError> {
        validate_transaction(self)
    }

    pub fn from_json(raw: &str) -> Result<Self, TransactionError> {
        serde_json::from_str(raw).map_err(|e| TransactionError::Json(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, TransactionError> {
        serde_json::to_string(self).map_err(|e| TransactionError::Json(e.to_string()))
    }
}

impl From<DeclareCandidacyTx> for Transaction {
    fn from(tx: DeclareCandidacyTx) -> Self {
        Self::DeclareCandidacy(tx)
    }
}

impl From<ChallengeTx> for Transaction {
    fn from(tx: ChallengeTx) -> Self {
        Self::Challenge(tx)
    }
}

impl From<CommitTx> for Transaction {
    fn from(tx: CommitTx) -> Self {
        Self::Commit(tx)
    }
}

impl From<RevealTx> for Transaction {
    fn from(tx: RevealTx) -> Self {
        Self::Reveal(tx)
    }
}

impl From<ApplyTx> for Transaction {
    fn from(tx: ApplyTx) -> Self {
        Self::Apply(tx)
    }
}

impl From<ClaimRewardTx> for Transaction {
    fn from(tx: ClaimRewardTx) -> Self {
        Self::ClaimReward(tx)
    }
}
