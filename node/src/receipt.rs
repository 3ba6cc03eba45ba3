//! Per-transaction execution results.

use serde::{Deserialize, Serialize};
use tcr_ballot::{ApplyOutcome, ChallengeOutcome};
use tcr_transactions::Transaction;
use tcr_types::{BlockHeight, Identifier};

/// What an accepted transaction did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxEffect {
    Declared,
    Challenged(ChallengeOutcome),
    Committed,
    Revealed,
    Applied(ApplyOutcome),
    Claimed { amount: u128 },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    pub height: BlockHeight,
    pub kind: String,
    pub identifier: Identifier,
    /// Present when the transaction was accepted and committed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<TxEffect>,
    /// Present when the transaction was rejected; nothing was written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TxReceipt {
    pub fn accepted(height: BlockHeight, tx: &Transaction, effect: TxEffect) -> Self {
        Self {
            height,
            kind: tx.kind().to_string(),
            identifier: tx.identifier().clone(),
            effect: Some(effect),
            error: None,
        }
    }

    pub fn rejected(height: BlockHeight, tx: &Transaction, error: impl Into<String>) -> Self {
        Self {
            height,
            kind: tx.kind().to_string(),
            identifier: tx.identifier().clone(),
            effect: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.effect.is_some()
    }
}
