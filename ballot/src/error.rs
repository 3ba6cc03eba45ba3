//! Ballot engine errors.

use tcr_ledger::LedgerError;
use tcr_store::StoreError;
use tcr_types::{BlockHeight, Identifier};
use thiserror::Error;

use crate::QueueError;

#[derive(Debug, Error)]
pub enum BallotError {
    #[error("invalid identifier {0:?}")]
    InvalidIdentifier(String),

    #[error("deposit {deposit} is below the minimum {min_deposit}")]
    InsufficientDeposit { deposit: u128, min_deposit: u128 },

    #[error("insufficient funds: need {needed}, available {available}")]
    InsufficientFunds { needed: u128, available: u128 },

    #[error("candidate {0} already exists")]
    DuplicateCandidate(Identifier),

    #[error("candidate {0} does not exist")]
    UnknownCandidate(Identifier),

    #[error("candidate {0} has already been challenged")]
    AlreadyChallenged(Identifier),

    #[error("challenge bond {actual} must equal the candidate bond {expected}")]
    BondMismatch { expected: u128, actual: u128 },

    #[error("candidate {0} is not in its commit phase")]
    NotInCommitPhase(Identifier),

    #[error("candidate {0} is not in its reveal phase")]
    NotInRevealPhase(Identifier),

    #[error("vote already revealed for {0}")]
    AlreadyVoted(Identifier),

    #[error("revealed vote does not match the commitment for {0}")]
    CommitmentMismatch(Identifier),

    #[error("apply window open until {ends_at}")]
    ApplyWindowNotClosed { ends_at: BlockHeight },

    #[error("reveal window open until {ends_at}")]
    RevealWindowNotClosed { ends_at: BlockHeight },

    #[error("candidate {0} has not been settled")]
    NotYetFinalized(Identifier),

    #[error("candidate {0} is not in the application queue")]
    QueueEntryNotFound(Identifier),

    #[error("no revealed vote for {0}")]
    NoVoteRecorded(Identifier),

    #[error("reward for {0} already claimed")]
    RewardAlreadyClaimed(Identifier),

    #[error("candidate {0} has already been settled")]
    AlreadySettled(Identifier),

    #[error("arithmetic overflow computing {0}")]
    Overflow(&'static str),

    #[error("ledger error: {0}")]
    Ledger(LedgerError),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl BallotError {
    /// Whether the error signals damaged persistent state rather than a
    /// rejected transaction.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Store(e) => e.is_fatal(),
            Self::Ledger(LedgerError::Storage(e)) => e.is_fatal(),
            _ => false,
        }
    }
}

impl From<LedgerError> for BallotError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::InsufficientFunds { needed, available } => {
                Self::InsufficientFunds { needed, available }
            }
            LedgerError::Storage(e) => Self::Store(e),
            other => Self::Ledger(other),
        }
    }
}

impl From<QueueError> for BallotError {
    fn from(e: QueueError) -> Self {
        match e {
            QueueError::NotFound(id) => Self::QueueEntryNotFound(id),
        }
    }
}
