//! The per-candidate lifecycle record.

use crate::{AccountAddress, BlockHeight, Identifier};
use serde::{Deserialize, Serialize};

/// Challenge details, present only once a challenge has been activated.
///
/// Invariant: `end_reveal_height == end_commit_height + reveal_stage_len`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeInfo {
    pub challenger: AccountAddress,
    /// Last height at which commitments are accepted.
    pub end_commit_height: BlockHeight,
    /// Last height at which reveals are accepted.
    pub end_reveal_height: BlockHeight,
}

/// One candidate's lifecycle state.
///
/// A ballot is absent from the store until declared; there is no
/// "empty ballot" sentinel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub identifier: Identifier,
    /// Free-form description supplied at declaration.
    #[serde(default)]
    pub details: String,
    pub owner: AccountAddress,
    /// Deposit posted at declaration. Never changes afterwards.
    pub bond: u128,
    /// Whether a challenge is currently open.
    pub active: bool,
    pub approve: u128,
    pub deny: u128,
    /// Height after which an unchallenged ballot may be applied.
    pub end_apply_height: BlockHeight,
    /// Set once, when the ballot is challenged. A ballot is challenged at most once.
    pub challenge: Option<ChallengeInfo>,
    /// Height of the apply that settled the current round.
    pub settled_at: Option<BlockHeight>,
}

/// Where a ballot stands at a given height.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallotPhase {
    /// Declared, unchallenged, apply window still open.
    Pending,
    /// Challenged; commitments accepted.
    Committing,
    /// Challenged; commit window closed, reveals accepted.
    Revealing,
    /// The relevant window has closed; waiting for an apply transaction.
    AwaitingApply,
    /// Applied. Retained for reward claims.
    Settled,
}

impl Ballot {
    /// A freshly declared, unchallenged ballot.
    pub fn new(
        identifier: Identifier,
        owner: AccountAddress,
        bond: u128,
        end_apply_height: BlockHeight,
    ) -> Self {
        Self {
            identifier,
            details: String::new(),
            owner,
            bond,
            active: false,
            approve: 0,
            deny: 0,
            end_apply_height,
            challenge: None,
            settled_at: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    pub fn is_challenged(&self) -> bool {
        self.challenge.is_some()
    }

    pub fn is_settled(&self) -> bool {
        self.settled_at.is_some()
    }

    pub fn challenger(&self) -> Option<&AccountAddress> {
        self.challenge.as_ref().map(|c| &c.challenger)
    }

    /// Total revealed vote weight.
    pub fn total_votes(&self) -> Option<u128> {
        self.approve.checked_add(self.deny)
    }

    /// Whether commitments are accepted at `height`.
    pub fn in_commit_phase(&self, height: BlockHeight) -> bool {
        match &self.challenge {
            Some(c) => self.active && height <= c.end_commit_height,
            None => false,
        }
    }

    /// Whether reveals are accepted at `height`.
    pub fn in_reveal_phase(&self, height: BlockHeight) -> bool {
        match &self.challenge {
            Some(c) => {
                self.active && c.end_commit_height < height && height <= c.end_reveal_height
            }
            None => false,
        }
    }

    /// The height at which the current phase expires, used as queue priority.
    pub fn expiry_height(&self) -> BlockHeight {
        match &self.challenge {
            Some(c) if self.active => c.end_reveal_height,
            _ => self.end_apply_height,
        }
    }

    /// Derive the lifecycle phase at `height`.
    pub fn phase(&self, height: BlockHeight) -> BallotPhase {
        if self.is_settled() {
            return BallotPhase::Settled;
        }
        match &self.challenge {
            Some(c) if self.active => {
                if height <= c.end_commit_height {
                    BallotPhase::Committing
                } else if height <= c.end_reveal_height {
                    BallotPhase::Revealing
                } else {
                    BallotPhase::AwaitingApply
                }
            }
            _ if height >= self.end_apply_height => BallotPhase::AwaitingApply,
            _ => BallotPhase::Pending,
        }
    }
}
