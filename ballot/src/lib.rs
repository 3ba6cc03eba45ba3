//! Ballot lifecycle engine.
//!
//! A candidate moves through declaration, an optional challenge with
//! commit-reveal voting, and settlement. The [`BallotEngine`] validates each
//! transition against the candidate's phase, mutates the registry through
//! the `tcr-store` traits and moves tokens through a [`tcr_ledger::Ledger`].
//! The [`ApplicationQueue`] orders pending candidates by the height at which
//! their current phase expires.

pub mod engine;
pub mod error;
pub mod queue;
pub mod settlement;

pub use engine::{ApplyOutcome, BallotEngine, ChallengeOutcome};
pub use error::BallotError;
pub use queue::{ApplicationQueue, QueueError};
