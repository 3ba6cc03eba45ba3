//! Fundamental types for the token-curated registry.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! account addresses, listing identifiers, block heights, registry parameters,
//! and the persisted records (ballots, listings, votes, queue items).

pub mod address;
pub mod ballot;
pub mod error;
pub mod height;
pub mod identifier;
pub mod listing;
pub mod network;
pub mod params;
pub mod queue;
pub mod vote;

pub use address::AccountAddress;
pub use ballot::{Ballot, BallotPhase, ChallengeInfo};
pub use error::TypesError;
pub use height::BlockHeight;
pub use identifier::{Identifier, MAX_IDENTIFIER_LEN};
pub use listing::Listing;
pub use network::NetworkId;
pub use params::RegistryParams;
pub use queue::QueueItem;
pub use vote::Vote;
