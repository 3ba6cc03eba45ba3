//! Revealed votes.

use serde::{Deserialize, Serialize};

/// A vote opened during the reveal phase.
///
/// `power` is the bond the voter posted with the reveal; it is both the stake
/// at risk and the vote weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    /// `true` approves the candidate.
    pub choice: bool,
    pub power: u128,
}

impl Vote {
    pub fn new(choice: bool, power: u128) -> Self {
        Self { choice, power }
    }
}
