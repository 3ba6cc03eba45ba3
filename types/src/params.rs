//! Registry parameters — deposit floor, stage lengths and settlement ratios.
//!
//! Ratios are basis points (10_000 = 100%) so that every settlement is exact
//! integer arithmetic and reproducible on every node.

use crate::TypesError;
use serde::{Deserialize, Serialize};

/// One hundred percent, in basis points.
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Parameters every node applies to every transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryParams {
    /// Smallest deposit accepted for a candidacy. Ballots whose bond falls
    /// below the current value are purged by the next challenge attempt.
    pub min_deposit: u128,

    /// Blocks an unchallenged candidate waits before it can be applied.
    pub apply_stage_len: u64,

    /// Blocks during which commitments are accepted after a challenge.
    pub commit_stage_len: u64,

    /// Blocks during which reveals are accepted after the commit stage.
    pub reveal_stage_len: u64,

    /// Share of the losing party's bond paid directly to the winning party.
    /// The remainder is split pro rata among winning voters.
    pub dispensation_bps: u32,

    /// Approving share of revealed weight that must be strictly exceeded
    /// for a challenged candidate to be listed.
    pub quorum_bps: u32,
}

impl RegistryParams {
    /// Defaults of the reference deployment: deposit 100, ten-block stages,
    /// 50% dispensation, 50% quorum.
    pub fn registry_defaults() -> Self {
        Self {
            min_deposit: 100,
            apply_stage_len: 10,
            commit_stage_len: 10,
            reveal_stage_len: 10,
            dispensation_bps: 5_000,
            quorum_bps: 5_000,
        }
    }

    /// Reject parameter sets that would make the state machine degenerate.
    pub fn validate(&self) -> Result<(), TypesError> {
        if self.dispensation_bps > BPS_DENOMINATOR {
            return Err(TypesError::InvalidParam {
                name: "dispensation_bps",
                reason: format!("{} exceeds {BPS_DENOMINATOR}", self.dispensation_bps),
            });
        }
        if self.quorum_bps > BPS_DENOMINATOR {
            return Err(TypesError::InvalidParam {
                name: "quorum_bps",
                reason: format!("{} exceeds {BPS_DENOMINATOR}", self.quorum_bps),
            });
        }
        for (name, len) in [
            ("apply_stage_len", self.apply_stage_len),
            ("commit_stage_len", self.commit_stage_len),
            ("reveal_stage_len", self.reveal_stage_len),
        ] {
            if len == 0 {
                return Err(TypesError::InvalidParam {
                    name,
                    reason: "stage length must be at least one block".to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Default for RegistryParams {
    fn default() -> Self {
        Self::registry_defaults()
    }
}
