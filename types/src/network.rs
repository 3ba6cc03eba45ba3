//! Network identifier.

use crate::{RegistryParams, TypesError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Identifies which registry network a node runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    /// The production network.
    Live,
    /// The public test network.
    Test,
    /// Local development network.
    Dev,
}

impl NetworkId {
    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Test => "test",
            Self::Dev => "dev",
        }
    }

    /// Parameter preset for this network.
    pub fn default_params(&self) -> RegistryParams {
        match self {
            Self::Live => RegistryParams::registry_defaults(),
            Self::Test => {
                let mut params = RegistryParams::registry_defaults();
                params.min_deposit = 10;
                params
            }
            Self::Dev => {
                // Short stages so a full challenge fits in a handful of blocks.
                let mut params = RegistryParams::registry_defaults();
                params.min_deposit = 1;
                params.apply_stage_len = 2;
                params.commit_stage_len = 2;
                params.reveal_stage_len = 2;
                params
            }
        }
    }
}

impl FromStr for NetworkId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "live" => Ok(Self::Live),
            "test" => Ok(Self::Test),
            "dev" => Ok(Self::Dev),
            other => Err(TypesError::UnknownNetwork(other.to_string())),
        }
    }
}
