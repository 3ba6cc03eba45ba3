//! Node configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use tcr_types::{NetworkId, RegistryParams};
use tcr_utils::LogFormat;

use crate::NodeError;

/// Configuration for a registry node.
///
/// Can be loaded from a TOML file via [`NodeConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Which network's parameter preset to start from.
    #[serde(default = "default_network")]
    pub network: NetworkId,

    /// Data directory for the LMDB environment.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// LMDB map size in MiB.
    #[serde(default = "default_map_size_mb")]
    pub map_size_mb: usize,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Per-field overrides of the network's parameter preset.
    #[serde(default)]
    pub params: ParamOverrides,
}

/// Optional replacements for individual registry parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_deposit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply_stage_len: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_stage_len: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveal_stage_len: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dispensation_bps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quorum_bps: Option<u32>,
}

impl ParamOverrides {
    pub fn apply_to(&self, mut params: RegistryParams) -> RegistryParams {
        if let Some(v) = self.min_deposit {
            params.min_deposit = u128::from(v);
        }
        if let Some(v) = self.apply_stage_len {
            params.apply_stage_len = v;
        }
        if let Some(v) = self.commit_stage_len {
            params.commit_stage_len = v;
        }
        if let Some(v) = self.reveal_stage_len {
            params.reveal_stage_len = v;
        }
        if let Some(v) = self.dispensation_bps {
            params.dispensation_bps = v;
        }
        if let Some(v) = self.quorum_bps {
            params.quorum_bps = v;
        }
        params
    }
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_network() -> NetworkId {
    NetworkId::Dev
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./tcr_data")
}

fn default_map_size_mb() -> usize {
    1024
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl NodeConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, NodeError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| NodeError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, NodeError> {
        toml::to_string_pretty(self).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// The network preset with every override applied.
    pub fn registry_params(&self) -> RegistryParams {
        self.params.apply_to(self.network.default_params())
    }

    pub fn map_size_bytes(&self) -> usize {
        self.map_size_mb.saturating_mul(1024 * 1024)
    }

    pub fn validate(&self) -> Result<(), NodeError> {
        if self.map_size_mb == 0 {
            return Err(NodeError::Config("map_size_mb must be positive".into()));
        }
        self.registry_params().validate()?;
        Ok(())
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            network: default_network(),
            data_dir: default_data_dir(),
            map_size_mb: default_map_size_mb(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            params: ParamOverrides::default(),
        }
    }
}
