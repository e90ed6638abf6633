use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Environment variable that overrides the log filter of the binary
pub const LOG_ENV: &str = "VERSION_BRIDGE_LOG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct BridgeConfig {
    pub matcher: MatcherConfig,
    pub listing: ListingConfig,
}

impl BridgeConfig {
    /// Load configuration from a JSON file. Missing fields use defaults.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Latest-version selection policy
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct MatcherConfig {
    /// Consider qualifier-bearing versions when selecting the latest match
    pub include_prereleases: bool,
}

/// Version listing policy
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ListingConfig {
    /// Skip unparsable published versions instead of failing the listing
    pub skip_invalid: bool,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self { skip_invalid: true }
    }
}
