//! Runtime configuration
//!
//! Optional TOML file supplying report and curation defaults plus extra
//! lexicon categories. Everything has a sensible default so the tool runs
//! without a config file.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Error type for configuration handling
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub curation: CurationConfig,
    /// Extra phrase categories appended to the built-in lexicon.
    /// BTreeMap keeps category order deterministic.
    #[serde(default)]
    pub extra_phrases: BTreeMap<String, Vec<String>>,
}

/// Report printing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Maximum backtracking samples listed in the console report
    #[serde(default = "default_sample_limit")]
    pub sample_limit: usize,
}

/// Curation defaults, overridable from the CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurationConfig {
    #[serde(default = "default_dataset_size")]
    pub dataset_size: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_sample_limit() -> usize {
    8
}
fn default_dataset_size() -> usize {
    1000
}
fn default_seed() -> u64 {
    42
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            sample_limit: default_sample_limit(),
        }
    }
}

impl Default for CurationConfig {
    fn default() -> Self {
        Self {
            dataset_size: default_dataset_size(),
            seed: default_seed(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from an explicit path, or fall back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                let config = Self::from_file(path)?;
                tracing::info!("Loaded configuration from {}", path.display());
                Ok(config)
            }
            None => {
                tracing::debug!("Using default configuration");
                Ok(Self::default())
            }
        }
    }

    /// Save configuration to a TOML file
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        fs::write(path, content).map_err(|e| ConfigError::Io(e.to_string()))?;
        Ok(())
    }
}
