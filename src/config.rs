//! Manifest (`lineup.toml`) enumerating the record sources.
//!
//! ```toml
//! duplicate_policy = "reject"
//! deny_warnings = false
//! sources = ["organizers.json", "speakers.json"]
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse manifest {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("manifest validation failed: {0}")]
    Validation(String),
}

/// What to do when a slug (or the talk order) is declared more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    #[default]
    Reject,
    /// Later declarations replace earlier ones; each replacement is logged.
    LastWins,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,

    #[serde(default)]
    pub deny_warnings: bool,

    pub sources: Vec<PathBuf>,
}

impl RegistryConfig {
    /// Load a manifest and resolve relative source paths against its directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_toml_str(&text, base).map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    pub fn from_toml_str(text: &str, base: &Path) -> Result<Self, ConfigError> {
        let mut config: RegistryConfig = toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            message: e.to_string(),
        })?;
        config.validate()?;
        config.sources = config
            .sources
            .into_iter()
            .map(|p| if p.is_relative() { base.join(p) } else { p })
            .collect();
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sources.is_empty() {
            return Err(ConfigError::Validation(
                "sources cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
