use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::ComposeOptions;

/// Errors that can occur when loading composition options.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to parse config: {source}")]
    InvalidToml {
        #[source]
        source: toml::de::Error,
    },
}

impl ComposeOptions {
    /// Parses options from TOML. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::InvalidToml { source })
    }

    /// Loads options from a TOML file.
    ///
    /// - If the file doesn't exist, returns `ComposeOptions::default()`.
    /// - Otherwise reads and parses it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::debug!("No compose options at {}, using defaults", path.display());
            return Ok(ComposeOptions::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
