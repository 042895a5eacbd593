//! Front-end configuration.
//!
//! Preferences are read from `gambit.toml` in the working directory when
//! it exists; a missing file means defaults.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Display and persistence preferences.
#[derive(Debug, Deserialize)]
pub struct CliConfig {
    /// Draw pieces as letters instead of unicode symbols.
    #[serde(default)]
    pub ascii_pieces: bool,
    /// Directory save files are written to.
    #[serde(default = "default_save_dir")]
    pub save_dir: PathBuf,
}

fn default_save_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            ascii_pieces: false,
            save_dir: default_save_dir(),
        }
    }
}

impl CliConfig {
    /// Loads the configuration, falling back to defaults when the file
    /// does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the path of the configuration file.
    pub fn config_path() -> PathBuf {
        PathBuf::from("gambit.toml")
    }
}
