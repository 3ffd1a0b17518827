//! TOML persistence for the configuration file.
//!
//! The config lives at `<platform config dir>/cardkit/config.toml`. A
//! missing file yields the defaults; a malformed one is an error so a
//! user's edits are never silently discarded.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::Config;

/// Settings persistence errors
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Config file exists but could not be parsed
    #[error("Failed to parse config {path}: {reason}")]
    Parse {
        /// Path of the config file.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// Config could not be serialized
    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No platform config directory available
    #[error("No config directory on this platform")]
    NoConfigDir,
}

/// Default config file location for this platform.
pub fn config_file_path() -> Result<PathBuf, SettingsError> {
    let base = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
    Ok(base.join("cardkit").join("config.toml"))
}

/// Load the config at `path`, or the defaults when the file does not
/// exist yet.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<Config, SettingsError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| SettingsError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Write the config to `path`, creating parent directories as needed.
pub fn save(config: &Config, path: impl AsRef<Path>) -> Result<(), SettingsError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text =
        toml::to_string_pretty(config).map_err(|e| SettingsError::Serialize(e.to_string()))?;
    fs::write(path, text)?;
    Ok(())
}
