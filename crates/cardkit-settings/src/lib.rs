//! # CardKit Settings
//!
//! Configuration file handling for CardKit. Settings are organized into
//! typed sections with sensible defaults and persist as TOML in the
//! platform config directory.

pub mod config;
pub mod persistence;

pub use config::{Config, EditorSettings, ExportSettings, WorkspaceSettings};
pub use persistence::{config_file_path, load_or_default, save, SettingsError};
