//! Configuration sections for CardKit.
//!
//! Configuration is organized into logical sections:
//! - Workspace paths (templates, assets, datasets)
//! - Editor defaults (canvas size, background, nudge step)
//! - Export defaults (DPI, page size, image format)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use cardkit_core::Unit;
use cardkit_export::PageSize;

/// Workspace directory layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceSettings {
    /// Directory holding template JSON files.
    pub templates_dir: PathBuf,
    /// Directory holding image assets referenced by elements.
    pub assets_dir: PathBuf,
    /// Directory holding CSV datasets.
    pub data_dir: PathBuf,
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from("templates"),
            assets_dir: PathBuf::from("assets"),
            data_dir: PathBuf::from("data"),
        }
    }
}

/// Defaults applied to newly created documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub canvas_unit: Unit,
    pub background_color: String,
    /// Arrow-key nudge distance in pixels.
    pub nudge_step: f32,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            canvas_width: 300.0,
            canvas_height: 300.0,
            canvas_unit: Unit::Px,
            background_color: "#FFFFFF".to_string(),
            nudge_step: 1.0,
        }
    }
}

/// Defaults for export operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub dpi: u32,
    pub page_size: PageSize,
    /// Lowercase extension of the batch image format ("png"/"jpeg").
    pub image_format: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            dpi: 96,
            page_size: PageSize::A4,
            image_format: "png".to_string(),
        }
    }
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub workspace: WorkspaceSettings,
    pub editor: EditorSettings,
    pub export: ExportSettings,
}
