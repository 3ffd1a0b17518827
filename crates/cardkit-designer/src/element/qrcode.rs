use serde::{Deserialize, Serialize};

/// Properties of a QR code element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QrCodeProps {
    /// The string encoded into the QR matrix.
    pub content: String,
    pub width: f32,
    pub height: f32,
    /// Module (dark cell) color.
    pub fill: String,
    /// Background color; `None` renders on white.
    pub background: Option<String>,
}

impl Default for QrCodeProps {
    fn default() -> Self {
        Self {
            content: "https://example.com".to_string(),
            width: 120.0,
            height: 120.0,
            fill: "black".to_string(),
            background: None,
        }
    }
}
