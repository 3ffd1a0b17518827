use serde::{Deserialize, Serialize};

/// Properties of an image element.
///
/// `path` is a resolved file path supplied by the asset store; the
/// renderer substitutes a placeholder rectangle when it cannot be read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageProps {
    pub path: String,
    pub width: f32,
    pub height: f32,
}

impl Default for ImageProps {
    fn default() -> Self {
        Self {
            path: String::new(),
            width: 100.0,
            height: 100.0,
        }
    }
}
