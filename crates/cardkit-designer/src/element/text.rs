use serde::{Deserialize, Serialize};

/// Horizontal alignment of wrapped text lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Default for Align {
    fn default() -> Self {
        Self::Left
    }
}

/// Properties of a text element.
///
/// `width` constrains word wrapping; `height` is derived from the
/// wrapped line count rather than set directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextProps {
    pub text: String,
    pub font: String,
    pub font_size: f32,
    pub fill: String,
    pub bold: bool,
    pub italic: bool,
    pub align: Align,
    pub width: f32,
    pub height: f32,
    pub multiline: bool,
}

impl Default for TextProps {
    fn default() -> Self {
        Self {
            text: "New Text".to_string(),
            font: "Arial".to_string(),
            font_size: 12.0,
            fill: "black".to_string(),
            bold: false,
            italic: false,
            align: Align::Left,
            width: 200.0,
            height: 100.0,
            multiline: true,
        }
    }
}
