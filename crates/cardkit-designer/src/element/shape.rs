use serde::{Deserialize, Serialize};

/// Border style for shape outlines.
///
/// Dash segment lengths scale with the outline width so heavier borders
/// keep the same visual rhythm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DashStyle {
    Solid,
    Dash,
    Dot,
    DashDot,
    DashDotDot,
}

impl Default for DashStyle {
    fn default() -> Self {
        Self::Solid
    }
}

impl DashStyle {
    /// The on/off dash pattern in pixels for the given outline width,
    /// or `None` for a solid border.
    pub fn pattern(&self, outline_width: f32) -> Option<Vec<f32>> {
        let s = outline_width.max(1.0);
        match self {
            Self::Solid => None,
            Self::Dash => Some(vec![4.0 * s, 2.0 * s]),
            Self::Dot => Some(vec![2.0 * s, 2.0 * s]),
            Self::DashDot => Some(vec![4.0 * s, 2.0 * s, 2.0 * s, 2.0 * s]),
            Self::DashDotDot => Some(vec![4.0 * s, 2.0 * s, 2.0 * s, 2.0 * s, 2.0 * s, 2.0 * s]),
        }
    }
}

/// Properties of a rectangle/rounded-rectangle shape element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShapeProps {
    pub width: f32,
    pub height: f32,
    pub fill: String,
    pub outline: String,
    pub outline_width: f32,
    /// Corner rounding radius in pixels; 0 draws a plain rectangle.
    pub radius: f32,
    /// Fill opacity in [0, 1]; clamped at render time.
    pub opacity: f32,
    pub dash: DashStyle,
}

impl Default for ShapeProps {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
            fill: "white".to_string(),
            outline: "black".to_string(),
            outline_width: 1.0,
            radius: 0.0,
            opacity: 1.0,
            dash: DashStyle::Solid,
        }
    }
}
