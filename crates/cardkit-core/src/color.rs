//! Color values for element fills, outlines, and canvas backgrounds.
//!
//! Colors arrive from documents as either `#RRGGBB` hex strings or the
//! small set of names the property editors offer. Invalid input falls
//! back to opaque white rather than failing the render.

use serde::{Deserialize, Serialize};

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color { r: 255, g: 255, b: 255, a: 0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a color name or `#RRGGBB` hex string.
    ///
    /// Unknown names and malformed hex fall back to white, matching the
    /// editor's behavior of keeping the canvas drawable over erroring.
    pub fn parse(input: &str) -> Self {
        let named = match input.trim().to_lowercase().as_str() {
            "white" => Some(Self::WHITE),
            "black" => Some(Self::BLACK),
            "red" => Some(Self::rgb(255, 0, 0)),
            "green" => Some(Self::rgb(0, 255, 0)),
            "blue" => Some(Self::rgb(0, 0, 255)),
            "yellow" => Some(Self::rgb(255, 255, 0)),
            "purple" => Some(Self::rgb(128, 0, 128)),
            "orange" => Some(Self::rgb(255, 165, 0)),
            "gray" | "grey" => Some(Self::rgb(128, 128, 128)),
            "lightgray" | "lightgrey" => Some(Self::rgb(211, 211, 211)),
            "darkgray" | "darkgrey" => Some(Self::rgb(169, 169, 169)),
            "transparent" => Some(Self::TRANSPARENT),
            _ => None,
        };
        if let Some(color) = named {
            return color;
        }

        match Self::parse_hex(input.trim()) {
            Some(color) => color,
            None => {
                tracing::warn!("Invalid color {:?}, falling back to white", input);
                Self::WHITE
            }
        }
    }

    fn parse_hex(input: &str) -> Option<Self> {
        let hex = input.strip_prefix('#').unwrap_or(input);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self::rgb(r, g, b))
    }

    /// Scale the alpha channel by an opacity factor, clamped to [0, 1].
    pub fn with_opacity(self, opacity: f32) -> Self {
        let opacity = opacity.clamp(0.0, 1.0);
        Self {
            a: (self.a as f32 * opacity).round() as u8,
            ..self
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}
