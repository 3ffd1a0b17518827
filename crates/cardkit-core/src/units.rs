//! Unit conversion utilities
//!
//! Canvas dimensions are declared in physical units (mm, cm, in) or raw
//! pixels and converted through inches using the document DPI.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Physical unit for canvas dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Millimeters
    Mm,
    /// Centimeters
    Cm,
    /// Inches
    In,
    /// Raw pixels (DPI-independent)
    Px,
}

impl Default for Unit {
    fn default() -> Self {
        Self::Px
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mm => write!(f, "mm"),
            Self::Cm => write!(f, "cm"),
            Self::In => write!(f, "in"),
            Self::Px => write!(f, "px"),
        }
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mm" => Ok(Self::Mm),
            "cm" => Ok(Self::Cm),
            "in" | "inch" => Ok(Self::In),
            "px" | "pixel" => Ok(Self::Px),
            _ => Err(format!("Unknown unit: {}", s)),
        }
    }
}

/// Convert a value in the given unit to integer pixels at `dpi`.
///
/// Goes through inches as the common unit (25.4 mm, 2.54 cm per inch)
/// and rounds to the nearest pixel. Pixel values pass through.
pub fn to_pixels(value: f32, unit: Unit, dpi: u32) -> u32 {
    let px = match unit {
        Unit::Mm => (value / 25.4) * dpi as f32,
        Unit::Cm => (value / 2.54) * dpi as f32,
        Unit::In => value * dpi as f32,
        Unit::Px => value,
    };
    px.round().max(0.0) as u32
}

/// Convert a pixel count back to the given unit at `dpi`.
pub fn from_pixels(px: f32, unit: Unit, dpi: u32) -> f32 {
    let inches = px / dpi as f32;
    match unit {
        Unit::Mm => inches * 25.4,
        Unit::Cm => inches * 2.54,
        Unit::In => inches,
        Unit::Px => px,
    }
}

/// Convert a value in the given unit to millimeters at `dpi`.
///
/// Used by the PDF grid layout, which works in physical millimeters.
pub fn to_millimeters(value: f32, unit: Unit, dpi: u32) -> f32 {
    match unit {
        Unit::Mm => value,
        Unit::Cm => value * 10.0,
        Unit::In => value * 25.4,
        Unit::Px => (value / dpi as f32) * 25.4,
    }
}
