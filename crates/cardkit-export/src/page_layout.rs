//! Page sizes and the card-packing grid for PDF export.
//!
//! All layout math works in millimeters. Cards pack left-to-right,
//! top-to-bottom inside fixed 10 mm page margins, with the slack left
//! over after floor-division distributed as even inter-card spacing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed page margin on every side.
pub const PAGE_MARGIN_MM: f32 = 10.0;

/// Supported output page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    A3,
    A4,
    A5,
    Letter,
    Legal,
}

impl PageSize {
    /// Page dimensions in millimeters, portrait orientation.
    pub fn dimensions_mm(&self) -> (f32, f32) {
        match self {
            Self::A3 => (297.0, 420.0),
            Self::A4 => (210.0, 297.0),
            Self::A5 => (148.0, 210.0),
            Self::Letter => (215.9, 279.4),
            Self::Legal => (215.9, 355.6),
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A3 => write!(f, "A3"),
            Self::A4 => write!(f, "A4"),
            Self::A5 => write!(f, "A5"),
            Self::Letter => write!(f, "Letter"),
            Self::Legal => write!(f, "Legal"),
        }
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a3" => Ok(Self::A3),
            "a4" => Ok(Self::A4),
            "a5" => Ok(Self::A5),
            "letter" => Ok(Self::Letter),
            "legal" => Ok(Self::Legal),
            _ => Err(format!("Unknown page size: {}", s)),
        }
    }
}

/// How many cards fit on a page and where each one goes.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    pub cards_per_row: usize,
    pub cards_per_column: usize,
    pub cards_per_page: usize,
    /// Even horizontal spacing between cards, in mm.
    pub h_spacing: f32,
    /// Even vertical spacing between cards, in mm.
    pub v_spacing: f32,
    pub margin: f32,
    pub card_width: f32,
    pub card_height: f32,
    pub page_width: f32,
    pub page_height: f32,
}

impl GridLayout {
    /// Compute the packing of `card_width x card_height` (mm) cards on
    /// the page. At least one card per row/column is always laid out,
    /// even when the card overflows the usable area.
    pub fn compute(card_width_mm: f32, card_height_mm: f32, page: PageSize) -> Self {
        let (page_width, page_height) = page.dimensions_mm();
        let usable_width = (page_width - 2.0 * PAGE_MARGIN_MM).max(0.1);
        let usable_height = (page_height - 2.0 * PAGE_MARGIN_MM).max(0.1);

        let card_width = card_width_mm.max(0.1);
        let card_height = card_height_mm.max(0.1);

        let cards_per_row = ((usable_width / card_width).floor() as usize).max(1);
        let cards_per_column = ((usable_height / card_height).floor() as usize).max(1);

        let extra_width = usable_width - cards_per_row as f32 * card_width;
        let extra_height = usable_height - cards_per_column as f32 * card_height;
        let h_spacing = (extra_width / (cards_per_row + 1) as f32).max(0.0);
        let v_spacing = (extra_height / (cards_per_column + 1) as f32).max(0.0);

        Self {
            cards_per_row,
            cards_per_column,
            cards_per_page: cards_per_row * cards_per_column,
            h_spacing,
            v_spacing,
            margin: PAGE_MARGIN_MM,
            card_width,
            card_height,
            page_width,
            page_height,
        }
    }

    /// Top-left position in mm (origin top-left of the page) of the
    /// card in page slot `slot` (0-based, row-major).
    pub fn position_mm(&self, slot: usize) -> (f32, f32) {
        let row = slot / self.cards_per_row;
        let col = slot % self.cards_per_row;
        let x = self.margin + col as f32 * (self.card_width + self.h_spacing);
        let y = self.margin + row as f32 * (self.card_height + self.v_spacing);
        (x, y)
    }
}
