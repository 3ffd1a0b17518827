//! The document model: one editable component or template instance.
//!
//! A document is pure data: a physical canvas size, a background color,
//! and an ordered list of elements. List order is paint order, back to
//! front, so the last element is topmost and wins hit-testing.

use cardkit_core::{units, Unit};
use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementProps, MIN_ELEMENT_SIZE};

/// Offset applied to duplicated elements so the copy is visible.
const DUPLICATE_OFFSET: f32 = 20.0;

/// The in-memory model of one component's canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Canvas width in `unit`.
    pub width: f32,
    /// Canvas height in `unit`.
    pub height: f32,
    pub unit: Unit,
    pub dpi: u32,
    /// Canvas background, a color name or `#RRGGBB` hex.
    pub background_color: String,
    /// Paint-ordered elements; index 0 is bottommost.
    pub elements: Vec<Element>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(300.0, 300.0, Unit::Px, 96)
    }
}

impl Document {
    pub fn new(width: f32, height: f32, unit: Unit, dpi: u32) -> Self {
        Self {
            width,
            height,
            unit,
            dpi,
            background_color: "#FFFFFF".to_string(),
            elements: Vec::new(),
        }
    }

    /// The declared canvas size in whole pixels, never zero.
    pub fn pixel_size(&self) -> (u32, u32) {
        let w = units::to_pixels(self.width, self.unit, self.dpi).max(1);
        let h = units::to_pixels(self.height, self.unit, self.dpi).max(1);
        (w, h)
    }

    pub fn element(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    pub fn element_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.elements.get_mut(index)
    }

    /// Append an element (topmost) and return its index.
    pub fn add_element(&mut self, element: Element) -> usize {
        self.elements.push(element);
        self.elements.len() - 1
    }

    /// Set an element's position. Positions are not clamped to the
    /// canvas: elements may extend beyond or sit entirely off-canvas.
    /// Unknown indices are a no-op.
    pub fn move_element(&mut self, index: usize, x: f32, y: f32) {
        if let Some(el) = self.elements.get_mut(index) {
            el.x = x;
            el.y = y;
        }
    }

    /// Resize an element, clamping both dimensions to the minimum usable
    /// size. Text elements only take the width here; their height is
    /// re-derived from wrapping by the editor after layout.
    pub fn resize_element(&mut self, index: usize, width: f32, height: f32) {
        let Some(el) = self.elements.get_mut(index) else {
            return;
        };
        let width = width.max(MIN_ELEMENT_SIZE);
        let height = height.max(MIN_ELEMENT_SIZE);
        match &mut el.props {
            ElementProps::Text(p) => {
                p.width = width;
            }
            _ => el.set_size(width, height),
        }
    }

    pub fn remove_element(&mut self, index: usize) -> Option<Element> {
        if index < self.elements.len() {
            Some(self.elements.remove(index))
        } else {
            None
        }
    }

    /// Deep-copy an element, offset by 20 px on both axes, appended to
    /// the end (brought to front). The copy's binding id is cleared so
    /// mapping targets stay unique. Returns the new index.
    pub fn duplicate_element(&mut self, index: usize) -> Option<usize> {
        let mut copy = self.elements.get(index)?.clone();
        copy.id = None;
        copy.x += DUPLICATE_OFFSET;
        copy.y += DUPLICATE_OFFSET;
        Some(self.add_element(copy))
    }

    /// Move an element to the end of the paint order (topmost).
    /// Returns its new index.
    pub fn bring_to_front(&mut self, index: usize) -> Option<usize> {
        if index >= self.elements.len() {
            return None;
        }
        let el = self.elements.remove(index);
        self.elements.push(el);
        Some(self.elements.len() - 1)
    }

    /// Move an element to the start of the paint order (bottommost).
    pub fn send_to_back(&mut self, index: usize) -> Option<usize> {
        if index >= self.elements.len() {
            return None;
        }
        let el = self.elements.remove(index);
        self.elements.insert(0, el);
        Some(0)
    }

    /// Topmost element containing the point, if any. Elements are
    /// checked in reverse paint order so the visually top one wins.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<usize> {
        self.elements
            .iter()
            .enumerate()
            .rev()
            .find(|(_, el)| el.hit_test(x, y))
            .map(|(index, _)| index)
    }

    /// Maximum extent of all elements `(max_x, max_y)` from the canvas
    /// origin. Used to auto-size the export surface so nothing clips.
    pub fn content_bounds(&self) -> (f32, f32) {
        let mut max_x = 0.0f32;
        let mut max_y = 0.0f32;
        for el in &self.elements {
            let (x, y, w, h) = el.bounds();
            max_x = max_x.max(x + w);
            max_y = max_y.max(y + h);
        }
        (max_x, max_y)
    }
}
