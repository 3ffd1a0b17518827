//! Canvas elements: positioned, typed visual primitives.
//!
//! An element is a position plus a type-specific property bag. The
//! property bags serialize under a `type`/`properties` pair so documents
//! and templates keep the same JSON shape the property editors produce.

use cardkit_core::{DesignError, ElementKind};
use serde::{Deserialize, Serialize};

mod image;
mod qrcode;
mod shape;
mod text;

pub use image::ImageProps;
pub use qrcode::QrCodeProps;
pub use shape::{DashStyle, ShapeProps};
pub use text::{Align, TextProps};

/// Minimum usable element dimension enforced during interactive resize.
pub const MIN_ELEMENT_SIZE: f32 = 20.0;

/// A single positioned visual primitive on a document's canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Binding target id; unique within a document when mappings refer
    /// to it. Editor-created elements start without one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Top-left x in pixels, canvas origin top-left, y-down.
    pub x: f32,
    /// Top-left y in pixels.
    pub y: f32,
    #[serde(flatten)]
    pub props: ElementProps,
}

/// Type-specific element properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "properties", rename_all = "lowercase")]
pub enum ElementProps {
    Text(TextProps),
    Shape(ShapeProps),
    Image(ImageProps),
    Qrcode(QrCodeProps),
}

impl ElementProps {
    /// Default properties for a freshly created element of `kind`.
    pub fn defaults(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Text => Self::Text(TextProps::default()),
            ElementKind::Shape => Self::Shape(ShapeProps::default()),
            ElementKind::Image => Self::Image(ImageProps::default()),
            ElementKind::Qrcode => Self::Qrcode(QrCodeProps::default()),
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Text(_) => ElementKind::Text,
            Self::Shape(_) => ElementKind::Shape,
            Self::Image(_) => ElementKind::Image,
            Self::Qrcode(_) => ElementKind::Qrcode,
        }
    }
}

impl Element {
    /// Create an element of `kind` at the given position with the
    /// type-specific default properties.
    pub fn new(kind: ElementKind, x: f32, y: f32) -> Self {
        Self {
            id: None,
            x,
            y,
            props: ElementProps::defaults(kind),
        }
    }

    /// Create an element from a type tag and an optional caller property
    /// bag merged over the type defaults.
    ///
    /// Rejects unknown type tags with [`DesignError::InvalidElementType`].
    pub fn with_props(
        kind: &str,
        x: f32,
        y: f32,
        overrides: Option<serde_json::Value>,
    ) -> Result<Self, DesignError> {
        let kind: ElementKind = kind
            .parse()
            .map_err(|_| DesignError::InvalidElementType {
                kind: kind.to_string(),
            })?;
        let mut element = Self::new(kind, x, y);
        if let Some(bag) = overrides {
            element.merge_props(&bag)?;
        }
        Ok(element)
    }

    pub fn kind(&self) -> ElementKind {
        self.props.kind()
    }

    /// Merge a JSON property bag over the current properties, keeping
    /// the element's type. This is the contract the property-editing
    /// dialogs use: they hand back a bag, the editor applies it.
    pub fn merge_props(&mut self, bag: &serde_json::Value) -> Result<(), DesignError> {
        let kind = self.kind();
        let invalid = |reason: String| DesignError::InvalidProperties {
            kind: kind.to_string(),
            reason,
        };

        let mut current = match &self.props {
            ElementProps::Text(p) => serde_json::to_value(p),
            ElementProps::Shape(p) => serde_json::to_value(p),
            ElementProps::Image(p) => serde_json::to_value(p),
            ElementProps::Qrcode(p) => serde_json::to_value(p),
        }
        .map_err(|e| invalid(e.to_string()))?;

        let incoming = bag
            .as_object()
            .ok_or_else(|| invalid("properties must be an object".to_string()))?;
        if let Some(target) = current.as_object_mut() {
            for (key, value) in incoming {
                target.insert(key.clone(), value.clone());
            }
        }

        self.props = match kind {
            ElementKind::Text => ElementProps::Text(
                serde_json::from_value(current).map_err(|e| invalid(e.to_string()))?,
            ),
            ElementKind::Shape => ElementProps::Shape(
                serde_json::from_value(current).map_err(|e| invalid(e.to_string()))?,
            ),
            ElementKind::Image => ElementProps::Image(
                serde_json::from_value(current).map_err(|e| invalid(e.to_string()))?,
            ),
            ElementKind::Qrcode => ElementProps::Qrcode(
                serde_json::from_value(current).map_err(|e| invalid(e.to_string()))?,
            ),
        };
        Ok(())
    }

    pub fn width(&self) -> f32 {
        match &self.props {
            ElementProps::Text(p) => p.width,
            ElementProps::Shape(p) => p.width,
            ElementProps::Image(p) => p.width,
            ElementProps::Qrcode(p) => p.width,
        }
    }

    pub fn height(&self) -> f32 {
        match &self.props {
            ElementProps::Text(p) => p.height,
            ElementProps::Shape(p) => p.height,
            ElementProps::Image(p) => p.height,
            ElementProps::Qrcode(p) => p.height,
        }
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        match &mut self.props {
            ElementProps::Text(p) => {
                p.width = width;
                p.height = height;
            }
            ElementProps::Shape(p) => {
                p.width = width;
                p.height = height;
            }
            ElementProps::Image(p) => {
                p.width = width;
                p.height = height;
            }
            ElementProps::Qrcode(p) => {
                p.width = width;
                p.height = height;
            }
        }
    }

    /// Axis-aligned bounding box `(x, y, width, height)`.
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        (self.x, self.y, self.width(), self.height())
    }

    /// AABB containment test used for canvas hit-testing.
    pub fn hit_test(&self, px: f32, py: f32) -> bool {
        let (x, y, w, h) = self.bounds();
        x <= px && px <= x + w && y <= py && py <= y + h
    }

    /// The primary content field a data mapping writes into:
    /// `text` for text, `path` for images, `content` for QR codes.
    /// Shapes have no content field.
    pub fn primary_content(&self) -> Option<&str> {
        match &self.props {
            ElementProps::Text(p) => Some(&p.text),
            ElementProps::Image(p) => Some(&p.path),
            ElementProps::Qrcode(p) => Some(&p.content),
            ElementProps::Shape(_) => None,
        }
    }

    /// Overwrite the primary content field. Returns false for elements
    /// without one (shapes), which callers treat as a logged no-op.
    pub fn set_primary_content(&mut self, value: &str) -> bool {
        match &mut self.props {
            ElementProps::Text(p) => {
                p.text = value.to_string();
                true
            }
            ElementProps::Image(p) => {
                p.path = value.to_string();
                true
            }
            ElementProps::Qrcode(p) => {
                p.content = value.to_string();
                true
            }
            ElementProps::Shape(_) => false,
        }
    }
}
