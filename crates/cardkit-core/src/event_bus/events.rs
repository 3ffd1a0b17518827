//! Event type definitions for the event bus.
//!
//! This module defines all editor events organized by category. Events
//! are cloneable and serializable for logging and replay.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::units::Unit;

/// The active editing tool.
///
/// `Select`, `Move`, and `Resize` operate on existing elements; the
/// remaining tools create a new element of that kind on the next click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Select,
    Move,
    Resize,
    Text,
    Shape,
    Image,
    Qrcode,
}

impl Default for Tool {
    fn default() -> Self {
        Self::Select
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select => write!(f, "select"),
            Self::Move => write!(f, "move"),
            Self::Resize => write!(f, "resize"),
            Self::Text => write!(f, "text"),
            Self::Shape => write!(f, "shape"),
            Self::Image => write!(f, "image"),
            Self::Qrcode => write!(f, "qrcode"),
        }
    }
}

impl Tool {
    /// The element kind this tool creates, if it is a creation tool.
    pub fn creates(&self) -> Option<ElementKind> {
        match self {
            Self::Text => Some(ElementKind::Text),
            Self::Shape => Some(ElementKind::Shape),
            Self::Image => Some(ElementKind::Image),
            Self::Qrcode => Some(ElementKind::Qrcode),
            _ => None,
        }
    }
}

/// The kind of a canvas element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Shape,
    Image,
    Qrcode,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Shape => write!(f, "shape"),
            Self::Image => write!(f, "image"),
            Self::Qrcode => write!(f, "qrcode"),
        }
    }
}

impl FromStr for ElementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "shape" => Ok(Self::Shape),
            "image" => Ok(Self::Image),
            "qrcode" => Ok(Self::Qrcode),
            _ => Err(format!("Unknown element kind: {}", s)),
        }
    }
}

/// Root event enum for all editor events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppEvent {
    /// Element lifecycle events
    Element(ElementEvent),
    /// Tool selection events
    Tool(ToolEvent),
    /// Canvas gesture and property events
    Canvas(CanvasEvent),
    /// Undo/redo events
    History(HistoryEvent),
    /// Batch export progress events
    Export(ExportEvent),
}

impl AppEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            AppEvent::Element(_) => EventCategory::Element,
            AppEvent::Tool(_) => EventCategory::Tool,
            AppEvent::Canvas(_) => EventCategory::Canvas,
            AppEvent::History(_) => EventCategory::History,
            AppEvent::Export(_) => EventCategory::Export,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            AppEvent::Element(e) => e.description(),
            AppEvent::Tool(e) => e.description(),
            AppEvent::Canvas(e) => e.description(),
            AppEvent::History(e) => e.description(),
            AppEvent::Export(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Element lifecycle events.
    Element,
    /// Tool selection events.
    Tool,
    /// Canvas gesture and property events.
    Canvas,
    /// Undo/redo events.
    History,
    /// Batch export progress events.
    Export,
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventCategory::Element => write!(f, "Element"),
            EventCategory::Tool => write!(f, "Tool"),
            EventCategory::Canvas => write!(f, "Canvas"),
            EventCategory::History => write!(f, "History"),
            EventCategory::Export => write!(f, "Export"),
        }
    }
}

/// Element lifecycle events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ElementEvent {
    /// A new element was added to the document.
    Created {
        /// Index in paint order.
        index: usize,
        /// Kind of the new element.
        kind: ElementKind,
    },
    /// An element became the selection.
    Selected {
        /// Index of the selected element.
        index: usize,
    },
    /// The selection was cleared.
    Deselected,
    /// An element's position changed during a drag.
    Moved {
        /// Index of the element.
        index: usize,
        /// New x position in pixels.
        x: f32,
        /// New y position in pixels.
        y: f32,
    },
    /// An element's size changed during a resize gesture.
    Resized {
        /// Index of the element.
        index: usize,
        /// New width in pixels.
        width: f32,
        /// New height in pixels.
        height: f32,
    },
    /// An element was removed.
    Deleted {
        /// Index the element occupied.
        index: usize,
    },
    /// An element's properties were committed (gesture end or dialog save).
    Edited {
        /// Index of the element.
        index: usize,
    },
}

impl ElementEvent {
    fn description(&self) -> String {
        match self {
            ElementEvent::Created { index, kind } => {
                format!("Created {} element at index {}", kind, index)
            }
            ElementEvent::Selected { index } => format!("Selected element {}", index),
            ElementEvent::Deselected => "Selection cleared".to_string(),
            ElementEvent::Moved { index, x, y } => {
                format!("Moved element {} to ({:.0}, {:.0})", index, x, y)
            }
            ElementEvent::Resized {
                index,
                width,
                height,
            } => format!("Resized element {} to {:.0}x{:.0}", index, width, height),
            ElementEvent::Deleted { index } => format!("Deleted element {}", index),
            ElementEvent::Edited { index } => format!("Edited element {}", index),
        }
    }
}

/// Tool selection events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ToolEvent {
    /// The active tool changed.
    Changed {
        /// Previously active tool.
        old: Tool,
        /// Newly active tool.
        new: Tool,
    },
}

impl ToolEvent {
    fn description(&self) -> String {
        match self {
            ToolEvent::Changed { old, new } => format!("Tool: {} -> {}", old, new),
        }
    }
}

/// Canvas gesture and property events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CanvasEvent {
    /// Pointer pressed on the canvas.
    Clicked {
        /// Pointer x in canvas pixels.
        x: f32,
        /// Pointer y in canvas pixels.
        y: f32,
        /// Whether an element was hit.
        hit: bool,
    },
    /// Pointer dragged across the canvas.
    Dragged {
        /// Pointer x in canvas pixels.
        x: f32,
        /// Pointer y in canvas pixels.
        y: f32,
    },
    /// Pointer released.
    Released,
    /// Canvas physical size changed.
    SizeChanged {
        /// New width in `unit`.
        width: f32,
        /// New height in `unit`.
        height: f32,
        /// Unit of the dimensions.
        unit: Unit,
        /// Dots per inch for unit conversion.
        dpi: u32,
    },
    /// Canvas background color changed.
    BackgroundChanged {
        /// New background color value.
        color: String,
    },
}

impl CanvasEvent {
    fn description(&self) -> String {
        match self {
            CanvasEvent::Clicked { x, y, hit } => {
                format!("Click at ({:.0}, {:.0}), hit={}", x, y, hit)
            }
            CanvasEvent::Dragged { x, y } => format!("Drag at ({:.0}, {:.0})", x, y),
            CanvasEvent::Released => "Pointer released".to_string(),
            CanvasEvent::SizeChanged {
                width,
                height,
                unit,
                dpi,
            } => format!("Canvas size: {}x{}{} @ {} DPI", width, height, unit, dpi),
            CanvasEvent::BackgroundChanged { color } => {
                format!("Canvas background: {}", color)
            }
        }
    }
}

/// Undo/redo events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum HistoryEvent {
    /// An undo was applied.
    Undone,
    /// A redo was applied.
    Redone,
    /// Undo/redo availability changed; keeps UI affordances consistent.
    StateChanged {
        /// Whether undo is currently possible.
        can_undo: bool,
        /// Whether redo is currently possible.
        can_redo: bool,
    },
}

impl HistoryEvent {
    fn description(&self) -> String {
        match self {
            HistoryEvent::Undone => "Undo".to_string(),
            HistoryEvent::Redone => "Redo".to_string(),
            HistoryEvent::StateChanged { can_undo, can_redo } => {
                format!("History: undo={}, redo={}", can_undo, can_redo)
            }
        }
    }
}

/// Batch export progress events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ExportEvent {
    /// A batch export started.
    Started {
        /// Number of rows to process.
        total: usize,
    },
    /// One row finished (successfully or not).
    Progress {
        /// 1-based row counter.
        current: usize,
        /// Number of rows in the batch.
        total: usize,
    },
    /// A row failed to render and was skipped.
    RowFailed {
        /// 1-based row number.
        row: usize,
        /// Why the row failed.
        reason: String,
    },
    /// The batch finished.
    Completed {
        /// Rows successfully exported.
        exported: usize,
        /// Rows skipped after a failure.
        failed: usize,
    },
}

impl ExportEvent {
    fn description(&self) -> String {
        match self {
            ExportEvent::Started { total } => format!("Export started: {} rows", total),
            ExportEvent::Progress { current, total } => {
                format!("Export progress: {}/{}", current, total)
            }
            ExportEvent::RowFailed { row, reason } => {
                format!("Row {} failed: {}", row, reason)
            }
            ExportEvent::Completed { exported, failed } => {
                format!("Export completed: {} exported, {} failed", exported, failed)
            }
        }
    }
}
