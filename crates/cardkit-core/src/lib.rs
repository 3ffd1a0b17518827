//! # CardKit Core
//!
//! Foundation crate for CardKit: physical units and DPI conversion,
//! color parsing, the shared error taxonomy, and the typed event bus
//! that coordinates the editor, canvas surface, and side panels.

pub mod color;
pub mod error;
pub mod event_bus;
pub mod units;

pub use color::Color;
pub use error::{DataError, DesignError, Error, ExportError, Result};
pub use event_bus::{
    AppEvent, CanvasEvent, ElementEvent, ElementKind, EventBus, EventCategory, EventFilter,
    ExportEvent, HistoryEvent, SubscriptionId, Tool, ToolEvent,
};
pub use units::Unit;
