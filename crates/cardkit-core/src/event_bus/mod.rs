//! Event bus for editor coordination.
//!
//! The editing tools, canvas surface, and side panels never call each
//! other directly: every state transition is published here and observed
//! through subscriptions. Fan-out is synchronous and single-threaded;
//! events are not retained for late subscribers.

mod bus;
mod events;

pub use bus::{EventBus, EventFilter, SubscriptionId};
pub use events::{
    AppEvent, CanvasEvent, ElementEvent, ElementKind, EventCategory, ExportEvent, HistoryEvent,
    Tool, ToolEvent,
};
