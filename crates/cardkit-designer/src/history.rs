//! Undo/redo history as a bounded linear stack of document snapshots.
//!
//! Every committed mutation pushes a full deep copy of the element list
//! and background color. Pushing while the cursor is not at the tail
//! discards the redo-able future; the stack caps at [`MAX_HISTORY`]
//! entries by evicting the oldest.

use std::sync::Arc;

use cardkit_core::{AppEvent, EventBus, HistoryEvent};

use crate::element::Element;

/// Maximum number of retained history states.
pub const MAX_HISTORY: usize = 50;

/// An immutable snapshot of a document's mutable state.
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySnapshot {
    pub elements: Vec<Element>,
    pub background_color: String,
}

/// Linear undo/redo stack with a current-index cursor.
pub struct HistoryManager {
    states: Vec<HistorySnapshot>,
    current: usize,
    bus: Arc<EventBus>,
}

impl HistoryManager {
    pub fn new(bus: Arc<EventBus>) -> Self {
        Self {
            states: Vec::new(),
            current: 0,
            bus,
        }
    }

    /// Push a new state after a committed mutation.
    ///
    /// Truncates any redo-able states past the cursor first, then
    /// appends; evicts the oldest state beyond the cap, shifting the
    /// cursor accordingly.
    pub fn push(&mut self, elements: &[Element], background_color: &str) {
        if !self.states.is_empty() && self.current + 1 < self.states.len() {
            self.states.truncate(self.current + 1);
        }

        self.states.push(HistorySnapshot {
            elements: elements.to_vec(),
            background_color: background_color.to_string(),
        });
        self.current = self.states.len() - 1;

        if self.states.len() > MAX_HISTORY {
            self.states.remove(0);
            self.current -= 1;
        }

        self.emit_state_changed();
    }

    /// Step the cursor back and return the state there, or `None` when
    /// there is nothing to undo.
    pub fn undo(&mut self) -> Option<HistorySnapshot> {
        if !self.can_undo() {
            return None;
        }
        self.current -= 1;
        self.emit_state_changed();
        Some(self.states[self.current].clone())
    }

    /// Step the cursor forward and return the state there, or `None`
    /// when there is nothing to redo.
    pub fn redo(&mut self) -> Option<HistorySnapshot> {
        if !self.can_redo() {
            return None;
        }
        self.current += 1;
        self.emit_state_changed();
        Some(self.states[self.current].clone())
    }

    pub fn can_undo(&self) -> bool {
        !self.states.is_empty() && self.current > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current + 1 < self.states.len()
    }

    /// Number of retained states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn clear(&mut self) {
        self.states.clear();
        self.current = 0;
        self.emit_state_changed();
    }

    /// UI affordances (undo/redo buttons) track this event; it fires on
    /// every push, undo, redo, and clear.
    fn emit_state_changed(&self) {
        self.bus.publish(AppEvent::History(HistoryEvent::StateChanged {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }));
    }
}

impl std::fmt::Debug for HistoryManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryManager")
            .field("states", &self.states.len())
            .field("current", &self.current)
            .finish()
    }
}
