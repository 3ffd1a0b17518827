//! Event Bus implementation.
//!
//! Provides the EventBus struct used for editor-wide event distribution.
//! Instances are created by the application shell and injected into the
//! editor and history manager; there is no global bus.

use parking_lot::RwLock;
use uuid::Uuid;

use super::events::{AppEvent, EventCategory};

/// Subscription handle for unsubscribing from events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Filter to receive only specific event types
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    /// Receive all events.
    #[default]
    All,
    /// Receive events matching any of these categories.
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    /// Check if an event matches this filter
    pub fn matches(&self, event: &AppEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => categories.contains(&event.category()),
        }
    }
}

/// Type alias for event handler functions
type EventHandler = Box<dyn Fn(AppEvent) + Send + Sync>;

/// Event bus for editor-wide event distribution.
///
/// Dispatch is synchronous on the publishing thread: handlers run in
/// subscription order before `publish` returns. Events published with
/// no matching subscriber are dropped, not queued.
pub struct EventBus {
    /// Registered handlers, in subscription order.
    handlers: RwLock<Vec<(SubscriptionId, EventFilter, EventHandler)>>,
}

impl EventBus {
    /// Create a new event bus with no subscribers
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(Vec::new()),
        }
    }

    /// Publish an event to all matching subscribers.
    ///
    /// Returns the number of handlers that received the event.
    pub fn publish(&self, event: AppEvent) -> usize {
        tracing::trace!("event: {}", event.description());
        let handlers = self.handlers.read();
        let mut delivered = 0;
        for (_, filter, handler) in handlers.iter() {
            if filter.matches(&event) {
                handler(event.clone());
                delivered += 1;
            }
        }
        delivered
    }

    /// Subscribe to events with a synchronous handler.
    ///
    /// The handler runs on the publishing thread, so it should return
    /// quickly to avoid stalling event dispatch.
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(AppEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        let mut handlers = self.handlers.write();
        handlers.push((id, filter, Box::new(handler)));
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Unsubscribe from events.
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.write();
        let before = handlers.len();
        handlers.retain(|(sub_id, _, _)| *sub_id != id);
        let removed = handlers.len() != before;
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    /// Get the number of active subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
