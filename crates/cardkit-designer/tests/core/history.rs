use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use cardkit_core::{AppEvent, ElementKind, EventBus, EventCategory, EventFilter, HistoryEvent};
use cardkit_designer::{Element, HistoryManager, MAX_HISTORY};

fn elements(n: usize) -> Vec<Element> {
    (0..n)
        .map(|i| Element::new(ElementKind::Shape, i as f32, 0.0))
        .collect()
}

#[test]
fn test_new_manager_has_nothing_to_undo() {
    let manager = HistoryManager::new(Arc::new(EventBus::new()));
    assert!(!manager.can_undo());
    assert!(!manager.can_redo());
    assert_eq!(manager.len(), 0);
}

#[test]
fn test_single_push_is_the_baseline() {
    let mut manager = HistoryManager::new(Arc::new(EventBus::new()));
    manager.push(&elements(1), "#FFFFFF");
    // One state: nothing earlier to return to.
    assert!(!manager.can_undo());
    assert!(!manager.can_redo());
}

#[test]
fn test_undo_returns_previous_state() {
    let mut manager = HistoryManager::new(Arc::new(EventBus::new()));
    manager.push(&elements(1), "#FFFFFF");
    manager.push(&elements(2), "#000000");

    let snapshot = manager.undo().expect("should undo");
    assert_eq!(snapshot.elements.len(), 1);
    assert_eq!(snapshot.background_color, "#FFFFFF");
    assert!(!manager.can_undo());
    assert!(manager.can_redo());
}

#[test]
fn test_redo_returns_next_state() {
    let mut manager = HistoryManager::new(Arc::new(EventBus::new()));
    manager.push(&elements(1), "#FFFFFF");
    manager.push(&elements(2), "#000000");
    manager.undo();

    let snapshot = manager.redo().expect("should redo");
    assert_eq!(snapshot.elements.len(), 2);
    assert_eq!(snapshot.background_color, "#000000");
    assert!(!manager.can_redo());
}

#[test]
fn test_undo_redo_inverse_law() {
    let mut manager = HistoryManager::new(Arc::new(EventBus::new()));
    let states: Vec<Vec<Element>> = (1..=6).map(elements).collect();
    for state in &states {
        manager.push(state, "#FFFFFF");
    }

    let n = states.len() - 1;
    for _ in 0..n {
        manager.undo().expect("undo within range");
    }
    let mut last = None;
    for _ in 0..n {
        last = manager.redo();
    }
    let snapshot = last.expect("redo within range");
    assert_eq!(snapshot.elements, states[states.len() - 1]);
}

#[test]
fn test_underflow_and_overflow_are_none() {
    let mut manager = HistoryManager::new(Arc::new(EventBus::new()));
    assert!(manager.undo().is_none());
    assert!(manager.redo().is_none());

    manager.push(&elements(1), "#FFFFFF");
    assert!(manager.undo().is_none());
    assert!(manager.redo().is_none());
}

#[test]
fn test_push_truncates_redo_branch() {
    let mut manager = HistoryManager::new(Arc::new(EventBus::new()));
    manager.push(&elements(1), "#FFFFFF");
    manager.push(&elements(2), "#FFFFFF");
    manager.push(&elements(3), "#FFFFFF");
    manager.undo();
    manager.undo();
    assert!(manager.can_redo());

    manager.push(&elements(9), "#FFFFFF");
    assert!(!manager.can_redo());
    // The branch with 2- and 3-element states is gone.
    let snapshot = manager.undo().expect("baseline remains");
    assert_eq!(snapshot.elements.len(), 1);
}

#[test]
fn test_history_bound_evicts_oldest() {
    let mut manager = HistoryManager::new(Arc::new(EventBus::new()));
    for i in 0..60 {
        manager.push(&elements(i + 1), "#FFFFFF");
    }
    assert_eq!(manager.len(), MAX_HISTORY);
    assert!(!manager.can_redo());

    // Walk all the way back: the oldest retained state is push #11.
    let mut oldest = None;
    while manager.can_undo() {
        oldest = manager.undo();
    }
    assert_eq!(oldest.expect("retained tail").elements.len(), 11);
}

#[test]
fn test_state_changed_emitted_on_every_transition() {
    let bus = Arc::new(EventBus::new());
    let count = Arc::new(AtomicUsize::new(0));
    let last_can_undo = Arc::new(AtomicBool::new(false));

    let (c, l) = (count.clone(), last_can_undo.clone());
    bus.subscribe(
        EventFilter::Categories(vec![EventCategory::History]),
        move |event| {
            if let AppEvent::History(HistoryEvent::StateChanged { can_undo, .. }) = event {
                c.fetch_add(1, Ordering::SeqCst);
                l.store(can_undo, Ordering::SeqCst);
            }
        },
    );

    let mut manager = HistoryManager::new(bus);
    manager.push(&elements(1), "#FFFFFF");
    manager.push(&elements(2), "#FFFFFF");
    manager.undo();
    manager.redo();

    assert_eq!(count.load(Ordering::SeqCst), 4);
    assert!(last_can_undo.load(Ordering::SeqCst));
}
