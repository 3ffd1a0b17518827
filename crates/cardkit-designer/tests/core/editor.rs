use std::sync::{Arc, Mutex};

use cardkit_core::{AppEvent, ElementEvent, ElementKind, EventBus, EventFilter, Tool};
use cardkit_designer::{Document, EditorState, Element, Key, ResizeHandle, MIN_ELEMENT_SIZE};
use serde_json::json;

fn editor_with_shape() -> EditorState {
    let mut doc = Document::default();
    doc.add_element(Element::new(ElementKind::Shape, 100.0, 100.0)); // 100x100
    EditorState::new(doc, Arc::new(EventBus::new()))
}

#[test]
fn test_creation_tool_places_element_and_reverts_to_select() {
    let mut editor = EditorState::new(Document::default(), Arc::new(EventBus::new()));
    editor.set_tool(Tool::Qrcode);

    let request = editor.pointer_down(40.0, 60.0).expect("edit request");
    assert_eq!(request.kind, ElementKind::Qrcode);
    assert_eq!(editor.document().elements.len(), 1);
    assert_eq!(editor.document().elements[0].x, 40.0);
    assert_eq!(editor.selected(), Some(0));
    assert_eq!(editor.tool(), Tool::Select);
}

#[test]
fn test_click_selects_topmost_and_empty_click_deselects() {
    let mut doc = Document::default();
    doc.add_element(Element::new(ElementKind::Shape, 0.0, 0.0));
    doc.add_element(Element::new(ElementKind::Shape, 50.0, 50.0));
    let mut editor = EditorState::new(doc, Arc::new(EventBus::new()));

    editor.pointer_down(60.0, 60.0);
    assert_eq!(editor.selected(), Some(1));

    editor.pointer_down(2000.0, 2000.0);
    assert_eq!(editor.selected(), None);
}

#[test]
fn test_move_gesture_tracks_anchor_and_commits_on_release() {
    let mut editor = editor_with_shape();
    editor.set_tool(Tool::Move);

    // Grab 10 px inside the element, drag 50 px right, 30 px down.
    editor.pointer_down(110.0, 110.0);
    editor.pointer_drag(160.0, 140.0);
    let el = &editor.document().elements[0];
    assert_eq!((el.x, el.y), (150.0, 130.0));

    editor.pointer_up();
    // The committed move is undoable back to the original position.
    editor.undo();
    let el = &editor.document().elements[0];
    assert_eq!((el.x, el.y), (100.0, 100.0));
}

#[test]
fn test_resize_gesture_enforces_floor() {
    let mut editor = editor_with_shape();
    editor.set_tool(Tool::Resize);

    editor.pointer_down(200.0, 200.0);
    editor.pointer_drag(-500.0, -500.0);
    let el = &editor.document().elements[0];
    assert_eq!(el.width(), MIN_ELEMENT_SIZE);
    assert_eq!(el.height(), MIN_ELEMENT_SIZE);
    editor.pointer_up();
}

#[test]
fn test_northwest_handle_keeps_opposite_edge_fixed() {
    let mut editor = editor_with_shape();
    editor.pointer_down(150.0, 150.0); // select with default tool
    editor.begin_handle_resize(ResizeHandle::NorthWest, 100.0, 100.0);
    editor.pointer_drag(80.0, 70.0); // grow 20 left, 30 up

    let el = &editor.document().elements[0];
    assert_eq!((el.x, el.y), (80.0, 70.0));
    assert_eq!((el.width(), el.height()), (120.0, 130.0));
    // Bottom-right corner stayed put.
    assert_eq!((el.x + el.width(), el.y + el.height()), (200.0, 200.0));
}

#[test]
fn test_release_without_drag_pushes_nothing() {
    let mut editor = editor_with_shape();
    editor.set_tool(Tool::Move);
    editor.pointer_down(110.0, 110.0);
    editor.pointer_up();
    // Only the baseline snapshot exists, so undo has nowhere to go.
    assert!(!editor.history().can_undo());
}

#[test]
fn test_delete_key_removes_selection() {
    let mut editor = editor_with_shape();
    editor.pointer_down(110.0, 110.0);
    assert_eq!(editor.selected(), Some(0));

    editor.handle_key(Key::Delete);
    assert!(editor.document().elements.is_empty());
    assert_eq!(editor.selected(), None);

    // Undo restores the deleted element.
    editor.undo();
    assert_eq!(editor.document().elements.len(), 1);
}

#[test]
fn test_arrow_keys_nudge_by_one_pixel() {
    let mut editor = editor_with_shape();
    editor.pointer_down(110.0, 110.0);

    editor.handle_key(Key::Right);
    editor.handle_key(Key::Right);
    editor.handle_key(Key::Down);
    editor.handle_key(Key::Left);

    let el = &editor.document().elements[0];
    assert_eq!((el.x, el.y), (101.0, 101.0));
}

#[test]
fn test_apply_edit_merges_bag_and_is_undoable() {
    let mut editor = editor_with_shape();
    editor.apply_edit(0, &json!({"fill": "#FF0000", "opacity": 0.5}));

    let value = serde_json::to_value(&editor.document().elements[0]).unwrap();
    assert_eq!(value["properties"]["fill"], "#FF0000");
    assert_eq!(value["properties"]["opacity"], 0.5);

    editor.undo();
    let value = serde_json::to_value(&editor.document().elements[0]).unwrap();
    assert_eq!(value["properties"]["fill"], "white");
}

#[test]
fn test_apply_edit_on_stale_index_is_noop() {
    let mut editor = editor_with_shape();
    editor.apply_edit(42, &json!({"fill": "#FF0000"}));
    assert_eq!(editor.document().elements.len(), 1);
}

#[test]
fn test_double_click_returns_edit_request() {
    let mut editor = editor_with_shape();
    let request = editor.double_click(110.0, 110.0).expect("hit");
    assert_eq!(request.index, 0);
    assert_eq!(request.kind, ElementKind::Shape);
    assert!(editor.double_click(9000.0, 9000.0).is_none());
}

#[test]
fn test_undo_redo_restores_background_too() {
    let mut editor = editor_with_shape();
    editor.set_background("#123456");
    assert_eq!(editor.document().background_color, "#123456");

    editor.undo();
    assert_eq!(editor.document().background_color, "#FFFFFF");
    editor.redo();
    assert_eq!(editor.document().background_color, "#123456");
}

#[test]
fn test_duplicate_selects_the_copy() {
    let mut editor = editor_with_shape();
    editor.pointer_down(110.0, 110.0);
    editor.duplicate_selected();

    assert_eq!(editor.document().elements.len(), 2);
    assert_eq!(editor.selected(), Some(1));
    assert_eq!(editor.document().elements[1].x, 120.0);
}

#[test]
fn test_event_stream_for_select_and_edit() {
    let bus = Arc::new(EventBus::new());
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    bus.subscribe(EventFilter::All, move |event| {
        if let AppEvent::Element(e) = event {
            sink.lock().unwrap().push(match e {
                ElementEvent::Created { .. } => "created",
                ElementEvent::Selected { .. } => "selected",
                ElementEvent::Deselected => "deselected",
                ElementEvent::Moved { .. } => "moved",
                ElementEvent::Resized { .. } => "resized",
                ElementEvent::Deleted { .. } => "deleted",
                ElementEvent::Edited { .. } => "edited",
            });
        }
    });

    let mut doc = Document::default();
    doc.add_element(Element::new(ElementKind::Shape, 0.0, 0.0));
    let mut editor = EditorState::new(doc, bus);

    editor.set_tool(Tool::Move);
    editor.pointer_down(50.0, 50.0);
    editor.pointer_drag(60.0, 60.0);
    editor.pointer_up();
    editor.pointer_down(5000.0, 5000.0);

    assert_eq!(
        *log.lock().unwrap(),
        vec!["selected", "moved", "edited", "deselected"]
    );
}
