//! The selection and manipulation state machine.
//!
//! Tracks the active tool, the selected element, and in-progress drag or
//! resize gestures. All mutations flow through here: the editor updates
//! the document, publishes typed events on the bus, and pushes history
//! snapshots when a gesture commits. The canvas widget feeds pointer and
//! key input in; property dialogs hand edited bags back through
//! [`EditorState::apply_edit`].

use std::sync::Arc;

use cardkit_core::{
    AppEvent, CanvasEvent, ElementEvent, ElementKind, EventBus, HistoryEvent, Tool, ToolEvent,
    Unit,
};

use crate::document::Document;
use crate::element::{Element, ElementProps, MIN_ELEMENT_SIZE};
use crate::history::HistoryManager;
use crate::text_layout;

/// Which resize handle is being dragged. Top/left handles keep the
/// opposite edge fixed by adjusting the element position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeHandle {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl ResizeHandle {
    fn anchors_left(&self) -> bool {
        matches!(self, Self::NorthWest | Self::SouthWest)
    }

    fn anchors_top(&self) -> bool {
        matches!(self, Self::NorthWest | Self::NorthEast)
    }
}

/// Keyboard input the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Delete,
    Backspace,
    Left,
    Right,
    Up,
    Down,
}

/// In-progress pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Idle,
    Moving {
        /// Pointer offset from the element origin at grab time.
        anchor: (f32, f32),
        /// Whether any drag actually happened (commits a snapshot).
        moved: bool,
    },
    Resizing {
        handle: ResizeHandle,
        start: (f32, f32),
        original_size: (f32, f32),
        original_pos: (f32, f32),
        resized: bool,
    },
}

/// A request for the shell to open the type-specific property dialog.
///
/// The dialog edits a copy; saving comes back through
/// [`EditorState::apply_edit`] with the resulting property bag.
#[derive(Debug, Clone)]
pub struct EditRequest {
    pub index: usize,
    pub kind: ElementKind,
    pub element: Element,
}

/// The editor: a document plus tool/selection/gesture state, history,
/// and the event bus everything else observes.
pub struct EditorState {
    document: Document,
    tool: Tool,
    selected: Option<usize>,
    gesture: Gesture,
    history: HistoryManager,
    bus: Arc<EventBus>,
}

impl EditorState {
    /// Wrap a document for editing. The initial state is pushed as the
    /// history baseline so the first mutation can be undone back to it.
    pub fn new(document: Document, bus: Arc<EventBus>) -> Self {
        let mut history = HistoryManager::new(bus.clone());
        history.push(&document.elements, &document.background_color);
        Self {
            document,
            tool: Tool::Select,
            selected: None,
            gesture: Gesture::Idle,
            history,
            bus,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn set_tool(&mut self, tool: Tool) {
        if tool == self.tool {
            return;
        }
        let old = std::mem::replace(&mut self.tool, tool);
        self.bus
            .publish(AppEvent::Tool(ToolEvent::Changed { old, new: tool }));
    }

    /// Pointer pressed on the canvas.
    ///
    /// Creation tools place a new defaulted element at the click point
    /// and return an [`EditRequest`] so the shell can open the property
    /// dialog; the tool then snaps back to `Select`. Selection tools
    /// hit-test top-to-bottom and arm move/resize gestures.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> Option<EditRequest> {
        if let Some(kind) = self.tool.creates() {
            return Some(self.create_at(kind, x, y));
        }

        let hit = self.document.hit_test(x, y);
        self.bus.publish(AppEvent::Canvas(CanvasEvent::Clicked {
            x,
            y,
            hit: hit.is_some(),
        }));

        match hit {
            Some(index) => {
                self.select(index);
                let el = &self.document.elements[index];
                match self.tool {
                    Tool::Move => {
                        self.gesture = Gesture::Moving {
                            anchor: (x - el.x, y - el.y),
                            moved: false,
                        };
                    }
                    Tool::Resize => {
                        self.gesture = Gesture::Resizing {
                            handle: ResizeHandle::SouthEast,
                            start: (x, y),
                            original_size: (el.width(), el.height()),
                            original_pos: (el.x, el.y),
                            resized: false,
                        };
                    }
                    _ => {}
                }
            }
            None => self.deselect(),
        }
        None
    }

    /// Pointer pressed on a specific resize handle of the selection.
    pub fn begin_handle_resize(&mut self, handle: ResizeHandle, x: f32, y: f32) {
        let Some(index) = self.selected else {
            return;
        };
        let Some(el) = self.document.element(index) else {
            return;
        };
        self.gesture = Gesture::Resizing {
            handle,
            start: (x, y),
            original_size: (el.width(), el.height()),
            original_pos: (el.x, el.y),
            resized: false,
        };
    }

    /// Pointer dragged with the button held.
    pub fn pointer_drag(&mut self, x: f32, y: f32) {
        let Some(index) = self.selected.filter(|&i| i < self.document.elements.len()) else {
            return;
        };

        match &mut self.gesture {
            Gesture::Moving { anchor, moved } => {
                let (ax, ay) = *anchor;
                *moved = true;
                self.document.move_element(index, x - ax, y - ay);
                let el = &self.document.elements[index];
                self.bus.publish(AppEvent::Element(ElementEvent::Moved {
                    index,
                    x: el.x,
                    y: el.y,
                }));
                self.bus
                    .publish(AppEvent::Canvas(CanvasEvent::Dragged { x, y }));
            }
            Gesture::Resizing {
                handle,
                start,
                original_size,
                original_pos,
                resized,
            } => {
                let handle = *handle;
                let (sx, sy) = *start;
                let (ow, oh) = *original_size;
                let (ox, oy) = *original_pos;
                *resized = true;

                let dx = x - sx;
                let dy = y - sy;
                Self::apply_resize(&mut self.document, index, handle, dx, dy, ow, oh, ox, oy);

                let el = &self.document.elements[index];
                self.bus.publish(AppEvent::Element(ElementEvent::Resized {
                    index,
                    width: el.width(),
                    height: el.height(),
                }));
                self.bus
                    .publish(AppEvent::Canvas(CanvasEvent::Dragged { x, y }));
            }
            Gesture::Idle => {}
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn apply_resize(
        document: &mut Document,
        index: usize,
        handle: ResizeHandle,
        dx: f32,
        dy: f32,
        ow: f32,
        oh: f32,
        ox: f32,
        oy: f32,
    ) {
        let new_width = if handle.anchors_left() {
            (ow - dx).max(MIN_ELEMENT_SIZE)
        } else {
            (ow + dx).max(MIN_ELEMENT_SIZE)
        };
        let new_x = if handle.anchors_left() {
            ox + (ow - new_width)
        } else {
            ox
        };

        let is_text = matches!(
            document.elements.get(index).map(|e| &e.props),
            Some(ElementProps::Text(_))
        );

        if is_text {
            // Width drives re-wrapping; height follows the wrapped text.
            document.move_element(index, new_x, oy);
            document.resize_element(index, new_width, oh);
            if let Some(ElementProps::Text(props)) =
                document.elements.get_mut(index).map(|e| &mut e.props)
            {
                if let Some(height) = text_layout::wrapped_height(props) {
                    props.height = height.max(MIN_ELEMENT_SIZE);
                }
            }
        } else {
            let new_height = if handle.anchors_top() {
                (oh - dy).max(MIN_ELEMENT_SIZE)
            } else {
                (oh + dy).max(MIN_ELEMENT_SIZE)
            };
            let new_y = if handle.anchors_top() {
                oy + (oh - new_height)
            } else {
                oy
            };
            document.move_element(index, new_x, new_y);
            document.resize_element(index, new_width, new_height);
        }
    }

    /// Pointer released: commits an armed gesture with a history
    /// snapshot and an `ElementEdited` event.
    pub fn pointer_up(&mut self) {
        let committed = matches!(
            self.gesture,
            Gesture::Moving { moved: true, .. } | Gesture::Resizing { resized: true, .. }
        );
        if committed {
            if let Some(index) = self.selected {
                self.push_snapshot();
                self.bus
                    .publish(AppEvent::Element(ElementEvent::Edited { index }));
            }
        }
        self.gesture = Gesture::Idle;
        self.bus.publish(AppEvent::Canvas(CanvasEvent::Released));
    }

    /// Double-click: select the element under the pointer and request
    /// its property dialog.
    pub fn double_click(&mut self, x: f32, y: f32) -> Option<EditRequest> {
        let index = self.document.hit_test(x, y)?;
        self.select(index);
        let element = self.document.elements[index].clone();
        Some(EditRequest {
            index,
            kind: element.kind(),
            element,
        })
    }

    /// Merge a property bag returned by a dialog into the element,
    /// snapshot, and announce the edit. Unknown indices are a no-op.
    pub fn apply_edit(&mut self, index: usize, bag: &serde_json::Value) {
        let Some(el) = self.document.element_mut(index) else {
            tracing::debug!("apply_edit: element {} no longer exists", index);
            return;
        };
        if let Err(err) = el.merge_props(bag) {
            tracing::warn!("apply_edit rejected: {}", err);
            return;
        }
        self.push_snapshot();
        self.bus
            .publish(AppEvent::Element(ElementEvent::Edited { index }));
    }

    /// Remove the selected element, if any.
    pub fn delete_selected(&mut self) {
        let Some(index) = self.selected else {
            return;
        };
        if self.document.remove_element(index).is_none() {
            return;
        }
        self.selected = None;
        self.gesture = Gesture::Idle;
        self.push_snapshot();
        self.bus
            .publish(AppEvent::Element(ElementEvent::Deleted { index }));
        self.bus.publish(AppEvent::Element(ElementEvent::Deselected));
    }

    /// Deep-copy the selected element with a +20/+20 offset; the copy
    /// becomes the selection.
    pub fn duplicate_selected(&mut self) {
        let Some(index) = self.selected else {
            return;
        };
        let Some(new_index) = self.document.duplicate_element(index) else {
            return;
        };
        self.selected = Some(new_index);
        self.push_snapshot();
        let kind = self.document.elements[new_index].kind();
        self.bus.publish(AppEvent::Element(ElementEvent::Created {
            index: new_index,
            kind,
        }));
        self.bus
            .publish(AppEvent::Element(ElementEvent::Selected { index: new_index }));
    }

    /// Move the selection to the top of the paint order.
    pub fn bring_selected_to_front(&mut self) {
        let Some(index) = self.selected else {
            return;
        };
        if let Some(new_index) = self.document.bring_to_front(index) {
            self.selected = Some(new_index);
            self.push_snapshot();
            self.bus
                .publish(AppEvent::Element(ElementEvent::Edited { index: new_index }));
        }
    }

    /// Move the selection to the bottom of the paint order.
    pub fn send_selected_to_back(&mut self) {
        let Some(index) = self.selected else {
            return;
        };
        if let Some(new_index) = self.document.send_to_back(index) {
            self.selected = Some(new_index);
            self.push_snapshot();
            self.bus
                .publish(AppEvent::Element(ElementEvent::Edited { index: new_index }));
        }
    }

    /// Keyboard input with a selection: delete removes, arrows nudge by
    /// one pixel. Nudges emit `ElementEdited` but are not individually
    /// snapshotted; the next committed edit captures them.
    pub fn handle_key(&mut self, key: Key) {
        match key {
            Key::Delete | Key::Backspace => self.delete_selected(),
            Key::Left => self.nudge(-1.0, 0.0),
            Key::Right => self.nudge(1.0, 0.0),
            Key::Up => self.nudge(0.0, -1.0),
            Key::Down => self.nudge(0.0, 1.0),
        }
    }

    fn nudge(&mut self, dx: f32, dy: f32) {
        let Some(index) = self.selected.filter(|&i| i < self.document.elements.len()) else {
            return;
        };
        let el = &self.document.elements[index];
        let (x, y) = (el.x + dx, el.y + dy);
        self.document.move_element(index, x, y);
        self.bus
            .publish(AppEvent::Element(ElementEvent::Edited { index }));
    }

    /// Restore the previous history state. Selection is cleared because
    /// indices may no longer line up.
    pub fn undo(&mut self) {
        if let Some(snapshot) = self.history.undo() {
            self.document.elements = snapshot.elements;
            self.document.background_color = snapshot.background_color;
            self.selected = None;
            self.gesture = Gesture::Idle;
            self.bus.publish(AppEvent::History(HistoryEvent::Undone));
            self.bus.publish(AppEvent::Element(ElementEvent::Deselected));
        }
    }

    /// Restore the next history state, if an undo preceded.
    pub fn redo(&mut self) {
        if let Some(snapshot) = self.history.redo() {
            self.document.elements = snapshot.elements;
            self.document.background_color = snapshot.background_color;
            self.selected = None;
            self.gesture = Gesture::Idle;
            self.bus.publish(AppEvent::History(HistoryEvent::Redone));
            self.bus.publish(AppEvent::Element(ElementEvent::Deselected));
        }
    }

    /// Change the canvas background color (snapshotted).
    pub fn set_background(&mut self, color: impl Into<String>) {
        let color = color.into();
        self.document.background_color = color.clone();
        self.push_snapshot();
        self.bus
            .publish(AppEvent::Canvas(CanvasEvent::BackgroundChanged { color }));
    }

    /// Change the declared canvas size.
    pub fn set_canvas_size(&mut self, width: f32, height: f32, unit: Unit, dpi: u32) {
        self.document.width = width;
        self.document.height = height;
        self.document.unit = unit;
        self.document.dpi = dpi;
        self.bus.publish(AppEvent::Canvas(CanvasEvent::SizeChanged {
            width,
            height,
            unit,
            dpi,
        }));
    }

    fn create_at(&mut self, kind: ElementKind, x: f32, y: f32) -> EditRequest {
        let element = Element::new(kind, x, y);
        let index = self.document.add_element(element.clone());
        self.selected = Some(index);
        self.push_snapshot();
        self.bus
            .publish(AppEvent::Element(ElementEvent::Created { index, kind }));
        self.bus
            .publish(AppEvent::Element(ElementEvent::Selected { index }));

        // Element placed; drop back to selection so the next click
        // manipulates instead of creating.
        let old = std::mem::replace(&mut self.tool, Tool::Select);
        self.bus.publish(AppEvent::Tool(ToolEvent::Changed {
            old,
            new: Tool::Select,
        }));

        EditRequest {
            index,
            kind,
            element,
        }
    }

    fn select(&mut self, index: usize) {
        self.selected = Some(index);
        self.bus
            .publish(AppEvent::Element(ElementEvent::Selected { index }));
    }

    fn deselect(&mut self) {
        if self.selected.take().is_some() {
            self.bus.publish(AppEvent::Element(ElementEvent::Deselected));
        }
        self.gesture = Gesture::Idle;
    }

    fn push_snapshot(&mut self) {
        self.history
            .push(&self.document.elements, &self.document.background_color);
    }
}

impl std::fmt::Debug for EditorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorState")
            .field("tool", &self.tool)
            .field("selected", &self.selected)
            .field("elements", &self.document.elements.len())
            .finish()
    }
}
