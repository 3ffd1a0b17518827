//! # CardKit Designer
//!
//! The component editing and template-binding engine. This crate owns
//! the in-memory document model for a component (a canvas of positioned,
//! typed visual elements), the event-driven editor state machine with
//! undo/redo, the deterministic raster renderer, and the pipeline that
//! binds spreadsheet rows onto templates for mass production.
//!
//! ## Architecture
//!
//! ```text
//! EditorState (tools, selection, gestures)
//!   ├── Document (canvas size, background, ordered elements)
//!   ├── HistoryManager (bounded snapshot stack)
//!   └── EventBus (cardkit-core; typed editor events)
//!
//! Template (Document + data source + mappings)
//!   └── bind(row) -> Document clone per dataset row
//!
//! Renderer (tiny-skia)
//!   ├── render: declared canvas size (interactive surface)
//!   └── render_fit: content bounds + padding (headless export)
//! ```
//!
//! The live document is owned exclusively by the editor; binding and
//! export only ever touch clones, which is what makes blocking batch
//! export safe.

pub mod binding;
pub mod dataset;
pub mod document;
pub mod editor;
pub mod element;
pub mod font_manager;
pub mod history;
pub mod renderer;
pub mod template;
pub mod text_layout;

pub use binding::bind;
pub use dataset::{DataTable, FilterOp, Row, RowFilter};
pub use document::Document;
pub use editor::{EditRequest, EditorState, Key, ResizeHandle};
pub use element::{
    Align, DashStyle, Element, ElementProps, ImageProps, QrCodeProps, ShapeProps, TextProps,
    MIN_ELEMENT_SIZE,
};
pub use history::{HistoryManager, HistorySnapshot, MAX_HISTORY};
pub use renderer::{render, render_fit};
pub use template::{
    Condition, DataSource, Mapping, MappingOperator, Template, TemplateStore, TemplateSummary,
};

// The editor vocabulary lives beside the event definitions in core.
pub use cardkit_core::{ElementKind, Tool};
