//! # CardKit
//!
//! A board-game component designer: a visual canvas editing engine with
//! CSV-driven batch generation and PDF/image export.
//!
//! ## Architecture
//!
//! CardKit is organized as a workspace with multiple crates:
//!
//! 1. **cardkit-core** - Units, colors, errors, and the typed event bus
//! 2. **cardkit-designer** - Document model, editor state machine,
//!    history, renderer, templates, and data binding
//! 3. **cardkit-export** - Batch image export and PDF assembly
//! 4. **cardkit-settings** - Configuration persistence
//! 5. **cardkit** - Integration layer and the headless CLI binary
//!
//! The GUI shell, relational persistence, and asset management are
//! external collaborators: the engine exposes narrow contracts (the
//! event bus, `EditRequest`/`apply_edit`, the template store, the CSV
//! loader) and everything else stays outside the core.

pub use cardkit_designer as designer;
pub use cardkit_export as export;
pub use cardkit_settings as settings;

pub use cardkit_core::{
    AppEvent, CanvasEvent, Color, DataError, DesignError, ElementEvent, ElementKind, Error,
    EventBus, EventCategory, EventFilter, ExportError, ExportEvent, HistoryEvent, Result,
    SubscriptionId, Tool, ToolEvent, Unit,
};

pub use cardkit_designer::{
    bind, render, render_fit, DataTable, Document, EditorState, Element, ElementProps,
    HistoryManager, RowFilter, Template, TemplateStore, TemplateSummary,
};

pub use cardkit_export::{
    export_batch, export_pdf, resolve_data_source, write_image, BatchSummary, GridLayout,
    ImageFormat, PageSize,
};

pub use cardkit_settings::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
