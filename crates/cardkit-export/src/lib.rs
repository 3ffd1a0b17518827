//! # CardKit Export
//!
//! Drives the renderer over bound documents to produce image files, and
//! assembles rendered cards into multi-page PDFs with page-filling grid
//! layout. Batch operations report progress per row and skip failed
//! rows rather than aborting; dataset and template loading failures are
//! hard errors surfaced before any row is processed.

pub mod image_export;
pub mod page_layout;
pub mod pdf;

pub use image_export::{
    export_batch, progress_to_bus, resolve_data_source, write_image, write_image_fit,
    BatchSummary, ImageFormat,
};
pub use page_layout::{GridLayout, PageSize, PAGE_MARGIN_MM};
pub use pdf::export_pdf;
