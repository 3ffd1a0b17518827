//! Single and batch image export.
//!
//! Batch export runs bind → render → write per filtered row, numbering
//! output files from 1. One bad row is logged and skipped; the batch
//! runs to completion and reports a summary of attempts vs. successes.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use image::RgbaImage;

use cardkit_core::{AppEvent, DataError, EventBus, ExportError, ExportEvent, Result};
use cardkit_designer::{bind, renderer, DataTable, Document, RowFilter, Template};

/// Output raster format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    /// Infer from a path extension, defaulting to PNG.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("jpg") | Some("jpeg") => Self::Jpeg,
            _ => Self::Png,
        }
    }
}

/// Tally of a finished batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    /// Rows the batch attempted after filtering.
    pub attempted: usize,
    /// Rows written successfully.
    pub exported: usize,
    /// Rows skipped after a failure.
    pub failed: usize,
}

/// Render a document at its declared canvas size and write it.
pub fn write_image(doc: &Document, path: impl AsRef<Path>, format: ImageFormat) -> Result<()> {
    save_image(renderer::render(doc), path.as_ref(), format)
}

/// Render a document auto-sized to its content and write it.
pub fn write_image_fit(doc: &Document, path: impl AsRef<Path>, format: ImageFormat) -> Result<()> {
    save_image(renderer::render_fit(doc), path.as_ref(), format)
}

fn save_image(image: RgbaImage, path: &Path, format: ImageFormat) -> Result<()> {
    let result = match format {
        ImageFormat::Png => image.save_with_format(path, image::ImageFormat::Png),
        // JPEG has no alpha channel: composite onto white first.
        ImageFormat::Jpeg => flatten_onto_white(&image).save_with_format(path, image::ImageFormat::Jpeg),
    };
    result.map_err(|e| {
        ExportError::ImageWrite {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Composite an RGBA image onto an opaque white background.
pub(crate) fn flatten_onto_white(image: &RgbaImage) -> image::RgbImage {
    image::RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        let a = a as u16;
        let blend = |c: u8| ((c as u16 * a + 255 * (255 - a)) / 255) as u8;
        image::Rgb([blend(r), blend(g), blend(b)])
    })
}

/// Adapt batch progress into `Export` events on a bus, for shells that
/// observe everything through subscriptions instead of callbacks.
pub fn progress_to_bus(bus: Arc<EventBus>) -> impl FnMut(usize, usize) {
    move |current, total| {
        bus.publish(AppEvent::Export(ExportEvent::Progress { current, total }));
    }
}

/// Load the CSV dataset a template declares, resolving the filename
/// against `data_dir`. Hard-fails before any binding work starts.
pub fn resolve_data_source(template: &Template, data_dir: impl AsRef<Path>) -> Result<DataTable> {
    let source = template
        .data_source
        .as_ref()
        .ok_or_else(|| DataError::MissingDataSource {
            name: template.name.clone(),
        })?;
    DataTable::load(data_dir.as_ref().join(&source.file))
}

/// Export one numbered PNG per filtered dataset row.
///
/// `on_progress(current, total)` fires after each row, failed or not,
/// so long batches stay observable. Returns the batch tally; per-row
/// failures never abort the run.
pub fn export_batch(
    template: &Template,
    table: &DataTable,
    filters: &[RowFilter],
    out_dir: impl AsRef<Path>,
    mut on_progress: impl FnMut(usize, usize),
) -> Result<BatchSummary> {
    let rows = table.filtered(filters);
    if rows.is_empty() {
        return Err(ExportError::NoRowsMatched.into());
    }

    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir)?;

    let total = rows.len();
    let mut summary = BatchSummary {
        attempted: total,
        ..Default::default()
    };

    for (i, row) in rows.rows.iter().enumerate() {
        let bound = bind(template, row);
        let path = out_dir.join(format!("card_{}.png", i + 1));
        match save_image(renderer::render_fit(&bound), &path, ImageFormat::Png) {
            Ok(()) => summary.exported += 1,
            Err(err) => {
                tracing::warn!("Skipping row {}: {}", i + 1, err);
                summary.failed += 1;
            }
        }
        on_progress(i + 1, total);
    }

    tracing::info!(
        "Image batch finished: {}/{} exported",
        summary.exported,
        summary.attempted
    );
    Ok(summary)
}
