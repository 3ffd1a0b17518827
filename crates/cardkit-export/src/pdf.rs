//! Multi-page PDF assembly.
//!
//! Each filtered dataset row renders at the template's declared card
//! size, embeds as an image XObject, and lands on a page-filling grid.
//! A new page starts when the grid is full; the final page is always
//! flushed even when partially filled.

use std::fs::File;
use std::io::{BufWriter, Cursor};
use std::path::Path;

use printpdf::image::RawImage;
use printpdf::ops::Op;
use printpdf::xobject::{XObject, XObjectTransform};
use printpdf::{Mm, PdfDocument, PdfPage, PdfSaveOptions, Pt, XObjectId};

use cardkit_core::{units, ExportError, Result};
use cardkit_designer::{bind, renderer, DataTable, Document, RowFilter, Template};

use crate::image_export::{flatten_onto_white, BatchSummary};
use crate::page_layout::{GridLayout, PageSize};

fn mm_to_pt(mm: f32) -> f32 {
    mm * 72.0 / 25.4
}

/// Assemble one PDF from all filtered rows of the template's dataset.
///
/// The physical card size comes from the template's declared canvas
/// dimensions converted to millimeters through its unit and DPI.
/// Per-row failures are logged and skipped; `on_progress` fires after
/// every row.
pub fn export_pdf(
    template: &Template,
    table: &DataTable,
    filters: &[RowFilter],
    page: PageSize,
    output: impl AsRef<Path>,
    mut on_progress: impl FnMut(usize, usize),
) -> Result<BatchSummary> {
    let rows = table.filtered(filters);
    if rows.is_empty() {
        return Err(ExportError::NoRowsMatched.into());
    }

    let doc = &template.document;
    let card_width_mm = units::to_millimeters(doc.width, doc.unit, doc.dpi);
    let card_height_mm = units::to_millimeters(doc.height, doc.unit, doc.dpi);
    let layout = GridLayout::compute(card_width_mm, card_height_mm, page);
    tracing::debug!(
        "PDF layout: {}x{} cards per page, spacing {:.1}x{:.1} mm",
        layout.cards_per_row,
        layout.cards_per_column,
        layout.h_spacing,
        layout.v_spacing
    );

    let mut document = PdfDocument::new(&template.name);
    let mut ops: Vec<Op> = Vec::new();
    let mut slot = 0usize;

    let total = rows.len();
    let mut summary = BatchSummary {
        attempted: total,
        ..Default::default()
    };

    for (i, row) in rows.rows.iter().enumerate() {
        let bound = bind(template, row);
        match place_card(&mut document, &bound, &layout, slot) {
            Ok(op) => {
                ops.push(op);
                summary.exported += 1;
                slot += 1;
                if slot >= layout.cards_per_page {
                    flush_page(&mut document, &layout, &mut ops);
                    slot = 0;
                }
            }
            Err(err) => {
                tracing::warn!("Skipping row {}: {}", i + 1, err);
                summary.failed += 1;
            }
        }
        on_progress(i + 1, total);
    }

    // A partially filled final page still ships.
    if !ops.is_empty() {
        flush_page(&mut document, &layout, &mut ops);
    }

    let output = output.as_ref();
    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    let mut warnings = Vec::new();
    document.save_writer(&mut writer, &PdfSaveOptions::default(), &mut warnings);
    for warning in &warnings {
        tracing::debug!("printpdf: {:?}", warning);
    }

    tracing::info!(
        "PDF written to {:?}: {}/{} cards",
        output,
        summary.exported,
        summary.attempted
    );
    Ok(summary)
}

fn flush_page(document: &mut PdfDocument, layout: &GridLayout, ops: &mut Vec<Op>) {
    document.pages.push(PdfPage::new(
        Mm(layout.page_width),
        Mm(layout.page_height),
        std::mem::take(ops),
    ));
}

/// Render one bound document, register it as an image XObject, and
/// return the placement op for its grid slot.
fn place_card(
    document: &mut PdfDocument,
    bound: &Document,
    layout: &GridLayout,
    slot: usize,
) -> Result<Op> {
    let rendered = renderer::render(bound);
    let flattened = flatten_onto_white(&rendered);

    let mut png_bytes = Vec::new();
    flattened
        .write_to(&mut Cursor::new(&mut png_bytes), image::ImageFormat::Png)
        .map_err(|e| ExportError::Pdf {
            reason: format!("card encoding failed: {}", e),
        })?;

    let mut warnings = Vec::new();
    let raw = RawImage::decode_from_bytes(&png_bytes, &mut warnings).map_err(|e| {
        ExportError::Pdf {
            reason: format!("card image rejected: {}", e),
        }
    })?;
    let (img_w, img_h) = (raw.width as f32, raw.height as f32);

    let xobj_id = XObjectId::new();
    document
        .resources
        .xobjects
        .map
        .insert(xobj_id.clone(), XObject::Image(raw));

    // PDF origin is bottom-left; the grid positions from the top.
    let (x_mm, y_top_mm) = layout.position_mm(slot);
    let transform = XObjectTransform {
        translate_x: Some(Pt(mm_to_pt(x_mm))),
        translate_y: Some(Pt(mm_to_pt(
            layout.page_height - (y_top_mm + layout.card_height),
        ))),
        scale_x: Some(mm_to_pt(layout.card_width) / img_w),
        scale_y: Some(mm_to_pt(layout.card_height) / img_h),
        rotate: None,
        dpi: Some(72.0),
    };

    Ok(Op::UseXobject {
        id: xobj_id,
        transform,
    })
}
