//! Deterministic raster rendering of documents.
//!
//! Elements draw strictly in list order (index 0 bottommost) onto a
//! tiny-skia pixmap, which converts to an `image::RgbaImage` for
//! encoding and PDF embedding. Two surface modes share one drawing
//! path: [`render`] uses the declared canvas size (what the interactive
//! surface shows), [`render_fit`] auto-sizes to the content bounds plus
//! padding so exports never clip. Identical documents produce identical
//! pixels in both modes over the common region, which is what makes
//! what-you-see-is-what-you-export hold.

use image::{imageops::FilterType, RgbaImage};
use qrcode::{EcLevel, QrCode};
use rusttype::{point as rt_point, Scale};
use tiny_skia::{
    FillRule, IntSize, Paint, PathBuilder, Pixmap, PixmapPaint, Rect, Stroke, StrokeDash,
    Transform,
};

use cardkit_core::Color;

use crate::document::Document;
use crate::element::{Align, Element, ElementProps, ImageProps, QrCodeProps, ShapeProps, TextProps};
use crate::font_manager;
use crate::text_layout;

/// Padding added around the content bounds in auto-fit (export) mode.
const EXPORT_PADDING: f32 = 40.0;

/// Pixels per QR module before resampling to the element size.
const QR_MODULE_PX: u32 = 10;

/// Width of the quiet zone around the QR matrix, in modules.
const QR_QUIET_ZONE: u32 = 4;

fn to_skia(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

/// Render the document at its declared canvas pixel size.
pub fn render(doc: &Document) -> RgbaImage {
    let (width, height) = doc.pixel_size();
    render_surface(doc, width, height)
}

/// Render the document auto-sized to its content plus fixed padding,
/// independent of the declared canvas size. Used for headless export.
pub fn render_fit(doc: &Document) -> RgbaImage {
    let (max_x, max_y) = doc.content_bounds();
    let width = (max_x + EXPORT_PADDING).ceil().max(1.0) as u32;
    let height = (max_y + EXPORT_PADDING).ceil().max(1.0) as u32;
    render_surface(doc, width, height)
}

fn render_surface(doc: &Document, width: u32, height: u32) -> RgbaImage {
    let Some(mut pixmap) = Pixmap::new(width.max(1), height.max(1)) else {
        return RgbaImage::new(width.max(1), height.max(1));
    };

    let background = Color::parse(&doc.background_color);
    if !background.is_transparent() {
        pixmap.fill(to_skia(background));
    }

    for element in &doc.elements {
        draw_element(&mut pixmap, element);
    }

    pixmap_to_image(&pixmap)
}

fn draw_element(pixmap: &mut Pixmap, element: &Element) {
    match &element.props {
        ElementProps::Text(props) => draw_text(pixmap, element.x, element.y, props),
        ElementProps::Shape(props) => draw_shape(pixmap, element.x, element.y, props),
        ElementProps::Image(props) => draw_image(pixmap, element.x, element.y, props),
        ElementProps::Qrcode(props) => draw_qrcode(pixmap, element.x, element.y, props),
    }
}

fn draw_text(pixmap: &mut Pixmap, x: f32, y: f32, props: &TextProps) {
    let Some(font) = font_manager::get_font_for(&props.font, props.bold, props.italic) else {
        tracing::warn!("Skipping text element: no usable font for {:?}", props.font);
        return;
    };
    let Some((lines, line_height)) = text_layout::layout_lines(props) else {
        return;
    };

    let color = Color::parse(&props.fill);
    let scale = Scale::uniform(props.font_size);
    let ascent = font.v_metrics(scale).ascent;

    for (i, line) in lines.iter().enumerate() {
        let line_width = text_layout::measure_width(font, line, props.font_size);
        let line_x = match props.align {
            Align::Left => x,
            Align::Center => x + (props.width - line_width) / 2.0,
            Align::Right => x + props.width - line_width,
        };
        let baseline = rt_point(line_x, y + i as f32 * line_height + ascent);

        for glyph in font.layout(line, scale, baseline) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = gx as i32 + bb.min.x;
                let py = gy as i32 + bb.min.y;
                blend_pixel(pixmap, px, py, color, coverage);
            });
        }
    }
}

/// Source-over blend of a single pixel at the given coverage.
fn blend_pixel(pixmap: &mut Pixmap, x: i32, y: i32, color: Color, coverage: f32) {
    let (width, height) = (pixmap.width() as i32, pixmap.height() as i32);
    if x < 0 || y < 0 || x >= width || y >= height {
        return;
    }
    let alpha = coverage.clamp(0.0, 1.0) * (color.a as f32 / 255.0);
    if alpha <= 0.0 {
        return;
    }

    // Premultiplied source components.
    let sr = color.r as f32 * alpha;
    let sg = color.g as f32 * alpha;
    let sb = color.b as f32 * alpha;
    let sa = 255.0 * alpha;
    let inv = 1.0 - alpha;

    let idx = ((y * width + x) * 4) as usize;
    let data = pixmap.data_mut();
    data[idx] = (sr + data[idx] as f32 * inv).round().min(255.0) as u8;
    data[idx + 1] = (sg + data[idx + 1] as f32 * inv).round().min(255.0) as u8;
    data[idx + 2] = (sb + data[idx + 2] as f32 * inv).round().min(255.0) as u8;
    data[idx + 3] = (sa + data[idx + 3] as f32 * inv).round().min(255.0) as u8;
}

fn draw_shape(pixmap: &mut Pixmap, x: f32, y: f32, props: &ShapeProps) {
    let width = props.width.max(1.0);
    let height = props.height.max(1.0);
    let radius = props.radius.clamp(0.0, width.min(height) / 2.0);

    let Some(path) = (if radius > 0.0 {
        rounded_rect_path(x, y, width, height, radius)
    } else {
        Rect::from_xywh(x, y, width, height).map(PathBuilder::from_rect)
    }) else {
        return;
    };

    let fill = Color::parse(&props.fill).with_opacity(props.opacity);
    if !fill.is_transparent() {
        let mut paint = Paint::default();
        paint.set_color(to_skia(fill));
        paint.anti_alias = true;
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    let outline = Color::parse(&props.outline);
    if props.outline_width > 0.0 && !outline.is_transparent() {
        let mut paint = Paint::default();
        paint.set_color(to_skia(outline));
        paint.anti_alias = true;
        // Non-solid styles stroke the border as a dashed pass over the
        // fill instead of a continuous line.
        let stroke = Stroke {
            width: props.outline_width,
            dash: props
                .dash
                .pattern(props.outline_width)
                .and_then(|pattern| StrokeDash::new(pattern, 0.0)),
            ..Stroke::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}

fn rounded_rect_path(x: f32, y: f32, w: f32, h: f32, r: f32) -> Option<tiny_skia::Path> {
    // Circular corner arcs approximated with cubics.
    const KAPPA: f32 = 0.552_284_8;
    let k = r * KAPPA;
    let (right, bottom) = (x + w, y + h);

    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(right - r, y);
    pb.cubic_to(right - r + k, y, right, y + r - k, right, y + r);
    pb.line_to(right, bottom - r);
    pb.cubic_to(right, bottom - r + k, right - r + k, bottom, right - r, bottom);
    pb.line_to(x + r, bottom);
    pb.cubic_to(x + r - k, bottom, x, bottom - r + k, x, bottom - r);
    pb.line_to(x, y + r);
    pb.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    pb.close();
    pb.finish()
}

fn draw_image(pixmap: &mut Pixmap, x: f32, y: f32, props: &ImageProps) {
    let width = props.width.max(1.0).round() as u32;
    let height = props.height.max(1.0).round() as u32;

    if props.path.is_empty() {
        draw_placeholder(pixmap, x, y, width as f32, height as f32);
        return;
    }

    match image::open(&props.path) {
        Ok(img) => {
            let resized = image::imageops::resize(&img.to_rgba8(), width, height, FilterType::Lanczos3);
            paste_image(pixmap, x, y, &resized);
        }
        Err(err) => {
            // An unreadable asset must not abort the whole render.
            tracing::warn!("Error loading image {:?}: {}", props.path, err);
            draw_placeholder(pixmap, x, y, width as f32, height as f32);
        }
    }
}

/// Neutral stand-in for an unreadable or unset image asset.
fn draw_placeholder(pixmap: &mut Pixmap, x: f32, y: f32, width: f32, height: f32) {
    let Some(rect) = Rect::from_xywh(x, y, width, height) else {
        return;
    };
    let path = PathBuilder::from_rect(rect);

    let mut paint = Paint::default();
    paint.set_color(to_skia(Color::parse("lightgray")));
    pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);

    paint.set_color(to_skia(Color::parse("gray")));
    let stroke = Stroke {
        width: 1.0,
        ..Stroke::default()
    };
    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}

fn draw_qrcode(pixmap: &mut Pixmap, x: f32, y: f32, props: &QrCodeProps) {
    let code = match QrCode::with_error_correction_level(props.content.as_bytes(), EcLevel::L) {
        Ok(code) => code,
        Err(err) => {
            tracing::warn!("Error encoding QR code: {}", err);
            return;
        }
    };

    let dark = Color::parse(&props.fill);
    let light = props
        .background
        .as_deref()
        .map(Color::parse)
        .unwrap_or(Color::WHITE);

    // Rasterize the matrix with a quiet zone, then resample to the
    // element size like any other image.
    let modules = code.width() as u32;
    let total = modules + 2 * QR_QUIET_ZONE;
    let mut matrix = RgbaImage::from_pixel(
        total * QR_MODULE_PX,
        total * QR_MODULE_PX,
        image::Rgba([light.r, light.g, light.b, light.a]),
    );
    for qy in 0..modules {
        for qx in 0..modules {
            if code[(qx as usize, qy as usize)] != qrcode::Color::Dark {
                continue;
            }
            let base_x = (qx + QR_QUIET_ZONE) * QR_MODULE_PX;
            let base_y = (qy + QR_QUIET_ZONE) * QR_MODULE_PX;
            for dy in 0..QR_MODULE_PX {
                for dx in 0..QR_MODULE_PX {
                    matrix.put_pixel(
                        base_x + dx,
                        base_y + dy,
                        image::Rgba([dark.r, dark.g, dark.b, dark.a]),
                    );
                }
            }
        }
    }

    let width = props.width.max(1.0).round() as u32;
    let height = props.height.max(1.0).round() as u32;
    let resized = image::imageops::resize(&matrix, width, height, FilterType::Lanczos3);
    paste_image(pixmap, x, y, &resized);
}

fn paste_image(pixmap: &mut Pixmap, x: f32, y: f32, image: &RgbaImage) {
    let Some(size) = IntSize::from_wh(image.width(), image.height()) else {
        return;
    };
    // tiny-skia expects premultiplied RGBA.
    let mut data = image.as_raw().clone();
    for px in data.chunks_exact_mut(4) {
        let a = px[3] as u16;
        px[0] = (px[0] as u16 * a / 255) as u8;
        px[1] = (px[1] as u16 * a / 255) as u8;
        px[2] = (px[2] as u16 * a / 255) as u8;
    }
    let Some(src) = Pixmap::from_vec(data, size) else {
        return;
    };
    pixmap.draw_pixmap(
        x.round() as i32,
        y.round() as i32,
        src.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );
}

fn pixmap_to_image(pixmap: &Pixmap) -> RgbaImage {
    let width = pixmap.width();
    let pixels = pixmap.pixels();
    RgbaImage::from_fn(width, pixmap.height(), |x, y| {
        let c = pixels[(y * width + x) as usize].demultiply();
        image::Rgba([c.red(), c.green(), c.blue(), c.alpha()])
    })
}
