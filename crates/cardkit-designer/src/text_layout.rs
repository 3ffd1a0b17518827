//! Word wrapping and text measurement for text elements.
//!
//! The wrap algorithm is a greedy accumulator over whitespace-separated
//! words, parameterized over a measurement function so the layout logic
//! stays testable without any fonts installed. The renderer and the
//! editor's text-resize derivation both go through here, which is what
//! keeps interactive and headless text output identical.

use rusttype::{point, Font, Scale};

use crate::element::TextProps;
use crate::font_manager;

/// Line spacing multiplier over the font's natural line metrics.
const LINE_SPACING: f32 = 1.2;

/// Greedily wrap `text` into lines no wider than `max_width`.
///
/// A word that alone exceeds the width still gets its own line; words
/// are never broken. Whitespace (including newlines) separates words.
pub fn wrap_text(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for word in text.split_whitespace() {
        current.push(word);
        let candidate = current.join(" ");
        if measure(&candidate) > max_width && current.len() > 1 {
            current.pop();
            lines.push(current.join(" "));
            current = vec![word];
        }
    }
    lines.push(current.join(" "));
    lines
}

/// Advance width of `text` at the given pixel size.
pub fn measure_width(font: &Font<'_>, text: &str, size: f32) -> f32 {
    let scale = Scale::uniform(size);
    font.layout(text, scale, point(0.0, 0.0))
        .last()
        .map(|glyph| glyph.position().x + glyph.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}

/// Line height for the font at the given size: 1.2x the natural
/// ascent-to-descent span.
pub fn line_height(font: &Font<'_>, size: f32) -> f32 {
    let v = font.v_metrics(Scale::uniform(size));
    (v.ascent - v.descent + v.line_gap) * LINE_SPACING
}

/// Wrap a text element's content against its width using its resolved
/// font. Single-line elements (`multiline: false`) never wrap.
/// Returns `(lines, line_height)`, or `None` when no font is available.
pub fn layout_lines(props: &TextProps) -> Option<(Vec<String>, f32)> {
    let font = font_manager::get_font_for(&props.font, props.bold, props.italic)?;
    let lines = if props.multiline {
        wrap_text(&props.text, props.width, |s| {
            measure_width(font, s, props.font_size)
        })
    } else {
        vec![props.text.split_whitespace().collect::<Vec<_>>().join(" ")]
    };
    Some((lines, line_height(font, props.font_size)))
}

/// Height of the wrapped text block, used to re-derive a text element's
/// height after its width changes during a resize.
pub fn wrapped_height(props: &TextProps) -> Option<f32> {
    let (lines, lh) = layout_lines(props)?;
    Some(lines.len() as f32 * lh)
}
