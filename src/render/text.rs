//! Typeset math to pixels.
//!
//! A [`Typeset`] block is written out as a small SVG document (one `<text>` element per
//! glyph, one `<rect>` per rule) and rasterized with `usvg`/`resvg` against the system font
//! database.

use std::{fmt::Write as _, sync::Arc};

use anyhow::Context as _;

use crate::{
    foundation::{
        core::{Point, Rgba8Premul},
        error::{BellcurveError, BellcurveResult},
    },
    scene::mobject::TextPrimitive,
    tex::layout::Typeset,
};

/// Largest text raster edge in pixels.
const MAX_TEXT_DIM: u32 = 8_192;

/// Serif family stack used for math glyphs.
const MATH_FONT_FAMILY: &str = "'Latin Modern Math', 'CMU Serif', 'DejaVu Serif', serif";

/// SVG source of one text block plus where its baseline lands inside the raster.
#[derive(Clone, Debug, PartialEq)]
pub struct TextSvg {
    /// Complete SVG document.
    pub svg: String,
    /// Raster width in pixels.
    pub width: u32,
    /// Raster height in pixels.
    pub height: u32,
    /// Left baseline point inside the raster, in pixels from the top-left corner.
    pub baseline: Point,
}

/// Build the SVG for `text` drawn at `px_per_unit` pixels per scene unit.
///
/// Returns `None` when the block has no visible extent.
pub fn text_svg(text: &TextPrimitive, px_per_unit: f64) -> Option<TextSvg> {
    let em_px = text.em * px_per_unit;
    typeset_svg(&text.typeset, em_px, text.color)
}

pub(crate) fn typeset_svg(ts: &Typeset, em_px: f64, color: Rgba8Premul) -> Option<TextSvg> {
    if !(em_px.is_finite() && em_px > 0.0) || ts.width <= 0.0 || ts.height() <= 0.0 {
        return None;
    }
    let pad = (0.25 * em_px).ceil();
    let width = (ts.width * em_px + 2.0 * pad).ceil() as u32;
    let height = (ts.height() * em_px + 2.0 * pad).ceil() as u32;
    if width == 0 || height == 0 {
        return None;
    }
    let baseline = Point::new(pad, pad + ts.ascent * em_px);

    let [r, g, b, a] = color.to_straight_rgba();
    let fill = format!("#{r:02x}{g:02x}{b:02x}");
    let fill_opacity = f64::from(a) / 255.0;

    let mut svg = String::with_capacity(256 + 160 * ts.glyphs.len());
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    let _ = write!(
        svg,
        r#"<g fill="{fill}" fill-opacity="{fill_opacity:.4}" font-family="{MATH_FONT_FAMILY}">"#
    );
    for glyph in &ts.glyphs {
        let x = baseline.x + glyph.x * em_px;
        let y = baseline.y - glyph.y * em_px;
        let size = glyph.size * em_px;
        let style = if glyph.italic { "italic" } else { "normal" };
        let _ = write!(
            svg,
            r#"<text transform="translate({x:.3} {y:.3}) scale(1 {:.4})" font-size="{size:.3}" font-style="{style}">{}</text>"#,
            glyph.stretch_y,
            escape_xml(glyph.ch),
        );
    }
    for rule in &ts.rules {
        let x = baseline.x + rule.x * em_px;
        let y = baseline.y - (rule.y + rule.thickness) * em_px;
        let _ = write!(
            svg,
            r#"<rect x="{x:.3}" y="{y:.3}" width="{:.3}" height="{:.3}"/>"#,
            rule.width * em_px,
            (rule.thickness * em_px).max(1.0),
        );
    }
    svg.push_str("</g></svg>");

    Some(TextSvg {
        svg,
        width,
        height,
        baseline,
    })
}

fn escape_xml(ch: char) -> String {
    match ch {
        '<' => "&lt;".to_string(),
        '>' => "&gt;".to_string(),
        '&' => "&amp;".to_string(),
        '"' => "&quot;".to_string(),
        c => c.to_string(),
    }
}

/// Rasterizes [`TextSvg`] documents with the system fonts.
pub struct TextRasterizer {
    opts: usvg::Options<'static>,
}

impl TextRasterizer {
    /// Load the system font database.
    pub fn new() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts for text");
        Self {
            opts: usvg::Options {
                fontdb: Arc::new(db),
                ..Default::default()
            },
        }
    }

    /// Number of font faces available.
    pub fn face_count(&self) -> usize {
        self.opts.fontdb.len()
    }

    /// Rasterize into premultiplied RGBA8 of `text.width * text.height` pixels.
    pub fn rasterize(&self, text: &TextSvg) -> BellcurveResult<Vec<u8>> {
        if text.width > MAX_TEXT_DIM || text.height > MAX_TEXT_DIM {
            return Err(BellcurveError::render(format!(
                "text raster size too large: {}x{} (max {MAX_TEXT_DIM}x{MAX_TEXT_DIM})",
                text.width, text.height
            )));
        }
        let tree = usvg::Tree::from_str(&text.svg, &self.opts).context("parse text svg")?;
        let mut pixmap = resvg::tiny_skia::Pixmap::new(text.width, text.height)
            .ok_or_else(|| BellcurveError::render("failed to allocate text pixmap"))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );
        Ok(pixmap.take())
    }
}

impl Default for TextRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
