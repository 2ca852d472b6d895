use super::*;
use crate::foundation::core::palette;

fn mu_label() -> Typeset {
    crate::tex::typeset(r"\mu = 1.50").unwrap()
}

#[test]
fn svg_has_one_text_element_per_glyph() {
    let ts = mu_label();
    let out = typeset_svg(&ts, 40.0, palette::WHITE).unwrap();
    assert_eq!(out.svg.matches("<text ").count(), ts.glyphs.len());
    assert!(out.svg.contains("μ"));
    assert!(out.svg.contains(r##"fill="#ffffff""##));
}

#[test]
fn fraction_rules_become_rects() {
    let ts = crate::tex::typeset(r"\frac{1}{2}").unwrap();
    let out = typeset_svg(&ts, 40.0, palette::WHITE).unwrap();
    assert_eq!(out.svg.matches("<rect ").count(), ts.rules.len());
    assert_eq!(ts.rules.len(), 1);
}

#[test]
fn raster_size_covers_block_with_padding() {
    let ts = mu_label();
    let em_px = 40.0;
    let out = typeset_svg(&ts, em_px, palette::WHITE).unwrap();
    assert!(f64::from(out.width) >= ts.width * em_px + 20.0);
    assert!(f64::from(out.height) >= ts.height() * em_px + 20.0);
    assert_eq!(out.baseline.x, 10.0);
    assert!((out.baseline.y - (10.0 + ts.ascent * em_px)).abs() < 1e-9);
}

#[test]
fn italic_glyphs_are_styled() {
    let ts = crate::tex::typeset("x").unwrap();
    let out = typeset_svg(&ts, 20.0, palette::WHITE).unwrap();
    assert!(out.svg.contains(r#"font-style="italic""#));
}

#[test]
fn empty_or_degenerate_blocks_have_no_svg() {
    assert!(typeset_svg(&Typeset::default(), 40.0, palette::WHITE).is_none());
    assert!(typeset_svg(&mu_label(), 0.0, palette::WHITE).is_none());
}

#[test]
fn markup_characters_are_escaped() {
    assert_eq!(escape_xml('<'), "&lt;");
    assert_eq!(escape_xml('&'), "&amp;");
    assert_eq!(escape_xml('σ'), "σ");
}

#[test]
fn rasterize_returns_full_buffer() {
    let raster = TextRasterizer::new();
    let out = typeset_svg(&mu_label(), 24.0, palette::WHITE).unwrap();
    let bytes = raster.rasterize(&out).unwrap();
    assert_eq!(bytes.len(), (out.width * out.height * 4) as usize);
}
