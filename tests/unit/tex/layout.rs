use super::*;
use crate::tex::parse::parse_tex;

fn typeset(src: &str) -> Typeset {
    layout(&parse_tex(src).unwrap())
}

#[test]
fn row_widths_accumulate_with_relation_glue() {
    let t = typeset("a=b");
    let expected = advance('a', true) + advance('=', false) + advance('b', true) + 2.0 * (5.0 / 18.0);
    assert!((t.width - expected).abs() < 1e-12);
    assert_eq!(t.glyphs.len(), 3);
    assert!(t.glyphs[0].x < t.glyphs[1].x && t.glyphs[1].x < t.glyphs[2].x);
}

#[test]
fn leading_minus_is_unary() {
    let unary = typeset("-3");
    let plain = advance('−', false) + advance('3', false);
    assert!((unary.width - plain).abs() < 1e-12);
}

#[test]
fn fraction_stacks_numerator_over_denominator() {
    let t = typeset(r"\frac{1}{2}");
    assert_eq!(t.rules.len(), 1);
    let num = &t.glyphs[0];
    let den = &t.glyphs[1];
    let rule = t.rules[0];
    assert!(num.y > rule.y + rule.thickness);
    assert!(den.y < rule.y);
    assert!(t.ascent > 0.7 && t.depth > 0.4);
}

#[test]
fn superscript_is_raised_and_smaller() {
    let t = typeset("e^2");
    let base = &t.glyphs[0];
    let sup = &t.glyphs[1];
    assert!(sup.y > base.y);
    assert!(sup.size < base.size);
    assert!(sup.x >= advance('e', true));
}

#[test]
fn delimiters_stretch_around_tall_content() {
    let short = typeset(r"\left(x\right)");
    let tall = typeset(r"\left(\frac{x}{y}\right)");
    assert_eq!(short.glyphs[0].stretch_y, 1.0);
    assert!(tall.glyphs[0].stretch_y > 1.0);
    assert!(tall.height() > short.height());
}

#[test]
fn sqrt_adds_overbar() {
    let t = typeset(r"\sqrt{2\pi}");
    assert_eq!(t.rules.len(), 1);
    assert_eq!(t.glyphs[0].ch, '√');
    assert!(t.rules[0].x >= advance('√', false) - 1e-12);
}

#[test]
fn density_formula_piece_count_is_long() {
    let t = typeset(
        r"f(x) = \frac{1}{\sigma \sqrt{2\pi}} e^{-\frac{1}{2} \left(\frac{x - \mu}{\sigma}\right)^2}",
    );
    assert!(t.piece_count() >= 15);
    assert!(t.width > 5.0);
    let label = typeset(r"\mu = 0.00");
    assert!(label.piece_count() < 15);
}
