//! Small LaTeX math-mode typesetter.
//!
//! Formulas are parsed into a [`ast::MathNode`] tree and laid out into positioned glyphs and
//! rules with approximate font metrics. Glyph outlines are resolved later by the text
//! rasterizer using system fonts.

pub(crate) mod ast;
pub(crate) mod layout;
pub(crate) mod parse;

use crate::foundation::error::BellcurveResult;

/// Parse and lay out `src` at base size 1 em.
pub fn typeset(src: &str) -> BellcurveResult<layout::Typeset> {
    let node = parse::parse_tex(src)?;
    Ok(layout::layout(&node))
}
