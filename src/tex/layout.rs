use crate::tex::ast::{AtomClass, MathNode};

/// A glyph positioned relative to the block's left baseline, in em units (y up).
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedGlyph {
    /// Character to draw.
    pub ch: char,
    /// Left edge.
    pub x: f64,
    /// Baseline offset, positive up.
    pub y: f64,
    /// Font size relative to the block's base size.
    pub size: f64,
    /// Italic math face.
    pub italic: bool,
    /// Vertical stretch for extensible delimiters and radicals.
    pub stretch_y: f64,
}

/// A horizontal bar (fraction rule, radical overbar) in em units (y up, bottom edge).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RuleBox {
    /// Left edge.
    pub x: f64,
    /// Bottom edge, positive up.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Thickness.
    pub thickness: f64,
}

/// Laid-out math block at base size 1 em.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Typeset {
    /// Glyphs in reading order.
    pub glyphs: Vec<PlacedGlyph>,
    /// Rules.
    pub rules: Vec<RuleBox>,
    /// Advance width.
    pub width: f64,
    /// Height above the baseline.
    pub ascent: f64,
    /// Depth below the baseline.
    pub depth: f64,
}

impl Typeset {
    /// Total height (`ascent + depth`).
    pub fn height(&self) -> f64 {
        self.ascent + self.depth
    }

    /// Number of drawn pieces, used to size write-in animations.
    pub fn piece_count(&self) -> usize {
        self.glyphs.len() + self.rules.len()
    }

    fn shifted(mut self, dx: f64, dy: f64) -> Self {
        for g in &mut self.glyphs {
            g.x += dx;
            g.y += dy;
        }
        for r in &mut self.rules {
            r.x += dx;
            r.y += dy;
        }
        self
    }

    fn append(&mut self, other: Typeset) {
        self.glyphs.extend(other.glyphs);
        self.rules.extend(other.rules);
    }
}

const AXIS_HEIGHT: f64 = 0.25;
const RULE_THICKNESS: f64 = 0.04;
const SCRIPT_SCALE: f64 = 0.7;
const THIN: f64 = 3.0 / 18.0;
const MEDIUM: f64 = 4.0 / 18.0;
const THICK: f64 = 5.0 / 18.0;

#[derive(Clone, Copy, Debug)]
struct Style {
    size: f64,
    level: u8,
}

impl Style {
    fn script(self) -> Self {
        Self {
            size: self.size * SCRIPT_SCALE,
            level: self.level.saturating_add(1),
        }
    }

    fn fraction_part(self) -> Self {
        if self.level == 0 {
            Self {
                size: self.size,
                level: 1,
            }
        } else {
            Self {
                size: self.size * 0.8,
                level: self.level.saturating_add(1),
            }
        }
    }
}

/// Lay out a parsed expression at base size 1 em.
pub fn layout(node: &MathNode) -> Typeset {
    layout_node(
        node,
        Style {
            size: 1.0,
            level: 0,
        },
    )
}

/// Approximate advance width of `ch` in em.
pub(crate) fn advance(ch: char, italic: bool) -> f64 {
    let base = match ch {
        'i' | 'l' | 'j' | '.' | ',' | ':' | ';' | '!' | '|' | '\'' => 0.28,
        '(' | ')' | '[' | ']' | '{' | '}' => 0.39,
        'f' | 't' | 'r' => 0.38,
        'm' | 'w' => 0.8,
        'M' | 'W' => 0.92,
        '0'..='9' => 0.5,
        '=' | '+' | '−' | '<' | '>' | '±' | '×' | '≤' | '≥' | '≠' | '≈' => 0.78,
        '⋅' => 0.28,
        '√' => 0.83,
        '∞' => 1.0,
        ' ' => 0.33,
        'π' | 'μ' | 'σ' | 'α' | 'β' | 'γ' | 'δ' | 'θ' | 'λ' | 'ν' | 'ρ' | 'τ' => 0.57,
        c if c.is_uppercase() => 0.72,
        _ => 0.5,
    };
    if italic { base + 0.03 } else { base }
}

fn glyph_extent(ch: char) -> (f64, f64) {
    match ch {
        '(' | ')' | '[' | ']' | '{' | '}' | '|' | '‖' => (0.75, 0.25),
        'g' | 'j' | 'p' | 'q' | 'y' | 'μ' | 'ρ' | 'β' | 'γ' | 'ξ' | 'ζ' | 'ϕ' | 'χ' | 'ψ' => {
            (0.45, 0.2)
        }
        'b' | 'd' | 'f' | 'h' | 'k' | 'l' | 't' | 'δ' | 'θ' | 'λ' => (0.7, 0.0),
        c if c.is_ascii_digit() || c.is_uppercase() => (0.68, 0.0),
        '=' | '+' | '−' | '±' | '×' | '⋅' => (0.58, 0.0),
        '√' => (0.8, 0.2),
        _ => (0.45, 0.0),
    }
}

fn glyph_box(ch: char, italic: bool, style: Style, stretch_y: f64) -> Typeset {
    let (asc, desc) = glyph_extent(ch);
    Typeset {
        glyphs: vec![PlacedGlyph {
            ch,
            x: 0.0,
            y: 0.0,
            size: style.size,
            italic,
            stretch_y,
        }],
        rules: Vec::new(),
        width: advance(ch, italic) * style.size,
        ascent: asc * style.size * stretch_y,
        depth: desc * style.size * stretch_y,
    }
}

fn spacing(left: AtomClass, right: AtomClass) -> f64 {
    use AtomClass::*;
    match (left, right) {
        (Rel, Rel) => 0.0,
        (Rel, _) | (_, Rel) => THICK,
        (Bin, _) | (_, Bin) => MEDIUM,
        (Punct, _) => THIN,
        _ => 0.0,
    }
}

fn layout_row(items: &[MathNode], style: Style) -> Typeset {
    let mut out = Typeset::default();
    let mut prev: Option<AtomClass> = None;
    for item in items {
        if let MathNode::Space(em) = item {
            out.width += em * style.size;
            continue;
        }
        let mut class = item.left_class();
        // A binary operator with nothing to bind on its left acts as a unary sign.
        if class == AtomClass::Bin
            && matches!(
                prev,
                None | Some(AtomClass::Bin | AtomClass::Rel | AtomClass::Open | AtomClass::Punct)
            )
        {
            class = AtomClass::Ord;
        }
        if let Some(p) = prev
            && style.level == 0
        {
            out.width += spacing(p, class) * style.size;
        }
        let b = layout_node(item, style);
        let dx = out.width;
        out.width += b.width;
        out.ascent = out.ascent.max(b.ascent);
        out.depth = out.depth.max(b.depth);
        out.append(b.shifted(dx, 0.0));
        prev = Some(if class == AtomClass::Ord {
            AtomClass::Ord
        } else {
            item.right_class()
        });
    }
    out
}

fn layout_frac(num: &MathNode, den: &MathNode, style: Style) -> Typeset {
    let part = style.fraction_part();
    let n = layout_node(num, part);
    let d = layout_node(den, part);
    let s = style.size;
    let t = RULE_THICKNESS * s;
    let gap = if style.level == 0 { 0.12 * s } else { 0.08 * s };
    let pad = 0.1 * s;
    let axis = AXIS_HEIGHT * s;
    let width = n.width.max(d.width) + 2.0 * pad;

    let num_shift = axis + t / 2.0 + gap + n.depth;
    let den_shift = axis - t / 2.0 - gap - d.ascent;

    let mut out = Typeset {
        width,
        ascent: num_shift + n.ascent,
        depth: -(den_shift - d.depth),
        ..Typeset::default()
    };
    let num_dx = (width - n.width) / 2.0;
    let den_dx = (width - d.width) / 2.0;
    out.append(n.shifted(num_dx, num_shift));
    out.append(d.shifted(den_dx, den_shift));
    out.rules.push(RuleBox {
        x: 0.0,
        y: axis - t / 2.0,
        width,
        thickness: t,
    });
    out
}

fn layout_sqrt(body: &MathNode, style: Style) -> Typeset {
    let b = layout_node(body, style);
    let s = style.size;
    let t = RULE_THICKNESS * s;
    let gap = 0.1 * s;
    let (asc, desc) = glyph_extent('√');
    let needed = b.ascent + gap + t + b.depth;
    let stretch = (needed / ((asc + desc) * s)).max(1.0);

    // Bottom of the radical sits on the body's depth.
    let radical = glyph_box('√', false, style, stretch).shifted(0.0, desc * s * stretch - b.depth);
    let rw = radical.width;

    let mut out = Typeset {
        width: rw + b.width + 0.05 * s,
        ascent: b.ascent + gap + t,
        depth: b.depth,
        ..Typeset::default()
    };
    out.append(radical);
    out.rules.push(RuleBox {
        x: rw,
        y: b.ascent + gap,
        width: b.width + 0.05 * s,
        thickness: t,
    });
    out.append(b.shifted(rw, 0.0));
    out
}

fn layout_scripts(
    base: &MathNode,
    sup: Option<&MathNode>,
    sub: Option<&MathNode>,
    style: Style,
) -> Typeset {
    let b = layout_node(base, style);
    let s = style.size;
    let script = style.script();
    let mut out = Typeset {
        width: b.width,
        ascent: b.ascent,
        depth: b.depth,
        ..Typeset::default()
    };
    let x = b.width + 0.03 * s;
    out.append(b);

    let mut extra = 0.0f64;
    if let Some(sup) = sup {
        let p = layout_node(sup, script);
        let up = (0.42 * s).max(out.ascent - 0.3 * s).max(p.depth + 0.11 * s);
        out.ascent = out.ascent.max(up + p.ascent);
        extra = extra.max(p.width);
        out.append(p.shifted(x, up));
    }
    if let Some(sub) = sub {
        let q = layout_node(sub, script);
        let down = (0.15 * s).max(q.ascent - 0.36 * s);
        out.depth = out.depth.max(down + q.depth);
        extra = extra.max(q.width);
        out.append(q.shifted(x, -down));
    }
    out.width = x + extra;
    out
}

fn layout_delimited(
    open: Option<char>,
    close: Option<char>,
    body: &MathNode,
    style: Style,
) -> Typeset {
    let b = layout_node(body, style);
    let s = style.size;
    let axis = AXIS_HEIGHT * s;
    let half = (b.ascent - axis).max(b.depth + axis);
    let stretch = ((2.0 * half + 0.1 * s) / s).max(1.0);
    let delim_half = 0.5 * s * stretch;

    let mut out = Typeset {
        ascent: b.ascent.max(axis + delim_half),
        depth: b.depth.max(delim_half - axis),
        ..Typeset::default()
    };
    // Extensible delimiters are centred on the math axis.
    let dy = axis - 0.25 * s * stretch;
    if let Some(ch) = open {
        let g = glyph_box(ch, false, style, stretch);
        out.width += g.width;
        out.append(g.shifted(0.0, dy));
    }
    let bw = b.width;
    out.append(b.shifted(out.width, 0.0));
    out.width += bw;
    if let Some(ch) = close {
        let g = glyph_box(ch, false, style, stretch);
        let gw = g.width;
        out.append(g.shifted(out.width, dy));
        out.width += gw;
    }
    out
}

fn layout_node(node: &MathNode, style: Style) -> Typeset {
    match node {
        MathNode::Glyph { ch, italic, .. } => glyph_box(*ch, *italic, style, 1.0),
        MathNode::Row(items) => layout_row(items, style),
        MathNode::Frac { num, den } => layout_frac(num, den, style),
        MathNode::Sqrt(body) => layout_sqrt(body, style),
        MathNode::Scripts { base, sup, sub } => {
            layout_scripts(base, sup.as_deref(), sub.as_deref(), style)
        }
        MathNode::Delimited { open, close, body } => layout_delimited(*open, *close, body, style),
        MathNode::Space(em) => Typeset {
            width: em * style.size,
            ..Typeset::default()
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tex/layout.rs"]
mod tests;
