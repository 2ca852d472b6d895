/// Spacing class of a math atom, used to insert inter-atom glue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AtomClass {
    /// Ordinary symbol (variables, digits, greek letters).
    Ord,
    /// Binary operator (`+`, `−`, `⋅`).
    Bin,
    /// Relation (`=`, `<`, `>`).
    Rel,
    /// Opening delimiter.
    Open,
    /// Closing delimiter.
    Close,
    /// Punctuation (`,`).
    Punct,
}

/// Parsed math expression tree.
#[derive(Clone, Debug, PartialEq)]
pub enum MathNode {
    /// One glyph.
    Glyph {
        /// Character to draw.
        ch: char,
        /// Spacing class.
        class: AtomClass,
        /// Draw in the italic math face.
        italic: bool,
    },
    /// Horizontal sequence.
    Row(Vec<MathNode>),
    /// `\frac{num}{den}`.
    Frac {
        /// Numerator.
        num: Box<MathNode>,
        /// Denominator.
        den: Box<MathNode>,
    },
    /// `\sqrt{body}`.
    Sqrt(Box<MathNode>),
    /// Base with optional superscript and subscript.
    Scripts {
        /// Nucleus.
        base: Box<MathNode>,
        /// `^{...}`.
        sup: Option<Box<MathNode>>,
        /// `_{...}`.
        sub: Option<Box<MathNode>>,
    },
    /// `\left( body \right)`; `None` is the invisible `.` delimiter.
    Delimited {
        /// Opening delimiter.
        open: Option<char>,
        /// Closing delimiter.
        close: Option<char>,
        /// Enclosed expression.
        body: Box<MathNode>,
    },
    /// Explicit horizontal space in em.
    Space(f64),
}

impl MathNode {
    /// Spacing class seen by a left neighbour.
    pub fn right_class(&self) -> AtomClass {
        match self {
            Self::Glyph { class, .. } => *class,
            Self::Scripts { base, .. } => base.right_class(),
            Self::Row(items) => items.last().map_or(AtomClass::Ord, Self::right_class),
            _ => AtomClass::Ord,
        }
    }

    /// Spacing class seen by a right neighbour.
    pub fn left_class(&self) -> AtomClass {
        match self {
            Self::Glyph { class, .. } => *class,
            Self::Scripts { base, .. } => base.left_class(),
            Self::Row(items) => items.first().map_or(AtomClass::Ord, Self::left_class),
            _ => AtomClass::Ord,
        }
    }
}
