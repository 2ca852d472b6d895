use std::sync::Arc;

use crate::{
    foundation::core::{Point, Rect, Rgba8Premul, Vec2, palette},
    foundation::error::BellcurveResult,
    render::camera::SceneFrame,
    tex::{self, layout::Typeset},
};

/// Scene units per font point. A 48pt label has an em of two thirds of a unit.
pub const UNITS_PER_FONT_POINT: f64 = 1.0 / 72.0;

/// Scene units per unit of stroke width.
pub const UNITS_PER_STROKE_WIDTH: f64 = 0.01;

/// Gap between an object and a frame edge for [`Mobject::move_to_corner`].
pub const DEFAULT_CORNER_BUFF: f64 = 0.5;

/// Gap between neighbouring objects for [`Mobject::next_to`].
pub const DEFAULT_NEXT_TO_BUFF: f64 = 0.25;

/// Typeset text anchored at its left baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPrimitive {
    /// Layout in em units.
    pub typeset: Arc<Typeset>,
    /// Left end of the baseline, scene units.
    pub origin: Point,
    /// Scene units per em.
    pub em: f64,
    /// Fill color.
    pub color: Rgba8Premul,
}

impl TextPrimitive {
    /// Extent in scene units.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.origin.x,
            self.origin.y - self.typeset.depth * self.em,
            self.origin.x + self.typeset.width * self.em,
            self.origin.y + self.typeset.ascent * self.em,
        )
    }
}

/// One drawable piece in scene units.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// Open stroked path through `points`.
    Polyline {
        /// Vertices in drawing order.
        points: Vec<Point>,
        /// Stroke color.
        color: Rgba8Premul,
        /// Stroke width in scene units.
        width: f64,
    },
    /// Closed filled polygon.
    Polygon {
        /// Vertices.
        points: Vec<Point>,
        /// Fill color.
        color: Rgba8Premul,
    },
    /// Typeset math text.
    Text(TextPrimitive),
}

impl Primitive {
    /// Extent in scene units, or `None` for a primitive without points.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Polyline { points, width, .. } => {
                points_bounds(points).map(|r| r.inflate(width / 2.0, width / 2.0))
            }
            Self::Polygon { points, .. } => points_bounds(points),
            Self::Text(t) => Some(t.bounds()),
        }
    }

    fn shift(&mut self, by: Vec2) {
        match self {
            Self::Polyline { points, .. } | Self::Polygon { points, .. } => {
                for p in points {
                    *p += by;
                }
            }
            Self::Text(t) => t.origin += by,
        }
    }

    fn set_color(&mut self, c: Rgba8Premul) {
        match self {
            Self::Polyline { color, .. } | Self::Polygon { color, .. } => *color = c,
            Self::Text(t) => t.color = c,
        }
    }

    /// Number of pieces a write-in animation reveals.
    pub fn piece_count(&self) -> usize {
        match self {
            Self::Text(t) => t.typeset.piece_count(),
            _ => 1,
        }
    }
}

fn points_bounds(points: &[Point]) -> Option<Rect> {
    let (first, rest) = points.split_first()?;
    let mut r = Rect::from_points(*first, *first);
    for p in rest {
        r = r.union_pt(*p);
    }
    Some(r)
}

/// Frame corner used by [`Mobject::move_to_corner`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Corner {
    /// Top left.
    UpperLeft,
    /// Top right.
    UpperRight,
    /// Bottom left.
    LowerLeft,
    /// Bottom right.
    LowerRight,
}

/// Side of a target used by [`Mobject::next_to`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Above.
    Up,
    /// Below.
    Down,
    /// To the left.
    Left,
    /// To the right.
    Right,
}

/// Cross-axis alignment for [`Mobject::next_to`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    /// Centres aligned.
    Center,
    /// Left edges aligned (vertical placement only).
    Left,
    /// Right edges aligned (vertical placement only).
    Right,
    /// Top edges aligned (horizontal placement only).
    Top,
    /// Bottom edges aligned (horizontal placement only).
    Bottom,
}

/// Drawable scene object: an ordered list of primitives in scene units.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mobject {
    prims: Vec<Primitive>,
}

impl Mobject {
    /// Empty object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Object from primitives.
    pub fn from_primitives(prims: Vec<Primitive>) -> Self {
        Self { prims }
    }

    /// Typeset `src` at `font_size`, centred on the origin.
    pub fn math(src: &str, font_size: f64) -> BellcurveResult<Self> {
        let typeset = tex::typeset(src)?;
        let em = font_size * UNITS_PER_FONT_POINT;
        let origin = Point::new(
            -typeset.width * em / 2.0,
            (typeset.depth - typeset.ascent) * em / 2.0,
        );
        Ok(Self {
            prims: vec![Primitive::Text(TextPrimitive {
                typeset: Arc::new(typeset),
                origin,
                em,
                color: palette::WHITE,
            })],
        })
    }

    /// Primitives in drawing order.
    pub fn primitives(&self) -> &[Primitive] {
        &self.prims
    }

    /// Consume into primitives.
    pub fn into_primitives(self) -> Vec<Primitive> {
        self.prims
    }

    /// Append one primitive.
    pub fn push(&mut self, prim: Primitive) {
        self.prims.push(prim);
    }

    /// Append all primitives of `other`, drawn after the current ones.
    pub fn extend(&mut self, other: Mobject) {
        self.prims.extend(other.prims);
    }

    /// `true` without primitives.
    pub fn is_empty(&self) -> bool {
        self.prims.is_empty()
    }

    /// Pieces revealed by a write-in animation.
    pub fn piece_count(&self) -> usize {
        self.prims.iter().map(Primitive::piece_count).sum()
    }

    /// Union of primitive extents; a zero rect at the origin when empty.
    pub fn bounds(&self) -> Rect {
        self.prims
            .iter()
            .filter_map(Primitive::bounds)
            .reduce(|a, b| a.union(b))
            .unwrap_or(Rect::ZERO)
    }

    /// Translate by `by`.
    pub fn shift(mut self, by: Vec2) -> Self {
        for p in &mut self.prims {
            p.shift(by);
        }
        self
    }

    /// Recolor every primitive.
    pub fn with_color(mut self, color: Rgba8Premul) -> Self {
        for p in &mut self.prims {
            p.set_color(color);
        }
        self
    }

    /// Move so the bounds sit `buff` away from two edges of `frame`.
    pub fn move_to_corner(self, corner: Corner, frame: SceneFrame, buff: f64) -> Self {
        let b = self.bounds();
        let dx = match corner {
            Corner::UpperLeft | Corner::LowerLeft => (-frame.right() + buff) - b.x0,
            Corner::UpperRight | Corner::LowerRight => (frame.right() - buff) - b.x1,
        };
        let dy = match corner {
            Corner::UpperLeft | Corner::UpperRight => (frame.top() - buff) - b.y1,
            Corner::LowerLeft | Corner::LowerRight => (-frame.top() + buff) - b.y0,
        };
        self.shift(Vec2::new(dx, dy))
    }

    /// Place beside `target` on side `dir`, `buff` apart, aligned along the other axis.
    pub fn next_to(self, target: Rect, dir: Direction, align: Align, buff: f64) -> Self {
        let b = self.bounds();
        let (dx, dy) = match dir {
            Direction::Down | Direction::Up => {
                let dy = match dir {
                    Direction::Down => (target.y0 - buff) - b.y1,
                    _ => (target.y1 + buff) - b.y0,
                };
                let dx = match align {
                    Align::Left => target.x0 - b.x0,
                    Align::Right => target.x1 - b.x1,
                    _ => target.center().x - b.center().x,
                };
                (dx, dy)
            }
            Direction::Left | Direction::Right => {
                let dx = match dir {
                    Direction::Left => (target.x0 - buff) - b.x1,
                    _ => (target.x1 + buff) - b.x0,
                };
                let dy = match align {
                    Align::Top => target.y1 - b.y1,
                    Align::Bottom => target.y0 - b.y0,
                    _ => target.center().y - b.center().y,
                };
                (dx, dy)
            }
        };
        self.shift(Vec2::new(dx, dy))
    }
}

/// Leading portion of a polyline covering `fraction` of its vertices.
///
/// The cut falls between vertices with linear interpolation, so the reveal is continuous.
pub fn partial_polyline(points: &[Point], fraction: f64) -> Vec<Point> {
    let f = fraction.clamp(0.0, 1.0);
    if points.len() < 2 || f <= 0.0 {
        return Vec::new();
    }
    if f >= 1.0 {
        return points.to_vec();
    }
    let pos = f * (points.len() - 1) as f64;
    let whole = pos.floor() as usize;
    let rem = pos - whole as f64;
    let mut out = points[..=whole].to_vec();
    if rem > 0.0 {
        let a = points[whole];
        let b = points[whole + 1];
        out.push(a.lerp(b, rem));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/scene/mobject.rs"]
mod tests;
