use crate::{
    animation::ease::Ease,
    foundation::error::BellcurveResult,
    render::backend::DrawItem,
    scene::{
        driver::NodeId,
        mobject::{Mobject, Primitive, partial_polyline},
        tracker::ValueTracker,
    },
};

/// Pieces below which a write-in finishes in one second instead of two.
pub const WRITE_LONG_THRESHOLD: usize = 15;

/// Upper bound on the per-primitive stagger of a write-in.
const WRITE_MAX_LAG_RATIO: f64 = 0.2;

/// How a node is brought on stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealKind {
    /// Opacity from 0 to 1.
    FadeIn,
    /// Strokes drawn along their length, text wiped in, fills faded in.
    Create,
    /// Like [`RevealKind::Create`] with primitives staggered in drawing order.
    Write,
}

impl RevealKind {
    /// Run time used when `play` is not given one.
    pub fn default_run_time(self, piece_count: usize) -> f64 {
        match self {
            Self::FadeIn | Self::Create => 1.0,
            Self::Write if piece_count < WRITE_LONG_THRESHOLD => 1.0,
            Self::Write => 2.0,
        }
    }
}

/// One animation of a `play` call.
#[derive(Clone, Debug)]
pub enum Animation {
    /// Bring a registered node on stage.
    Reveal {
        /// Node to reveal.
        node: NodeId,
        /// Reveal style.
        kind: RevealKind,
        /// Rate function.
        ease: Ease,
    },
    /// Move a tracker from its value at play start to `target`.
    SetValue {
        /// Tracker to drive.
        tracker: ValueTracker,
        /// Value at the end of the play.
        target: f64,
        /// Rate function.
        ease: Ease,
    },
}

impl Animation {
    /// Fade `node` in.
    pub fn fade_in(node: NodeId) -> Self {
        Self::reveal(node, RevealKind::FadeIn)
    }

    /// Draw `node` in.
    pub fn create(node: NodeId) -> Self {
        Self::reveal(node, RevealKind::Create)
    }

    /// Write `node` in.
    pub fn write(node: NodeId) -> Self {
        Self::reveal(node, RevealKind::Write)
    }

    fn reveal(node: NodeId, kind: RevealKind) -> Self {
        Self::Reveal {
            node,
            kind,
            ease: Ease::default(),
        }
    }

    /// Replace the rate function.
    pub fn with_ease(mut self, new: Ease) -> Self {
        match &mut self {
            Self::Reveal { ease, .. } | Self::SetValue { ease, .. } => *ease = new,
        }
        self
    }

    /// Rate function.
    pub fn ease(&self) -> Ease {
        match self {
            Self::Reveal { ease, .. } | Self::SetValue { ease, .. } => *ease,
        }
    }

    /// Node this animation reveals, if any.
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Self::Reveal { node, .. } => Some(*node),
            Self::SetValue { .. } => None,
        }
    }

    /// Run time used when `play` is not given one.
    ///
    /// `piece_count` is only asked for write-ins.
    pub fn default_run_time(
        &self,
        piece_count: impl FnOnce(NodeId) -> BellcurveResult<usize>,
    ) -> BellcurveResult<f64> {
        match self {
            Self::Reveal {
                node,
                kind: RevealKind::Write,
                ..
            } => Ok(RevealKind::Write.default_run_time(piece_count(*node)?)),
            Self::Reveal { kind, .. } => Ok(kind.default_run_time(0)),
            Self::SetValue { .. } => Ok(1.0),
        }
    }
}

/// Draw items for `mobject` at eased reveal progress `alpha` in `[0, 1]`.
pub fn reveal_items(kind: RevealKind, alpha: f64, mobject: Mobject) -> Vec<DrawItem> {
    let alpha = alpha.clamp(0.0, 1.0);
    match kind {
        RevealKind::FadeIn => mobject
            .into_primitives()
            .into_iter()
            .map(|prim| DrawItem {
                prim,
                opacity: alpha,
                wipe: 1.0,
            })
            .collect(),
        RevealKind::Create => mobject
            .into_primitives()
            .into_iter()
            .filter_map(|prim| partial_primitive(prim, alpha))
            .collect(),
        RevealKind::Write => {
            let prims = mobject.into_primitives();
            let n = prims.len();
            prims
                .into_iter()
                .enumerate()
                .filter_map(|(i, prim)| partial_primitive(prim, lagged_alpha(alpha, i, n)))
                .collect()
        }
    }
}

/// Progress of piece `index` of `count` when pieces start staggered.
pub fn lagged_alpha(alpha: f64, index: usize, count: usize) -> f64 {
    if count <= 1 || alpha <= 0.0 || alpha >= 1.0 {
        return alpha.clamp(0.0, 1.0);
    }
    let lag = (4.0 / count as f64).min(WRITE_MAX_LAG_RATIO);
    let full = (count - 1) as f64 * lag + 1.0;
    (alpha * full - index as f64 * lag).clamp(0.0, 1.0)
}

fn partial_primitive(prim: Primitive, alpha: f64) -> Option<DrawItem> {
    if alpha <= 0.0 {
        return None;
    }
    let item = match prim {
        Primitive::Polyline {
            points,
            color,
            width,
        } => {
            let points = partial_polyline(&points, alpha);
            if points.len() < 2 {
                return None;
            }
            DrawItem::full(Primitive::Polyline {
                points,
                color,
                width,
            })
        }
        Primitive::Polygon { .. } => DrawItem {
            prim,
            opacity: alpha,
            wipe: 1.0,
        },
        Primitive::Text(_) => DrawItem {
            prim,
            opacity: 1.0,
            wipe: alpha,
        },
    };
    Some(item)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/animation.rs"]
mod tests;
