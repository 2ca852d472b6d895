use std::{fmt, rc::Rc};

use crate::{foundation::error::BellcurveResult, scene::mobject::Mobject};

/// Display rebuilt from its sources every time it is read.
///
/// The builder typically captures [`crate::ValueTracker`] clones; nothing is cached, so a
/// frame always reflects the tracker values at the moment it is drawn.
#[derive(Clone)]
pub struct Live {
    builder: Rc<dyn Fn() -> BellcurveResult<Mobject>>,
}

impl Live {
    /// Wrap a builder.
    pub fn new(builder: impl Fn() -> BellcurveResult<Mobject> + 'static) -> Self {
        Self {
            builder: Rc::new(builder),
        }
    }

    /// Run the builder against the current state.
    pub fn build(&self) -> BellcurveResult<Mobject> {
        (self.builder)()
    }
}

impl fmt::Debug for Live {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Live").finish_non_exhaustive()
    }
}

/// Shorthand for [`Live::new`].
pub fn always_redraw(builder: impl Fn() -> BellcurveResult<Mobject> + 'static) -> Live {
    Live::new(builder)
}

/// Where a scene node gets its geometry from.
#[derive(Clone, Debug)]
pub enum MobjectSource {
    /// Fixed geometry built once.
    Static(Mobject),
    /// Rebuilt on every frame.
    Live(Live),
}

impl MobjectSource {
    /// Geometry for the current frame.
    pub fn resolve(&self) -> BellcurveResult<Mobject> {
        match self {
            Self::Static(m) => Ok(m.clone()),
            Self::Live(l) => l.build(),
        }
    }
}

impl From<Mobject> for MobjectSource {
    fn from(m: Mobject) -> Self {
        Self::Static(m)
    }
}

impl From<Live> for MobjectSource {
    fn from(l: Live) -> Self {
        Self::Live(l)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/live.rs"]
mod tests;
