//! Scene model: trackers, drawable objects, the coordinate system, animations and the
//! timeline that plays them.

/// Reveal and tracker animations.
pub mod animation;
/// Coordinate system and function plots.
pub mod axes;
/// `play`/`wait` timeline.
pub mod driver;
/// Displays rebuilt on every frame.
pub mod live;
/// Drawable objects and positioning.
pub mod mobject;
/// The normal-distribution scene.
pub mod normal;
/// Animatable scalars.
pub mod tracker;
