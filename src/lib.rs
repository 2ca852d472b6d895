//! bellcurve renders an animated normal-distribution curve.
//!
//! The crate carries a small scene engine shaped after the usual math-animation workflow:
//!
//! - Register drawable [`Mobject`]s (static or rebuilt every frame through [`always_redraw`])
//! - Drive them with [`Animation`]s and [`ValueTracker`]s through a blocking [`Scene::play`]
//! - Stream frames into a [`FrameSink`] (MP4 via `ffmpeg`, PNG sequence, single PNG)
//!
//! [`NormalDistributionScene`] is the one scene shipped; [`render_scene`] runs it.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub(crate) mod animation;
/// Render configuration and quality presets.
pub mod config;
pub(crate) mod density;
/// Frame sinks.
pub mod encode;
pub(crate) mod foundation;
/// Rasterization of scene snapshots.
pub mod render;
/// Scene model and timeline.
pub mod scene;
pub(crate) mod tex;

pub use crate::animation::ease::Ease;
pub use crate::animation::tween::{Lerp, tween};
pub use crate::config::{Quality, RenderConfig};
pub use crate::density::{NormalParams, normal_pdf, normal_peak};
pub use crate::foundation::core::{
    Affine, Canvas, Fps, FrameIndex, Point, Rect, Rgba8Premul, Vec2, palette,
};
pub use crate::foundation::error::{BellcurveError, BellcurveResult};

pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::sink::{
    CountingSink, FrameSink, InMemorySink, PngSequenceSink, SingleFrameSink, SinkConfig,
};
pub use crate::render::backend::{
    BackendKind, DrawItem, FrameRGBA, FrameSnapshot, RenderBackend, RenderSettings,
    create_backend,
};
pub use crate::render::camera::{Camera, SceneFrame};
pub use crate::render::cpu::CpuBackend;
pub use crate::scene::animation::{Animation, RevealKind};
pub use crate::scene::axes::{Axes, AxesConfig, AxisRange};
pub use crate::scene::driver::{
    NodeId, RenderStats, Scene, SceneProgram, count_frames, render_scene,
};
pub use crate::scene::live::{Live, MobjectSource, always_redraw};
pub use crate::scene::mobject::{Align, Corner, Direction, Mobject, Primitive};
pub use crate::scene::normal::{NormalDistributionScene, ScheduleStep, schedule};
pub use crate::scene::tracker::ValueTracker;
pub use crate::tex::layout::Typeset;
pub use crate::tex::typeset;
