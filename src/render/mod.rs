//! Rasterization of scene snapshots.
//!
//! The [`camera`] maps scene units to pixels, [`text`] turns typeset math into rasters, and
//! [`cpu`] draws a [`backend::FrameSnapshot`] with `vello_cpu`.

/// Backend trait and frame types.
pub mod backend;
/// Scene-to-pixel mapping.
pub mod camera;
/// CPU raster backend.
pub mod cpu;
/// Math text rasterization.
pub mod text;
