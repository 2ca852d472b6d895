//! Frame sinks.
//!
//! Sinks consume rendered frames in timeline order and are driven by
//! [`crate::render_scene`].

/// `ffmpeg`-based MP4 output via the system `ffmpeg`.
pub mod ffmpeg;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
