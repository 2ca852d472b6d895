use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::{Fps, FrameIndex, Rgba8Premul};
use crate::foundation::error::{BellcurveError, BellcurveResult};
use crate::render::backend::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: Fps,
}

/// Sink contract for consuming rendered frames in timeline order.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> BellcurveResult<()>;

    /// Whether frame `idx` should be rasterized and pushed at all.
    ///
    /// Frames answered with `false` still advance the timeline but are never drawn.
    fn wants_frame(&self, _idx: FrameIndex) -> bool {
        true
    }

    /// Push one frame in strictly increasing timeline order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> BellcurveResult<()>;

    /// Called once after the last frame is pushed.
    fn end(&mut self) -> BellcurveResult<()>;
}

/// Refuse to replace `path` unless `overwrite` is set, then make sure its directory exists.
pub fn prepare_output(path: &Path, overwrite: bool) -> BellcurveResult<()> {
    if !overwrite && path.exists() {
        return Err(BellcurveError::validation(format!(
            "output file '{}' already exists",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

pub(crate) fn check_order(last: &mut Option<FrameIndex>, idx: FrameIndex) -> BellcurveResult<()> {
    if let Some(prev) = *last
        && idx.0 <= prev.0
    {
        return Err(BellcurveError::encode(format!(
            "sink received out-of-order frame index {} after {}",
            idx.0, prev.0
        )));
    }
    *last = Some(idx);
    Ok(())
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    ended: bool,
    frames: Vec<(FrameIndex, FrameRGBA)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg.clone()
    }

    /// `true` after `end`.
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> BellcurveResult<()> {
        self.cfg = Some(cfg);
        self.ended = false;
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> BellcurveResult<()> {
        let mut last = self.frames.last().map(|(i, _)| *i);
        check_order(&mut last, idx)?;
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> BellcurveResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Sink that only counts the timeline; it never asks for a frame.
#[derive(Debug, Default)]
pub struct CountingSink {
    cfg: Option<SinkConfig>,
}

impl FrameSink for CountingSink {
    fn begin(&mut self, cfg: SinkConfig) -> BellcurveResult<()> {
        self.cfg = Some(cfg);
        Ok(())
    }

    fn wants_frame(&self, _idx: FrameIndex) -> bool {
        false
    }

    fn push_frame(&mut self, idx: FrameIndex, _frame: &FrameRGBA) -> BellcurveResult<()> {
        Err(BellcurveError::encode(format!(
            "counting sink does not accept frames (got {})",
            idx.0
        )))
    }

    fn end(&mut self) -> BellcurveResult<()> {
        Ok(())
    }
}

/// Writes every frame as `frame_NNNNN.png` into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    overwrite: bool,
    last_idx: Option<FrameIndex>,
    written: u64,
}

impl PngSequenceSink {
    /// Sink writing `frame_00000.png`, `frame_00001.png`, ... into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            overwrite: true,
            last_idx: None,
            written: 0,
        }
    }

    /// Whether existing frame files may be replaced.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Path of frame `idx`.
    pub fn path_for(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!("frame_{:05}.png", idx.0))
    }

    /// Frames written so far.
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, _cfg: SinkConfig) -> BellcurveResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create frame directory '{}'", self.dir.display()))?;
        self.last_idx = None;
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> BellcurveResult<()> {
        check_order(&mut self.last_idx, idx)?;
        let path = self.path_for(idx);
        prepare_output(&path, self.overwrite)?;
        write_png(&path, frame)?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> BellcurveResult<()> {
        tracing::info!(frames = self.written, dir = %self.dir.display(), "wrote png sequence");
        Ok(())
    }
}

/// Keeps exactly one frame of the timeline and writes it as a PNG on `end`.
#[derive(Debug)]
pub struct SingleFrameSink {
    target: FrameIndex,
    out_path: PathBuf,
    overwrite: bool,
    frame: Option<FrameRGBA>,
}

impl SingleFrameSink {
    /// Sink capturing frame `target` into `out_path`.
    pub fn new(target: FrameIndex, out_path: impl Into<PathBuf>) -> Self {
        Self {
            target,
            out_path: out_path.into(),
            overwrite: true,
            frame: None,
        }
    }

    /// Whether an existing file at the output path may be replaced.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Captured frame, once pushed.
    pub fn frame(&self) -> Option<&FrameRGBA> {
        self.frame.as_ref()
    }
}

impl FrameSink for SingleFrameSink {
    fn begin(&mut self, _cfg: SinkConfig) -> BellcurveResult<()> {
        prepare_output(&self.out_path, self.overwrite)?;
        self.frame = None;
        Ok(())
    }

    fn wants_frame(&self, idx: FrameIndex) -> bool {
        idx == self.target
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> BellcurveResult<()> {
        if idx != self.target {
            return Err(BellcurveError::encode(format!(
                "single frame sink expected frame {}, got {}",
                self.target.0, idx.0
            )));
        }
        self.frame = Some(frame.clone());
        Ok(())
    }

    fn end(&mut self) -> BellcurveResult<()> {
        let frame = self.frame.as_ref().ok_or_else(|| {
            BellcurveError::encode(format!(
                "frame {} is past the end of the scene",
                self.target.0
            ))
        })?;
        write_png(&self.out_path, frame)
    }
}

/// Save `frame` as an RGBA PNG, un-premultiplying if needed.
///
/// The parent directory must exist; sinks call [`prepare_output`] first.
pub fn write_png(path: &Path, frame: &FrameRGBA) -> BellcurveResult<()> {
    let straight = if frame.premultiplied {
        unpremultiply(&frame.data)
    } else {
        frame.data.clone()
    };
    image::save_buffer_with_format(
        path,
        &straight,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn unpremultiply(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    for px in data.chunks_exact(4) {
        if px[3] == 255 {
            out.extend_from_slice(px);
            continue;
        }
        let c = Rgba8Premul {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        };
        out.extend_from_slice(&c.to_straight_rgba());
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
