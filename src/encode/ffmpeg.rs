use std::ffi::OsString;
use std::io::{Read, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use crate::encode::sink::{FrameSink, SinkConfig, check_order, prepare_output};
use crate::foundation::core::{FrameIndex, Rgba8Premul, palette};
use crate::foundation::error::{BellcurveError, BellcurveResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::backend::FrameRGBA;

/// Options for [`FfmpegSink`] MP4 output.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output MP4 file path.
    pub out_path: PathBuf,
    /// Overwrite output file if it already exists.
    pub overwrite: bool,
    /// Color translucent pixels are flattened onto; the video has no alpha.
    pub background: Rgba8Premul,
}

impl FfmpegSinkOpts {
    /// Options writing `out_path` over a black background.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            background: palette::BLACK,
        }
    }
}

struct Encoder {
    child: Child,
    stdin: Option<ChildStdin>,
    stderr: JoinHandle<std::io::Result<Vec<u8>>>,
}

/// Sink that spawns the system `ffmpeg` and streams raw RGBA frames to its stdin.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    encoder: Option<Encoder>,
    cfg: Option<SinkConfig>,
    scratch: Vec<u8>,
    last_idx: Option<FrameIndex>,
    frames_written: u64,
}

impl FfmpegSink {
    /// Create a sink; `ffmpeg` is only spawned in `begin`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
            cfg: None,
            scratch: Vec::new(),
            last_idx: None,
            frames_written: 0,
        }
    }
}

/// Reject sizes that h264/yuv420p output cannot take.
pub fn validate_mp4_config(cfg: &SinkConfig) -> BellcurveResult<()> {
    if cfg.width == 0 || cfg.height == 0 {
        return Err(BellcurveError::validation(
            "mp4 width/height must be non-zero",
        ));
    }
    if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
        return Err(BellcurveError::validation(format!(
            "mp4 width/height must be even for yuv420p, got {}x{}",
            cfg.width, cfg.height
        )));
    }
    Ok(())
}

/// Command line for encoding raw RGBA frames of `cfg` from stdin into `out`.
pub fn ffmpeg_args(cfg: &SinkConfig, out: &Path, overwrite: bool) -> Vec<OsString> {
    let size = format!("{}x{}", cfg.width, cfg.height);
    let rate = format!("{}/{}", cfg.fps.num, cfg.fps.den);
    let mut args: Vec<OsString> = Vec::with_capacity(24);
    args.push(if overwrite { "-y" } else { "-n" }.into());
    for a in [
        "-loglevel",
        "error",
        "-f",
        "rawvideo",
        "-pix_fmt",
        "rgba",
        "-s",
        size.as_str(),
        "-r",
        rate.as_str(),
        "-i",
        "pipe:0",
        "-an",
        "-c:v",
        "libx264",
        "-pix_fmt",
        "yuv420p",
        "-movflags",
        "+faststart",
    ] {
        args.push(a.into());
    }
    args.push(out.as_os_str().to_owned());
    args
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> BellcurveResult<()> {
        validate_mp4_config(&cfg)?;
        prepare_output(&self.opts.out_path, self.opts.overwrite)?;
        if !is_ffmpeg_on_path() {
            return Err(BellcurveError::encode(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        let args = ffmpeg_args(&cfg, &self.opts.out_path, self.opts.overwrite);
        tracing::debug!(?args, "spawning ffmpeg");
        let mut child = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| BellcurveError::encode(format!("failed to spawn ffmpeg: {e}")))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| BellcurveError::encode("failed to open ffmpeg stdin"))?;
        let mut stderr_pipe = child
            .stderr
            .take()
            .ok_or_else(|| BellcurveError::encode("failed to open ffmpeg stderr"))?;
        // ffmpeg blocks once its stderr pipe fills, so read it while frames stream in.
        let stderr = std::thread::spawn(move || {
            let mut buf = Vec::new();
            stderr_pipe.read_to_end(&mut buf)?;
            Ok::<_, std::io::Error>(buf)
        });

        self.scratch = vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 4];
        self.encoder = Some(Encoder {
            child,
            stdin: Some(stdin),
            stderr,
        });
        self.cfg = Some(cfg);
        self.last_idx = None;
        self.frames_written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> BellcurveResult<()> {
        let (Some(cfg), Some(encoder)) = (self.cfg.as_ref(), self.encoder.as_mut()) else {
            return Err(BellcurveError::encode("ffmpeg sink not started"));
        };
        check_order(&mut self.last_idx, idx)?;
        if (frame.width, frame.height) != (cfg.width, cfg.height) {
            return Err(BellcurveError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }

        flatten_onto(&mut self.scratch, &frame.data, self.opts.background)?;
        let stdin = encoder
            .stdin
            .as_mut()
            .ok_or_else(|| BellcurveError::encode("ffmpeg stdin already closed"))?;
        stdin
            .write_all(&self.scratch)
            .map_err(|e| BellcurveError::encode(format!("write frame {} to ffmpeg: {e}", idx.0)))?;
        self.frames_written += 1;
        Ok(())
    }

    fn end(&mut self) -> BellcurveResult<()> {
        let mut encoder = self
            .encoder
            .take()
            .ok_or_else(|| BellcurveError::encode("ffmpeg sink not started"))?;
        drop(encoder.stdin.take());

        let status = encoder
            .child
            .wait()
            .map_err(|e| BellcurveError::encode(format!("wait for ffmpeg: {e}")))?;
        let stderr = encoder
            .stderr
            .join()
            .map_err(|_| BellcurveError::encode("ffmpeg stderr reader panicked"))?
            .map_err(|e| BellcurveError::encode(format!("read ffmpeg stderr: {e}")))?;
        self.cfg = None;

        if !status.success() {
            return Err(BellcurveError::encode(format!(
                "ffmpeg exited with {status}: {}",
                String::from_utf8_lossy(&stderr).trim()
            )));
        }
        tracing::info!(
            frames = self.frames_written,
            out = %self.opts.out_path.display(),
            "ffmpeg finished"
        );
        Ok(())
    }
}

/// Composite premultiplied `src` over `bg` into opaque RGBA8.
fn flatten_onto(dst: &mut [u8], src: &[u8], bg: Rgba8Premul) -> BellcurveResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(BellcurveError::validation(
            "flatten expects equal-length rgba8 buffers",
        ));
    }
    let bg = [bg.r, bg.g, bg.b].map(u16::from);
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let inv = 255 - u16::from(s[3]);
        for c in 0..3 {
            d[c] = (u16::from(s[c]) + mul_div255_u16(bg[c], inv)).min(255) as u8;
        }
        d[3] = 255;
    }
    Ok(())
}

/// `true` when `ffmpeg -version` runs successfully from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
