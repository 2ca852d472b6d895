use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use bellcurve::{
    BackendKind, FfmpegSink, FfmpegSinkOpts, FrameIndex, NormalDistributionScene,
    PngSequenceSink, Quality, RenderBackend, RenderConfig, RenderSettings, SingleFrameSink,
    count_frames, create_backend, render_scene, schedule,
};

#[derive(Parser, Debug)]
#[command(name = "bellcurve", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the scene to an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Render every frame as a numbered PNG.
    Frames(FramesArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Print the parameter schedule as JSON.
    Schedule,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum QualityArg {
    Low,
    Medium,
    High,
    Production,
}

impl From<QualityArg> for Quality {
    fn from(q: QualityArg) -> Self {
        match q {
            QualityArg::Low => Quality::Low,
            QualityArg::Medium => Quality::Medium,
            QualityArg::High => Quality::High,
            QualityArg::Production => Quality::Production,
        }
    }
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// Render config JSON. Flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Resolution and frame-rate preset.
    #[arg(long, value_enum)]
    quality: Option<QualityArg>,

    /// Frame-rate override.
    #[arg(long)]
    fps: Option<u32>,

    /// Width override in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Height override in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Background color as `#rrggbb` or `#rrggbbaa`.
    #[arg(long)]
    background: Option<String>,

    /// Fail instead of replacing existing output files.
    #[arg(long)]
    no_overwrite: bool,
}

impl ConfigArgs {
    fn load(&self) -> anyhow::Result<RenderConfig> {
        let mut cfg = match &self.config {
            Some(path) => RenderConfig::from_path(path)
                .with_context(|| format!("load config '{}'", path.display()))?,
            None => RenderConfig::default(),
        };
        if let Some(q) = self.quality {
            cfg.quality = q.into();
        }
        if self.fps.is_some() {
            cfg.fps = self.fps;
        }
        if self.width.is_some() {
            cfg.width = self.width;
        }
        if self.height.is_some() {
            cfg.height = self.height;
        }
        if let Some(bg) = &self.background {
            cfg.background = bg.clone();
        }
        if self.no_overwrite {
            cfg.overwrite = false;
        }
        cfg.validate().context("invalid render config")?;
        Ok(cfg)
    }
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Scene time in seconds of the frame to render.
    #[arg(long, conflicts_with = "last", required_unless_present = "last")]
    at: Option<f64>,

    /// Render the final frame of the scene.
    #[arg(long)]
    last: bool,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Schedule => cmd_schedule(),
    }
}

fn backend_for(cfg: &RenderConfig) -> anyhow::Result<Box<dyn RenderBackend>> {
    let background = cfg.background_color()?;
    Ok(create_backend(BackendKind::Cpu, RenderSettings { background }))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = args.config.load()?;
    let mut backend = backend_for(&cfg)?;
    let mut sink = FfmpegSink::new(FfmpegSinkOpts {
        out_path: args.out.clone(),
        overwrite: cfg.overwrite,
        background: cfg.background_color()?,
    });
    let stats = render_scene(&NormalDistributionScene, &cfg, backend.as_mut(), &mut sink)
        .with_context(|| format!("render '{}'", args.out.display()))?;

    eprintln!("wrote {} ({} frames)", args.out.display(), stats.frames_total);
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let cfg = args.config.load()?;
    let mut backend = backend_for(&cfg)?;
    let mut sink = PngSequenceSink::new(&args.out_dir).with_overwrite(cfg.overwrite);
    let stats = render_scene(&NormalDistributionScene, &cfg, backend.as_mut(), &mut sink)
        .with_context(|| format!("render frames into '{}'", args.out_dir.display()))?;

    eprintln!(
        "wrote {} frames to {}",
        stats.frames_rendered,
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = args.config.load()?;
    let total = count_frames(&NormalDistributionScene, &cfg)?;
    if total == 0 {
        anyhow::bail!("scene has no frames");
    }
    let target = match args.at {
        Some(secs) if !secs.is_finite() || secs < 0.0 => {
            anyhow::bail!("--at must be a non-negative number of seconds")
        }
        Some(secs) => cfg.fps()?.secs_to_frames_floor(secs).min(total - 1),
        None => total - 1,
    };

    let mut backend = backend_for(&cfg)?;
    let mut sink =
        SingleFrameSink::new(FrameIndex(target), &args.out).with_overwrite(cfg.overwrite);
    render_scene(&NormalDistributionScene, &cfg, backend.as_mut(), &mut sink)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {} (frame {target} of {total})", args.out.display());
    Ok(())
}

fn cmd_schedule() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&schedule()).context("serialize schedule")?;
    println!("{json}");
    Ok(())
}
