use crate::{
    animation::{ease::Ease, tween::tween},
    config::RenderConfig,
    encode::sink::{CountingSink, FrameSink, SinkConfig},
    foundation::{
        core::{Fps, FrameIndex},
        error::{BellcurveError, BellcurveResult},
    },
    render::{
        backend::{DrawItem, FrameRGBA, FrameSnapshot, RenderBackend},
        camera::{Camera, SceneFrame},
    },
    scene::{
        animation::{Animation, RevealKind, reveal_items},
        live::MobjectSource,
        tracker::ValueTracker,
    },
};

/// Handle to a node registered with a [`Scene`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// Frame counters reported by [`render_scene`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RenderStats {
    /// Frames on the timeline.
    pub frames_total: u64,
    /// Frames rasterized and pushed to the sink.
    pub frames_rendered: u64,
    /// Frames the sink did not ask for.
    pub frames_skipped: u64,
}

/// A scene script: builds nodes and drives the timeline.
pub trait SceneProgram {
    /// Short identifier used in logs and output names.
    fn name(&self) -> &str;

    /// Issue the scene's `play`/`wait` calls in order.
    fn construct(&self, scene: &mut Scene<'_>) -> BellcurveResult<()>;
}

struct Node {
    source: MobjectSource,
}

struct ActiveReveal {
    node: NodeId,
    kind: RevealKind,
    ease: Ease,
}

struct ActiveValue {
    tracker: ValueTracker,
    start: f64,
    target: f64,
    ease: Ease,
}

/// Linear timeline that turns `play`/`wait` calls into frames.
///
/// Calls block until every frame they cover has been handed to the sink, so tracker values
/// seen after `play` returns are the animation targets.
pub struct Scene<'a> {
    camera: Camera,
    fps: Fps,
    nodes: Vec<Node>,
    stage: Vec<NodeId>,
    backend: &'a mut dyn RenderBackend,
    sink: &'a mut dyn FrameSink,
    next_frame: u64,
    stats: RenderStats,
}

impl<'a> Scene<'a> {
    /// Timeline over `camera` at `fps` writing into `sink`.
    ///
    /// The caller is responsible for `begin`/`end` on the sink; see [`render_scene`].
    pub fn new(
        camera: Camera,
        fps: Fps,
        backend: &'a mut dyn RenderBackend,
        sink: &'a mut dyn FrameSink,
    ) -> Self {
        Self {
            camera,
            fps,
            nodes: Vec::new(),
            stage: Vec::new(),
            backend,
            sink,
            next_frame: 0,
            stats: RenderStats::default(),
        }
    }

    /// Visible region in scene units.
    pub fn frame(&self) -> SceneFrame {
        self.camera.frame()
    }

    /// Timeline frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Seconds of timeline emitted so far.
    pub fn time(&self) -> f64 {
        self.fps.frames_to_secs(self.next_frame)
    }

    /// Counters so far.
    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Register geometry; it stays hidden until an animation or [`Scene::add`] shows it.
    pub fn register(&mut self, source: impl Into<MobjectSource>) -> NodeId {
        self.nodes.push(Node {
            source: source.into(),
        });
        NodeId(self.nodes.len() - 1)
    }

    /// Put `node` on stage without animation.
    pub fn add(&mut self, node: NodeId) -> BellcurveResult<()> {
        self.check_node(node)?;
        self.stage_node(node);
        Ok(())
    }

    /// `true` once `node` has been shown.
    pub fn is_on_stage(&self, node: NodeId) -> bool {
        self.stage.contains(&node)
    }

    fn check_node(&self, node: NodeId) -> BellcurveResult<()> {
        if node.0 >= self.nodes.len() {
            return Err(BellcurveError::animation(format!(
                "unknown scene node {}",
                node.0
            )));
        }
        Ok(())
    }

    fn stage_node(&mut self, node: NodeId) {
        if !self.stage.contains(&node) {
            self.stage.push(node);
        }
    }

    fn resolve_run_time(&self, anims: &[Animation], run_time: Option<f64>) -> BellcurveResult<f64> {
        let secs = match run_time {
            Some(t) => t,
            None => {
                let mut longest = 0.0f64;
                for a in anims {
                    let t = a.default_run_time(|node| {
                        Ok(self.nodes[node.0].source.resolve()?.piece_count())
                    })?;
                    longest = longest.max(t);
                }
                longest
            }
        };
        if !secs.is_finite() || secs <= 0.0 {
            return Err(BellcurveError::animation(format!(
                "run time must be finite and > 0, got {secs}"
            )));
        }
        Ok(secs)
    }

    /// Play `anims` together over `run_time` seconds (or the longest default).
    ///
    /// Frame `i` of `n` shows progress `(i + 1) / n`, so the last frame is the end state.
    #[tracing::instrument(level = "debug", skip(self, anims), fields(anims = anims.len(), t0 = self.time()))]
    pub fn play(&mut self, anims: Vec<Animation>, run_time: Option<f64>) -> BellcurveResult<()> {
        if anims.is_empty() {
            return Err(BellcurveError::animation("play needs at least one animation"));
        }
        for a in &anims {
            if let Some(node) = a.node() {
                self.check_node(node)?;
            }
        }
        let secs = self.resolve_run_time(&anims, run_time)?;
        let n = self.fps.secs_to_frames_round(secs).max(1);

        let mut reveals = Vec::new();
        let mut values = Vec::new();
        for a in anims {
            match a {
                Animation::Reveal { node, kind, ease } => {
                    self.stage_node(node);
                    reveals.push(ActiveReveal { node, kind, ease });
                }
                Animation::SetValue {
                    tracker,
                    target,
                    ease,
                } => {
                    let start = tracker.get();
                    values.push(ActiveValue {
                        tracker,
                        start,
                        target,
                        ease,
                    });
                }
            }
        }
        tracing::debug!(secs, frames = n, "play");

        for i in 0..n {
            let progress = (i + 1) as f64 / n as f64;
            for v in &values {
                v.tracker
                    .set(tween(&v.start, &v.target, 1.0, progress, v.ease));
            }
            self.emit_frame(&reveals, progress)?;
        }
        for v in &values {
            v.tracker.set(v.target);
        }
        Ok(())
    }

    /// Hold the current state for `secs` seconds.
    #[tracing::instrument(level = "debug", skip(self), fields(t0 = self.time()))]
    pub fn wait(&mut self, secs: f64) -> BellcurveResult<()> {
        if !secs.is_finite() || secs < 0.0 {
            return Err(BellcurveError::animation(format!(
                "wait duration must be finite and >= 0, got {secs}"
            )));
        }
        for _ in 0..self.fps.secs_to_frames_round(secs) {
            self.emit_frame(&[], 1.0)?;
        }
        Ok(())
    }

    /// Everything on stage for the current tracker values.
    pub fn snapshot(&self) -> BellcurveResult<FrameSnapshot> {
        self.snapshot_with(&[], 1.0)
    }

    fn snapshot_with(
        &self,
        reveals: &[ActiveReveal],
        progress: f64,
    ) -> BellcurveResult<FrameSnapshot> {
        let mut items = Vec::new();
        for &id in &self.stage {
            let mobject = self.nodes[id.0].source.resolve()?;
            match reveals.iter().rev().find(|r| r.node == id) {
                Some(r) => items.extend(reveal_items(r.kind, r.ease.apply(progress), mobject)),
                None => items.extend(mobject.into_primitives().into_iter().map(DrawItem::full)),
            }
        }
        Ok(FrameSnapshot { items })
    }

    fn emit_frame(&mut self, reveals: &[ActiveReveal], progress: f64) -> BellcurveResult<()> {
        let idx = FrameIndex(self.next_frame);
        self.next_frame += 1;
        self.stats.frames_total += 1;

        if !self.sink.wants_frame(idx) {
            self.stats.frames_skipped += 1;
            return Ok(());
        }
        let snapshot = self.snapshot_with(reveals, progress)?;
        let frame = self.backend.render(&self.camera, &snapshot)?;
        self.sink.push_frame(idx, &frame)?;
        self.stats.frames_rendered += 1;
        Ok(())
    }
}

/// Run `program` from the first frame to the last, streaming frames into `sink`.
#[tracing::instrument(skip_all, fields(scene = program.name()))]
pub fn render_scene(
    program: &dyn SceneProgram,
    cfg: &RenderConfig,
    backend: &mut dyn RenderBackend,
    sink: &mut dyn FrameSink,
) -> BellcurveResult<RenderStats> {
    cfg.validate()?;
    let canvas = cfg.canvas();
    let fps = cfg.fps()?;
    tracing::info!(
        width = canvas.width,
        height = canvas.height,
        fps = fps.as_f64(),
        "rendering scene"
    );

    sink.begin(SinkConfig {
        width: canvas.width,
        height: canvas.height,
        fps,
    })?;
    let stats = {
        let mut scene = Scene::new(Camera::new(canvas), fps, backend, &mut *sink);
        program.construct(&mut scene)?;
        scene.stats()
    };
    sink.end()?;

    tracing::info!(
        frames = stats.frames_total,
        rendered = stats.frames_rendered,
        skipped = stats.frames_skipped,
        "scene finished"
    );
    Ok(stats)
}

struct Unrendered;

impl RenderBackend for Unrendered {
    fn render(&mut self, _: &Camera, _: &FrameSnapshot) -> BellcurveResult<FrameRGBA> {
        Err(BellcurveError::render("frame counting does not rasterize"))
    }
}

/// Number of frames `program` emits under `cfg`, without rasterizing any of them.
pub fn count_frames(program: &dyn SceneProgram, cfg: &RenderConfig) -> BellcurveResult<u64> {
    let mut sink = CountingSink::default();
    let stats = render_scene(program, cfg, &mut Unrendered, &mut sink)?;
    Ok(stats.frames_total)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/driver.rs"]
mod tests;
