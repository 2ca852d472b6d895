use super::*;
use crate::config::RenderConfig;
use crate::density::normal_peak;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::Point;
use crate::render::backend::{DrawItem, FrameRGBA, FrameSnapshot, RenderBackend};
use crate::render::camera::{Camera, SceneFrame};
use crate::scene::driver::render_scene;
use crate::scene::mobject::Primitive;

fn glyphs(m: &Mobject) -> String {
    m.primitives()
        .iter()
        .filter_map(|p| match p {
            Primitive::Text(t) => Some(t.typeset.glyphs.iter().map(|g| g.ch).collect::<String>()),
            _ => None,
        })
        .collect()
}

#[test]
fn transitions_run_in_fixed_order() {
    let targets: Vec<(Param, f64)> = TRANSITIONS.iter().map(|t| (t.param, t.target)).collect();
    assert_eq!(
        targets,
        vec![
            (Param::Mean, 2.0),
            (Param::Sigma, 1.5),
            (Param::Mean, -3.5),
            (Param::Sigma, 0.5),
            (Param::Mean, 1.0),
            (Param::Sigma, 1.0),
        ]
    );
}

#[test]
fn schedule_states_accumulate_both_parameters() {
    let states: Vec<(f64, f64)> = schedule_states()
        .iter()
        .map(|p| (p.mean, p.sigma))
        .collect();
    assert_eq!(
        states,
        vec![
            (2.0, 1.0),
            (2.0, 1.5),
            (-3.5, 1.5),
            (-3.5, 0.5),
            (1.0, 0.5),
            (1.0, 1.0),
        ]
    );
}

#[test]
fn schedule_records_start_values() {
    let steps = schedule();
    assert_eq!(steps.len(), 6);
    assert_eq!(steps[0].from, 0.0);
    assert_eq!(steps[1].from, 1.0);
    assert_eq!(steps[2].from, 2.0);
    assert_eq!(steps[3].from, 1.5);
    assert_eq!(steps[4].from, -3.5);
    assert_eq!(steps[5].from, 0.5);
    assert!(steps.iter().all(|s| s.run_time == TRANSITION_RUN_TIME));
    assert_eq!(steps[5].step, 6);

    let json = serde_json::to_value(&steps[2]).unwrap();
    assert_eq!(json["param"], "mean");
    assert_eq!(json["to"], -3.5);
}

#[test]
fn labels_use_two_decimals() {
    assert_eq!(mean_label_tex(0.0), r"\mu = 0.00");
    assert_eq!(mean_label_tex(-3.5), r"\mu = -3.50");
    assert_eq!(sigma_label_tex(1.234_9), r"\sigma = 1.23");
}

#[test]
fn formula_typesets() {
    let m = Mobject::math(DENSITY_TEX, FORMULA_FONT_SIZE).unwrap();
    assert!(glyphs(&m).starts_with("f(x)="));
    // Long enough to take the slow write-in.
    assert!(m.piece_count() >= crate::scene::animation::WRITE_LONG_THRESHOLD);
}

#[test]
fn axes_box_matches_range() {
    let axes = normal_axes().unwrap();
    let lo = axes.coords_to_point(-10.0, 0.0);
    let hi = axes.coords_to_point(10.0, 0.5);
    assert_eq!((lo.x, lo.y), (-5.0, -2.5));
    assert_eq!((hi.x, hi.y), (5.0, 2.5));
}

#[test]
fn labels_stack_under_formula_left_aligned() {
    let frame = SceneFrame {
        width: 16.0 * 8.0 / 9.0,
        height: 8.0,
    };
    let formula = Mobject::math(DENSITY_TEX, FORMULA_FONT_SIZE)
        .unwrap()
        .move_to_corner(Corner::UpperLeft, frame, DEFAULT_CORNER_BUFF);
    let f = formula.bounds();
    let (mu, sigma) = parameter_labels(0.0, 1.0, f).unwrap();
    let (m, s) = (mu.bounds(), sigma.bounds());

    assert!((f.x0 - (-frame.right() + DEFAULT_CORNER_BUFF)).abs() < 1e-9);
    assert!((f.y1 - (frame.top() - DEFAULT_CORNER_BUFF)).abs() < 1e-9);
    assert!((m.y1 - (f.y0 - DEFAULT_NEXT_TO_BUFF)).abs() < 1e-9);
    assert!((s.y1 - (m.y0 - DEFAULT_NEXT_TO_BUFF)).abs() < 1e-9);
    assert!((m.x0 - f.x0).abs() < 1e-9);
    assert!((s.x0 - f.x0).abs() < 1e-9);
    assert_eq!(glyphs(&mu), "μ=0.00");
    assert_eq!(glyphs(&sigma), "σ=1.00");
}

#[test]
fn curve_peak_follows_parameters() {
    let axes = normal_axes().unwrap();
    let curve = axes.plot(|x| normal_pdf(x, 2.0, 1.5), palette::BLUE);
    let [Primitive::Polyline { points, .. }] = curve.primitives() else {
        panic!("expected one polyline");
    };
    let top = points
        .iter()
        .copied()
        .fold(points[0], |a, b| if b.y > a.y { b } else { a });
    let (x, y) = axes.point_to_coords(top);
    assert!((x - 2.0).abs() < 1e-9);
    assert!((y - crate::density::normal_peak(1.5)).abs() < 1e-9);
}

/// Backend that keeps every snapshot instead of drawing it.
#[derive(Default)]
struct Recorder {
    snapshots: Vec<FrameSnapshot>,
}

impl RenderBackend for Recorder {
    fn render(&mut self, camera: &Camera, snapshot: &FrameSnapshot) -> BellcurveResult<FrameRGBA> {
        self.snapshots.push(snapshot.clone());
        let c = camera.canvas();
        Ok(FrameRGBA {
            width: c.width,
            height: c.height,
            data: Vec::new(),
            premultiplied: true,
        })
    }
}

/// Snapshots of every frame of the scene at 5 fps.
fn record_scene() -> Vec<FrameSnapshot> {
    let cfg = RenderConfig {
        fps: Some(5),
        width: Some(64),
        height: Some(36),
        ..RenderConfig::default()
    };
    let mut backend = Recorder::default();
    let mut sink = InMemorySink::new();
    let stats = render_scene(&NormalDistributionScene, &cfg, &mut backend, &mut sink).unwrap();
    assert_eq!(stats.frames_rendered as usize, backend.snapshots.len());
    backend.snapshots
}

fn item_glyphs(item: &DrawItem) -> Option<String> {
    match &item.prim {
        Primitive::Text(t) => Some(t.typeset.glyphs.iter().map(|g| g.ch).collect()),
        _ => None,
    }
}

fn curve_peak(item: &DrawItem) -> Point {
    let Primitive::Polyline { points, color, .. } = &item.prim else {
        panic!("expected the curve polyline, got {:?}", item.prim);
    };
    assert_eq!(*color, palette::BLUE);
    points
        .iter()
        .copied()
        .fold(points[0], |a, b| if b.y > a.y { b } else { a })
}

#[test]
fn stage_order_is_axes_labels_curve_formula_readouts() {
    let snapshots = record_scene();
    // Intro 5 s, six 2 s transitions and a 2 s hold.
    assert_eq!(snapshots.len(), 95);

    let last = snapshots.last().unwrap();
    let axes = normal_axes().unwrap().mobject().unwrap();
    let n_axes = axes.primitives().len();
    assert_eq!(last.items.len(), n_axes + 6);

    assert!(
        last.items[..n_axes]
            .iter()
            .map(|i| &i.prim)
            .eq(axes.primitives().iter())
    );
    let rest: Vec<Option<String>> = last.items[n_axes..].iter().map(item_glyphs).collect();
    assert_eq!(rest[0].as_deref(), Some("x"));
    assert_eq!(rest[1].as_deref(), Some("f(x)"));
    assert_eq!(rest[2], None);
    assert!(rest[3].as_deref().is_some_and(|g| g.starts_with("f(x)=")));
    assert_eq!(rest[4].as_deref(), Some("μ=1.00"));
    assert_eq!(rest[5].as_deref(), Some("σ=1.00"));
    assert!(last.items.iter().all(|i| i.opacity == 1.0 && i.wipe == 1.0));
}

#[test]
fn readouts_and_curve_follow_every_transition() {
    let snapshots = record_scene();
    let axes = normal_axes().unwrap();
    let n_axes = axes.mobject().unwrap().primitives().len();
    let expected = [
        ("μ=2.00", "σ=1.00"),
        ("μ=2.00", "σ=1.50"),
        ("μ=−3.50", "σ=1.50"),
        ("μ=−3.50", "σ=0.50"),
        ("μ=1.00", "σ=0.50"),
        ("μ=1.00", "σ=1.00"),
    ];

    for (k, (state, (mu, sigma))) in schedule_states().iter().zip(expected).enumerate() {
        // 25 intro frames, then 10 frames per transition.
        let frame = &snapshots[25 + 10 * k + 9];
        let curve = &frame.items[n_axes + 2];
        let (x, y) = axes.point_to_coords(curve_peak(curve));
        assert!((x - state.mean).abs() < 1e-9, "transition {k}: peak at x={x}");
        assert!(
            (y - normal_peak(state.sigma)).abs() < 1e-9,
            "transition {k}: peak height {y}"
        );
        assert_eq!(item_glyphs(&frame.items[n_axes + 4]).as_deref(), Some(mu));
        assert_eq!(item_glyphs(&frame.items[n_axes + 5]).as_deref(), Some(sigma));
    }
}

#[test]
fn readouts_move_with_trackers_mid_transition() {
    let snapshots = record_scene();
    let axes = normal_axes().unwrap();
    let n_axes = axes.mobject().unwrap().primitives().len();

    // Halfway through the first transition, mean 0 -> 2.
    let frame = &snapshots[25 + 4];
    let (x, _) = axes.point_to_coords(curve_peak(&frame.items[n_axes + 2]));
    let mu = item_glyphs(&frame.items[n_axes + 4]).unwrap();
    assert!(x > 0.0 && x < 2.0, "mid-transition peak at x={x}");
    assert_ne!(mu, "μ=0.00");
    assert_ne!(mu, "μ=2.00");
    assert_eq!(item_glyphs(&frame.items[n_axes + 5]).as_deref(), Some("σ=1.00"));
}
