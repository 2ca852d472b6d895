use super::*;
use crate::foundation::core::{Point, palette};

fn line() -> Primitive {
    Primitive::Polyline {
        points: vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
        ],
        color: palette::WHITE,
        width: 0.04,
    }
}

fn tip() -> Primitive {
    Primitive::Polygon {
        points: vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        ],
        color: palette::WHITE,
    }
}

#[test]
fn default_run_times() {
    assert_eq!(RevealKind::FadeIn.default_run_time(100), 1.0);
    assert_eq!(RevealKind::Create.default_run_time(100), 1.0);
    assert_eq!(RevealKind::Write.default_run_time(14), 1.0);
    assert_eq!(RevealKind::Write.default_run_time(15), 2.0);

    let set = ValueTracker::new(0.0).animate_to(1.0);
    assert_eq!(set.default_run_time(|_| unreachable!()).unwrap(), 1.0);
    let write = Animation::write(NodeId(0));
    assert_eq!(write.default_run_time(|_| Ok(20)).unwrap(), 2.0);
}

#[test]
fn constructors_use_smooth_and_with_ease_overrides() {
    let a = Animation::fade_in(NodeId(3));
    assert_eq!(a.ease(), Ease::Smooth);
    assert_eq!(a.node(), Some(NodeId(3)));
    let a = a.with_ease(Ease::Linear);
    assert_eq!(a.ease(), Ease::Linear);
    assert_eq!(ValueTracker::new(0.0).animate_to(1.0).node(), None);
}

#[test]
fn fade_in_scales_opacity_only() {
    let m = Mobject::from_primitives(vec![line(), tip()]);
    let items = reveal_items(RevealKind::FadeIn, 0.3, m.clone());
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i.opacity == 0.3 && i.wipe == 1.0));
    assert_eq!(items[0].prim, m.primitives()[0]);
}

#[test]
fn create_draws_strokes_partially() {
    let m = Mobject::from_primitives(vec![line(), tip()]);
    let items = reveal_items(RevealKind::Create, 0.75, m);
    let Primitive::Polyline { points, .. } = &items[0].prim else {
        panic!("expected polyline");
    };
    assert_eq!(points.last(), Some(&Point::new(1.5, 0.0)));
    assert_eq!(items[0].opacity, 1.0);
    assert_eq!(items[1].opacity, 0.75);
}

#[test]
fn create_at_zero_shows_nothing_and_at_one_everything() {
    let m = Mobject::from_primitives(vec![line(), tip()]);
    assert!(reveal_items(RevealKind::Create, 0.0, m.clone()).is_empty());
    let full = reveal_items(RevealKind::Create, 1.0, m.clone());
    let prims: Vec<Primitive> = full.into_iter().map(|i| i.prim).collect();
    assert_eq!(prims, m.into_primitives());
}

#[test]
fn write_wipes_text_left_to_right() {
    let m = Mobject::math(r"\mu = 1.00", 30.0).unwrap();
    let items = reveal_items(RevealKind::Write, 0.4, m);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].wipe, 0.4);
    assert_eq!(items[0].opacity, 1.0);
}

#[test]
fn write_staggers_later_primitives() {
    assert_eq!(lagged_alpha(0.5, 0, 1), 0.5);
    // Ten pieces: lag 0.2, total span 2.8.
    assert!((lagged_alpha(0.5, 0, 10) - 1.0).abs() < 1e-12);
    assert!((lagged_alpha(0.5, 1, 10) - 1.0).abs() < 1e-12);
    assert!((lagged_alpha(0.5, 9, 10) - 0.0).abs() < 1e-12);
    for i in 0..10 {
        assert_eq!(lagged_alpha(1.0, i, 10), 1.0);
        assert_eq!(lagged_alpha(0.0, i, 10), 0.0);
    }

    let m = Mobject::from_primitives((0..10).map(|_| tip()).collect());
    let items = reveal_items(RevealKind::Write, 0.1, m);
    // Only the first two pieces have started.
    assert_eq!(items.len(), 2);
}
