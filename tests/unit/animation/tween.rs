use super::*;

#[test]
fn linear_tween_hits_midpoint() {
    let v = tween(&0.0, &2.0, 2.0, 1.0, Ease::Linear);
    assert!((v - 1.0).abs() < 1e-12);
}

#[test]
fn elapsed_is_clamped_to_duration() {
    assert_eq!(tween(&1.0, &1.5, 2.0, -1.0, Ease::Smooth), 1.0);
    assert_eq!(tween(&1.0, &1.5, 2.0, 9.0, Ease::Smooth), 1.5);
}

#[test]
fn zero_duration_jumps_to_end() {
    assert_eq!(tween(&2.0, &-3.5, 0.0, 0.0, Ease::Linear), -3.5);
}
