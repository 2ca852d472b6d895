use super::*;

#[test]
fn mul_div255_rounds() {
    assert_eq!(mul_div255_u16(255, 255), 255);
    assert_eq!(mul_div255_u16(255, 0), 0);
    assert_eq!(mul_div255_u16(128, 255), 128);
}

#[test]
fn remap_is_linear() {
    assert_eq!(remap(0.0, -10.0, 10.0, -5.0, 5.0), 0.0);
    assert_eq!(remap(10.0, -10.0, 10.0, -5.0, 5.0), 5.0);
    assert_eq!(remap(3.0, 1.0, 1.0, 7.0, 9.0), 7.0);
}

#[test]
fn arange_includes_end_without_drift() {
    let ys = arange_inclusive(0.0, 0.5, 0.1);
    assert_eq!(ys.len(), 6);
    assert!((ys[5] - 0.5).abs() < 1e-12);

    let xs = arange_inclusive(-10.0, 10.0, 1.0);
    assert_eq!(xs.len(), 21);
    assert_eq!(xs[0], -10.0);
    assert_eq!(xs[20], 10.0);

    assert!(arange_inclusive(0.0, 1.0, 0.0).is_empty());
}

#[test]
fn decimal_places_follow_step() {
    assert_eq!(decimal_places_for_step(1.0), 0);
    assert_eq!(decimal_places_for_step(0.1), 1);
    assert_eq!(decimal_places_for_step(0.25), 2);
}
