use super::*;

#[test]
fn endpoints_are_stable() {
    for ease in Ease::ALL {
        assert!((ease.apply(0.0) - 0.0).abs() < 1e-12, "{ease:?}");
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-12, "{ease:?}");
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in Ease::ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn smooth_is_symmetric_about_midpoint() {
    assert!((Ease::Smooth.apply(0.5) - 0.5).abs() < 1e-12);
    for t in [0.1, 0.2, 0.33, 0.4] {
        let lo = Ease::Smooth.apply(t);
        let hi = Ease::Smooth.apply(1.0 - t);
        assert!((lo + hi - 1.0).abs() < 1e-12);
    }
}

#[test]
fn input_is_clamped() {
    assert_eq!(Ease::Linear.apply(-3.0), 0.0);
    assert_eq!(Ease::Linear.apply(7.0), 1.0);
}

#[test]
fn default_is_smooth() {
    assert_eq!(Ease::default(), Ease::Smooth);
}
