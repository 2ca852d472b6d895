use super::*;

#[test]
fn clones_share_value() {
    let mu = ValueTracker::new(0.0);
    let seen_by_display = mu.clone();
    mu.set(2.0);
    assert_eq!(seen_by_display.get(), 2.0);
    assert!(mu.same_as(&seen_by_display));
}

#[test]
fn independent_trackers_do_not_alias() {
    let mu = ValueTracker::new(0.0);
    let sigma = ValueTracker::new(1.0);
    sigma.set(1.5);
    assert_eq!(mu.get(), 0.0);
    assert!(!mu.same_as(&sigma));
}

#[test]
fn animate_to_captures_target_with_default_ease() {
    let sigma = ValueTracker::new(1.0);
    let Animation::SetValue {
        tracker,
        target,
        ease,
    } = sigma.animate_to(0.5)
    else {
        panic!("expected SetValue");
    };
    assert!(tracker.same_as(&sigma));
    assert_eq!(target, 0.5);
    assert_eq!(ease, Ease::Smooth);
    // Building the animation does not touch the value.
    assert_eq!(sigma.get(), 1.0);
}
