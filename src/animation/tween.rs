use crate::animation::ease::Ease;

/// Values a tween can move between.
pub trait Lerp: Sized {
    /// Value a fraction `t` of the way from `a` to `b`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

/// Interpolated value `elapsed` seconds into a `duration`-second tween from `start` to `end`.
///
/// `elapsed` is clamped to `[0, duration]`; a zero or negative duration yields `end`.
pub fn tween<T: Lerp>(start: &T, end: &T, duration: f64, elapsed: f64, ease: Ease) -> T {
    let t = if duration > 0.0 {
        (elapsed / duration).clamp(0.0, 1.0)
    } else {
        1.0
    };
    T::lerp(start, end, ease.apply(t))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
