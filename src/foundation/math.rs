pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// Linear remap of `v` from `[a0, a1]` into `[b0, b1]`.
pub(crate) fn remap(v: f64, a0: f64, a1: f64, b0: f64, b1: f64) -> f64 {
    if a1 == a0 {
        return b0;
    }
    b0 + (v - a0) * (b1 - b0) / (a1 - a0)
}

/// Inclusive arithmetic progression `start, start+step, ..` up to `end`.
///
/// Values are computed as `start + i*step` so rounding does not accumulate, and the end is
/// included when it lies within `step * 1e-6` of the last value.
pub(crate) fn arange_inclusive(start: f64, end: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || !step.is_finite() || end < start {
        return Vec::new();
    }
    let n = ((end - start) / step + 1e-6).floor() as usize;
    (0..=n).map(|i| start + (i as f64) * step).collect()
}

/// Number of decimal places needed to print multiples of `step` exactly.
pub(crate) fn decimal_places_for_step(step: f64) -> usize {
    let mut places = 0;
    let mut scaled = step.abs();
    while places < 6 && (scaled - scaled.round()).abs() > 1e-9 {
        scaled *= 10.0;
        places += 1;
    }
    places
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
