//! Closed-form normal density.
//!
//! No guard is placed on `sigma`: a zero standard deviation produces non-finite values
//! through plain `f64` arithmetic and callers decide how to present them.

use std::f64::consts::PI;

/// Mean and standard deviation of a normal distribution.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NormalParams {
    /// Location of the peak.
    pub mean: f64,
    /// Standard deviation.
    pub sigma: f64,
}

impl NormalParams {
    /// The standard normal distribution.
    pub const STANDARD: Self = Self {
        mean: 0.0,
        sigma: 1.0,
    };

    /// Density at `x`.
    pub fn pdf(self, x: f64) -> f64 {
        normal_pdf(x, self.mean, self.sigma)
    }
}

/// `f(x) = 1/(σ√(2π)) · exp(−½((x−μ)/σ)²)`.
pub fn normal_pdf(x: f64, mean: f64, sigma: f64) -> f64 {
    let z = (x - mean) / sigma;
    (1.0 / (sigma * (2.0 * PI).sqrt())) * (-0.5 * z * z).exp()
}

/// Value of the density at its mode, `1/(σ√(2π))`.
pub fn normal_peak(sigma: f64) -> f64 {
    1.0 / (sigma * (2.0 * PI).sqrt())
}

#[cfg(test)]
#[path = "../../tests/unit/density/normal.rs"]
mod tests;
