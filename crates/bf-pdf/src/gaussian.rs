use bf_core::{Curve, Error, Result};

use crate::math::{standard_normal_cdf, standard_normal_pdf};

/// Gaussian curve `norm * N(x; mean, sigma)`.
///
/// With `norm = 1` this is the unit-area density; `norm` carries the yield
/// when the curve is drawn on top of event counts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianCurve {
    norm: f64,
    mean: f64,
    sigma: f64,
}

impl GaussianCurve {
    /// Create a Gaussian curve.
    pub fn new(norm: f64, mean: f64, sigma: f64) -> Result<Self> {
        if !norm.is_finite() || !mean.is_finite() || !sigma.is_finite() || sigma <= 0.0 {
            return Err(Error::Validation(format!(
                "GaussianCurve parameters must be finite with sigma > 0, got norm={norm}, mean={mean}, sigma={sigma}"
            )));
        }
        Ok(Self { norm, mean, sigma })
    }

    /// Area under the full curve.
    pub fn norm(&self) -> f64 {
        self.norm
    }

    /// Mean.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Standard deviation.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl Curve for GaussianCurve {
    fn evaluate(&self, x: f64) -> f64 {
        self.norm * standard_normal_pdf((x - self.mean) / self.sigma) / self.sigma
    }

    fn integral(&self, lo: f64, hi: f64) -> Result<f64> {
        if lo.is_nan() || hi.is_nan() {
            return Err(Error::Validation(format!(
                "GaussianCurve integral bounds must not be NaN, got ({lo}, {hi})"
            )));
        }
        let z_lo = (lo - self.mean) / self.sigma;
        let z_hi = (hi - self.mean) / self.sigma;
        Ok(self.norm * (standard_normal_cdf(z_hi) - standard_normal_cdf(z_lo)))
    }
}
