use bf_core::{Curve, Error, Result};

/// Exponential curve `norm * exp(slope * x)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialCurve {
    norm: f64,
    slope: f64,
}

impl ExponentialCurve {
    /// Create an exponential curve.
    pub fn new(norm: f64, slope: f64) -> Result<Self> {
        if !norm.is_finite() || !slope.is_finite() {
            return Err(Error::Validation(format!(
                "ExponentialCurve parameters must be finite, got norm={norm}, slope={slope}"
            )));
        }
        Ok(Self { norm, slope })
    }

    /// Prefactor.
    pub fn norm(&self) -> f64 {
        self.norm
    }

    /// Exponent slope.
    pub fn slope(&self) -> f64 {
        self.slope
    }
}

impl Curve for ExponentialCurve {
    fn evaluate(&self, x: f64) -> f64 {
        self.norm * (self.slope * x).exp()
    }

    fn integral(&self, lo: f64, hi: f64) -> Result<f64> {
        if !(lo.is_finite() && hi.is_finite()) {
            return Err(Error::Validation(format!(
                "ExponentialCurve integral bounds must be finite, got ({lo}, {hi})"
            )));
        }
        let width = hi - lo;
        let s = self.slope;
        // exp(s*lo) * (exp(s*width) - 1) / s, with the s -> 0 limit `width`.
        let shape = if (s * width).abs() < 1e-12 {
            width * (1.0 + 0.5 * s * width)
        } else {
            (s * width).exp_m1() / s
        };
        let value = self.norm * (s * lo).exp() * shape;
        if !value.is_finite() {
            return Err(Error::Computation(format!(
                "ExponentialCurve integral over [{lo}, {hi}] overflowed (slope={s})"
            )));
        }
        Ok(value)
    }
}
