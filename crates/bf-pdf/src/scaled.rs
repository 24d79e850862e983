use bf_core::{Curve, Error, Result};

/// A curve multiplied by a constant.
///
/// Turns a unit-area density into an expected-count curve: scale by
/// `n_events * bin_width` to overlay it on a histogram of counts.
#[derive(Debug, Clone)]
pub struct ScaledCurve<C> {
    inner: C,
    scale: f64,
}

impl<C: Curve> ScaledCurve<C> {
    /// Wrap `inner`, multiplying it by `scale`.
    pub fn new(inner: C, scale: f64) -> Result<Self> {
        if !scale.is_finite() {
            return Err(Error::Validation(format!("ScaledCurve scale must be finite, got {scale}")));
        }
        Ok(Self { inner, scale })
    }

    /// Scale factor.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Wrapped curve.
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: Curve> Curve for ScaledCurve<C> {
    fn evaluate(&self, x: f64) -> f64 {
        self.scale * self.inner.evaluate(x)
    }

    fn integral(&self, lo: f64, hi: f64) -> Result<f64> {
        Ok(self.scale * self.inner.integral(lo, hi)?)
    }
}
