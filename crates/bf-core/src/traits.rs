//! Core traits for binfit
//!
//! The evaluator never depends on a concrete curve type: fits come in as
//! anything implementing [`Curve`], whether a sampled polyline or an analytic
//! density.

use crate::{Error, Result};

/// A continuous function of one variable that can be integrated over an interval.
pub trait Curve: Send + Sync {
    /// Curve value at `x`.
    fn evaluate(&self, x: f64) -> f64;

    /// Definite integral over `[lo, hi]`.
    fn integral(&self, lo: f64, hi: f64) -> Result<f64>;

    /// Mean value over `[lo, hi]`, i.e. `integral(lo, hi) / (hi - lo)`.
    fn average(&self, lo: f64, hi: f64) -> Result<f64> {
        let width = hi - lo;
        if !width.is_finite() || width <= 0.0 {
            return Err(Error::InvalidGeometry(format!(
                "cannot average over [{lo}, {hi}]: width must be finite and > 0, got {width}"
            )));
        }
        Ok(self.integral(lo, hi)? / width)
    }
}

impl<C: Curve + ?Sized> Curve for Box<C> {
    fn evaluate(&self, x: f64) -> f64 {
        (**self).evaluate(x)
    }

    fn integral(&self, lo: f64, hi: f64) -> Result<f64> {
        (**self).integral(lo, hi)
    }
}

impl<C: Curve + ?Sized> Curve for std::sync::Arc<C> {
    fn evaluate(&self, x: f64) -> f64 {
        (**self).evaluate(x)
    }

    fn integral(&self, lo: f64, hi: f64) -> Result<f64> {
        (**self).integral(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    struct Linear;

    impl Curve for Linear {
        fn evaluate(&self, x: f64) -> f64 {
            2.0 * x
        }

        fn integral(&self, lo: f64, hi: f64) -> Result<f64> {
            Ok(hi * hi - lo * lo)
        }
    }

    #[test]
    fn test_average_is_integral_over_width() {
        let c = Linear;
        // Linear function: the mean equals the value at the center.
        assert_relative_eq!(c.average(1.0, 3.0).unwrap(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_average_rejects_degenerate_interval() {
        let c = Linear;
        assert!(matches!(c.average(1.0, 1.0), Err(Error::InvalidGeometry(_))));
        assert!(matches!(c.average(2.0, 1.0), Err(Error::InvalidGeometry(_))));
        assert!(matches!(c.average(0.0, f64::INFINITY), Err(Error::InvalidGeometry(_))));
    }

    #[test]
    fn test_boxed_curve_forwards() {
        let c: Box<dyn Curve> = Box::new(Linear);
        assert_relative_eq!(c.evaluate(1.5), 3.0);
        assert_relative_eq!(c.integral(0.0, 2.0).unwrap(), 4.0);
    }
}
