//! Polyline curve through sampled points, as produced when a fit is drawn on a plot.

use bf_core::{Curve, Error, Result};

/// Piecewise-linear curve through `(x, y)` points.
///
/// `x` must be non-decreasing; a repeated `x` encodes a jump. The curve is zero
/// outside `[x.first(), x.last()]`, and integrals are exact for the polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledCurve {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl SampledCurve {
    /// Create from sample points.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(Error::Validation(format!(
                "SampledCurve x/y length mismatch: {} vs {}",
                x.len(),
                y.len()
            )));
        }
        if x.len() < 2 {
            return Err(Error::Validation(format!(
                "SampledCurve requires at least 2 points, got {}",
                x.len()
            )));
        }
        if let Some(i) = x.iter().zip(&y).position(|(a, b)| !a.is_finite() || !b.is_finite()) {
            return Err(Error::Validation(format!(
                "SampledCurve point {i} must be finite, got ({}, {})",
                x[i], y[i]
            )));
        }
        if let Some(i) = x.windows(2).position(|w| w[1] < w[0]) {
            return Err(Error::Validation(format!(
                "SampledCurve x must be non-decreasing, got x[{i}]={} > x[{}]={}",
                x[i],
                i + 1,
                x[i + 1]
            )));
        }
        Ok(Self { x, y })
    }

    /// Sample `f` at `n_points` equidistant points over `[lo, hi]`.
    pub fn from_fn(f: impl Fn(f64) -> f64, lo: f64, hi: f64, n_points: usize) -> Result<Self> {
        if n_points < 2 {
            return Err(Error::Validation(format!(
                "SampledCurve::from_fn requires n_points >= 2, got {n_points}"
            )));
        }
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(Error::Validation(format!(
                "SampledCurve::from_fn requires finite lo < hi, got ({lo}, {hi})"
            )));
        }
        let step = (hi - lo) / (n_points - 1) as f64;
        let x: Vec<f64> =
            (0..n_points).map(|i| if i + 1 == n_points { hi } else { lo + step * i as f64 }).collect();
        let y = x.iter().map(|&xi| f(xi)).collect();
        Self::new(x, y)
    }

    /// Sample x positions.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Sample y values.
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Sampled range `(x_first, x_last)`.
    pub fn range(&self) -> (f64, f64) {
        (self.x[0], self.x[self.x.len() - 1])
    }
}

#[inline]
fn lerp(x0: f64, y0: f64, x1: f64, y1: f64, x: f64) -> f64 {
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}

impl Curve for SampledCurve {
    fn evaluate(&self, x: f64) -> f64 {
        let (lo, hi) = self.range();
        if !(x >= lo && x <= hi) {
            return 0.0;
        }
        let idx = self.x.partition_point(|&xi| xi <= x);
        if idx == self.x.len() {
            return self.y[idx - 1];
        }
        // x[idx-1] <= x < x[idx], so the segment has positive width.
        lerp(self.x[idx - 1], self.y[idx - 1], self.x[idx], self.y[idx], x)
    }

    fn integral(&self, lo: f64, hi: f64) -> Result<f64> {
        if !(lo.is_finite() && hi.is_finite()) {
            return Err(Error::Validation(format!(
                "SampledCurve integral bounds must be finite, got ({lo}, {hi})"
            )));
        }
        if hi < lo {
            return Ok(-self.integral(hi, lo)?);
        }

        let mut sum = 0.0;
        for (xs, ys) in self.x.windows(2).zip(self.y.windows(2)) {
            let a = xs[0].max(lo);
            let b = xs[1].min(hi);
            if b <= a {
                continue;
            }
            let ya = lerp(xs[0], ys[0], xs[1], ys[1], a);
            let yb = lerp(xs[0], ys[0], xs[1], ys[1], b);
            sum += 0.5 * (ya + yb) * (b - a);
        }
        Ok(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_evaluate_interpolates() {
        let c = SampledCurve::new(vec![0.0, 1.0, 2.0], vec![0.0, 2.0, 0.0]).unwrap();
        assert_relative_eq!(c.evaluate(0.5), 1.0);
        assert_relative_eq!(c.evaluate(1.0), 2.0);
        assert_relative_eq!(c.evaluate(1.75), 0.5);
        assert_relative_eq!(c.evaluate(2.0), 0.0);
        assert_eq!(c.evaluate(-0.1), 0.0);
        assert_eq!(c.evaluate(2.1), 0.0);
        assert_eq!(c.evaluate(f64::NAN), 0.0);
    }

    #[test]
    fn test_integral_triangle() {
        let c = SampledCurve::new(vec![0.0, 1.0, 2.0], vec![0.0, 2.0, 0.0]).unwrap();
        assert_relative_eq!(c.integral(0.0, 2.0).unwrap(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(c.integral(0.0, 1.0).unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(c.integral(0.5, 1.5).unwrap(), 1.5, epsilon = 1e-12);
        assert_relative_eq!(c.integral(-5.0, 5.0).unwrap(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(c.integral(2.0, 0.0).unwrap(), -2.0, epsilon = 1e-12);
        assert!(c.integral(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_step_curve_via_repeated_x() {
        let c = SampledCurve::new(
            vec![0.0, 1.0, 1.0, 2.0, 2.0, 3.0],
            vec![9.0, 9.0, 22.0, 22.0, 11.0, 11.0],
        )
        .unwrap();
        assert_relative_eq!(c.integral(0.0, 1.0).unwrap(), 9.0, epsilon = 1e-12);
        assert_relative_eq!(c.integral(1.0, 2.0).unwrap(), 22.0, epsilon = 1e-12);
        assert_relative_eq!(c.integral(2.0, 3.0).unwrap(), 11.0, epsilon = 1e-12);
        assert_relative_eq!(c.evaluate(1.0), 22.0);
        assert_relative_eq!(c.evaluate(0.999), 9.0);
    }

    #[test]
    fn test_from_fn_samples_endpoints() {
        let c = SampledCurve::from_fn(|x| x * x, 0.0, 3.0, 301).unwrap();
        assert_eq!(c.range(), (0.0, 3.0));
        // Trapezoid on a fine grid: error ~ (b-a) h^2 / 6 for x^2.
        assert_relative_eq!(c.integral(0.0, 3.0).unwrap(), 9.0, epsilon = 1e-3);
    }

    #[test]
    fn test_rejects_invalid_points() {
        assert!(SampledCurve::new(vec![0.0], vec![1.0]).is_err());
        assert!(SampledCurve::new(vec![0.0, 1.0], vec![1.0]).is_err());
        assert!(SampledCurve::new(vec![1.0, 0.0], vec![1.0, 1.0]).is_err());
        assert!(SampledCurve::new(vec![0.0, f64::NAN], vec![1.0, 1.0]).is_err());
        assert!(SampledCurve::from_fn(|x| x, 1.0, 1.0, 10).is_err());
    }
}
