use bf_core::{Curve, Error, Result};

/// Polynomial `c0 + c1*x + c2*x^2 + ...`.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialCurve {
    coefficients: Vec<f64>,
}

impl PolynomialCurve {
    /// Create from coefficients in increasing order of power.
    pub fn new(coefficients: Vec<f64>) -> Result<Self> {
        if coefficients.is_empty() {
            return Err(Error::Validation("PolynomialCurve requires at least one coefficient".into()));
        }
        if let Some(i) = coefficients.iter().position(|c| !c.is_finite()) {
            return Err(Error::Validation(format!(
                "PolynomialCurve coefficient {i} must be finite, got {}",
                coefficients[i]
            )));
        }
        Ok(Self { coefficients })
    }

    /// Coefficients in increasing order of power.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    fn antiderivative(&self, x: f64) -> f64 {
        // Horner on c_k / (k+1), then one extra factor of x.
        let mut acc = 0.0;
        for (k, c) in self.coefficients.iter().enumerate().rev() {
            acc = acc * x + c / (k as f64 + 1.0);
        }
        acc * x
    }
}

impl Curve for PolynomialCurve {
    fn evaluate(&self, x: f64) -> f64 {
        self.coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
    }

    fn integral(&self, lo: f64, hi: f64) -> Result<f64> {
        if !(lo.is_finite() && hi.is_finite()) {
            return Err(Error::Validation(format!(
                "PolynomialCurve integral bounds must be finite, got ({lo}, {hi})"
            )));
        }
        Ok(self.antiderivative(hi) - self.antiderivative(lo))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_evaluate_horner() {
        let p = PolynomialCurve::new(vec![1.0, -2.0, 3.0]).unwrap();
        assert_relative_eq!(p.evaluate(2.0), 1.0 - 4.0 + 12.0);
    }

    #[test]
    fn test_integral() {
        // ∫_0^2 (1 - 2x + 3x^2) dx = 2 - 4 + 8
        let p = PolynomialCurve::new(vec![1.0, -2.0, 3.0]).unwrap();
        assert_relative_eq!(p.integral(0.0, 2.0).unwrap(), 6.0, epsilon = 1e-12);
        // Linear curves: bin average equals value at the center.
        let l = PolynomialCurve::new(vec![5.0, 0.5]).unwrap();
        assert_relative_eq!(l.average(2.0, 4.0).unwrap(), l.evaluate(3.0), epsilon = 1e-12);
    }

    #[test]
    fn test_invalid() {
        assert!(PolynomialCurve::new(vec![]).is_err());
        assert!(PolynomialCurve::new(vec![1.0, f64::NAN]).is_err());
        let p = PolynomialCurve::new(vec![1.0]).unwrap();
        assert!(p.integral(f64::NEG_INFINITY, 0.0).is_err());
    }
}
