//! Common data types for binfit

/// Asymmetric uncertainty of a single measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsymmetricError {
    /// Downward error (distance from the value to the lower end of the error bar).
    pub lo: f64,
    /// Upward error.
    pub hi: f64,
}

impl AsymmetricError {
    /// Create an asymmetric error.
    pub fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// Create a symmetric error.
    pub fn symmetric(err: f64) -> Self {
        Self { lo: err, hi: err }
    }

    /// Error used to normalize a residual `observed - expected`.
    ///
    /// Positive residuals use the upper error, negative residuals the lower one.
    /// A zero residual uses the larger of the two.
    pub fn for_residual(&self, residual: f64) -> f64 {
        if residual > 0.0 {
            self.hi
        } else if residual < 0.0 {
            self.lo
        } else {
            self.lo.max(self.hi)
        }
    }

    /// Both sides divided by `scale`.
    pub fn scaled(&self, scale: f64) -> Self {
        Self { lo: self.lo / scale, hi: self.hi / scale }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_selection() {
        let e = AsymmetricError::new(1.0, 2.0);
        assert_eq!(e.for_residual(4.0), 2.0);
        assert_eq!(e.for_residual(-4.0), 1.0);
        assert_eq!(e.for_residual(0.0), 2.0);
    }

    #[test]
    fn test_scaled_divides_both_sides() {
        let e = AsymmetricError::new(1.0, 2.0).scaled(2.0);
        assert_eq!(e, AsymmetricError::new(0.5, 1.0));
        assert_eq!(AsymmetricError::symmetric(3.0).scaled(3.0), AsymmetricError::symmetric(1.0));
    }
}
