//! Chi-square with its degrees of freedom.

use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Raw chi-square plus what is needed to interpret it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChiSquareSummary {
    /// `Σ (residual / sigma)^2`, never divided by the degrees of freedom.
    pub chi2: f64,
    /// Bins that contributed.
    pub n_bins: usize,
    /// Bins skipped for lack of a usable uncertainty.
    pub n_skipped: usize,
    /// Number of fitted parameters, as given by the caller.
    pub n_fit_params: usize,
    /// `n_bins - n_fit_params`, saturating at 0.
    pub ndf: usize,
    /// Histogram name.
    pub histogram: String,
    /// Curve name.
    pub curve: String,
}

impl ChiSquareSummary {
    /// Assemble a summary; `ndf` is derived.
    pub fn new(
        chi2: f64,
        n_bins: usize,
        n_skipped: usize,
        n_fit_params: usize,
        histogram: String,
        curve: String,
    ) -> Self {
        Self {
            chi2,
            n_bins,
            n_skipped,
            n_fit_params,
            ndf: n_bins.saturating_sub(n_fit_params),
            histogram,
            curve,
        }
    }

    /// `chi2 / ndf`; `None` when there are no degrees of freedom.
    pub fn reduced(&self) -> Option<f64> {
        (self.ndf > 0).then(|| self.chi2 / self.ndf as f64)
    }

    /// Probability of a chi-square at least this large for `ndf` degrees of freedom.
    pub fn p_value(&self) -> Option<f64> {
        if self.ndf == 0 {
            return None;
        }
        let dist = ChiSquared::new(self.ndf as f64).ok()?;
        Some(dist.sf(self.chi2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn summary(chi2: f64, n_bins: usize, n_fit_params: usize) -> ChiSquareSummary {
        ChiSquareSummary::new(chi2, n_bins, 0, n_fit_params, "h".into(), "c".into())
    }

    #[test]
    fn test_reduced_and_ndf() {
        let s = summary(12.0, 10, 4);
        assert_eq!(s.ndf, 6);
        assert_relative_eq!(s.reduced().unwrap(), 2.0);
        assert_eq!(s.chi2, 12.0);
    }

    #[test]
    fn test_no_dof() {
        let s = summary(1.0, 3, 5);
        assert_eq!(s.ndf, 0);
        assert!(s.reduced().is_none());
        assert!(s.p_value().is_none());
    }

    #[test]
    fn test_p_value() {
        // chi2 = 2 with 2 dof: sf = exp(-1).
        let s = summary(2.0, 2, 0);
        assert_relative_eq!(s.p_value().unwrap(), (-1.0f64).exp(), epsilon = 1e-10);
        let s = summary(0.0, 5, 0);
        assert_relative_eq!(s.p_value().unwrap(), 1.0, epsilon = 1e-12);
    }
}
