//! The residual / pull / chi-square evaluator.

use bf_core::{Curve, Error, Result};
use bf_hist::{Bin, Histogram, Plot, ResidualHistogram, ResidualPoint};

use crate::summary::ChiSquareSummary;

/// Computes residuals, pulls and chi-square of plot histograms against plot curves.
///
/// Borrows the plot for its whole lifetime; every call is a pure function of the
/// plot contents and allocates a fresh output.
#[derive(Debug, Clone, Copy)]
pub struct Chi2Calculator<'a> {
    plot: &'a Plot,
    nominal_bin_width: Option<f64>,
}

/// A histogram/curve pair resolved from the plot.
struct Selection<'a> {
    hist: &'a Histogram,
    curve_name: &'a str,
    curve: &'a dyn Curve,
}

/// Per-bin comparison before any normalization.
#[derive(Debug, Clone, Copy)]
struct BinResidual {
    bin: Bin,
    expected: f64,
    residual: f64,
}

impl BinResidual {
    /// Uncertainty matching the sign of the residual, if usable.
    fn sigma(&self) -> Option<f64> {
        let s = self.bin.error.for_residual(self.residual);
        (s.is_finite() && s > 0.0).then_some(s)
    }
}

impl<'a> Chi2Calculator<'a> {
    /// Create a calculator for `plot`.
    ///
    /// Records the width of the first bin of the default histogram as the
    /// nominal bin width. Computations never rely on it; each bin uses its own width.
    pub fn new(plot: &'a Plot) -> Self {
        let nominal_bin_width = plot.default_histogram().and_then(|h| h.bin(0)).map(|b| b.width());
        Self { plot, nominal_bin_width }
    }

    /// Width of the first bin of the default histogram at construction time.
    pub fn nominal_bin_width(&self) -> Option<f64> {
        self.nominal_bin_width
    }

    fn select(&self, hist: Option<&str>, curve: Option<&str>) -> Result<Selection<'a>> {
        let h = self.plot.histogram(hist)?;
        let (curve_name, c) = self.plot.curve(curve)?;
        h.check_geometry()?;
        Ok(Selection { hist: h, curve_name, curve: c })
    }

    fn bin_residuals(&self, sel: &Selection<'_>) -> Result<Vec<BinResidual>> {
        sel.hist
            .bins()
            .map(|bin| {
                let expected = sel.curve.average(bin.lo, bin.hi)?;
                if !expected.is_finite() {
                    return Err(Error::Computation(format!(
                        "curve '{}' gives non-finite expectation {expected} in bin {} [{}, {}] of '{}'",
                        sel.curve_name, bin.index, bin.lo, bin.hi, sel.hist.name
                    )));
                }
                Ok(BinResidual { bin, expected, residual: bin.value - expected })
            })
            .collect()
    }

    /// Expected content of each bin: the curve averaged over the bin.
    pub fn expected_yields(&self, hist: Option<&str>, curve: Option<&str>) -> Result<Vec<f64>> {
        let sel = self.select(hist, curve)?;
        Ok(self.bin_residuals(&sel)?.iter().map(|r| r.expected).collect())
    }

    /// Residual histogram `observed - expected`, or pulls when `normalize` is set.
    ///
    /// `None` selects the plot's default histogram / curve. Pulls divide by the
    /// upper error for positive residuals and by the lower error for negative ones.
    /// Pull points keep error bars: the input bin's errors divided by the same
    /// value, so the side that was used becomes 1. Residuals keep the input
    /// bin's error bars unchanged.
    pub fn resid_hist(
        &self,
        hist: Option<&str>,
        curve: Option<&str>,
        normalize: bool,
    ) -> Result<ResidualHistogram> {
        let sel = self.select(hist, curve)?;
        let residuals = self.bin_residuals(&sel)?;

        let mut points = Vec::with_capacity(residuals.len());
        for r in &residuals {
            let x = r.bin.center();
            let x_err = 0.5 * r.bin.width();
            let point = if !normalize {
                ResidualPoint {
                    x,
                    x_err,
                    y: r.residual,
                    err_lo: r.bin.error.lo,
                    err_hi: r.bin.error.hi,
                }
            } else if let Some(sigma) = r.sigma() {
                let err = r.bin.error.scaled(sigma);
                ResidualPoint { x, x_err, y: r.residual / sigma, err_lo: err.lo, err_hi: err.hi }
            } else {
                tracing::warn!(
                    histogram = %sel.hist.name,
                    curve = %sel.curve_name,
                    bin = r.bin.index,
                    residual = r.residual,
                    "bin has no usable uncertainty; pull set to 0"
                );
                ResidualPoint { x, x_err, y: 0.0, err_lo: 0.0, err_hi: 0.0 }
            };
            points.push(point);
        }

        let prefix = if normalize { "pull" } else { "resid" };
        tracing::debug!(
            histogram = %sel.hist.name,
            curve = %sel.curve_name,
            normalize,
            points = points.len(),
            "residual histogram built"
        );
        Ok(ResidualHistogram {
            name: format!("{prefix}_{}_{}", sel.hist.name, sel.curve_name),
            normalized: normalize,
            points,
        })
    }

    /// Pull histogram; identical to `resid_hist(hist, curve, true)`.
    pub fn pull_hist(&self, hist: Option<&str>, curve: Option<&str>) -> Result<ResidualHistogram> {
        self.resid_hist(hist, curve, true)
    }

    /// Chi-square of the default histogram against the default curve.
    ///
    /// `n_fit_params` does not change the result: the raw sum is returned. Use
    /// [`Chi2Calculator::chi_square_summary`] for the reduced value.
    pub fn chi_square(&self, n_fit_params: usize) -> Result<f64> {
        self.chi_square_of(None, None, n_fit_params)
    }

    /// Chi-square of a named histogram against a named curve (note: curve first).
    ///
    /// Returns `Σ (residual / sigma)^2` over all bins, with `sigma` chosen by the sign
    /// of the residual. Bins without a usable uncertainty are skipped.
    pub fn chi_square_of(
        &self,
        curve: Option<&str>,
        hist: Option<&str>,
        n_fit_params: usize,
    ) -> Result<f64> {
        Ok(self.chi_square_summary(curve, hist, n_fit_params)?.chi2)
    }

    /// Chi-square together with the bin count and degrees of freedom.
    pub fn chi_square_summary(
        &self,
        curve: Option<&str>,
        hist: Option<&str>,
        n_fit_params: usize,
    ) -> Result<ChiSquareSummary> {
        let sel = self.select(hist, curve)?;
        let residuals = self.bin_residuals(&sel)?;

        let mut chi2 = 0.0;
        let mut n_bins = 0usize;
        for r in &residuals {
            match r.sigma() {
                Some(sigma) => {
                    let z = r.residual / sigma;
                    chi2 += z * z;
                    n_bins += 1;
                }
                None => {
                    tracing::warn!(
                        histogram = %sel.hist.name,
                        curve = %sel.curve_name,
                        bin = r.bin.index,
                        "bin has no usable uncertainty; excluded from chi-square"
                    );
                }
            }
        }

        let summary = ChiSquareSummary::new(
            chi2,
            n_bins,
            residuals.len() - n_bins,
            n_fit_params,
            sel.hist.name.clone(),
            sel.curve_name.to_string(),
        );
        tracing::debug!(
            histogram = %summary.histogram,
            curve = %summary.curve,
            chi2 = summary.chi2,
            ndf = summary.ndf,
            "chi-square computed"
        );
        Ok(summary)
    }
}
