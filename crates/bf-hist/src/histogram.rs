//! 1D histogram with per-bin asymmetric errors.

use bf_core::{AsymmetricError, Error, Result};

use crate::errors::{ErrorModel, errors_for};

/// A 1D histogram as drawn on a fit plot: bin contents with asymmetric error bars.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Histogram name.
    pub name: String,
    /// Bin edges (length = n_bins + 1).
    pub bin_edges: Vec<f64>,
    /// Bin contents (length = n_bins).
    pub bin_content: Vec<f64>,
    /// Downward error per bin.
    pub err_lo: Vec<f64>,
    /// Upward error per bin.
    pub err_hi: Vec<f64>,
    /// Total number of entries.
    pub entries: f64,
}

/// Read-only view of a single bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    /// Bin index (0-based, no underflow bin).
    pub index: usize,
    /// Lower edge.
    pub lo: f64,
    /// Upper edge.
    pub hi: f64,
    /// Observed value.
    pub value: f64,
    /// Error bar.
    pub error: AsymmetricError,
}

impl Bin {
    /// Bin center.
    pub fn center(&self) -> f64 {
        0.5 * (self.lo + self.hi)
    }

    /// Bin width.
    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }
}

impl Histogram {
    /// Create a histogram with explicit asymmetric errors.
    pub fn with_errors(
        name: impl Into<String>,
        bin_edges: Vec<f64>,
        bin_content: Vec<f64>,
        err_lo: Vec<f64>,
        err_hi: Vec<f64>,
    ) -> Result<Self> {
        let n_bins = bin_edges.len().saturating_sub(1);
        if bin_content.len() != n_bins {
            return Err(Error::Validation(format!(
                "bin_content length mismatch: expected {n_bins}, got {}",
                bin_content.len()
            )));
        }
        if let Some((i, v)) = bin_content.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(Error::Validation(format!("bin_content[{i}] must be finite, got {v}")));
        }
        for (what, v) in [("err_lo", &err_lo), ("err_hi", &err_hi)] {
            if v.len() != n_bins {
                return Err(Error::Validation(format!(
                    "{what} length mismatch: expected {n_bins}, got {}",
                    v.len()
                )));
            }
            if let Some((i, e)) = v.iter().enumerate().find(|(_, e)| !(e.is_finite() && **e >= 0.0))
            {
                return Err(Error::Validation(format!(
                    "{what}[{i}] must be finite and >= 0, got {e}"
                )));
            }
        }
        check_edges(&bin_edges)?;

        let entries = bin_content.iter().sum();
        Ok(Self {
            name: name.into(),
            bin_edges,
            bin_content,
            err_lo,
            err_hi,
            entries,
        })
    }

    /// Create a histogram with symmetric errors.
    pub fn with_symmetric_errors(
        name: impl Into<String>,
        bin_edges: Vec<f64>,
        bin_content: Vec<f64>,
        errors: Vec<f64>,
    ) -> Result<Self> {
        Self::with_errors(name, bin_edges, bin_content, errors.clone(), errors)
    }

    /// Create a histogram whose errors are derived from the contents.
    pub fn from_counts(
        name: impl Into<String>,
        bin_edges: Vec<f64>,
        bin_content: Vec<f64>,
        model: ErrorModel,
    ) -> Result<Self> {
        let (lo, hi) = errors_for(model, &bin_content, None)?;
        Self::with_errors(name, bin_edges, bin_content, lo, hi)
    }

    /// Create a histogram with `sqrt(sumw2)` errors (weighted fills).
    pub fn from_sumw2(
        name: impl Into<String>,
        bin_edges: Vec<f64>,
        bin_content: Vec<f64>,
        sumw2: &[f64],
    ) -> Result<Self> {
        if sumw2.len() != bin_content.len() {
            return Err(Error::Validation(format!(
                "sumw2 length mismatch: expected {}, got {}",
                bin_content.len(),
                sumw2.len()
            )));
        }
        let (lo, hi) = errors_for(ErrorModel::Sqrt, &bin_content, Some(sumw2))?;
        Self::with_errors(name, bin_edges, bin_content, lo, hi)
    }

    /// Number of bins (excluding under/overflow).
    pub fn n_bins(&self) -> usize {
        self.bin_content.len()
    }

    /// Bin `i`, if it exists.
    pub fn bin(&self, i: usize) -> Option<Bin> {
        if i >= self.n_bins() || i + 1 >= self.bin_edges.len() {
            return None;
        }
        Some(Bin {
            index: i,
            lo: self.bin_edges[i],
            hi: self.bin_edges[i + 1],
            value: self.bin_content[i],
            error: AsymmetricError::new(
                self.err_lo.get(i).copied().unwrap_or(0.0),
                self.err_hi.get(i).copied().unwrap_or(0.0),
            ),
        })
    }

    /// Iterate over all bins in order.
    pub fn bins(&self) -> impl Iterator<Item = Bin> + '_ {
        (0..self.n_bins()).filter_map(move |i| self.bin(i))
    }

    /// Check that the histogram can be integrated bin by bin.
    ///
    /// Fails with [`Error::EmptyInput`] for zero bins and with
    /// [`Error::InvalidGeometry`] for inconsistent lengths, non-finite contents or
    /// non-positive widths.
    /// The public fields allow building histograms that skip constructor checks,
    /// so evaluators call this before touching any bin.
    pub fn check_geometry(&self) -> Result<()> {
        let n = self.n_bins();
        if n == 0 {
            return Err(Error::EmptyInput(format!("histogram '{}' has no bins", self.name)));
        }
        if self.bin_edges.len() != n + 1 {
            return Err(Error::InvalidGeometry(format!(
                "histogram '{}': expected {} bin edges for {n} bins, got {}",
                self.name,
                n + 1,
                self.bin_edges.len()
            )));
        }
        if self.err_lo.len() != n || self.err_hi.len() != n {
            return Err(Error::InvalidGeometry(format!(
                "histogram '{}': error arrays must have {n} entries, got lo={} hi={}",
                self.name,
                self.err_lo.len(),
                self.err_hi.len()
            )));
        }
        if let Some((i, v)) = self.bin_content.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(Error::InvalidGeometry(format!(
                "histogram '{}': bin {i} content must be finite, got {v}",
                self.name
            )));
        }
        check_edges(&self.bin_edges).map_err(|e| match e {
            Error::InvalidGeometry(msg) => {
                Error::InvalidGeometry(format!("histogram '{}': {msg}", self.name))
            }
            other => other,
        })
    }
}

fn check_edges(edges: &[f64]) -> Result<()> {
    for (i, w) in edges.windows(2).enumerate() {
        let width = w[1] - w[0];
        if !width.is_finite() || width <= 0.0 {
            return Err(Error::InvalidGeometry(format!(
                "bin {i} width must be finite and > 0, got edges [{}, {}]",
                w[0], w[1]
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn three_bins() -> Histogram {
        Histogram::with_errors(
            "data",
            vec![0.0, 1.0, 3.0, 4.0],
            vec![10.0, 20.0, 10.0],
            vec![1.0, 2.0, 3.0],
            vec![1.5, 2.5, 3.5],
        )
        .unwrap()
    }

    #[test]
    fn test_bin_accessors() {
        let h = three_bins();
        assert_eq!(h.n_bins(), 3);
        let b = h.bin(1).unwrap();
        assert_relative_eq!(b.center(), 2.0);
        assert_relative_eq!(b.width(), 2.0);
        assert_eq!(b.value, 20.0);
        assert_eq!(b.error, AsymmetricError::new(2.0, 2.5));
        assert!(h.bin(3).is_none());
        assert_eq!(h.bins().count(), 3);
        assert_relative_eq!(h.entries, 40.0);
    }

    #[test]
    fn test_constructor_rejects_bad_input() {
        let r = Histogram::with_symmetric_errors("h", vec![0.0, 1.0], vec![1.0, 2.0], vec![1.0]);
        assert!(matches!(r, Err(Error::Validation(_))));

        let r = Histogram::with_symmetric_errors("h", vec![0.0, 0.0], vec![1.0], vec![1.0]);
        assert!(matches!(r, Err(Error::InvalidGeometry(_))));

        let r = Histogram::with_symmetric_errors("h", vec![0.0, 1.0], vec![1.0], vec![-1.0]);
        assert!(matches!(r, Err(Error::Validation(_))));

        let r = Histogram::with_symmetric_errors(
            "h",
            vec![0.0, 1.0, 2.0],
            vec![f64::NAN, 5.0],
            vec![1.0, 1.0],
        );
        assert!(matches!(r, Err(Error::Validation(_))));
        let r = Histogram::with_symmetric_errors("h", vec![0.0, 1.0], vec![f64::INFINITY], vec![1.0]);
        assert!(matches!(r, Err(Error::Validation(_))));
    }

    #[test]
    fn test_empty_histogram_is_constructible_but_fails_geometry() {
        let h = Histogram::with_symmetric_errors("empty", vec![], vec![], vec![]).unwrap();
        assert_eq!(h.n_bins(), 0);
        assert!(matches!(h.check_geometry(), Err(Error::EmptyInput(_))));
    }

    #[test]
    fn test_geometry_catches_hand_built_histograms() {
        let mut h = three_bins();
        h.bin_edges[2] = 0.5;
        assert!(matches!(h.check_geometry(), Err(Error::InvalidGeometry(_))));

        let mut h = three_bins();
        h.err_hi.pop();
        assert!(matches!(h.check_geometry(), Err(Error::InvalidGeometry(_))));

        let mut h = three_bins();
        h.bin_content[1] = f64::NAN;
        assert!(matches!(h.check_geometry(), Err(Error::InvalidGeometry(_))));

        assert!(three_bins().check_geometry().is_ok());
    }

    #[test]
    fn test_from_counts_poisson_is_asymmetric() {
        let h = Histogram::from_counts("d", vec![0.0, 1.0, 2.0], vec![0.0, 5.0], ErrorModel::Poisson)
            .unwrap();
        assert_eq!(h.err_lo[0], 0.0);
        assert!(h.err_hi[0] > 1.8);
        assert!(h.err_hi[1] > h.err_lo[1]);
    }

    #[test]
    fn test_from_sumw2() {
        let h = Histogram::from_sumw2("w", vec![0.0, 1.0, 2.0], vec![3.0, 1.0], &[9.0, 0.25])
            .unwrap();
        assert_eq!(h.err_lo, vec![3.0, 0.5]);
        assert_eq!(h.err_hi, vec![3.0, 0.5]);
    }
}
