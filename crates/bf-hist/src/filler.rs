//! Incremental histogram filling with weights and flow accounting.

use bf_core::{Error, Result};

use crate::errors::{ErrorModel, errors_for};
use crate::histogram::Histogram;

/// Under/overflow handling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowPolicy {
    /// Drop entries outside the histogram range (record them in `underflow/overflow`).
    #[default]
    Drop,
    /// Fold underflow into the first bin and overflow into the last bin.
    Fold,
}

/// Accumulates weighted entries into fixed bin edges.
#[derive(Debug, Clone)]
pub struct HistogramFiller {
    bin_edges: Vec<f64>,
    sumw: Vec<f64>,
    sumw2: Vec<f64>,
    underflow: f64,
    overflow: f64,
    entries: u64,
    flow_policy: FlowPolicy,
}

impl HistogramFiller {
    /// Create a filler for the given edges (must be strictly increasing, at least 2).
    pub fn new(bin_edges: Vec<f64>, flow_policy: FlowPolicy) -> Result<Self> {
        if bin_edges.len() < 2 {
            return Err(Error::Validation(format!(
                "HistogramFiller requires at least 2 bin edges, got {}",
                bin_edges.len()
            )));
        }
        for (i, w) in bin_edges.windows(2).enumerate() {
            if !(w[0].is_finite() && w[1].is_finite() && w[0] < w[1]) {
                return Err(Error::InvalidGeometry(format!(
                    "bin edges must be finite and strictly increasing, got edges[{i}]={} and edges[{}]={}",
                    w[0],
                    i + 1,
                    w[1]
                )));
            }
        }
        let n_bins = bin_edges.len() - 1;
        Ok(Self {
            bin_edges,
            sumw: vec![0.0; n_bins],
            sumw2: vec![0.0; n_bins],
            underflow: 0.0,
            overflow: 0.0,
            entries: 0,
            flow_policy,
        })
    }

    /// Uniform binning of `[lo, hi)` into `n_bins` bins.
    pub fn uniform(n_bins: usize, lo: f64, hi: f64, flow_policy: FlowPolicy) -> Result<Self> {
        if n_bins == 0 {
            return Err(Error::Validation("HistogramFiller requires n_bins > 0".into()));
        }
        let step = (hi - lo) / n_bins as f64;
        let mut edges: Vec<f64> = (0..n_bins).map(|i| lo + step * i as f64).collect();
        edges.push(hi);
        Self::new(edges, flow_policy)
    }

    /// Fill one unit-weight entry.
    pub fn fill(&mut self, x: f64) {
        self.fill_weighted(x, 1.0);
    }

    /// Fill one weighted entry. Non-finite `x` is ignored.
    pub fn fill_weighted(&mut self, x: f64, w: f64) {
        if !x.is_finite() {
            return;
        }
        self.entries += 1;
        let n_bins = self.sumw.len();
        let idx = if x < self.bin_edges[0] {
            self.underflow += w;
            match self.flow_policy {
                FlowPolicy::Drop => return,
                FlowPolicy::Fold => 0,
            }
        } else if x >= self.bin_edges[n_bins] {
            self.overflow += w;
            match self.flow_policy {
                FlowPolicy::Drop => return,
                FlowPolicy::Fold => n_bins - 1,
            }
        } else {
            self.bin_edges.partition_point(|&e| e <= x) - 1
        };
        self.sumw[idx] += w;
        self.sumw2[idx] += w * w;
    }

    /// Sum of weights that fell below the first edge.
    pub fn underflow(&self) -> f64 {
        self.underflow
    }

    /// Sum of weights that fell at or above the last edge.
    pub fn overflow(&self) -> f64 {
        self.overflow
    }

    /// Number of finite entries seen (including flows).
    pub fn entries(&self) -> u64 {
        self.entries
    }

    /// Bin contents accumulated so far.
    pub fn contents(&self) -> &[f64] {
        &self.sumw
    }

    /// Finish filling and attach errors.
    ///
    /// [`ErrorModel::Sqrt`] uses the accumulated `sumw2`; [`ErrorModel::Poisson`]
    /// treats the contents as counts.
    pub fn into_histogram(self, name: impl Into<String>, model: ErrorModel) -> Result<Histogram> {
        let (lo, hi) = errors_for(model, &self.sumw, Some(&self.sumw2))?;
        let mut h = Histogram::with_errors(name, self.bin_edges, self.sumw, lo, hi)?;
        h.entries = self.entries as f64;
        tracing::debug!(
            histogram = %h.name,
            bins = h.n_bins(),
            entries = self.entries,
            underflow = self.underflow,
            overflow = self.overflow,
            "histogram filled"
        );
        Ok(h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fill_drop_policy() {
        let mut f = HistogramFiller::uniform(4, 0.0, 4.0, FlowPolicy::Drop).unwrap();
        for x in [-1.0, 0.0, 0.5, 1.0, 3.999, 4.0, 10.0, f64::NAN] {
            f.fill(x);
        }
        assert_eq!(f.contents(), &[2.0, 1.0, 0.0, 1.0]);
        assert_eq!(f.underflow(), 1.0);
        assert_eq!(f.overflow(), 2.0);
        assert_eq!(f.entries(), 7);
    }

    #[test]
    fn test_fill_fold_policy() {
        let mut f = HistogramFiller::new(vec![0.0, 1.0, 2.0], FlowPolicy::Fold).unwrap();
        f.fill_weighted(-5.0, 2.0);
        f.fill_weighted(7.0, 3.0);
        assert_eq!(f.contents(), &[2.0, 3.0]);
        assert_eq!(f.underflow(), 2.0);
        assert_eq!(f.overflow(), 3.0);
    }

    #[test]
    fn test_into_histogram_uses_sumw2() {
        let mut f = HistogramFiller::new(vec![0.0, 1.0], FlowPolicy::Drop).unwrap();
        f.fill_weighted(0.5, 2.0);
        f.fill_weighted(0.5, 1.0);
        let h = f.into_histogram("w", ErrorModel::Sqrt).unwrap();
        assert_eq!(h.bin_content, vec![3.0]);
        assert_relative_eq!(h.err_lo[0], 5.0f64.sqrt());
        assert_eq!(h.entries, 2.0);
    }

    #[test]
    fn test_rejects_bad_edges() {
        assert!(HistogramFiller::new(vec![0.0], FlowPolicy::Drop).is_err());
        assert!(matches!(
            HistogramFiller::new(vec![0.0, 2.0, 1.0], FlowPolicy::Drop),
            Err(Error::InvalidGeometry(_))
        ));
        assert!(HistogramFiller::uniform(0, 0.0, 1.0, FlowPolicy::Drop).is_err());
    }
}
