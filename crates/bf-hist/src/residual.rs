//! Residual and pull histograms (one point per input bin).

use serde::Serialize;

/// A single residual or pull point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResidualPoint {
    /// Bin center.
    pub x: f64,
    /// Half the bin width.
    pub x_err: f64,
    /// Residual (`observed - expected`) or pull.
    pub y: f64,
    /// Downward error bar.
    pub err_lo: f64,
    /// Upward error bar.
    pub err_hi: f64,
}

/// Residuals (or pulls) of a histogram with respect to a curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResidualHistogram {
    /// `resid_<hist>_<curve>` or `pull_<hist>_<curve>`.
    pub name: String,
    /// `true` for pulls (residuals divided by their uncertainty).
    pub normalized: bool,
    /// Points in bin order.
    pub points: Vec<ResidualPoint>,
}

impl ResidualHistogram {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` if there are no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point x positions (bin centers).
    pub fn x(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    /// Point y values.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }
}
