//! JSON plot documents: histograms and curves to be compared.

use std::path::Path;

use anyhow::{Context, Result};
use bf_core::Curve;
use bf_hist::{ErrorModel, Histogram, Plot, SampledCurve};
use bf_pdf::{ExponentialCurve, GaussianCurve, PolynomialCurve, RhoKeysPdf, ScaledCurve};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct PlotDocument {
    #[serde(default)]
    pub name: Option<String>,
    pub histograms: Vec<HistogramSpec>,
    pub curves: Vec<CurveSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistogramSpec {
    pub name: String,
    pub bin_edges: Vec<f64>,
    pub bin_content: Vec<f64>,
    #[serde(default)]
    pub errors: ErrorSpec,
}

/// `"poisson"`, `"sqrt"`, `{"symmetric": [...]}` or `{"asymmetric": {"lo": [...], "hi": [...]}}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSpec {
    #[default]
    Poisson,
    Sqrt,
    Symmetric(Vec<f64>),
    Asymmetric {
        lo: Vec<f64>,
        hi: Vec<f64>,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CurveSpec {
    Sampled {
        name: String,
        x: Vec<f64>,
        y: Vec<f64>,
    },
    Gaussian {
        name: String,
        norm: f64,
        mean: f64,
        sigma: f64,
    },
    Exponential {
        name: String,
        norm: f64,
        slope: f64,
    },
    Polynomial {
        name: String,
        coefficients: Vec<f64>,
    },
    Keys {
        name: String,
        support: (f64, f64),
        samples: Vec<f64>,
        #[serde(default)]
        weights: Option<Vec<f64>>,
        #[serde(default = "default_rho")]
        rho: f64,
        #[serde(default = "default_norm")]
        norm: f64,
    },
}

fn default_rho() -> f64 {
    1.0
}

fn default_norm() -> f64 {
    1.0
}

impl HistogramSpec {
    fn build(self) -> bf_core::Result<Histogram> {
        let HistogramSpec { name, bin_edges, bin_content, errors } = self;
        match errors {
            ErrorSpec::Poisson => {
                Histogram::from_counts(name, bin_edges, bin_content, ErrorModel::Poisson)
            }
            ErrorSpec::Sqrt => Histogram::from_counts(name, bin_edges, bin_content, ErrorModel::Sqrt),
            ErrorSpec::Symmetric(e) => Histogram::with_symmetric_errors(name, bin_edges, bin_content, e),
            ErrorSpec::Asymmetric { lo, hi } => {
                Histogram::with_errors(name, bin_edges, bin_content, lo, hi)
            }
        }
    }
}

impl CurveSpec {
    fn name(&self) -> &str {
        match self {
            CurveSpec::Sampled { name, .. }
            | CurveSpec::Gaussian { name, .. }
            | CurveSpec::Exponential { name, .. }
            | CurveSpec::Polynomial { name, .. }
            | CurveSpec::Keys { name, .. } => name,
        }
    }

    fn build(self) -> bf_core::Result<Box<dyn Curve>> {
        let curve: Box<dyn Curve> = match self {
            CurveSpec::Sampled { x, y, .. } => Box::new(SampledCurve::new(x, y)?),
            CurveSpec::Gaussian { norm, mean, sigma, .. } => {
                Box::new(GaussianCurve::new(norm, mean, sigma)?)
            }
            CurveSpec::Exponential { norm, slope, .. } => {
                Box::new(ExponentialCurve::new(norm, slope)?)
            }
            CurveSpec::Polynomial { coefficients, .. } => {
                Box::new(PolynomialCurve::new(coefficients)?)
            }
            CurveSpec::Keys { support, samples, weights, rho, norm, .. } => {
                let pdf = RhoKeysPdf::from_samples(support, samples, weights, rho)?;
                Box::new(ScaledCurve::new(pdf, norm)?)
            }
        };
        Ok(curve)
    }
}

impl PlotDocument {
    pub fn into_plot(self) -> Result<Plot> {
        let mut plot = Plot::new(self.name.unwrap_or_else(|| "plot".to_string()));
        for spec in self.histograms {
            let name = spec.name.clone();
            let h = spec.build().with_context(|| format!("invalid histogram '{name}'"))?;
            plot.add_histogram(h)?;
        }
        for spec in self.curves {
            let name = spec.name().to_string();
            let c = spec.build().with_context(|| format!("invalid curve '{name}'"))?;
            plot.add_boxed_curve(name, c)?;
        }
        Ok(plot)
    }
}

pub fn load_plot(path: &Path) -> Result<Plot> {
    tracing::info!(path = %path.display(), "loading plot document");
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let doc: PlotDocument = serde_json::from_str(&json)
        .with_context(|| format!("failed to parse plot document {}", path.display()))?;
    let plot = doc.into_plot()?;
    tracing::info!(histograms = plot.n_histograms(), curves = plot.n_curves(), "plot loaded");
    Ok(plot)
}
