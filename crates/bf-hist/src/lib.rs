//! # bf-hist
//!
//! Binned data and fitted curves as consumed by the chi-square evaluator.
//!
//! - [`Histogram`]: bins with asymmetric errors.
//! - [`SampledCurve`]: a polyline through sampled curve points.
//! - [`Plot`]: named histograms paired with named curves.
//! - [`ResidualHistogram`]: residual / pull output, one point per input bin.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod filler;
pub mod histogram;
pub mod plot;
pub mod residual;
pub mod sampled;

pub use errors::{ErrorModel, garwood_interval};
pub use filler::{FlowPolicy, HistogramFiller};
pub use histogram::{Bin, Histogram};
pub use plot::Plot;
pub use residual::{ResidualHistogram, ResidualPoint};
pub use sampled::SampledCurve;
