//! # bf-chi2
//!
//! Residuals, pulls and chi-square of a histogram with respect to a fitted curve,
//! where the expected content of each bin is the **average of the curve over the
//! bin** (`∫ curve dx / width`) rather than the curve value at the bin center.
//!
//! ## Example
//!
//! ```
//! use bf_chi2::Chi2Calculator;
//! use bf_hist::{Histogram, Plot, SampledCurve};
//!
//! let mut plot = Plot::new("frame");
//! plot.add_histogram(
//!     Histogram::with_symmetric_errors(
//!         "data",
//!         vec![0.0, 1.0, 2.0, 3.0],
//!         vec![10.0, 20.0, 10.0],
//!         vec![3.0, 3.0, 3.0],
//!     )
//!     .unwrap(),
//! )
//! .unwrap();
//! plot.add_curve("fit", SampledCurve::new(vec![0.0, 3.0], vec![13.0, 13.0]).unwrap()).unwrap();
//!
//! let calc = Chi2Calculator::new(&plot);
//! let pulls = calc.pull_hist(None, None).unwrap();
//! assert_eq!(pulls.len(), 3);
//! let chi2 = calc.chi_square(1).unwrap();
//! assert!((chi2 - (9.0 + 49.0 + 9.0) / 9.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod calculator;
pub mod summary;

pub use calculator::Chi2Calculator;
pub use summary::ChiSquareSummary;
