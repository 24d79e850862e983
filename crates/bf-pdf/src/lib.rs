//! # bf-pdf
//!
//! Fit curves with closed-form integrals, usable anywhere a [`bf_core::Curve`]
//! is expected.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod exponential;
mod gaussian;
mod keys;
mod math;
mod polynomial;
mod scaled;

pub use exponential::ExponentialCurve;
pub use gaussian::GaussianCurve;
pub use keys::RhoKeysPdf;
pub use polynomial::PolynomialCurve;
pub use scaled::ScaledCurve;
