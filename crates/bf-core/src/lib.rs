//! # bf-core
//!
//! Core types, errors and traits shared by the binfit crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::Curve;
pub use types::AsymmetricError;

/// binfit version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
