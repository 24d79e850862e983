//! Error types for binfit

use thiserror::Error;

/// binfit error type
#[derive(Error, Debug)]
pub enum Error {
    /// A named histogram or curve is not present in the plot
    #[error("{kind} not found: {name}")]
    NotFound {
        /// What was looked up ("histogram" or "curve")
        kind: &'static str,
        /// Requested name, or `<default>` when the plot holds no entry at all
        name: String,
    },

    /// Input histogram has no bins
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Bin edges or widths that cannot be integrated over
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for a missing histogram.
    pub fn histogram_not_found(name: impl Into<String>) -> Self {
        Error::NotFound { kind: "histogram", name: name.into() }
    }

    /// Shorthand for a missing curve.
    pub fn curve_not_found(name: impl Into<String>) -> Self {
        Error::NotFound { kind: "curve", name: name.into() }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let e = Error::curve_not_found("bkg");
        assert_eq!(e.to_string(), "curve not found: bkg");
        let e = Error::histogram_not_found("data");
        assert!(matches!(e, Error::NotFound { kind: "histogram", .. }));
    }
}
