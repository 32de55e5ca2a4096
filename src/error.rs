//! Error types for the twok library.
//!
//! This module provides error handling using the `thiserror` crate, with
//! variants for factor-count validation, data shape validation, matrix
//! algebra and degenerate decompositions.

use thiserror::Error;

/// The main error type for the twok library.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ============ Parameter Validation Errors ============
    /// A numeric argument is outside its supported range.
    #[error("{parameter} = {value} is out of range (valid range: {min}..={max})")]
    InvalidArgument {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// The rejected value.
        value: usize,
        /// Minimum valid value.
        min: usize,
        /// Maximum valid value.
        max: usize,
    },

    /// Interaction labels cannot be generated for this many factors.
    #[error("{factors} factors exceeds the maximum of {max} supported by interaction labels")]
    UnsupportedFactorCount {
        /// Requested number of factors.
        factors: usize,
        /// Maximum number of factors that can be labelled.
        max: usize,
    },

    // ============ Shape Errors ============
    /// The data matrix does not describe a 2^k factorial experiment.
    #[error("invalid data shape: {message}")]
    InvalidShape {
        /// Description of what is wrong with the shape.
        message: String,
    },

    /// Matrix operands have incompatible dimensions.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension description.
        expected: String,
        /// Actual dimension description.
        actual: String,
    },

    /// Index is out of bounds.
    #[error("index {index} is out of bounds for size {size}")]
    IndexOutOfBounds {
        /// The invalid index.
        index: usize,
        /// The valid size.
        size: usize,
    },

    // ============ Decomposition Errors ============
    /// The total explained sum of squares is zero, so fractions are undefined.
    #[error("degenerate decomposition: {message}")]
    DegenerateDecomposition {
        /// Description of where the degenerate total was found.
        message: String,
    },
}

/// A specialized `Result` type for twok operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Create a new `InvalidShape` error.
    #[must_use]
    pub fn invalid_shape(message: impl Into<String>) -> Self {
        Self::InvalidShape {
            message: message.into(),
        }
    }

    /// Create a new `DegenerateDecomposition` error.
    #[must_use]
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateDecomposition {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidArgument {
            parameter: "factors",
            value: 1,
            min: 2,
            max: 10,
        };
        assert!(err.to_string().contains("factors = 1"));
        assert!(err.to_string().contains("2..=10"));

        let err = Error::UnsupportedFactorCount {
            factors: 11,
            max: 10,
        };
        assert!(err.to_string().contains("11"));
        assert!(err.to_string().contains("10"));

        let err = Error::DimensionMismatch {
            expected: "4 rows".into(),
            actual: "5 rows".into(),
        };
        assert_eq!(
            err.to_string(),
            "dimension mismatch: expected 4 rows, got 5 rows"
        );

        let err = Error::degenerate("column 3 has zero total");
        assert!(err.to_string().contains("column 3"));
    }

    #[test]
    fn test_error_equality() {
        let err1 = Error::invalid_shape("5 rows");
        let err2 = Error::invalid_shape("5 rows");
        let err3 = Error::invalid_shape("6 rows");

        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }
}
