//! Error types for fund analytics.
//!
//! This module defines the error types used throughout the portfolio crate.

use chrono::NaiveDate;
use fundscope_math::MathError;
use thiserror::Error;

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur during portfolio operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
    /// A required column is missing, unknown, or unusable for the operation.
    #[error("Schema error: {reason}")]
    Schema {
        /// What is wrong with the schema.
        reason: String,
    },

    /// A group total of zero makes member weights undefined.
    #[error("Undefined weight: group '{group}' has a zero market value total")]
    UndefinedWeight {
        /// The group whose total is zero.
        group: String,
    },

    /// Too few observations for a volatility-based statistic.
    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Minimum required observations.
        required: usize,
        /// Observations available.
        actual: usize,
    },

    /// The same key was observed twice on the same date.
    #[error("Duplicate observation for '{key}' on {date}")]
    DuplicateObservation {
        /// The fund (or fund/security) key.
        key: String,
        /// The date observed twice.
        date: NaiveDate,
    },

    /// Invalid parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// The reason the input is invalid.
        reason: String,
    },

    /// Statistics failure not covered by a more specific variant.
    #[error("Statistics error: {0}")]
    Math(MathError),
}

impl PortfolioError {
    /// Create a schema error.
    #[must_use]
    pub fn schema(reason: impl Into<String>) -> Self {
        Self::Schema {
            reason: reason.into(),
        }
    }

    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Create a duplicate observation error.
    #[must_use]
    pub fn duplicate(key: impl Into<String>, date: NaiveDate) -> Self {
        Self::DuplicateObservation {
            key: key.into(),
            date,
        }
    }

    /// Returns true if the error signals too few observations.
    #[must_use]
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }
}

impl From<MathError> for PortfolioError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InsufficientData { required, actual } => {
                Self::InsufficientData { required, actual }
            }
            MathError::InvalidInput { reason } => Self::InvalidInput { reason },
            other => Self::Math(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PortfolioError::schema("column 'country' is not present");
        assert!(err.to_string().contains("country"));

        let err = PortfolioError::UndefinedWeight {
            group: "F1".into(),
        };
        assert!(err.to_string().contains("F1"));

        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let err = PortfolioError::duplicate("F2", date);
        assert!(err.to_string().contains("F2"));
        assert!(err.to_string().contains("2024-03-01"));
    }

    #[test]
    fn test_from_math_error() {
        let err: PortfolioError = MathError::insufficient_data(2, 1).into();
        assert_eq!(
            err,
            PortfolioError::InsufficientData {
                required: 2,
                actual: 1
            }
        );
        assert!(err.is_insufficient_data());

        let err: PortfolioError = MathError::LengthMismatch { left: 1, right: 2 }.into();
        assert!(matches!(err, PortfolioError::Math(_)));
    }
}
