//! Error types for Tenbin core types.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while building or parsing core types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A constituent record is structurally invalid.
    #[error("Invalid record '{code}': {reason}")]
    InvalidRecord {
        /// Security code or, when that is blank, the company name.
        code: String,
        /// Why the record was rejected.
        reason: String,
    },

    /// Unknown metric name.
    #[error("Unknown metric: {name}")]
    InvalidMetric {
        /// The name that failed to parse.
        name: String,
    },
}

impl CoreError {
    /// Create an invalid record error.
    #[must_use]
    pub fn invalid_record(code: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            code: code.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown metric error.
    #[must_use]
    pub fn invalid_metric(name: impl Into<String>) -> Self {
        Self::InvalidMetric { name: name.into() }
    }
}

/// Snapshot weights do not sum to 1 within tolerance.
///
/// This is a warning, not a failure: metrics are still computed with the
/// weights as given. Callers decide whether and how to report it.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Weights of '{index}' sum to {sum:.6} (tolerance ±{tolerance})")]
pub struct WeightInvariantWarning {
    /// Index whose weights are off.
    pub index: String,
    /// Observed sum of the present weights.
    pub sum: f64,
    /// Allowed absolute deviation from 1.0.
    pub tolerance: f64,
}
