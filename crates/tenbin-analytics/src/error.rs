//! Error types for analytics.
//!
//! Missing data is reported per metric and never aborts a run: the engine
//! turns [`AnalyticsError::MissingData`] into a missing table entry.

use tenbin_core::Metric;
use thiserror::Error;

/// Result type for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Errors that can occur during metric computation or classification.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    /// A metric has no eligible input values.
    #[error("No data available for {metric}")]
    MissingData {
        /// The metric that could not be computed.
        metric: Metric,
    },

    /// A rule set failed validation.
    #[error("Invalid rule set: {reason}")]
    InvalidRuleSet {
        /// Why the rule set was rejected.
        reason: String,
    },
}

impl AnalyticsError {
    /// Create a missing data error.
    #[must_use]
    pub fn missing(metric: Metric) -> Self {
        Self::MissingData { metric }
    }

    /// Create an invalid rule set error.
    #[must_use]
    pub fn invalid_rule_set(reason: impl Into<String>) -> Self {
        Self::InvalidRuleSet {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AnalyticsError::missing(Metric::RoeMedian);
        assert_eq!(err.to_string(), "No data available for roe_median");

        let err = AnalyticsError::invalid_rule_set("duplicate id");
        assert!(err.to_string().contains("duplicate id"));
    }
}
