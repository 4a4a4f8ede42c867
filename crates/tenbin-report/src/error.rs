//! Error types for report rendering.

use thiserror::Error;

/// Result type for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Errors that can occur while parsing or rendering a template.
///
/// Every variant is fatal to the current render: a template that references
/// a value the context does not supply means the pipeline is misconfigured,
/// not that the data is incomplete.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReportError {
    /// Malformed template source.
    #[error("Template syntax error at line {line}: {message}")]
    Syntax {
        /// 1-based line of the offending construct.
        line: usize,
        /// What is wrong.
        message: String,
    },

    /// An interpolated or iterated key is not in the render context.
    #[error("Unbound template variable '{path}' at line {line}")]
    Binding {
        /// Dotted path that failed to resolve.
        path: String,
        /// 1-based template line.
        line: usize,
    },

    /// Filter name not recognised.
    #[error("Unknown filter '{name}' at line {line}")]
    UnknownFilter {
        /// The filter name.
        name: String,
        /// 1-based template line.
        line: usize,
    },

    /// Filter applied to a value it cannot format.
    #[error("Filter '{filter}' cannot format a {kind} at line {line}")]
    FilterType {
        /// The filter name.
        filter: String,
        /// Kind of the offending value.
        kind: String,
        /// 1-based template line.
        line: usize,
    },

    /// `for` over something that is not a list.
    #[error("'{path}' is a {kind}, not a list (line {line})")]
    NotIterable {
        /// Dotted path of the value.
        path: String,
        /// Kind of the value.
        kind: String,
        /// 1-based template line.
        line: usize,
    },

    /// Interpolation of a list or map.
    #[error("'{path}' is a {kind} and cannot be printed (line {line})")]
    NotPrintable {
        /// Dotted path of the value.
        path: String,
        /// Kind of the value.
        kind: String,
        /// 1-based template line.
        line: usize,
    },

    /// A required render context field was not supplied.
    #[error("Missing required context field: {field}")]
    MissingField {
        /// The field name.
        field: String,
    },
}

impl ReportError {
    /// Create a syntax error.
    #[must_use]
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: message.into(),
        }
    }

    /// Create a binding error.
    #[must_use]
    pub fn binding(path: impl Into<String>, line: usize) -> Self {
        Self::Binding {
            path: path.into(),
            line,
        }
    }

    /// Create a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Returns true for errors caused by a context/template mismatch.
    #[must_use]
    pub fn is_binding(&self) -> bool {
        matches!(self, Self::Binding { .. } | Self::MissingField { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReportError::binding("metrics.topix.sector_hhi", 12);
        assert_eq!(
            err.to_string(),
            "Unbound template variable 'metrics.topix.sector_hhi' at line 12"
        );
        assert!(err.is_binding());

        let err = ReportError::syntax(3, "unclosed tag");
        assert!(err.to_string().contains("line 3"));
        assert!(!err.is_binding());
    }
}
