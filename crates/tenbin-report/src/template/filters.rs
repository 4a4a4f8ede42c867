//! Filter evaluation.

use tenbin_core::{format_number, format_percent};

use super::ast::{Filter, FilterCall};
use crate::error::{ReportError, ReportResult};
use crate::value::Value;

impl FilterCall {
    /// Apply the filter, producing text.
    ///
    /// Null formats as the missing sentinel. Text that parses as a number is
    /// formatted like a number; other text passes through unchanged, which
    /// also makes chained filters harmless.
    pub fn apply(&self, value: &Value, line: usize) -> ReportResult<Value> {
        let decimals = self.decimals.unwrap_or(0);
        let number = match value {
            Value::Null => None,
            Value::Number(n) => Some(*n),
            Value::Text(text) => match text.trim().parse::<f64>() {
                Ok(n) => Some(n),
                Err(_) => return Ok(value.clone()),
            },
            Value::Bool(_) | Value::List(_) | Value::Map(_) => {
                return Err(ReportError::FilterType {
                    filter: self.filter.name().to_string(),
                    kind: value.kind().to_string(),
                    line,
                })
            }
        };

        let formatted = match self.filter {
            Filter::FormatPercent => format_percent(number, decimals),
            Filter::FormatNumber => format_number(number, decimals),
        };
        Ok(Value::Text(formatted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(filter: Filter, decimals: Option<u32>) -> FilterCall {
        FilterCall { filter, decimals }
    }

    #[test]
    fn test_format_filters() {
        let percent = call(Filter::FormatPercent, Some(1));
        assert_eq!(percent.apply(&Value::Number(0.4567), 1).unwrap(), Value::from("45.7%"));
        assert_eq!(percent.apply(&Value::Null, 1).unwrap(), Value::from("N/A"));

        let number = call(Filter::FormatNumber, Some(2));
        assert_eq!(number.apply(&Value::Number(2.005), 1).unwrap(), Value::from("2.00"));
        assert_eq!(number.apply(&Value::from("1.5"), 1).unwrap(), Value::from("1.50"));
        assert_eq!(number.apply(&Value::from("n.a."), 1).unwrap(), Value::from("n.a."));
    }

    #[test]
    fn test_default_decimals() {
        let number = call(Filter::FormatNumber, None);
        assert_eq!(number.apply(&Value::Number(7.4), 1).unwrap(), Value::from("7"));
    }

    #[test]
    fn test_huge_numeric_text() {
        let percent = call(Filter::FormatPercent, None);
        let formatted = percent.apply(&Value::from("1e27"), 4).unwrap();
        assert_eq!(formatted, Value::from("100000000000000009025336901632%"));
    }

    #[test]
    fn test_rejects_collections() {
        let err = call(Filter::FormatNumber, None)
            .apply(&Value::List(vec![]), 9)
            .unwrap_err();
        assert_eq!(
            err,
            ReportError::FilterType {
                filter: "format_number".into(),
                kind: "list".into(),
                line: 9
            }
        );
    }
}
