//! Per-company constituent record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// One listed company inside an index snapshot.
///
/// Every financial field is optional: providers routinely lack a ratio for
/// some names, and the metrics engine works over whatever is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstituentRecord {
    /// Security code (e.g. `"7203"`).
    pub code: String,

    /// Company name.
    #[serde(default)]
    pub name: String,

    /// Sector code. `None` or blank means unknown.
    #[serde(default)]
    pub sector: Option<String>,

    /// Price-to-book ratio.
    #[serde(default)]
    pub pbr: Option<f64>,

    /// Return on equity, in percent.
    #[serde(default)]
    pub roe: Option<f64>,

    /// Dividend yield, in percent.
    #[serde(default, alias = "dy")]
    pub dividend_yield: Option<f64>,

    /// Index weight as a fraction (0-1).
    #[serde(default)]
    pub weight: Option<f64>,

    /// Date of the financial figures.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

impl ConstituentRecord {
    /// Creates a record with only a code set.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: String::new(),
            sector: None,
            pbr: None,
            roe: None,
            dividend_yield: None,
            weight: None,
            as_of: None,
        }
    }

    /// Sets the company name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the sector code.
    #[must_use]
    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    /// Sets the price-to-book ratio.
    #[must_use]
    pub fn with_pbr(mut self, pbr: f64) -> Self {
        self.pbr = Some(pbr);
        self
    }

    /// Sets the return on equity (percent).
    #[must_use]
    pub fn with_roe(mut self, roe: f64) -> Self {
        self.roe = Some(roe);
        self
    }

    /// Sets the dividend yield (percent).
    #[must_use]
    pub fn with_dividend_yield(mut self, dividend_yield: f64) -> Self {
        self.dividend_yield = Some(dividend_yield);
        self
    }

    /// Sets the index weight.
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Sets the as-of date.
    #[must_use]
    pub fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = Some(as_of);
        self
    }

    /// Sector code when known (non-blank).
    pub fn known_sector(&self) -> Option<&str> {
        self.sector
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Price-to-book ratio if present and finite.
    pub fn finite_pbr(&self) -> Option<f64> {
        self.pbr.filter(|v| v.is_finite())
    }

    /// Return on equity if present and finite.
    pub fn finite_roe(&self) -> Option<f64> {
        self.roe.filter(|v| v.is_finite())
    }

    /// Dividend yield if present and finite.
    pub fn finite_dividend_yield(&self) -> Option<f64> {
        self.dividend_yield.filter(|v| v.is_finite())
    }

    /// Weight if present and finite.
    pub fn finite_weight(&self) -> Option<f64> {
        self.weight.filter(|v| v.is_finite())
    }

    /// Checks that the record can take part in a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRecord`] when the security code is blank.
    pub fn validate(&self) -> CoreResult<()> {
        if self.code.trim().is_empty() {
            let label = if self.name.is_empty() { "<unnamed>" } else { self.name.as_str() };
            return Err(CoreError::invalid_record(label, "empty security code"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let record = ConstituentRecord::new("7203")
            .with_name("Toyota")
            .with_sector("Transportation")
            .with_pbr(1.1)
            .with_roe(10.5)
            .with_dividend_yield(2.4)
            .with_weight(0.003);

        assert_eq!(record.code, "7203");
        assert_eq!(record.known_sector(), Some("Transportation"));
        assert_eq!(record.finite_pbr(), Some(1.1));
        assert_eq!(record.finite_weight(), Some(0.003));
    }

    #[test]
    fn test_blank_sector_is_unknown() {
        let record = ConstituentRecord::new("1001").with_sector("   ");
        assert_eq!(record.known_sector(), None);
    }

    #[test]
    fn test_non_finite_values_are_missing() {
        let record = ConstituentRecord::new("1001")
            .with_pbr(f64::NAN)
            .with_roe(f64::INFINITY);
        assert_eq!(record.finite_pbr(), None);
        assert_eq!(record.finite_roe(), None);
    }

    #[test]
    fn test_validate_rejects_blank_code() {
        assert!(ConstituentRecord::new("7203").validate().is_ok());

        let err = ConstituentRecord::new("  ").with_name("Toyota").validate().unwrap_err();
        assert_eq!(err, CoreError::invalid_record("Toyota", "empty security code"));

        let err = ConstituentRecord::new("").validate().unwrap_err();
        assert!(err.to_string().contains("<unnamed>"));
    }

    #[test]
    fn test_deserialize_with_dy_alias() {
        let record: ConstituentRecord =
            serde_json::from_str(r#"{"code": "1001", "dy": 2.6, "pbr": null}"#).unwrap();
        assert_eq!(record.dividend_yield, Some(2.6));
        assert_eq!(record.pbr, None);
        assert!(record.name.is_empty());
    }
}
