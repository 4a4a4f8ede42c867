//! Income metrics based on dividend yields.

use tenbin_core::{ConstituentRecord, Metric};

use super::stats;
use crate::error::{AnalyticsError, AnalyticsResult};

/// Unweighted mean dividend yield over constituents that report one.
pub fn dividend_yield_mean(constituents: &[ConstituentRecord]) -> AnalyticsResult<f64> {
    let values: Vec<f64> = constituents
        .iter()
        .filter_map(ConstituentRecord::finite_dividend_yield)
        .collect();
    stats::mean(&values).ok_or(AnalyticsError::missing(Metric::DividendYieldMean))
}

/// Number of constituents with a dividend yield.
pub fn dividend_yield_count(constituents: &[ConstituentRecord]) -> usize {
    constituents
        .iter()
        .filter(|c| c.finite_dividend_yield().is_some())
        .count()
}
