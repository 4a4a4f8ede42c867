//! Profitability metrics based on return on equity.

use tenbin_core::{ConstituentRecord, Metric};

use super::stats;
use crate::error::{AnalyticsError, AnalyticsResult};

fn roe_values(constituents: &[ConstituentRecord]) -> Vec<f64> {
    constituents
        .iter()
        .filter_map(ConstituentRecord::finite_roe)
        .collect()
}

/// Median ROE over constituents that report one.
pub fn roe_median(constituents: &[ConstituentRecord]) -> AnalyticsResult<f64> {
    stats::median(&roe_values(constituents)).ok_or(AnalyticsError::missing(Metric::RoeMedian))
}

/// ROE quantile (linear interpolation), reported under `metric`.
pub fn roe_quantile(
    constituents: &[ConstituentRecord],
    q: f64,
    metric: Metric,
) -> AnalyticsResult<f64> {
    stats::quantile(&roe_values(constituents), q).ok_or(AnalyticsError::missing(metric))
}

/// Number of constituents with an ROE.
pub fn roe_count(constituents: &[ConstituentRecord]) -> usize {
    constituents.iter().filter(|c| c.finite_roe().is_some()).count()
}
