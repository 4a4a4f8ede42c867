//! Valuation metrics based on price-to-book ratios.

use tenbin_core::{ConstituentRecord, Metric};

use super::stats;
use crate::error::{AnalyticsError, AnalyticsResult};

fn pbr_values(constituents: &[ConstituentRecord]) -> Vec<f64> {
    constituents
        .iter()
        .filter_map(ConstituentRecord::finite_pbr)
        .collect()
}

/// Share of constituents trading below book value.
///
/// The denominator is the number of constituents that have a PBR, not the
/// total constituent count.
pub fn pbr_below_1_ratio(constituents: &[ConstituentRecord]) -> AnalyticsResult<f64> {
    let values = pbr_values(constituents);
    if values.is_empty() {
        return Err(AnalyticsError::missing(Metric::PbrBelow1Ratio));
    }
    let below = values.iter().filter(|v| **v < 1.0).count();
    Ok(below as f64 / values.len() as f64)
}

/// Mean PBR.
pub fn pbr_mean(constituents: &[ConstituentRecord]) -> AnalyticsResult<f64> {
    stats::mean(&pbr_values(constituents)).ok_or(AnalyticsError::missing(Metric::PbrMean))
}

/// Median PBR.
pub fn pbr_median(constituents: &[ConstituentRecord]) -> AnalyticsResult<f64> {
    stats::median(&pbr_values(constituents)).ok_or(AnalyticsError::missing(Metric::PbrMedian))
}

/// Number of constituents with a PBR.
pub fn pbr_count(constituents: &[ConstituentRecord]) -> usize {
    constituents.iter().filter(|c| c.finite_pbr().is_some()).count()
}
