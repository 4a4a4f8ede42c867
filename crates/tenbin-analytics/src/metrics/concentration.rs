//! Concentration metrics: sector HHI and top-N weight.
//!
//! Weights are resolved before use:
//! - if at least one constituent carries a weight, missing weights count as 0
//! - if none does, every constituent gets `1/n` (equal-weight fallback)

use std::cmp::Ordering;
use std::collections::BTreeMap;

use tenbin_core::{ConstituentRecord, Metric};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Resolved weight per constituent, in input order.
#[must_use]
pub fn resolve_weights(constituents: &[ConstituentRecord]) -> Vec<f64> {
    let any_weight = constituents.iter().any(|c| c.finite_weight().is_some());
    if any_weight {
        constituents
            .iter()
            .map(|c| c.finite_weight().unwrap_or(0.0))
            .collect()
    } else {
        let equal = 1.0 / constituents.len().max(1) as f64;
        vec![equal; constituents.len()]
    }
}

/// Aggregate weight per known sector, renormalized to sum to 1.
///
/// Constituents without a sector are excluded before renormalizing. When the
/// remaining weights do not sum to a positive number, sectors are weighted
/// by constituent count instead.
#[must_use]
pub fn sector_weights(constituents: &[ConstituentRecord]) -> BTreeMap<String, f64> {
    let weights = resolve_weights(constituents);
    let known: Vec<(&str, f64)> = constituents
        .iter()
        .zip(weights)
        .filter_map(|(c, w)| c.known_sector().map(|s| (s, w)))
        .collect();

    if known.is_empty() {
        return BTreeMap::new();
    }

    let total: f64 = known.iter().map(|(_, w)| w).sum();
    let equal = 1.0 / known.len() as f64;

    let mut by_sector: BTreeMap<String, f64> = BTreeMap::new();
    for (sector, weight) in known {
        let share = if total > 0.0 { weight / total } else { equal };
        *by_sector.entry(sector.to_string()).or_insert(0.0) += share;
    }
    by_sector
}

/// Herfindahl-Hirschman index of sector weights, in [0, 1].
pub fn sector_hhi(constituents: &[ConstituentRecord]) -> AnalyticsResult<f64> {
    let by_sector = sector_weights(constituents);
    if by_sector.is_empty() {
        return Err(AnalyticsError::missing(Metric::SectorHhi));
    }
    Ok(by_sector.values().map(|w| w * w).sum())
}

/// Sum of the `n` largest constituent weights, using weights as given.
///
/// Fewer than `n` constituents yields the sum of all weights.
pub fn top_n_weight(constituents: &[ConstituentRecord], n: usize) -> AnalyticsResult<f64> {
    if constituents.is_empty() {
        return Err(AnalyticsError::missing(Metric::Top10Weight));
    }

    let mut weights = resolve_weights(constituents);
    weights.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));
    Ok(weights.iter().take(n).sum())
}
