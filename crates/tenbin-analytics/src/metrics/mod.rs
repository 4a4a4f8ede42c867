//! Metrics engine.
//!
//! Turns an [`IndexSnapshot`] into a [`MetricsTable`]. Each metric is
//! computed independently: a metric without eligible data becomes a missing
//! entry and never prevents the others from being computed.

pub mod concentration;
pub mod income;
pub mod profitability;
pub mod stats;
pub mod valuation;

use serde::{Deserialize, Serialize};
use tenbin_core::{IndexSnapshot, Metric, MetricsTable, WeightInvariantWarning, BENCHMARK, INDEX_A};
use tracing::debug;

use crate::config::AnalyticsConfig;
use crate::error::AnalyticsResult;

pub use concentration::{resolve_weights, sector_hhi, sector_weights, top_n_weight};
pub use income::{dividend_yield_count, dividend_yield_mean};
pub use profitability::{roe_count, roe_median, roe_quantile};
pub use valuation::{pbr_below_1_ratio, pbr_count, pbr_mean, pbr_median};

/// Metrics for the evaluated index and its benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonMetrics {
    /// Metrics of the equal-weight index.
    pub index_a: MetricsTable,
    /// Metrics of the benchmark.
    pub benchmark: MetricsTable,
}

impl ComparisonMetrics {
    /// Pairs two tables.
    #[must_use]
    pub fn new(index_a: MetricsTable, benchmark: MetricsTable) -> Self {
        Self { index_a, benchmark }
    }

    /// Both tables with every metric missing.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(MetricsTable::empty(INDEX_A), MetricsTable::empty(BENCHMARK))
    }

    /// `(index_a, benchmark)` values of one metric.
    pub fn pair(&self, metric: Metric) -> (Option<f64>, Option<f64>) {
        (self.index_a.get(metric), self.benchmark.get(metric))
    }
}

/// Computes every metric for one snapshot.
#[must_use]
pub fn compute_metrics(snapshot: &IndexSnapshot, config: &AnalyticsConfig) -> MetricsTable {
    let records = &snapshot.constituents;
    let count = |n: usize| -> AnalyticsResult<f64> { Ok(n as f64) };

    let results: [(Metric, AnalyticsResult<f64>); 13] = [
        (Metric::PbrBelow1Ratio, pbr_below_1_ratio(records)),
        (Metric::PbrMean, pbr_mean(records)),
        (Metric::PbrMedian, pbr_median(records)),
        (Metric::PbrCount, count(pbr_count(records))),
        (Metric::RoeMedian, roe_median(records)),
        (Metric::RoeQ25, roe_quantile(records, 0.25, Metric::RoeQ25)),
        (Metric::RoeQ75, roe_quantile(records, 0.75, Metric::RoeQ75)),
        (Metric::RoeCount, count(roe_count(records))),
        (Metric::DividendYieldMean, dividend_yield_mean(records)),
        (Metric::DividendYieldCount, count(dividend_yield_count(records))),
        (Metric::SectorHhi, sector_hhi(records)),
        (Metric::Top10Weight, top_n_weight(records, config.top_n)),
        (Metric::ConstituentCount, count(records.len())),
    ];

    let values = results.into_iter().map(|(metric, result)| match result {
        Ok(value) => (metric, Some(value)),
        Err(e) => {
            debug!(index = %snapshot.name, error = %e, "Metric left missing");
            (metric, None)
        }
    });

    MetricsTable::from_values(snapshot.name.clone(), values)
}

/// Computes both tables of an index/benchmark pair.
///
/// The two tables are computed on separate rayon tasks when the `parallel`
/// feature is enabled and the config allows two snapshots to run in parallel.
#[must_use]
pub fn compute_comparison(
    index_a: &IndexSnapshot,
    benchmark: &IndexSnapshot,
    config: &AnalyticsConfig,
) -> ComparisonMetrics {
    let compute_a = || compute_metrics(index_a, config);
    let compute_b = || compute_metrics(benchmark, config);

    #[cfg(feature = "parallel")]
    {
        if config.should_parallelize(2) {
            let (a, b) = rayon::join(compute_a, compute_b);
            return ComparisonMetrics::new(a, b);
        }
    }

    ComparisonMetrics::new(compute_a(), compute_b())
}

/// Computes tables for many independent snapshots, in input order.
#[must_use]
pub fn compute_many(snapshots: &[&IndexSnapshot], config: &AnalyticsConfig) -> Vec<MetricsTable> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(snapshots.len()) {
            debug!(count = snapshots.len(), "computing snapshots in parallel");
            return snapshots
                .par_iter()
                .map(|s| compute_metrics(s, config))
                .collect();
        }
    }

    snapshots.iter().map(|s| compute_metrics(s, config)).collect()
}

/// Weight-sum check for every snapshot; returns the violations.
#[must_use]
pub fn weight_warnings(
    snapshots: &[&IndexSnapshot],
    config: &AnalyticsConfig,
) -> Vec<WeightInvariantWarning> {
    snapshots
        .iter()
        .filter_map(|s| s.check_weights(config.weight_tolerance).err())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tenbin_core::ConstituentRecord;

    fn sample() -> IndexSnapshot {
        IndexSnapshot::new(
            INDEX_A,
            vec![
                ConstituentRecord::new("1001")
                    .with_sector("X")
                    .with_pbr(0.8)
                    .with_roe(5.0)
                    .with_weight(0.6),
                ConstituentRecord::new("2002")
                    .with_sector("Y")
                    .with_pbr(1.2)
                    .with_roe(15.0)
                    .with_weight(0.4),
            ],
        )
    }

    #[test]
    fn test_compute_metrics() {
        let table = compute_metrics(&sample(), &AnalyticsConfig::default());
        assert_eq!(table.index, INDEX_A);
        assert_relative_eq!(table.get(Metric::PbrBelow1Ratio).unwrap(), 0.5);
        assert_relative_eq!(table.get(Metric::RoeMedian).unwrap(), 10.0);
        assert_relative_eq!(table.get(Metric::SectorHhi).unwrap(), 0.52, epsilon = 1e-12);
        assert_relative_eq!(table.get(Metric::Top10Weight).unwrap(), 1.0, epsilon = 1e-12);
        assert_eq!(table.get(Metric::ConstituentCount), Some(2.0));
    }

    #[test]
    fn test_missing_metric_does_not_block_others() {
        let table = compute_metrics(&sample(), &AnalyticsConfig::default());
        assert_eq!(table.get(Metric::DividendYieldMean), None);
        assert_eq!(table.get(Metric::DividendYieldCount), Some(0.0));
        assert!(table.get(Metric::PbrMean).is_some());
    }

    #[test]
    fn test_empty_snapshot() {
        let table = compute_metrics(&IndexSnapshot::empty(BENCHMARK), &AnalyticsConfig::default());
        assert_eq!(table.get(Metric::SectorHhi), None);
        assert_eq!(table.get(Metric::Top10Weight), None);
        assert_eq!(table.get(Metric::ConstituentCount), Some(0.0));
    }

    #[test]
    fn test_compute_many_keeps_order() {
        let a = sample();
        let b = IndexSnapshot::empty(BENCHMARK);
        let c = IndexSnapshot::new("nikkei225", sample().constituents);
        let snapshots = [&a, &b, &c];

        let parallel = compute_many(&snapshots, &AnalyticsConfig::default().with_threshold(0));
        let sequential = compute_many(&snapshots, &AnalyticsConfig::sequential());
        assert_eq!(parallel, sequential);
        assert_eq!(parallel[0].index, INDEX_A);
        assert_eq!(parallel[1].index, BENCHMARK);
        assert_eq!(parallel[2].index, "nikkei225");
    }

    #[test]
    fn test_comparison_same_either_way() {
        let a = sample();
        let b = IndexSnapshot::new(BENCHMARK, sample().constituents);
        let parallel = compute_comparison(&a, &b, &AnalyticsConfig::default());
        let sequential = compute_comparison(&a, &b, &AnalyticsConfig::sequential());
        assert_eq!(parallel, sequential);
        assert_eq!(parallel.benchmark.index, BENCHMARK);
    }

    #[test]
    fn test_weight_warnings() {
        let mut off = sample();
        off.constituents[0].weight = Some(0.5);
        let good = sample();
        let warnings = weight_warnings(&[&off, &good], &AnalyticsConfig::default());
        assert_eq!(warnings.len(), 1);
        assert_relative_eq!(warnings[0].sum, 0.9, epsilon = 1e-12);
    }
}
