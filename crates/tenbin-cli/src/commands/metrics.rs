//! Metrics command implementation.
//!
//! Computes a metric table for every index in the canonical dataset.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tenbin_analytics::{compute_many, weight_warnings, ComparisonMetrics};
use tenbin_core::{
    format_number, format_percent, IndexSnapshot, Metric, MetricsTable, BENCHMARK, INDEX_A,
};
use tenbin_ext_file::{group_snapshots, load_canonical, write_metrics_json};
use tracing::warn;

use super::AppContext;
use crate::output::{print_header, print_output, print_success, MetricRow};

/// Arguments for the metrics command.
#[derive(Args, Debug)]
pub struct MetricsArgs {
    /// Canonical dataset produced by `tenbin ingest`
    #[arg(long = "in")]
    pub input: PathBuf,

    /// Write metrics JSON to this path
    #[arg(long = "out")]
    pub output: Option<PathBuf>,
}

/// Execute the metrics command.
///
/// Every index in the dataset gets a table. yomiuri333 and topix are always
/// present, empty when the dataset has no rows for them.
pub fn execute(args: MetricsArgs, ctx: &AppContext) -> Result<()> {
    let records = load_canonical(&args.input)?;
    let mut groups = group_snapshots(&records);
    for index in [INDEX_A, BENCHMARK] {
        groups.entry(index.to_string()).or_insert_with(|| {
            warn!(index, "no constituents in dataset");
            IndexSnapshot::empty(index)
        });
    }
    let snapshots: Vec<&IndexSnapshot> = groups.values().collect();

    let analytics = ctx.config.analytics();
    for warning in weight_warnings(&snapshots, &analytics) {
        ctx.warn(&warning.to_string());
    }

    let tables = compute_many(&snapshots, &analytics);

    if let Some(output) = &args.output {
        write_metrics_json(&tables.iter().collect::<Vec<_>>(), output)?;
    }

    let json: BTreeMap<String, BTreeMap<String, Option<f64>>> = tables
        .iter()
        .map(|table| (table.index.clone(), table.to_named_map()))
        .collect();
    let metrics = comparison(tables);

    if !ctx.quiet {
        if ctx.decorate() {
            print_header("Metrics");
        }
        print_output(&metric_rows(&metrics), &json, ctx.format)?;
        if let (Some(output), true) = (&args.output, ctx.decorate()) {
            print_success(&format!("Wrote metrics to {}", output.display()));
        }
    }
    Ok(())
}

/// Picks the yomiuri333/topix pair out of the computed tables.
fn comparison(tables: Vec<MetricsTable>) -> ComparisonMetrics {
    let mut by_index: BTreeMap<String, MetricsTable> = tables
        .into_iter()
        .map(|table| (table.index.clone(), table))
        .collect();
    let mut take = |index: &str| by_index.remove(index).unwrap_or_else(|| MetricsTable::empty(index));
    ComparisonMetrics::new(take(INDEX_A), take(BENCHMARK))
}

/// Display string for one metric value.
fn display(metric: Metric, value: Option<f64>) -> String {
    if metric.is_fraction() {
        format_percent(value, 1)
    } else if metric.is_count() {
        format_number(value, 0)
    } else {
        format_number(value, 3)
    }
}

fn metric_rows(metrics: &ComparisonMetrics) -> Vec<MetricRow> {
    Metric::ALL
        .iter()
        .map(|metric| {
            let (a, b) = metrics.pair(*metric);
            MetricRow {
                metric: metric.label().to_string(),
                index_a: display(*metric, a),
                benchmark: display(*metric, b),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(display(Metric::PbrBelow1Ratio, Some(0.5)), "50.0%");
        assert_eq!(display(Metric::ConstituentCount, Some(333.0)), "333");
        assert_eq!(display(Metric::SectorHhi, None), "N/A");
    }

    #[test]
    fn test_comparison_picks_roles() {
        let tables = vec![
            MetricsTable::from_values("nikkei225", [(Metric::RoeMedian, Some(9.0))]),
            MetricsTable::from_values(BENCHMARK, [(Metric::RoeMedian, Some(7.5))]),
        ];
        let metrics = comparison(tables);
        assert_eq!(metrics.index_a, MetricsTable::empty(INDEX_A));
        assert_eq!(metrics.benchmark.get(Metric::RoeMedian), Some(7.5));
    }

    #[test]
    fn test_rows_cover_every_metric() {
        let metrics = ComparisonMetrics::new(
            MetricsTable::empty(INDEX_A),
            MetricsTable::from_values(BENCHMARK, [(Metric::RoeMedian, Some(7.5))]),
        );
        let rows = metric_rows(&metrics);
        assert_eq!(rows.len(), Metric::ALL.len());
        assert!(rows.iter().any(|r| r.benchmark == "7.500"));
    }
}
