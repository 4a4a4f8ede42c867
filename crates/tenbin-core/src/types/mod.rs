//! Domain types for index comparison.

mod classification;
mod metric;
mod metrics_table;
mod record;
mod snapshot;

pub use classification::ClassificationResult;
pub use metric::Metric;
pub use metrics_table::MetricsTable;
pub use record::ConstituentRecord;
pub use snapshot::IndexSnapshot;

/// Name of the equal-weight index under evaluation.
pub const INDEX_A: &str = "yomiuri333";

/// Name of the market-cap-weighted benchmark.
pub const BENCHMARK: &str = "topix";
