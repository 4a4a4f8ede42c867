//! CLI command implementations.

pub mod classify;
pub mod ingest;
pub mod metrics;
pub mod render;

pub use classify::ClassifyArgs;
pub use ingest::IngestArgs;
pub use metrics::MetricsArgs;
pub use render::RenderArgs;

use std::path::Path;

use anyhow::Result;
use tenbin_analytics::ComparisonMetrics;
use tenbin_core::{MetricsTable, BENCHMARK, INDEX_A};
use tenbin_ext_file::load_metrics_json;
use tracing::warn;

use crate::cli::{Cli, OutputFormat};
use crate::config::TenbinConfig;
use crate::output::print_warning;

/// Settings shared by every command.
pub struct AppContext {
    pub config: TenbinConfig,
    pub format: OutputFormat,
    pub quiet: bool,
}

impl AppContext {
    /// Resolve configuration from flags, environment, and config file.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = TenbinConfig::load(cli.config.as_deref())?;
        if let Some(repository) = cli.repository.as_deref().filter(|r| !r.trim().is_empty()) {
            config.repository = repository.trim().to_string();
        }
        Ok(Self {
            config,
            format: cli.format,
            quiet: cli.quiet,
        })
    }

    /// Whether decorations (headers, status lines) may go to stdout.
    ///
    /// JSON output must stay machine-readable.
    pub fn decorate(&self) -> bool {
        !self.quiet && self.format == OutputFormat::Table
    }

    /// Warning shown unless `--quiet`.
    pub fn warn(&self, message: &str) {
        if !self.quiet {
            print_warning(message);
        }
    }
}

/// Load the metrics pair from a metrics JSON file.
///
/// Returns `None` when the file is missing or empty. An index absent from the
/// file is treated as all-missing.
pub fn load_comparison(path: &Path) -> Result<Option<ComparisonMetrics>> {
    let mut tables = load_metrics_json(path)?;
    if tables.is_empty() {
        return Ok(None);
    }

    let mut take = |index: &str| {
        tables.remove(index).unwrap_or_else(|| {
            warn!(index, path = %path.display(), "index missing from metrics file");
            MetricsTable::empty(index)
        })
    };
    Ok(Some(ComparisonMetrics::new(take(INDEX_A), take(BENCHMARK))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenbin_core::Metric;
    use tenbin_ext_file::write_metrics_json;

    #[test]
    fn test_load_comparison() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_comparison(&dir.path().join("missing.json")).unwrap().is_none());

        let path = dir.path().join("metrics.json");
        let table = MetricsTable::from_values(INDEX_A, [(Metric::SectorHhi, Some(0.5))]);
        write_metrics_json(&[&table], &path).unwrap();

        let metrics = load_comparison(&path).unwrap().unwrap();
        assert_eq!(metrics.index_a.get(Metric::SectorHhi), Some(0.5));
        assert!(metrics.benchmark.is_all_missing());
    }
}
