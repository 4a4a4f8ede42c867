//! Metrics JSON files: `{ index: { metric: value } }`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tenbin_core::MetricsTable;
use tracing::{info, warn};

use crate::error::{FileError, FileResult};
use crate::{ensure_parent, read_text};

type MetricsDocument = BTreeMap<String, BTreeMap<String, Option<f64>>>;

/// Write tables as pretty JSON with sorted keys.
///
/// Missing metrics are written as `null`.
///
/// # Errors
///
/// Fails on I/O errors.
pub fn write_metrics_json(tables: &[&MetricsTable], path: &Path) -> FileResult<()> {
    let document: MetricsDocument = tables
        .iter()
        .map(|table| (table.index.clone(), table.to_named_map()))
        .collect();
    let mut text = serde_json::to_string_pretty(&document).map_err(|e| FileError::parse(path, e))?;
    text.push('\n');

    ensure_parent(path)?;
    fs::write(path, text).map_err(|e| FileError::io(path, e))?;
    info!(path = %path.display(), indices = tables.len(), "wrote metrics");
    Ok(())
}

/// Read tables keyed by index name.
///
/// A missing file is not an error: it loads as an empty map and logs a
/// warning, so reports can still render with placeholder values.
///
/// # Errors
///
/// Fails if an existing file cannot be read or is not a metrics document.
pub fn load_metrics_json(path: &Path) -> FileResult<BTreeMap<String, MetricsTable>> {
    if !path.exists() {
        warn!(path = %path.display(), "metrics file not found");
        return Ok(BTreeMap::new());
    }
    let document: MetricsDocument =
        serde_json::from_str(&read_text(path)?).map_err(|e| FileError::parse(path, e))?;

    Ok(document
        .into_iter()
        .map(|(index, values)| {
            let table = MetricsTable::from_named_map(index.clone(), &values);
            (index, table)
        })
        .collect())
}
