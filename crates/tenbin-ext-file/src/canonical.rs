//! The canonical dataset: one row per index constituent.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tenbin_core::{ConstituentRecord, IndexSnapshot};
use tracing::{info, warn};

use crate::error::{FileError, FileResult};
use crate::{ensure_parent, extension, read_text, FileFormat};

/// A constituent joined with its latest financial figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    /// Index name.
    pub index: String,
    /// Security code.
    pub code: String,
    /// Company name.
    #[serde(default)]
    pub name: String,
    /// Sector; `None` when unknown.
    #[serde(default)]
    pub sector: Option<String>,
    /// Index weight.
    #[serde(default)]
    pub weight: Option<f64>,
    /// Price-to-book ratio.
    #[serde(default)]
    pub pbr: Option<f64>,
    /// Return on equity, percent.
    #[serde(default)]
    pub roe: Option<f64>,
    /// Dividend yield, percent.
    #[serde(default)]
    pub dy: Option<f64>,
    /// Market capitalisation.
    #[serde(default)]
    pub market_cap: Option<f64>,
    /// Date of the financial figures.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl CanonicalRecord {
    /// Convert to the analytics input type.
    #[must_use]
    pub fn to_constituent(&self) -> ConstituentRecord {
        ConstituentRecord {
            code: self.code.clone(),
            name: self.name.clone(),
            sector: self.sector.clone(),
            pbr: self.pbr,
            roe: self.roe,
            dividend_yield: self.dy,
            weight: self.weight,
            as_of: self.date,
        }
    }
}

/// YAML envelope for the canonical dataset.
#[derive(Debug, Serialize, Deserialize)]
struct CanonicalDocument {
    #[serde(default)]
    generated_at: Option<String>,
    records: Vec<CanonicalRecord>,
}

/// Write the dataset. `.yaml`/`.yml` produce a `{generated_at, records}`
/// document; any other extension produces CSV.
///
/// # Errors
///
/// Fails on I/O or serialization errors.
pub fn write_canonical(records: &[CanonicalRecord], path: &Path) -> FileResult<()> {
    ensure_parent(path)?;
    match FileFormat::from_path(path) {
        Some(FileFormat::Yaml) => {
            let document = CanonicalDocument {
                generated_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
                records: records.to_vec(),
            };
            let text = serde_yaml::to_string(&document).map_err(|e| FileError::parse(path, e))?;
            fs::write(path, text).map_err(|e| FileError::io(path, e))?;
        }
        _ => {
            let mut writer = csv::Writer::from_path(path).map_err(|e| FileError::parse(path, e))?;
            for record in records {
                writer.serialize(record).map_err(|e| FileError::parse(path, e))?;
            }
            writer.flush().map_err(|e| FileError::io(path, e))?;
        }
    }
    info!(path = %path.display(), count = records.len(), "wrote canonical dataset");
    Ok(())
}

/// Read a dataset written by [`write_canonical`] (CSV, YAML, or JSON).
///
/// # Errors
///
/// Fails on I/O or parse errors, or an unknown extension.
pub fn load_canonical(path: &Path) -> FileResult<Vec<CanonicalRecord>> {
    let records = match FileFormat::from_path(path) {
        Some(FileFormat::Csv) => {
            let mut reader = csv::Reader::from_path(path).map_err(|e| FileError::parse(path, e))?;
            reader
                .deserialize()
                .collect::<Result<Vec<CanonicalRecord>, _>>()
                .map_err(|e| FileError::parse(path, e))?
        }
        Some(FileFormat::Yaml) => {
            let document: CanonicalDocument =
                serde_yaml::from_str(&read_text(path)?).map_err(|e| FileError::parse(path, e))?;
            document.records
        }
        Some(FileFormat::Json) => {
            let document: CanonicalDocument =
                serde_json::from_str(&read_text(path)?).map_err(|e| FileError::parse(path, e))?;
            document.records
        }
        _ => return Err(FileError::unsupported(path)),
    };
    info!(path = %path.display(), count = records.len(), extension = %extension(path), "loaded canonical dataset");
    Ok(records)
}

/// Group rows into one snapshot per index.
///
/// Rows with a blank security code are skipped with a warning.
#[must_use]
pub fn group_snapshots(records: &[CanonicalRecord]) -> BTreeMap<String, IndexSnapshot> {
    let mut groups: BTreeMap<String, IndexSnapshot> = BTreeMap::new();
    for record in records {
        let constituent = record.to_constituent();
        if let Err(err) = constituent.validate() {
            warn!(index = %record.index, "skipping record: {err}");
            continue;
        }
        groups
            .entry(record.index.clone())
            .or_insert_with(|| IndexSnapshot::empty(record.index.clone()))
            .constituents
            .push(constituent);
    }
    groups
}
