//! Raw constituent and financial files to canonical records.
//!
//! Input files are YAML (JSON is accepted as YAML). Both files tolerate a few
//! layouts because upstream exports differ:
//!
//! - a map of `index -> [records]`
//! - a map of `index -> { records: [...] }`
//! - `{ records: [...] }` or a bare list, with `index` on each entry

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use serde_yaml::{Mapping, Value};
use tenbin_core::INDEX_A;
use tracing::{debug, info};

use crate::canonical::CanonicalRecord;
use crate::error::{FileError, FileResult};
use crate::read_text;

/// One row of the constituent list.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstituentEntry {
    /// Index the company belongs to.
    pub index: String,
    /// Security code, trimmed.
    pub code: String,
    /// Company name.
    pub name: String,
    /// Sector, `None` when not given.
    pub sector: Option<String>,
    /// Index weight.
    pub weight: Option<f64>,
}

/// One dated row of financial ratios.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialEntry {
    /// Index the row applies to.
    pub index: String,
    /// Security code, trimmed.
    pub code: String,
    /// As-of date.
    pub date: Option<NaiveDate>,
    /// Price-to-book ratio.
    pub pbr: Option<f64>,
    /// Return on equity, percent.
    pub roe: Option<f64>,
    /// Dividend yield, percent.
    pub dy: Option<f64>,
    /// Market capitalisation.
    pub market_cap: Option<f64>,
    /// Index weight, used when the constituent list has none.
    pub weight: Option<f64>,
}

// =============================================================================
// FIELD COERCION
// =============================================================================

fn field<'a>(entry: &'a Mapping, key: &str) -> Option<&'a Value> {
    entry.get(key).filter(|v| !v.is_null())
}

/// Numbers or numeric strings; anything else is missing.
fn number(entry: &Mapping, key: &str) -> Option<f64> {
    let value = match field(entry, key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    value.filter(|v| v.is_finite())
}

fn text(entry: &Mapping, key: &str) -> Option<String> {
    let value = match field(entry, key)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    Some(value).filter(|s| !s.is_empty())
}

fn date(entry: &Mapping, key: &str) -> Option<NaiveDate> {
    let raw = text(entry, key)?;
    let day = raw.get(..10).unwrap_or(&raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

fn index_of(entry: &Mapping, group: Option<&str>) -> String {
    text(entry, "index")
        .or_else(|| group.map(str::to_string))
        .unwrap_or_else(|| INDEX_A.to_string())
}

// =============================================================================
// LAYOUTS
// =============================================================================

/// Flatten any supported layout into `(group, entry)` pairs.
///
/// `strict` rejects groups whose value is not a list.
fn entries(document: Value, path: &Path, strict: bool) -> FileResult<Vec<(Option<String>, Mapping)>> {
    let groups: Vec<(Option<String>, Value)> = match document {
        Value::Null => Vec::new(),
        Value::Sequence(_) => vec![(None, document)],
        Value::Mapping(mut map) if matches!(map.get("records"), Some(Value::Sequence(_))) => {
            vec![(None, map.remove("records").unwrap_or_default())]
        }
        Value::Mapping(map) => map
            .into_iter()
            .map(|(key, value)| (key.as_str().map(str::to_string), value))
            .collect(),
        _ => return Err(FileError::parse(path, "expected a list or a map of lists")),
    };

    let mut out = Vec::new();
    for (group, value) in groups {
        let list = match value {
            Value::Null => continue,
            Value::Mapping(mut inner) => match inner.remove("records") {
                Some(records) => records,
                None if strict => {
                    return Err(FileError::parse(path, "entries must be provided as a list"))
                }
                None => continue,
            },
            other => other,
        };
        let Value::Sequence(items) = list else {
            if strict {
                return Err(FileError::parse(path, "entries must be provided as a list"));
            }
            continue;
        };
        out.extend(items.into_iter().filter_map(|item| match item {
            Value::Mapping(entry) => Some((group.clone(), entry)),
            _ => None,
        }));
    }
    Ok(out)
}

fn parse_document(path: &Path) -> FileResult<Value> {
    let content = read_text(path)?;
    serde_yaml::from_str(&content).map_err(|e| FileError::parse(path, e))
}

// =============================================================================
// LOADERS
// =============================================================================

/// Load the constituent list.
///
/// Entries that are not maps are skipped. A constituent without an `index`
/// field takes its group key, or `yomiuri333` when there is none.
///
/// # Errors
///
/// Fails if the file cannot be read or parsed, if a group is not a list, or
/// if no records remain.
pub fn load_constituents(path: &Path) -> FileResult<Vec<ConstituentEntry>> {
    let document = parse_document(path)?;
    let rows: Vec<ConstituentEntry> = entries(document, path, true)?
        .into_iter()
        .map(|(group, entry)| ConstituentEntry {
            index: index_of(&entry, group.as_deref()),
            code: text(&entry, "code").unwrap_or_default(),
            name: text(&entry, "name").unwrap_or_default(),
            sector: text(&entry, "sector"),
            weight: number(&entry, "weight"),
        })
        .collect();

    if rows.is_empty() {
        return Err(FileError::no_records(path));
    }
    debug!(path = %path.display(), count = rows.len(), "loaded constituents");
    Ok(rows)
}

/// Load financial ratios. A missing file yields no rows.
///
/// # Errors
///
/// Fails if an existing file cannot be read or parsed.
pub fn load_financials(path: &Path) -> FileResult<Vec<FinancialEntry>> {
    if !path.exists() {
        info!(path = %path.display(), "financials file not found, continuing without ratios");
        return Ok(Vec::new());
    }
    let document = parse_document(path)?;
    let rows: Vec<FinancialEntry> = entries(document, path, false)?
        .into_iter()
        .map(|(group, entry)| FinancialEntry {
            index: index_of(&entry, group.as_deref()),
            code: text(&entry, "code").unwrap_or_default(),
            date: date(&entry, "date"),
            pbr: number(&entry, "pbr"),
            roe: number(&entry, "roe"),
            dy: number(&entry, "dy"),
            market_cap: number(&entry, "market_cap"),
            weight: number(&entry, "weight"),
        })
        .collect();
    debug!(path = %path.display(), count = rows.len(), "loaded financials");
    Ok(rows)
}

// =============================================================================
// MERGE
// =============================================================================

/// Latest financial row per `(index, code)`.
///
/// Dated rows beat undated ones; on equal dates the later row wins.
fn latest_financials(financials: Vec<FinancialEntry>) -> BTreeMap<(String, String), FinancialEntry> {
    let mut latest: BTreeMap<(String, String), FinancialEntry> = BTreeMap::new();
    for row in financials {
        let key = (row.index.clone(), row.code.clone());
        match latest.get(&key) {
            Some(existing) if existing.date > row.date => {}
            _ => {
                latest.insert(key, row);
            }
        }
    }
    latest
}

/// Left-join financials onto constituents, sorted by `(index, code)`.
#[must_use]
pub fn merge(
    constituents: Vec<ConstituentEntry>,
    financials: Vec<FinancialEntry>,
) -> Vec<CanonicalRecord> {
    let latest = latest_financials(financials);

    let mut records: Vec<CanonicalRecord> = constituents
        .into_iter()
        .map(|c| {
            let fin = latest.get(&(c.index.clone(), c.code.clone()));
            CanonicalRecord {
                weight: c.weight.or_else(|| fin.and_then(|f| f.weight)),
                pbr: fin.and_then(|f| f.pbr),
                roe: fin.and_then(|f| f.roe),
                dy: fin.and_then(|f| f.dy),
                market_cap: fin.and_then(|f| f.market_cap),
                date: fin.and_then(|f| f.date),
                index: c.index,
                code: c.code,
                name: c.name,
                sector: c.sector,
            }
        })
        .collect();

    records.sort_by(|a, b| (&a.index, &a.code).cmp(&(&b.index, &b.code)));
    records
}

/// Build the canonical dataset from the two raw files.
///
/// # Errors
///
/// See [`load_constituents`] and [`load_financials`].
pub fn build_canonical(constituents: &Path, financials: &Path) -> FileResult<Vec<CanonicalRecord>> {
    info!(path = %constituents.display(), "loading constituents");
    let constituents = load_constituents(constituents)?;
    let financials = load_financials(financials)?;
    Ok(merge(constituents, financials))
}
