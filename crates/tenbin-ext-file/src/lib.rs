//! # Tenbin Ext File
//!
//! File-based data for the Tenbin toolkit:
//!
//! - YAML/JSON constituent and financial inputs ([`build_canonical`])
//! - The canonical dataset as CSV or YAML ([`write_canonical`], [`load_canonical`])
//! - Metrics JSON ([`write_metrics_json`], [`load_metrics_json`])
//! - Optional notes and rule-set files
//!
//! Missing optional inputs (financials, metrics, notes) degrade to empty
//! values with a log line rather than an error.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod canonical;
mod error;
mod ingest;
mod metrics_io;
mod notes;
mod rules;

pub use canonical::*;
pub use error::*;
pub use ingest::*;
pub use metrics_io::*;
pub use notes::*;
pub use rules::*;

use std::fs;
use std::path::Path;

/// File formats recognised by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// `.csv`
    Csv,
    /// `.yaml` / `.yml`
    Yaml,
    /// `.json`
    Json,
    /// `.toml`
    Toml,
}

impl FileFormat {
    /// Detect the format from a path's extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        match extension(path).as_str() {
            "csv" => Some(Self::Csv),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

pub(crate) fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default()
}

pub(crate) fn read_text(path: &Path) -> FileResult<String> {
    fs::read_to_string(path).map_err(|e| FileError::io(path, e))
}

pub(crate) fn ensure_parent(path: &Path) -> FileResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| FileError::io(parent, e))
        }
        _ => Ok(()),
    }
}
