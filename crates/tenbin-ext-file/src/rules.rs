//! Classification rule sets stored as TOML or JSON.

use std::path::Path;

use tenbin_analytics::RuleSet;
use tracing::info;

use crate::error::{FileError, FileResult};
use crate::{read_text, FileFormat};

/// Load and validate a rule set.
///
/// # Errors
///
/// Fails on I/O or parse errors, an unsupported extension, or a rule set
/// that does not validate.
pub fn load_rule_set(path: &Path) -> FileResult<RuleSet> {
    let text = read_text(path)?;
    let rules: RuleSet = match FileFormat::from_path(path) {
        Some(FileFormat::Toml) => toml::from_str(&text).map_err(|e| FileError::parse(path, e))?,
        Some(FileFormat::Json) => serde_json::from_str(&text).map_err(|e| FileError::parse(path, e))?,
        _ => return Err(FileError::unsupported(path)),
    };
    rules.validate().map_err(|e| FileError::parse(path, e))?;
    info!(path = %path.display(), version = %rules.version, count = rules.len(), "loaded rule set");
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_standard_rules_as_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        std::fs::write(&path, serde_json::to_string(&RuleSet::standard()).unwrap()).unwrap();

        let loaded = load_rule_set(&path).unwrap();
        let standard = RuleSet::standard();
        assert_eq!(loaded.version, standard.version);
        assert_eq!(loaded.len(), standard.len());
        assert_eq!(loaded.rules[4].id, "roe_lag");
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.ini");
        std::fs::write(&path, "").unwrap();
        assert!(matches!(load_rule_set(&path), Err(FileError::Unsupported { .. })));
    }
}
