//! `tenbin.toml` configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tenbin_analytics::{AnalyticsConfig, RuleSet};
use tenbin_report::DEFAULT_REPOSITORY;
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "tenbin.toml";

/// Tool configuration. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenbinConfig {
    /// GitHub `owner/name` used for badges.
    #[serde(default = "default_repository")]
    pub repository: String,

    /// Allowed deviation of an index's weight sum from 1.
    #[serde(default = "default_weight_tolerance")]
    pub weight_tolerance: f64,

    /// Constituents counted in the top-N weight metric.
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Rule set file (TOML or JSON); the built-in rules when absent.
    #[serde(default)]
    pub rules: Option<PathBuf>,

    /// Compute snapshots in parallel when the feature is enabled.
    #[serde(default = "default_true")]
    pub parallel: bool,
}

fn default_repository() -> String {
    DEFAULT_REPOSITORY.to_string()
}

fn default_weight_tolerance() -> f64 {
    AnalyticsConfig::default().weight_tolerance
}

fn default_top_n() -> usize {
    AnalyticsConfig::default().top_n
}

fn default_true() -> bool {
    true
}

impl Default for TenbinConfig {
    fn default() -> Self {
        Self {
            repository: default_repository(),
            weight_tolerance: default_weight_tolerance(),
            top_n: default_top_n(),
            rules: None,
            parallel: true,
        }
    }
}

impl TenbinConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CliError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| CliError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate(path)?;
        Ok(config)
    }

    /// Explicit file, else `./tenbin.toml` if it exists, else defaults.
    pub fn load(explicit: Option<&Path>) -> CliResult<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))
            }
            None => {
                debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn validate(&self, path: &Path) -> CliResult<()> {
        let invalid = |message: &str| CliError::Config {
            path: path.to_path_buf(),
            message: message.to_string(),
        };
        if !self.weight_tolerance.is_finite() || self.weight_tolerance < 0.0 {
            return Err(invalid("weight_tolerance must be a non-negative number"));
        }
        if self.top_n == 0 {
            return Err(invalid("top_n must be at least 1"));
        }
        Ok(())
    }

    /// Analytics settings derived from this config.
    pub fn analytics(&self) -> AnalyticsConfig {
        AnalyticsConfig::default()
            .with_top_n(self.top_n)
            .with_weight_tolerance(self.weight_tolerance)
            .with_parallel(self.parallel)
    }

    /// The configured rule set, or the built-in one.
    pub fn rule_set(&self) -> anyhow::Result<RuleSet> {
        match &self.rules {
            Some(path) => Ok(tenbin_ext_file::load_rule_set(path)?),
            None => Ok(RuleSet::standard()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: TenbinConfig = toml::from_str("").unwrap();
        assert_eq!(config, TenbinConfig::default());
        assert_eq!(config.repository, "OWNER/REPO");
        assert_eq!(config.top_n, 10);
        assert!((config.weight_tolerance - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_partial_file() {
        let config: TenbinConfig = toml::from_str("top_n = 5\nparallel = false\n").unwrap();
        assert_eq!(config.top_n, 5);
        assert!(!config.parallel);
        assert_eq!(config.analytics().top_n, 5);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tenbin.toml");
        std::fs::write(&path, "top_n = 0\n").unwrap();
        assert!(matches!(
            TenbinConfig::from_file(&path),
            Err(CliError::Config { .. })
        ));
    }
}
