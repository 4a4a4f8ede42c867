//! Render context assembly.
//!
//! The context is the only thing a template can see. [`RenderContextBuilder`]
//! fills it from typed inputs so that every built-in template key is always
//! present, even when the underlying data is missing.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tenbin_analytics::ComparisonMetrics;
use tenbin_core::{ClassificationResult, MetricsTable, BENCHMARK, INDEX_A};

use crate::error::{ReportError, ReportResult};
use crate::fallback;
use crate::value::Value;

/// Repository slug used when none is configured.
pub const DEFAULT_REPOSITORY: &str = "OWNER/REPO";

/// Timestamp format shown in reports.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// Format a UTC instant the way reports display it.
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Current UTC time in report format, e.g. `2024-05-01 09:30 UTC`.
#[must_use]
pub fn current_timestamp() -> String {
    format_timestamp(Utc::now())
}

/// A status badge image and the page it links to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    /// Badge image URL.
    pub image: String,
    /// Target URL.
    pub link: String,
}

impl Badge {
    fn for_workflow(repository: &str, workflow: &str) -> Self {
        let link = format!("https://github.com/{repository}/actions/workflows/{workflow}");
        Self {
            image: format!("{link}/badge.svg"),
            link,
        }
    }

    fn to_value(&self) -> Value {
        [("image", self.image.as_str()), ("link", self.link.as_str())]
            .into_iter()
            .collect()
    }
}

/// CI and Pages workflow badges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badges {
    /// Continuous integration workflow.
    pub ci: Badge,
    /// Pages deployment workflow.
    pub pages: Badge,
}

impl Badges {
    /// Badges for a GitHub `owner/name` repository.
    #[must_use]
    pub fn for_repository(repository: &str) -> Self {
        Self {
            ci: Badge::for_workflow(repository, "ci.yml"),
            pages: Badge::for_workflow(repository, "pages.yml"),
        }
    }
}

impl Default for Badges {
    fn default() -> Self {
        Self::for_repository(DEFAULT_REPOSITORY)
    }
}

/// Build-time information shown in the report header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildMetadata {
    /// Display timestamp.
    pub updated_at: String,
    /// Status badges.
    pub badges: Badges,
}

impl BuildMetadata {
    /// Metadata with an explicit timestamp.
    #[must_use]
    pub fn new(updated_at: impl Into<String>, badges: Badges) -> Self {
        Self {
            updated_at: updated_at.into(),
            badges,
        }
    }

    /// Metadata stamped with the current time.
    #[must_use]
    pub fn now(repository: &str) -> Self {
        Self::new(current_timestamp(), Badges::for_repository(repository))
    }
}

/// Variables visible to a template.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderContext {
    values: BTreeMap<String, Value>,
}

impl RenderContext {
    /// Empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Typed builder for the built-in report templates.
    #[must_use]
    pub fn builder() -> RenderContextBuilder {
        RenderContextBuilder::default()
    }

    /// Add or replace a root key.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add or replace a root key in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Look up a root key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Root keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

/// Builder for the report [`RenderContext`].
///
/// Only `metadata` is required. Metrics default to an all-missing pair;
/// absent classification leaves `strengths`, `weaknesses`, and `cautions`
/// null so templates fall back to their placeholder text.
#[derive(Debug, Clone, Default)]
pub struct RenderContextBuilder {
    metadata: Option<BuildMetadata>,
    metrics: Option<ComparisonMetrics>,
    classification: Option<ClassificationResult>,
    insights: Vec<String>,
    notes: Option<String>,
}

impl RenderContextBuilder {
    /// Timestamp and badges.
    #[must_use]
    pub fn metadata(mut self, metadata: BuildMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Metrics for both indices.
    #[must_use]
    pub fn metrics(mut self, metrics: &ComparisonMetrics) -> Self {
        self.metrics = Some(metrics.clone());
        self
    }

    /// Classifier output, if any.
    #[must_use]
    pub fn classification(mut self, classification: Option<ClassificationResult>) -> Self {
        self.classification = classification;
        self
    }

    /// One-line insights for the HTML page.
    #[must_use]
    pub fn insights(mut self, insights: Vec<String>) -> Self {
        self.insights = insights;
        self
    }

    /// Free-form commentary notes.
    #[must_use]
    pub fn notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }

    /// Assemble the context.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::MissingField`] when no metadata was supplied.
    pub fn build(self) -> ReportResult<RenderContext> {
        let metadata = self
            .metadata
            .ok_or_else(|| ReportError::missing_field("metadata"))?;
        let metrics = self.metrics.unwrap_or_else(ComparisonMetrics::empty);

        let badges: Value = [
            ("ci", metadata.badges.ci.to_value()),
            ("pages", metadata.badges.pages.to_value()),
        ]
        .into_iter()
        .collect();

        let metrics_value: Value = [
            (INDEX_A, table_value(&metrics.index_a)),
            (BENCHMARK, table_value(&metrics.benchmark)),
        ]
        .into_iter()
        .collect();

        let fallback_value: Value = [
            ("strengths", fallback::STRENGTHS),
            ("weaknesses", fallback::WEAKNESSES),
            ("notes", fallback::NOTES),
        ]
        .into_iter()
        .collect();

        let (strengths, weaknesses, cautions) = match self.classification {
            Some(result) => (
                Value::from(result.strengths),
                Value::from(result.weaknesses),
                Value::from(result.cautions),
            ),
            None => (Value::Null, Value::Null, Value::Null),
        };

        Ok(RenderContext::new()
            .with("updated_at", metadata.updated_at)
            .with("badges", badges)
            .with("metrics", metrics_value)
            .with("strengths", strengths)
            .with("weaknesses", weaknesses)
            .with("cautions", cautions)
            .with("insights", self.insights)
            .with("notes", self.notes)
            .with("fallback", fallback_value))
    }
}

/// Every metric key, null where missing.
fn table_value(table: &MetricsTable) -> Value {
    table
        .iter()
        .map(|(metric, value)| (metric.as_str(), Value::from(value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tenbin_core::Metric;

    fn metadata() -> BuildMetadata {
        BuildMetadata::new("2024-01-02 03:04 UTC", Badges::for_repository("acme/tenbin"))
    }

    #[test]
    fn test_badges() {
        let badges = Badges::for_repository("acme/tenbin");
        assert_eq!(
            badges.ci.link,
            "https://github.com/acme/tenbin/actions/workflows/ci.yml"
        );
        assert_eq!(
            badges.pages.image,
            "https://github.com/acme/tenbin/actions/workflows/pages.yml/badge.svg"
        );
        assert!(Badges::default().ci.link.contains(DEFAULT_REPOSITORY));
    }

    #[test]
    fn test_timestamp_format() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 59).unwrap();
        assert_eq!(format_timestamp(at), "2024-05-01 09:30 UTC");
        assert!(current_timestamp().ends_with(" UTC"));
    }

    #[test]
    fn test_builder_requires_metadata() {
        assert_eq!(
            RenderContext::builder().build(),
            Err(ReportError::missing_field("metadata"))
        );
    }

    #[test]
    fn test_builder_defaults() {
        let ctx = RenderContext::builder().metadata(metadata()).build().unwrap();

        assert_eq!(ctx.get("strengths"), Some(&Value::Null));
        assert_eq!(ctx.get("notes"), Some(&Value::Null));
        assert_eq!(ctx.get("insights"), Some(&Value::List(vec![])));

        let hhi = ctx
            .get("metrics")
            .and_then(|m| m.get("topix"))
            .and_then(|t| t.get("sector_hhi"));
        assert_eq!(hhi, Some(&Value::Null));

        let link = ctx
            .get("badges")
            .and_then(|b| b.get("ci"))
            .and_then(|c| c.get("link"));
        assert_eq!(
            link,
            Some(&Value::from("https://github.com/acme/tenbin/actions/workflows/ci.yml"))
        );
    }

    #[test]
    fn test_builder_with_data() {
        let metrics = ComparisonMetrics::new(
            MetricsTable::from_values(INDEX_A, [(Metric::RoeMedian, Some(4.3))]),
            MetricsTable::empty(BENCHMARK),
        );
        let logic = ClassificationResult {
            strengths: vec!["s".into()],
            weaknesses: vec![],
            cautions: vec![],
        };
        let ctx = RenderContext::builder()
            .metadata(metadata())
            .metrics(&metrics)
            .classification(Some(logic))
            .notes(Some("note".into()))
            .build()
            .unwrap();

        assert_eq!(ctx.get("strengths"), Some(&Value::from(vec!["s"])));
        assert_eq!(ctx.get("weaknesses"), Some(&Value::List(vec![])));
        assert_eq!(
            ctx.get("metrics")
                .and_then(|m| m.get("yomiuri333"))
                .and_then(|t| t.get("roe_median")),
            Some(&Value::Number(4.3))
        );
        assert!(ctx.keys().any(|k| k == "fallback"));
    }
}
