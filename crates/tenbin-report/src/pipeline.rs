//! Metrics to published text.

use tenbin_analytics::{
    classify, compute_comparison, derive_insights, weight_warnings, AnalyticsConfig,
    ComparisonMetrics, RuleSet,
};
use tenbin_core::IndexSnapshot;
use tracing::{debug, warn};

use crate::context::{BuildMetadata, RenderContext};
use crate::error::ReportResult;
use crate::template::{RenderOptions, Template};

/// Built-in Markdown README template.
pub const README_TEMPLATE: &str = include_str!("../templates/README.template.md");

/// Built-in HTML page template.
pub const SITE_TEMPLATE: &str = include_str!("../templates/site.template.html");

/// Everything a report render needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportInputs {
    /// Computed metrics; `None` when no metrics were available at all.
    pub metrics: Option<ComparisonMetrics>,
    /// Commentary notes, if any were produced.
    pub notes: Option<String>,
    /// Timestamp and badges.
    pub metadata: BuildMetadata,
}

impl ReportInputs {
    /// Inputs with no metrics and no notes.
    #[must_use]
    pub fn new(metadata: BuildMetadata) -> Self {
        Self {
            metrics: None,
            notes: None,
            metadata,
        }
    }

    /// Compute metrics from two snapshots.
    ///
    /// Weight-sum violations are logged and do not stop the computation.
    #[must_use]
    pub fn from_snapshots(
        index_a: &IndexSnapshot,
        benchmark: &IndexSnapshot,
        config: &AnalyticsConfig,
        metadata: BuildMetadata,
    ) -> Self {
        for warning in weight_warnings(&[index_a, benchmark], config) {
            warn!("{warning}");
        }
        Self::new(metadata).with_metrics(compute_comparison(index_a, benchmark, config))
    }

    /// Set the metrics.
    #[must_use]
    pub fn with_metrics(mut self, metrics: ComparisonMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Set the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }
}

/// A template plus the rules used to classify metrics before rendering it.
#[derive(Debug, Clone)]
pub struct ReportPipeline {
    template: Template,
    options: RenderOptions,
    rules: RuleSet,
    single_trailing_newline: bool,
}

impl ReportPipeline {
    /// Pipeline over an arbitrary template.
    ///
    /// # Errors
    ///
    /// Returns a syntax error if `source` does not parse.
    pub fn new(source: &str, options: RenderOptions) -> ReportResult<Self> {
        Ok(Self {
            template: Template::parse(source)?,
            options,
            rules: RuleSet::standard(),
            single_trailing_newline: false,
        })
    }

    /// The built-in README pipeline.
    ///
    /// Output is trimmed and ends with exactly one newline.
    ///
    /// # Errors
    ///
    /// Returns a syntax error if `source` does not parse.
    pub fn readme(source: &str) -> ReportResult<Self> {
        let mut pipeline = Self::new(source, RenderOptions::default())?;
        pipeline.single_trailing_newline = true;
        Ok(pipeline)
    }

    /// The built-in HTML pipeline with autoescaping.
    ///
    /// # Errors
    ///
    /// Returns a syntax error if `source` does not parse.
    pub fn site(source: &str) -> ReportResult<Self> {
        Self::new(source, RenderOptions::html())
    }

    /// Replace the classification rules.
    #[must_use]
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Build the render context for `inputs`.
    ///
    /// # Errors
    ///
    /// Propagates context builder errors.
    pub fn context(&self, inputs: &ReportInputs) -> ReportResult<RenderContext> {
        let classification = inputs
            .metrics
            .as_ref()
            .map(|metrics| classify(metrics, &self.rules));
        let insights = derive_insights(
            inputs
                .metrics
                .as_ref()
                .unwrap_or(&ComparisonMetrics::empty()),
        );
        let notes = inputs
            .notes
            .as_ref()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let mut builder = RenderContext::builder()
            .metadata(inputs.metadata.clone())
            .classification(classification)
            .insights(insights)
            .notes(notes);
        if let Some(metrics) = &inputs.metrics {
            builder = builder.metrics(metrics);
        }
        builder.build()
    }

    /// Classify, build the context, and render.
    ///
    /// # Errors
    ///
    /// Any [`ReportError`](crate::ReportError) from context assembly or
    /// rendering. Missing data is not an error.
    pub fn render(&self, inputs: &ReportInputs) -> ReportResult<String> {
        let context = self.context(inputs)?;
        let rendered = self.template.render(&context, self.options)?;
        debug!(bytes = rendered.len(), "rendered report");

        if self.single_trailing_newline {
            Ok(format!("{}\n", rendered.trim()))
        } else {
            Ok(rendered)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Badges;

    fn metadata() -> BuildMetadata {
        BuildMetadata::new("2024-01-02 03:04 UTC", Badges::default())
    }

    #[test]
    fn test_builtin_templates_parse() {
        assert!(ReportPipeline::readme(README_TEMPLATE).is_ok());
        assert!(ReportPipeline::site(SITE_TEMPLATE).is_ok());
    }

    #[test]
    fn test_readme_without_metrics() {
        let pipeline = ReportPipeline::readme(README_TEMPLATE).unwrap();
        let out = pipeline.render(&ReportInputs::new(metadata())).unwrap();

        assert!(out.contains(crate::fallback::STRENGTHS));
        assert!(out.contains(crate::fallback::WEAKNESSES));
        assert!(out.contains(crate::fallback::NOTES));
        assert!(!out.contains("注意点"));
        assert!(out.ends_with("ではありません。\n"));
        assert!(!out.ends_with("\n\n"));
    }

    #[test]
    fn test_blank_notes_fall_back() {
        let pipeline = ReportPipeline::readme(README_TEMPLATE).unwrap();
        let inputs = ReportInputs::new(metadata()).with_notes(Some("  \n".into()));
        assert!(pipeline.render(&inputs).unwrap().contains(crate::fallback::NOTES));
    }

    #[test]
    fn test_custom_template_binding_error() {
        let pipeline = ReportPipeline::new("{{ metrics.nikkei.pbr_mean }}", RenderOptions::default()).unwrap();
        let err = pipeline.render(&ReportInputs::new(metadata())).unwrap_err();
        assert!(err.is_binding());
    }
}
