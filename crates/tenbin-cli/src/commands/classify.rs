//! Classify command implementation.
//!
//! Evaluates the rule set against a metrics file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tenbin_analytics::classify;
use tenbin_core::ClassificationResult;

use super::{load_comparison, AppContext};
use crate::output::{print_header, print_output, Statement};

/// Arguments for the classify command.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Metrics JSON produced by `tenbin metrics`
    #[arg(long, default_value = "data/metrics.json")]
    pub metrics: PathBuf,
}

/// Execute the classify command.
pub fn execute(args: ClassifyArgs, ctx: &AppContext) -> Result<()> {
    let Some(metrics) = load_comparison(&args.metrics)? else {
        ctx.warn(&format!("No metrics found at {}", args.metrics.display()));
        return Ok(());
    };

    let rules = ctx.config.rule_set()?;
    let result = classify(&metrics, &rules);

    if ctx.decorate() {
        print_header(&format!("Logic summary (rules {})", rules.version));
    }
    print_output(&statements(&result), &result, ctx.format)?;
    Ok(())
}

fn statements(result: &ClassificationResult) -> Vec<Statement> {
    let tagged = |label: &'static str, items: &[String]| {
        items
            .iter()
            .map(move |text| Statement::new(label, text.as_str()))
            .collect::<Vec<_>>()
    };
    let mut rows = tagged("strength", &result.strengths);
    rows.extend(tagged("weakness", &result.weaknesses));
    rows.extend(tagged("caution", &result.cautions));
    rows
}
