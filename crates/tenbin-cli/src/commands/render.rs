//! Readme and site command implementations.
//!
//! Both render a template from a metrics file; only the template, escaping,
//! and trailing-newline handling differ.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use tenbin_ext_file::load_notes;
use tenbin_report::{BuildMetadata, ReportInputs, ReportPipeline, README_TEMPLATE, SITE_TEMPLATE};

use super::{load_comparison, AppContext};
use crate::error::CliError;
use crate::output::print_success;

/// Arguments for the readme and site commands.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Metrics JSON produced by `tenbin metrics`; a missing file renders placeholders
    #[arg(long, default_value = "data/metrics.json")]
    pub metrics: PathBuf,

    /// Template file; the built-in template when omitted
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Commentary notes file; optional
    #[arg(long)]
    pub notes: Option<PathBuf>,

    /// Output file
    #[arg(long = "out")]
    pub output: PathBuf,
}

/// Execute the readme command.
pub fn execute_readme(args: RenderArgs, ctx: &AppContext) -> Result<()> {
    let source = template_source(args.template.as_deref(), README_TEMPLATE)?;
    let pipeline = ReportPipeline::readme(&source)?;
    run(pipeline, &args, ctx, "README")
}

/// Execute the site command.
pub fn execute_site(args: RenderArgs, ctx: &AppContext) -> Result<()> {
    let source = template_source(args.template.as_deref(), SITE_TEMPLATE)?;
    let pipeline = ReportPipeline::site(&source)?;
    run(pipeline, &args, ctx, "Site")
}

fn template_source(path: Option<&Path>, builtin: &str) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|source| {
            CliError::Template {
                path: path.to_path_buf(),
                source,
            }
            .into()
        }),
        None => Ok(builtin.to_string()),
    }
}

fn run(pipeline: ReportPipeline, args: &RenderArgs, ctx: &AppContext, label: &str) -> Result<()> {
    let pipeline = pipeline.with_rules(ctx.config.rule_set()?);

    let metrics = load_comparison(&args.metrics)?;
    if metrics.is_none() {
        ctx.warn(&format!(
            "No metrics at {}; rendering placeholders",
            args.metrics.display()
        ));
    }
    let notes = match &args.notes {
        Some(path) => load_notes(path)?,
        None => None,
    };

    let mut inputs = ReportInputs::new(BuildMetadata::now(&ctx.config.repository)).with_notes(notes);
    inputs.metrics = metrics;

    let rendered = pipeline.render(&inputs)?;

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(CliError::from)?;
    }
    std::fs::write(&args.output, rendered).map_err(CliError::from)?;

    tracing::info!(path = %args.output.display(), "{label} generated");
    if ctx.decorate() {
        print_success(&format!("{label} generated at {}", args.output.display()));
    }
    Ok(())
}
