//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{ClassifyArgs, IngestArgs, MetricsArgs, RenderArgs};

/// Tenbin - equal-weight index vs benchmark comparison
#[derive(Parser)]
#[command(name = "tenbin")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (defaults to ./tenbin.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// GitHub repository used for status badges
    #[arg(long, env = "GITHUB_REPOSITORY", global = true)]
    pub repository: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Normalize constituent and financial files into the canonical dataset
    Ingest(IngestArgs),

    /// Compute comparison metrics from the canonical dataset
    Metrics(MetricsArgs),

    /// Classify metrics into strengths, weaknesses and cautions
    Classify(ClassifyArgs),

    /// Render the Markdown README
    Readme(RenderArgs),

    /// Render the HTML report page
    Site(RenderArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
}
