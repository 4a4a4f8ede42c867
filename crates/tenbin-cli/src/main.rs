//! Tenbin CLI - compare yomiuri333 with TOPIX and publish the report.
//!
//! # Usage
//!
//! ```bash
//! # Normalize raw inputs
//! tenbin ingest --input data/constituents.yaml --fin data/financials.yaml --out data/canonical.csv
//!
//! # Compute metrics
//! tenbin metrics --in data/canonical.csv --out data/metrics.json
//!
//! # Show the logic summary
//! tenbin classify --metrics data/metrics.json
//!
//! # Render README and HTML page
//! tenbin readme --metrics data/metrics.json --notes data/notes.md --out README.md
//! tenbin site --metrics data/metrics.json --out site/index.html
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::AppContext;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.quiet { "error" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let ctx = AppContext::from_cli(&cli)?;

    match cli.command {
        Commands::Ingest(args) => commands::ingest::execute(args, &ctx)?,
        Commands::Metrics(args) => commands::metrics::execute(args, &ctx)?,
        Commands::Classify(args) => commands::classify::execute(args, &ctx)?,
        Commands::Readme(args) => commands::render::execute_readme(args, &ctx)?,
        Commands::Site(args) => commands::render::execute_site(args, &ctx)?,
    }

    Ok(())
}
