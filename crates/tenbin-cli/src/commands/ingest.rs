//! Ingest command implementation.
//!
//! Joins the constituent list with the latest financial ratios.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tenbin_ext_file::{build_canonical, write_canonical};

use super::AppContext;
use crate::output::{print_output, print_success, Statement};

/// Arguments for the ingest command.
#[derive(Args, Debug)]
pub struct IngestArgs {
    /// Constituent list (YAML or JSON)
    #[arg(long = "input")]
    pub constituents: PathBuf,

    /// Financial ratios (YAML or JSON); optional file
    #[arg(long = "fin")]
    pub financials: PathBuf,

    /// Canonical dataset to write (.csv, or .yaml/.yml)
    #[arg(long = "out")]
    pub output: PathBuf,
}

/// Execute the ingest command.
pub fn execute(args: IngestArgs, ctx: &AppContext) -> Result<()> {
    let records = build_canonical(&args.constituents, &args.financials)?;
    write_canonical(&records, &args.output)?;

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in &records {
        *counts.entry(record.index.as_str()).or_default() += 1;
    }

    if !ctx.quiet {
        let rows: Vec<Statement> = counts
            .iter()
            .map(|(index, count)| Statement::new(*index, format!("{count} constituents")))
            .collect();
        print_output(&rows, &counts, ctx.format)?;
        if ctx.decorate() {
            print_success(&format!(
                "Wrote {} records to {}",
                records.len(),
                args.output.display()
            ));
        }
    }
    Ok(())
}
