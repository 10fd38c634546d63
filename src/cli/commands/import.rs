//! `parts import` command - Reconcile a CSV file into the catalog
//!
//! Rows are matched on part number + revision: unknown pairs are inserted,
//! known pairs are overwritten. A header row is detected and skipped.

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::commands::utils::Workspace;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Reconciler;

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// CSV file to import
    pub file: PathBuf,

    /// Validate and classify every row without saving anything
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: ImportArgs, global: &GlobalOpts) -> Result<()> {
    let mut ws = Workspace::open(global)?;
    let format = ws.output_format(global);

    if !args.file.exists() {
        return Err(miette::miette!("File not found: {}", args.file.display()));
    }

    let stats = Reconciler::new(&mut ws.store)
        .dry_run(args.dry_run)
        .reconcile_file(&args.file)?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&stats).into_diagnostic()?);
        return Ok(());
    }

    if args.dry_run {
        println!("{}", style("Dry run - no changes saved").yellow().bold());
    }

    println!(
        "{} Import from {}",
        style("→").blue(),
        style(args.file.display()).cyan()
    );
    println!("  Inserted: {}", style(stats.inserted).green());
    println!("  Updated:  {}", style(stats.updated).green());
    println!("  Skipped:  {}", style(stats.skipped).yellow());
    if stats.errors > 0 {
        println!("  Errors:   {}", style(stats.errors).red());
        if !global.verbose {
            println!("  Run with {} for per-row details.", style("-v").cyan());
        }
    }

    if stats.applied() == 0 && !global.quiet {
        println!();
        println!("{} No records were imported.", style("!").yellow());
    }

    Ok(())
}
