//! `parts export` command - Write the current view to CSV

use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use crate::cli::commands::utils::Workspace;
use crate::cli::GlobalOpts;
use crate::core::export::write_csv;
use crate::core::QueryEngine;

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Output file (default: stdout, also `-`)
    pub file: Option<PathBuf>,
}

pub fn run(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let ws = Workspace::open(global)?;
    let view = ws.load_view();
    let parts = QueryEngine::new(&ws.store).refresh(&view)?;

    if parts.is_empty() {
        eprintln!(
            "{} No records to export. Nothing was written.",
            style("!").yellow()
        );
        if !view.filter.is_empty() {
            eprintln!("  The current filter matches nothing; run `parts reset` to clear it.");
        }
        return Ok(());
    }

    match args.file.filter(|p| p.as_os_str() != "-") {
        Some(path) => {
            let file = File::create(&path).into_diagnostic()?;
            write_csv(BufWriter::new(file), &parts)?;
            if !global.quiet {
                eprintln!(
                    "{} Exported {} part(s) to {}",
                    style("✓").green(),
                    style(parts.len()).cyan(),
                    style(path.display()).cyan()
                );
            }
        }
        None => write_csv(io::stdout().lock(), &parts)?,
    }

    Ok(())
}
