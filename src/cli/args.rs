//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs,
    export::ExportArgs,
    import::ImportArgs,
    init::InitArgs,
    part::{DeleteArgs, EditArgs, FilterArgs, NewArgs, ShowArgs, SortArgs},
};

#[derive(Parser)]
#[command(name = "parts")]
#[command(author, version, about = "Parts Catalog")]
#[command(long_about = "Manage a catalog of versioned part records (part number + revision) with filtered views and CSV import/export.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Project root (default: auto-detect by finding .parts/)
    #[arg(long, global = true)]
    pub project: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new parts catalog
    Init(InitArgs),

    /// List parts using the current filter and sort
    List,

    /// Set the filter terms and list matching parts
    Filter(FilterArgs),

    /// Clear all filter terms and restore the default sort
    Reset,

    /// Sort by a column (selecting the current column again reverses the order)
    Sort(SortArgs),

    /// Add a new part
    New(NewArgs),

    /// Edit the non-identity fields of a part
    Edit(EditArgs),

    /// Show a part's details
    Show(ShowArgs),

    /// Delete one or more parts
    Delete(DeleteArgs),

    /// Export the current view to CSV
    Export(ExportArgs),

    /// Import parts from CSV (insert new, update existing)
    Import(ImportArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Table for terminals
    #[default]
    Auto,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (same layout as export)
    Csv,
    /// Markdown tables
    Md,
    /// Just PART:REV identities, one per line
    Id,
}
