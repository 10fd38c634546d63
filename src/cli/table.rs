//! Table formatting for part lists
//!
//! Renders an ordered slice of parts in every supported output format. The
//! order is never changed here; callers pass the rows exactly as the query
//! engine returned them.

use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{escape_md, escape_tsv, truncate_str};
use crate::cli::OutputFormat;
use crate::core::export::write_csv;
use crate::core::SortState;
use crate::entities::part::{Part, PartField};

/// Widest a text cell may get in the terminal table
const MAX_CELL_WIDTH: usize = 40;

/// Configuration for table output
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Sort state, marked with an arrow in the header
    pub sort: Option<SortState>,
    /// Show summary line after table (e.g., "5 part(s) found")
    pub show_summary: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            sort: None,
            show_summary: true,
        }
    }
}

impl TableConfig {
    pub fn with_sort(sort: SortState) -> Self {
        Self {
            sort: Some(sort),
            show_summary: true,
        }
    }

    /// Config for piping (no summary)
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.show_summary = !quiet;
        self
    }
}

/// Render parts to a string in the requested format
pub fn render_parts(parts: &[Part], format: OutputFormat, config: &TableConfig) -> Result<String> {
    let output = match format {
        OutputFormat::Auto => render_table(parts, config),
        OutputFormat::Tsv => {
            let mut out = header_labels(config).join("\t");
            out.push('\n');
            for part in parts {
                let row: Vec<String> = part.to_row().iter().map(|c| escape_tsv(c)).collect();
                out.push_str(&row.join("\t"));
                out.push('\n');
            }
            out
        }
        OutputFormat::Csv => {
            let mut buf = Vec::new();
            write_csv(&mut buf, parts)?;
            String::from_utf8(buf).into_diagnostic()?
        }
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(parts).into_diagnostic()?;
            json.push('\n');
            json
        }
        OutputFormat::Md => {
            let mut builder = Builder::default();
            builder.push_record(header_labels(config));
            for part in parts {
                builder.push_record(part.to_row().iter().map(|c| escape_md(c)));
            }
            let mut out = builder.build().with(Style::markdown()).to_string();
            out.push('\n');
            out
        }
        OutputFormat::Id => parts
            .iter()
            .map(|p| format!("{}\n", p.key()))
            .collect(),
    };

    Ok(output)
}

fn render_table(parts: &[Part], config: &TableConfig) -> String {
    if parts.is_empty() {
        return "No parts found.\n".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(header_labels(config));
    for part in parts {
        builder.push_record(
            part.to_row()
                .iter()
                .map(|c| truncate_str(&escape_tsv(c), MAX_CELL_WIDTH)),
        );
    }

    let mut out = builder.build().with(Style::sharp()).to_string();
    out.push('\n');

    if config.show_summary {
        out.push_str(&format!("{} part(s) found.\n", style(parts.len()).cyan()));
    }
    out
}

/// Column labels, with the sorted column marked by its direction arrow
fn header_labels(config: &TableConfig) -> Vec<String> {
    PartField::ALL
        .iter()
        .map(|field| match config.sort {
            Some(sort) if sort.key == *field => {
                format!("{} {}", field.label(), sort.direction.arrow())
            }
            _ => field.label().to_string(),
        })
        .collect()
}

/// Multi-line detail view of a single part
pub fn render_details(part: &Part) -> String {
    let width = PartField::ALL
        .iter()
        .map(|f| f.label().len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for field in PartField::ALL {
        let value = part.get(field).unwrap_or("—");
        out.push_str(&format!(
            "{:>width$}: {}\n",
            style(field.label()).bold(),
            value,
            width = width
        ));
    }
    out
}
