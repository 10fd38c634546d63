//! Part catalog commands: list, filter, sort, reset, new, edit, show, delete

use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::utils::Workspace;
use crate::cli::table::{render_details, render_parts, TableConfig};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{FilterTerms, QueryEngine, StoreError, ViewState};
use crate::entities::part::{Part, PartField, PartFields, PartKey, PartStatus};

#[derive(clap::Args, Debug, Default)]
pub struct FilterArgs {
    /// Part number contains
    #[arg(long)]
    pub part_number: Option<String>,

    /// Revision contains
    #[arg(long)]
    pub revision: Option<String>,

    /// Description contains
    #[arg(long)]
    pub description: Option<String>,

    /// Where used contains
    #[arg(long)]
    pub where_used: Option<String>,

    /// Status contains
    #[arg(long)]
    pub status: Option<String>,

    /// Folder path contains
    #[arg(long)]
    pub folder_path: Option<String>,

    /// File names contains
    #[arg(long)]
    pub file_names: Option<String>,
}

impl FilterArgs {
    /// Collect the flags into a term set; blank terms are dropped
    pub fn terms(&self) -> FilterTerms {
        let mut terms = FilterTerms::new();
        let flags = [
            (PartField::PartNumber, &self.part_number),
            (PartField::Revision, &self.revision),
            (PartField::Description, &self.description),
            (PartField::WhereUsed, &self.where_used),
            (PartField::Status, &self.status),
            (PartField::FolderPath, &self.folder_path),
            (PartField::FileNames, &self.file_names),
        ];
        for (field, value) in flags {
            if let Some(value) = value {
                terms.set(field, value.as_str());
            }
        }
        terms
    }
}

#[derive(clap::Args, Debug)]
pub struct SortArgs {
    /// Column to sort by
    #[arg(value_enum)]
    pub key: PartField,
}

/// Non-identity fields shared by `new` and `edit`
#[derive(clap::Args, Debug, Default)]
pub struct FieldArgs {
    /// Description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Assemblies or products that use this part
    #[arg(long, short = 'w')]
    pub where_used: Option<String>,

    /// Status (new, active, obsolete)
    #[arg(long, short = 's')]
    pub status: Option<PartStatus>,

    /// Folder holding the part's files
    #[arg(long)]
    pub folder_path: Option<String>,

    /// File names belonging to the part
    #[arg(long)]
    pub file_names: Option<String>,
}

impl FieldArgs {
    /// Overlay the provided flags on top of `base`
    pub fn overlay(self, base: PartFields) -> PartFields {
        PartFields {
            description: self.description.or(base.description),
            where_used: self.where_used.or(base.where_used),
            status: self.status.unwrap_or(base.status),
            folder_path: self.folder_path.or(base.folder_path),
            file_names: self.file_names.or(base.file_names),
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Part number
    pub part: String,

    /// Revision
    pub rev: String,

    #[command(flatten)]
    pub fields: FieldArgs,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Part number
    pub part: String,

    /// Revision
    pub rev: String,

    // An empty value clears a field; omitted flags keep the current value
    #[command(flatten)]
    pub fields: FieldArgs,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Part number
    pub part: String,

    /// Revision
    pub rev: String,
}

#[derive(clap::Args, Debug, Default)]
pub struct DeleteArgs {
    /// Parts to delete, as PART:REV (split on the last colon, so the
    /// revision cannot contain ':'; use --part/--rev for that)
    #[arg(required_unless_present = "part")]
    pub keys: Vec<PartKey>,

    /// Part number of one more part to delete
    #[arg(long, requires = "rev")]
    pub part: Option<String>,

    /// Revision for --part, taken verbatim
    #[arg(long, requires = "part")]
    pub rev: Option<String>,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl DeleteArgs {
    /// Positional keys followed by the `--part`/`--rev` pair
    pub fn all_keys(&self) -> Vec<PartKey> {
        let mut keys = self.keys.clone();
        if let (Some(part), Some(rev)) = (&self.part, &self.rev) {
            keys.push(PartKey::new(part.trim(), rev.trim()));
        }
        keys
    }
}

pub fn run_list(global: &GlobalOpts) -> Result<()> {
    let ws = Workspace::open(global)?;
    let view = ws.load_view();
    let parts = QueryEngine::new(&ws.store).refresh(&view)?;
    print_parts(&ws, global, &view, &parts)
}

pub fn run_filter(args: FilterArgs, global: &GlobalOpts) -> Result<()> {
    let ws = Workspace::open(global)?;
    let mut view = ws.load_view();
    let parts = QueryEngine::new(&ws.store).apply(&mut view, args.terms())?;
    ws.save_view(&view)?;
    print_parts(&ws, global, &view, &parts)
}

pub fn run_reset(global: &GlobalOpts) -> Result<()> {
    let ws = Workspace::open(global)?;
    let mut view = ws.load_view();
    let parts = QueryEngine::new(&ws.store).reset(&mut view)?;
    ws.save_view(&view)?;
    print_parts(&ws, global, &view, &parts)
}

pub fn run_sort(args: SortArgs, global: &GlobalOpts) -> Result<()> {
    let ws = Workspace::open(global)?;
    let mut view = ws.load_view();
    let parts = QueryEngine::new(&ws.store).sort(&mut view, args.key)?;
    ws.save_view(&view)?;
    print_parts(&ws, global, &view, &parts)
}

pub fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let mut ws = Workspace::open(global)?;
    let key = PartKey::new(args.part, args.rev);
    let part = ws.store.create(key, args.fields.overlay(PartFields::default()))?;

    if !global.quiet {
        println!(
            "{} Created part {}",
            style("✓").green(),
            style(part.key()).cyan()
        );
        println!("   Status: {}", style(part.status).yellow());
    }
    Ok(())
}

pub fn run_edit(args: EditArgs, global: &GlobalOpts) -> Result<()> {
    let mut ws = Workspace::open(global)?;
    let key = PartKey::new(args.part.trim(), args.rev.trim());
    let existing = ws
        .store
        .get(&key)?
        .ok_or_else(|| StoreError::NotFound { key: key.clone() })?;

    let part = ws.store.update(&key, args.fields.overlay(existing.fields()))?;

    if !global.quiet {
        println!(
            "{} Updated part {}",
            style("✓").green(),
            style(part.key()).cyan()
        );
    }
    Ok(())
}

pub fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let ws = Workspace::open(global)?;
    let key = PartKey::new(args.part.trim(), args.rev.trim());
    let part = ws
        .store
        .get(&key)?
        .ok_or(StoreError::NotFound { key })?;

    match ws.output_format(global) {
        OutputFormat::Auto => print!("{}", render_details(&part)),
        format => print!(
            "{}",
            render_parts(std::slice::from_ref(&part), format, &TableConfig::default().quiet(true))?
        ),
    }
    Ok(())
}

pub fn run_delete(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let mut ws = Workspace::open(global)?;
    let keys = args.all_keys();

    if !args.yes && console::user_attended() {
        let names: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Delete {}?", names.join(", ")))
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let removed = ws.store.delete(&keys)?;

    if !global.quiet {
        println!(
            "{} Deleted {} of {} part(s)",
            style("✓").green(),
            style(removed).cyan(),
            keys.len()
        );
    }
    Ok(())
}

fn print_parts(ws: &Workspace, global: &GlobalOpts, view: &ViewState, parts: &[Part]) -> Result<()> {
    let format = ws.output_format(global);
    let config = TableConfig::with_sort(view.sort).quiet(global.quiet);
    print!("{}", render_parts(parts, format, &config)?);

    if !global.quiet && format == OutputFormat::Auto && !view.filter.is_empty() {
        let active: Vec<String> = view
            .filter
            .active()
            .map(|(field, term)| format!("{} ~ {:?}", field.label(), term))
            .collect();
        println!("{} {}", style("Filter:").dim(), style(active.join(", ")).dim());
    }
    Ok(())
}
