//! `parts init` command - Initialize a new parts catalog

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::core::project::{Project, ProjectError};
use crate::core::{Config, PartStore};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: std::path::PathBuf,

    /// Force initialization even if .parts/ already exists
    #[arg(long)]
    pub force: bool,

    /// Seed the catalog with sample parts
    #[arg(long)]
    pub sample: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    let path = if args.path.as_os_str() == "." {
        std::env::current_dir().into_diagnostic()?
    } else {
        args.path.clone()
    };

    // Create directory if it doesn't exist
    if !path.exists() {
        std::fs::create_dir_all(&path).into_diagnostic()?;
        println!(
            "{} Created directory {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
    }

    let project = if args.force {
        Project::init_force(&path)
    } else {
        Project::init(&path)
    };

    let project = match project {
        Ok(project) => project,
        Err(ProjectError::AlreadyExists(root)) => {
            println!(
                "{} Parts catalog already exists at {}",
                style("!").yellow(),
                style(root.display()).cyan()
            );
            println!("  Use --force to reinitialize.");
            return Ok(());
        }
        Err(e) => return Err(miette::miette!("{}", e)),
    };

    let config = Config::load(&project);
    let db_path = config.database_path(&project);
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).into_diagnostic()?;
    }
    let mut store = PartStore::open(&db_path)?;

    println!(
        "{} Initialized parts catalog at {}",
        style("✓").green(),
        style(project.root().display()).cyan()
    );

    if args.sample {
        let seeded = store.seed_samples()?;
        println!("{} Added {} sample part(s)", style("✓").green(), seeded);
    }

    println!();
    println!("Next steps:");
    println!("  {}  Add a part", style("parts new PN001 A --description \"...\"").cyan());
    println!("  {}            Import a spreadsheet", style("parts import parts.csv").cyan());
    println!("  {}                       Show the catalog", style("parts list").cyan());

    Ok(())
}
