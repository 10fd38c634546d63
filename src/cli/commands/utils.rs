//! Shared utilities for CLI commands

use miette::{IntoDiagnostic, Result};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, PartStore, Project, ViewState};

/// Everything a command needs to reach the catalog
pub struct Workspace {
    pub project: Project,
    pub config: Config,
    pub store: PartStore,
}

impl Workspace {
    /// Locate the project, load config and open the store
    pub fn open(global: &GlobalOpts) -> Result<Self> {
        let project =
            Project::locate(global.project.as_deref()).map_err(|e| miette::miette!("{}", e))?;
        let config = Config::load(&project);

        let db_path = config.database_path(&project);
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).into_diagnostic()?;
        }
        let store = PartStore::open(&db_path)?;

        Ok(Self {
            project,
            config,
            store,
        })
    }

    /// The persisted view, or the default view when none was saved
    pub fn load_view(&self) -> ViewState {
        ViewState::load(&self.project.view_path())
    }

    pub fn save_view(&self, view: &ViewState) -> Result<()> {
        view.save(&self.project.view_path())
    }

    /// Output format: `--format` flag, then config, then auto
    pub fn output_format(&self, global: &GlobalOpts) -> OutputFormat {
        use clap::ValueEnum;

        global
            .format
            .or_else(|| {
                self.config
                    .default_format
                    .as_deref()
                    .and_then(|f| OutputFormat::from_str(f, true).ok())
            })
            .unwrap_or_default()
    }
}
