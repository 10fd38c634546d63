//! Project discovery and structure
//!
//! A project is any directory containing a `.parts/` directory. That
//! directory holds the catalog database, configuration and the persisted
//! view state.

use std::path::{Path, PathBuf};
use thiserror::Error;

const PROJECT_DIR: &str = ".parts";
const DEFAULT_DATABASE: &str = "parts.db";
const VIEW_FILE: &str = "view.json";

/// Represents a parts catalog project
#[derive(Debug)]
pub struct Project {
    /// Root directory of the project (parent of .parts/)
    root: PathBuf,
}

impl Project {
    /// Find project root by walking up from the current directory
    pub fn discover() -> Result<Self, ProjectError> {
        let current =
            std::env::current_dir().map_err(|e| ProjectError::IoError(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find project root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        loop {
            if current.join(PROJECT_DIR).is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(ProjectError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Use `--project` when given, otherwise discover from the current directory
    pub fn locate(explicit: Option<&Path>) -> Result<Self, ProjectError> {
        match explicit {
            Some(path) => Self::discover_from(path),
            None => Self::discover(),
        }
    }

    /// Create a new project at the given path
    pub fn init(path: &Path) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        if root.join(PROJECT_DIR).exists() {
            return Err(ProjectError::AlreadyExists(root));
        }

        Self::init_force(&root)
    }

    /// Initialize even if .parts/ exists; the database itself is kept
    pub fn init_force(path: &Path) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let project_dir = root.join(PROJECT_DIR);

        std::fs::create_dir_all(&project_dir).map_err(|e| ProjectError::IoError(e.to_string()))?;
        std::fs::write(project_dir.join("config.yaml"), Self::default_config())
            .map_err(|e| ProjectError::IoError(e.to_string()))?;
        std::fs::write(project_dir.join(".gitignore"), "view.json\n")
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        Ok(Self { root })
    }

    fn default_config() -> &'static str {
        r#"# Parts Catalog Configuration

# SQLite database file; relative paths resolve against the project root
# database: .parts/parts.db

# Default output format for `parts list` (auto, tsv, csv, json, md, id)
# default_format: auto
"#
    }

    /// Get the project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the .parts directory
    pub fn parts_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    /// Database path used when the config does not override it
    pub fn default_database_path(&self) -> PathBuf {
        self.parts_dir().join(DEFAULT_DATABASE)
    }

    /// Where the current filter/sort view is persisted
    pub fn view_path(&self) -> PathBuf {
        self.parts_dir().join(VIEW_FILE)
    }
}

/// Errors that can occur during project operations
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("not a parts catalog (searched from {searched_from:?}). Run 'parts init' to create one.")]
    NotFound { searched_from: PathBuf },

    #[error("parts catalog already exists at {0:?}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),
}
