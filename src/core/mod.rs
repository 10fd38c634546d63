//! Core module - the record management engine

pub mod config;
pub mod export;
pub mod filter;
pub mod import;
pub mod project;
pub mod query;
pub mod sort;
pub mod store;

pub use config::Config;
pub use filter::{FilterTerms, Predicate};
pub use import::{ImportError, ImportStats, Reconciler};
pub use project::{Project, ProjectError};
pub use query::{QueryEngine, ViewCommand, ViewState};
pub use sort::{SortDirection, SortState};
pub use store::{PartStore, StoreError};
