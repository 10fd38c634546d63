//! Query engine - runs the current view (filter + sort) against the store
//!
//! The view state is owned by the caller and passed in explicitly. Every call
//! re-queries the store from scratch; nothing is cached between calls.

use std::fs;
use std::path::Path;

use miette::{IntoDiagnostic, Result};
use serde::{Deserialize, Serialize};

use crate::core::filter::FilterTerms;
use crate::core::sort::SortState;
use crate::core::store::{PartStore, StoreError};
use crate::entities::part::{Part, PartField};

/// Current filter terms plus sort selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    pub filter: FilterTerms,
    pub sort: SortState,
}

impl ViewState {
    /// Load a persisted view, falling back to the default view
    pub fn load(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|contents| match serde_json::from_str(&contents) {
                Ok(view) => Some(view),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable view state");
                    None
                }
            })
            .unwrap_or_default()
    }

    /// Persist the view as JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).into_diagnostic()?;
        fs::write(path, json).into_diagnostic()?;
        Ok(())
    }
}

/// A user intent that changes or re-runs the view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    /// Re-run the current view
    Refresh,
    /// Replace the filter terms and run
    Apply(FilterTerms),
    /// Clear every term, restore the default sort and run
    Reset,
    /// Select a sort key (toggling direction on repeat) and run
    Sort(PartField),
}

/// Executes views against a part store
pub struct QueryEngine<'a> {
    store: &'a PartStore,
}

impl<'a> QueryEngine<'a> {
    pub fn new(store: &'a PartStore) -> Self {
        Self { store }
    }

    /// Run the view's predicate and sort as-is
    pub fn refresh(&self, view: &ViewState) -> Result<Vec<Part>, StoreError> {
        self.store.query(&view.filter.build(), &view.sort)
    }

    /// Capture new filter terms and run immediately
    pub fn apply(&self, view: &mut ViewState, terms: FilterTerms) -> Result<Vec<Part>, StoreError> {
        view.filter = terms;
        self.refresh(view)
    }

    /// Unfiltered, default-sorted result
    pub fn reset(&self, view: &mut ViewState) -> Result<Vec<Part>, StoreError> {
        *view = ViewState::default();
        self.refresh(view)
    }

    /// Select a sort key and run
    pub fn sort(&self, view: &mut ViewState, key: PartField) -> Result<Vec<Part>, StoreError> {
        view.sort.select(key);
        self.refresh(view)
    }

    /// Dispatch an intent against the view
    pub fn execute(&self, view: &mut ViewState, command: ViewCommand) -> Result<Vec<Part>, StoreError> {
        match command {
            ViewCommand::Refresh => self.refresh(view),
            ViewCommand::Apply(terms) => self.apply(view, terms),
            ViewCommand::Reset => self.reset(view),
            ViewCommand::Sort(key) => self.sort(view, key),
        }
    }
}
