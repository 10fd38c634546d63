//! Filter builder - per-field search terms to a parameterized predicate
//!
//! Each non-blank term becomes a `column LIKE ? ESCAPE '\'` containment test;
//! the tests are joined with `AND`. The builder only produces SQL text plus its
//! positional arguments, it never runs a query.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entities::part::PartField;

const LIKE_ESCAPE: char = '\\';

/// Raw search terms keyed by field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterTerms {
    terms: BTreeMap<PartField, String>,
}

impl FilterTerms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the raw term for a field, replacing any previous one
    ///
    /// `last_updated` is not searchable and is ignored.
    pub fn set(&mut self, field: PartField, term: impl Into<String>) {
        if PartField::FILTERABLE.contains(&field) {
            self.terms.insert(field, term.into());
        }
    }

    /// Builder-style variant of [`FilterTerms::set`]
    pub fn with(mut self, field: PartField, term: impl Into<String>) -> Self {
        self.set(field, term);
        self
    }

    /// Raw term for a field, if one was supplied
    pub fn get(&self, field: PartField) -> Option<&str> {
        self.terms.get(&field).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.terms.clear();
    }

    /// Non-blank, trimmed terms in column order
    pub fn active(&self) -> impl Iterator<Item = (PartField, &str)> {
        self.terms
            .iter()
            .map(|(field, term)| (*field, term.trim()))
            .filter(|(_, term)| !term.is_empty())
    }

    /// True when no term would constrain the result
    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }

    /// Build the predicate for these terms
    pub fn build(&self) -> Predicate {
        let mut conditions = Vec::new();
        let mut params = Vec::new();

        for (field, term) in self.active() {
            conditions.push(format!("{} LIKE ? ESCAPE '{}'", field.column(), LIKE_ESCAPE));
            params.push(format!("%{}%", escape_like(term)));
        }

        if conditions.is_empty() {
            return Predicate::all();
        }

        Predicate {
            clause: format!("WHERE {}", conditions.join(" AND ")),
            params,
        }
    }
}

/// A SQL `WHERE` fragment plus its positional arguments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    clause: String,
    params: Vec<String>,
}

impl Predicate {
    /// Matches every record
    pub fn all() -> Self {
        Self::default()
    }

    pub fn clause(&self) -> &str {
        &self.clause
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }
}

/// Escape LIKE wildcards so the term matches literally
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}
