//! Store error taxonomy

use miette::Diagnostic;
use thiserror::Error;

use crate::entities::part::PartKey;

#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("Part {key} already exists")]
    #[diagnostic(
        code(parts::store::duplicate_identity),
        help("Part Number + Revision must be unique; use `parts edit` to change an existing part")
    )]
    DuplicateIdentity { key: PartKey },

    #[error("Part {key} not found")]
    #[diagnostic(code(parts::store::not_found))]
    NotFound { key: PartKey },

    #[error("Invalid part: {0}")]
    #[diagnostic(code(parts::store::validation))]
    Validation(String),

    #[error("Database error: {0}")]
    #[diagnostic(code(parts::store::database))]
    Database(#[from] rusqlite::Error),
}
