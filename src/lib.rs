//! Parts Catalog
//!
//! A command-line catalog of versioned part records (part number + revision)
//! kept in a local SQLite database, with filtered/sorted views and CSV
//! import/export.

pub mod cli;
pub mod core;
pub mod entities;
