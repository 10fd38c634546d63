//! Entity types stored in the catalog

pub mod part;
