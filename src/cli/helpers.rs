//! Shared helper functions for CLI commands
//!
//! This module contains utility functions that are used across multiple
//! command modules to avoid code duplication.

/// Truncate a string to max_len characters, adding "..." if truncated
///
/// Useful for table columns that need fixed-width output.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Make a value safe for a single TSV cell
pub fn escape_tsv(s: &str) -> String {
    s.replace(|c: char| c == '\t' || c == '\n' || c == '\r', " ")
}

/// Escape a value for a Markdown table cell
pub fn escape_md(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}
