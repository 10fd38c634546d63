//! Import reconciler - bulk upsert of external rows with classification
//!
//! Rows arrive as plain string cells in the export column order. Each row is
//! normalized and upserted inside its own savepoint, so a failing row is
//! counted and rolled back without disturbing the rest of the batch. The batch
//! as a whole runs in one transaction: a failure of the row source itself rolls
//! everything back.

use std::fmt::Display;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use miette::Diagnostic;
use rusqlite::Transaction;
use serde::Serialize;
use thiserror::Error;

use crate::core::store::{upsert_on, PartStore, StoreError};
use crate::entities::part::{Part, PartFields, PartKey, PartStatus};

/// Number of columns in the import/export layout
pub const COLUMN_COUNT: usize = 8;

const UTF8_BOM: char = '\u{feff}';

/// One raw row of cells
pub type RawRow = Vec<String>;

/// Aggregate outcome of an import batch
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub inserted: usize,
    pub updated: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl ImportStats {
    /// Rows that changed the store
    pub fn applied(&self) -> usize {
        self.inserted + self.updated
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum ImportError {
    #[error("Import failed, no records were changed: {reason}")]
    #[diagnostic(
        code(parts::import::batch_failure),
        help("the whole batch was rolled back; fix the source file and import again")
    )]
    BatchFailure { reason: String },
}

impl ImportError {
    fn batch(reason: impl Display) -> Self {
        ImportError::BatchFailure {
            reason: reason.to_string(),
        }
    }
}

enum RowOutcome {
    Inserted,
    Updated,
    Skipped,
}

/// Applies a stream of raw rows to a part store
pub struct Reconciler<'a> {
    store: &'a mut PartStore,
    dry_run: bool,
}

impl<'a> Reconciler<'a> {
    pub fn new(store: &'a mut PartStore) -> Self {
        Self {
            store,
            dry_run: false,
        }
    }

    /// Reconcile everything but roll back instead of committing
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Reconcile every row of the source
    ///
    /// A source error aborts and rolls back the batch; per-row storage errors
    /// are only counted.
    pub fn reconcile<I, E>(self, rows: I) -> Result<ImportStats, ImportError>
    where
        I: IntoIterator<Item = Result<RawRow, E>>,
        E: Display,
    {
        let now = self.store.now();
        let mut tx = self
            .store
            .connection_mut()
            .transaction()
            .map_err(ImportError::batch)?;

        let mut stats = ImportStats::default();
        let mut header_checked = false;

        for (index, row) in rows.into_iter().enumerate() {
            let line = index + 1;
            let row = row.map_err(|e| ImportError::batch(format!("row {}: {}", line, e)))?;

            if row.len() < 2 {
                stats.skipped += 1;
                continue;
            }

            if !header_checked {
                header_checked = true;
                if is_header(&row) {
                    tracing::debug!("skipping header row");
                    continue;
                }
            }

            match apply_row(&mut tx, row, &now) {
                Ok(RowOutcome::Inserted) => stats.inserted += 1,
                Ok(RowOutcome::Updated) => stats.updated += 1,
                Ok(RowOutcome::Skipped) => stats.skipped += 1,
                Err(e) => {
                    tracing::warn!(row = line, error = %e, "import row failed");
                    stats.errors += 1;
                }
            }
        }

        if self.dry_run {
            tx.rollback().map_err(ImportError::batch)?;
        } else {
            tx.commit().map_err(ImportError::batch)?;
        }

        tracing::info!(
            inserted = stats.inserted,
            updated = stats.updated,
            skipped = stats.skipped,
            errors = stats.errors,
            dry_run = self.dry_run,
            "import finished"
        );
        Ok(stats)
    }

    /// Reconcile a CSV file
    pub fn reconcile_file(self, path: &Path) -> Result<ImportStats, ImportError> {
        let file = File::open(path)
            .map_err(|e| ImportError::batch(format!("{}: {}", path.display(), e)))?;
        self.reconcile(read_rows(BufReader::new(file)))
    }
}

/// Header detection: "part" in the first cell and "revision" in the second
fn is_header(row: &[String]) -> bool {
    row[0].to_lowercase().contains("part") && row[1].to_lowercase().contains("revision")
}

/// Upsert one row inside a savepoint
fn apply_row(tx: &mut Transaction<'_>, row: RawRow, now: &str) -> Result<RowOutcome, StoreError> {
    let Some(part) = normalize_row(row, now) else {
        return Ok(RowOutcome::Skipped);
    };

    let sp = tx.savepoint()?;
    let existed = upsert_on(&sp, &part)?;
    sp.commit()?;

    Ok(if existed {
        RowOutcome::Updated
    } else {
        RowOutcome::Inserted
    })
}

/// Pad, trim and normalize a row; `None` when the identity pair is missing
pub fn normalize_row(mut row: RawRow, now: &str) -> Option<Part> {
    row.resize(COLUMN_COUNT.max(row.len()), String::new());
    let cells: Vec<&str> = row.iter().take(COLUMN_COUNT).map(|c| c.trim()).collect();

    let (part_number, revision) = (cells[0], cells[1]);
    if part_number.is_empty() || revision.is_empty() {
        return None;
    }

    let optional = |s: &str| (!s.is_empty()).then(|| s.to_string());
    let fields = PartFields {
        description: optional(cells[2]),
        where_used: optional(cells[3]),
        status: PartStatus::coerce(cells[4]),
        folder_path: optional(cells[5]),
        file_names: optional(cells[6]),
    };
    let last_updated = if cells[7].is_empty() { now } else { cells[7] };

    Some(Part::new(
        PartKey::new(part_number, revision),
        fields,
        last_updated,
    ))
}

/// Read raw CSV rows without header handling
///
/// Rows may have any number of cells. A UTF-8 byte-order mark in front of the
/// first cell is dropped. Every blank line yields an empty row so the
/// reconciler can count it; a final line terminator does not.
pub fn read_rows<R: Read>(mut reader: R) -> impl Iterator<Item = Result<RawRow, csv::Error>> {
    let mut text = String::new();
    let records: Vec<Result<&str, csv::Error>> = match reader.read_to_string(&mut text) {
        Ok(_) => {
            let text = text.strip_prefix(UTF8_BOM).unwrap_or(&text);
            split_records(text).into_iter().map(Ok).collect()
        }
        Err(e) => vec![Err(csv::Error::from(e))],
    };

    records
        .into_iter()
        .map(|record| record.and_then(parse_record))
        .collect::<Vec<_>>()
        .into_iter()
}

#[derive(Clone, Copy)]
enum Scan {
    FieldStart,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

/// Split text into physical records, keeping line breaks inside quoted cells
///
/// A quote only opens a quoted cell at the start of a field; elsewhere it is
/// literal text.
fn split_records(text: &str) -> Vec<&str> {
    let mut records = Vec::new();
    let mut state = Scan::FieldStart;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        state = match (state, c) {
            (Scan::Quoted, '"') => Scan::QuoteInQuoted,
            (Scan::Quoted, _) => Scan::Quoted,
            (Scan::QuoteInQuoted, '"') | (Scan::FieldStart, '"') => Scan::Quoted,
            (_, '\n') => {
                records.push(&text[start..i]);
                start = i + 1;
                Scan::FieldStart
            }
            (_, ',') => Scan::FieldStart,
            _ => Scan::Unquoted,
        };
    }
    if start < text.len() {
        records.push(&text[start..]);
    }
    records
}

/// Parse one physical record into cells; a blank line is an empty row
fn parse_record(record: &str) -> Result<RawRow, csv::Error> {
    let record = record.strip_suffix('\r').unwrap_or(record);
    if record.is_empty() {
        return Ok(RawRow::new());
    }

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(record.as_bytes());
    let mut cells = csv::StringRecord::new();
    rdr.read_record(&mut cells)?;
    Ok(cells.iter().map(String::from).collect())
}
