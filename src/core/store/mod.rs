//! SQLite-backed part record store
//!
//! This module owns the single `parts` table and provides:
//! - Atomic upsert with insert/update classification
//! - Create that refuses an existing (part_number, revision) pair
//! - Update that replaces every non-identity field
//! - Idempotent delete of a set of identity pairs
//! - Filtered, sorted reads
//!
//! The identity pair is the table's primary key and is never rewritten
//! after creation.

mod error;
mod queries;
mod samples;
mod schema;

pub use error::StoreError;

use std::path::Path;

use chrono::Local;
use rusqlite::{params, Connection, OptionalExtension};

use crate::entities::part::{Part, PartFields, PartKey};

/// Minute-precision timestamp format stored in `last_updated`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Source of the current timestamp
pub type Clock = fn() -> String;

/// Current local time truncated to the minute
pub fn timestamp_now() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// The part record store backed by SQLite
pub struct PartStore {
    conn: Connection,
    clock: Clock,
}

impl PartStore {
    /// Open or create a store at the given database path
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        tracing::debug!(path = %path.display(), "opened part store");
        Self::from_connection(conn)
    }

    /// Open a throwaway in-memory store
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        let store = Self {
            conn,
            clock: timestamp_now,
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Replace the clock used for `last_updated` on create/update
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Current timestamp according to this store's clock
    pub fn now(&self) -> String {
        (self.clock)()
    }

    pub(crate) fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Insert a new record, or fully replace the one sharing its identity pair
    ///
    /// Returns `true` when the identity pair existed beforehand. The record's
    /// `last_updated` is stored as given.
    pub fn upsert(&mut self, part: &Part) -> Result<bool, StoreError> {
        let tx = self.conn.transaction()?;
        let existed = upsert_on(&tx, part)?;
        tx.commit()?;
        Ok(existed)
    }

    /// Insert a record that must not exist yet
    pub fn create(&mut self, key: PartKey, fields: PartFields) -> Result<Part, StoreError> {
        let key = validate_key(key)?;
        let part = Part::new(key, fields.normalized(), self.now());

        let tx = self.conn.transaction()?;
        if exists_on(&tx, &part.key())? {
            return Err(StoreError::DuplicateIdentity { key: part.key() });
        }
        tx.execute(
            r#"INSERT INTO parts
               (part_number, revision, description, where_used, status, folder_path, file_names, last_updated)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"#,
            params![
                part.part_number,
                part.revision,
                part.description,
                part.where_used,
                part.status,
                part.folder_path,
                part.file_names,
                part.last_updated,
            ],
        )?;
        tx.commit()?;

        tracing::debug!(key = %part.key(), "created part");
        Ok(part)
    }

    /// Replace every non-identity field of an existing record
    pub fn update(&mut self, key: &PartKey, fields: PartFields) -> Result<Part, StoreError> {
        let part = Part::new(key.clone(), fields.normalized(), self.now());

        let changed = self.conn.execute(
            r#"UPDATE parts SET
                   description = ?1, where_used = ?2, status = ?3,
                   folder_path = ?4, file_names = ?5, last_updated = ?6
               WHERE part_number = ?7 AND revision = ?8"#,
            params![
                part.description,
                part.where_used,
                part.status,
                part.folder_path,
                part.file_names,
                part.last_updated,
                key.part_number,
                key.revision,
            ],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound { key: key.clone() });
        }

        tracing::debug!(key = %key, "updated part");
        Ok(part)
    }

    /// Remove every record matching one of the keys
    ///
    /// Keys with no matching record are ignored. Returns the number of
    /// records actually removed.
    pub fn delete(&mut self, keys: &[PartKey]) -> Result<usize, StoreError> {
        let tx = self.conn.transaction()?;
        let mut removed = 0;
        {
            let mut stmt =
                tx.prepare("DELETE FROM parts WHERE part_number = ?1 AND revision = ?2")?;
            for key in keys {
                removed += stmt.execute(params![key.part_number, key.revision])?;
            }
        }
        tx.commit()?;

        tracing::debug!(requested = keys.len(), removed, "deleted parts");
        Ok(removed)
    }
}

/// Upsert on an open connection or transaction, reporting prior existence
pub(crate) fn upsert_on(conn: &Connection, part: &Part) -> Result<bool, StoreError> {
    let existed = exists_on(conn, &part.key())?;
    conn.execute(
        r#"INSERT INTO parts
           (part_number, revision, description, where_used, status, folder_path, file_names, last_updated)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
           ON CONFLICT(part_number, revision) DO UPDATE SET
               description = excluded.description,
               where_used = excluded.where_used,
               status = excluded.status,
               folder_path = excluded.folder_path,
               file_names = excluded.file_names,
               last_updated = excluded.last_updated"#,
        params![
            part.part_number,
            part.revision,
            part.description,
            part.where_used,
            part.status,
            part.folder_path,
            part.file_names,
            part.last_updated,
        ],
    )?;
    Ok(existed)
}

fn exists_on(conn: &Connection, key: &PartKey) -> Result<bool, StoreError> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM parts WHERE part_number = ?1 AND revision = ?2",
            params![key.part_number, key.revision],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Trim the identity pair and reject blanks before touching storage
fn validate_key(key: PartKey) -> Result<PartKey, StoreError> {
    let part_number = key.part_number.trim();
    let revision = key.revision.trim();
    if part_number.is_empty() || revision.is_empty() {
        return Err(StoreError::Validation(
            "Part Number and Revision are required".to_string(),
        ));
    }
    Ok(PartKey::new(part_number, revision))
}
