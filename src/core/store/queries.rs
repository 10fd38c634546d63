//! Read-only queries against the parts table

use rusqlite::{params, params_from_iter, OptionalExtension, Row};

use super::{PartStore, StoreError};
use crate::core::filter::Predicate;
use crate::core::sort::SortState;
use crate::entities::part::{Part, PartKey};

const SELECT_COLUMNS: &str = "SELECT part_number, revision, description, where_used, status, \
                              folder_path, file_names, last_updated FROM parts";

impl PartStore {
    /// Records matching the predicate, in sort order
    pub fn query(&self, predicate: &Predicate, sort: &SortState) -> Result<Vec<Part>, StoreError> {
        let sql = format!(
            "{} {} {}",
            SELECT_COLUMNS,
            predicate.clause(),
            sort.order_by()
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(predicate.params()), part_from_row)?;

        let parts = rows.collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(count = parts.len(), order = %sort.order_by(), "queried parts");
        Ok(parts)
    }

    /// Fetch a single record by identity pair
    pub fn get(&self, key: &PartKey) -> Result<Option<Part>, StoreError> {
        let sql = format!("{} WHERE part_number = ?1 AND revision = ?2", SELECT_COLUMNS);
        let part = self
            .conn
            .query_row(&sql, params![key.part_number, key.revision], part_from_row)
            .optional()?;
        Ok(part)
    }

    /// Total number of records
    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM parts", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn part_from_row(row: &Row<'_>) -> rusqlite::Result<Part> {
    Ok(Part {
        part_number: row.get(0)?,
        revision: row.get(1)?,
        description: row.get(2)?,
        where_used: row.get(3)?,
        status: row.get(4)?,
        folder_path: row.get(5)?,
        file_names: row.get(6)?,
        last_updated: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
    })
}
