//! Database schema initialization

use super::{PartStore, StoreError};

impl PartStore {
    /// Create the parts table if it does not exist yet
    pub(super) fn init_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS parts (
                part_number  TEXT NOT NULL,
                revision     TEXT NOT NULL,
                description  TEXT,
                where_used   TEXT,
                status       TEXT NOT NULL DEFAULT 'Active',
                folder_path  TEXT,
                file_names   TEXT,
                last_updated TEXT,
                PRIMARY KEY (part_number, revision)
            );
            "#,
        )?;
        Ok(())
    }
}
