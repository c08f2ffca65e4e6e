#![forbid(unsafe_code)]

use super::{DataSpace, StoreError};
use rusqlite::{OptionalExtension, params};
use tracing::debug;

/// Largest schema blob the registry accepts.
pub const MAX_SCHEMA_BYTES: usize = 1024 * 1024;

impl DataSpace {
    /// Stores an opaque schema blob and returns its assigned id. Header rows
    /// refer to schemas by this id.
    pub fn register_schema(&mut self, schema: &[u8]) -> Result<i64, StoreError> {
        if schema.len() > MAX_SCHEMA_BYTES {
            return Err(StoreError::InvalidInput("schema blob is too large"));
        }

        let conn = self.conn_mut()?;
        conn.execute("INSERT INTO schemas(schema) VALUES (?1)", params![schema])
            .map_err(|err| StoreError::write("register_schema", err))?;
        let schema_id = conn.last_insert_rowid();

        debug!(schema_id, bytes = schema.len(), "schema registered");
        Ok(schema_id)
    }

    pub fn lookup_schema(&self, schema_id: i64) -> Result<Vec<u8>, StoreError> {
        self.conn()?
            .query_row(
                "SELECT schema FROM schemas WHERE schema_id=?1",
                params![schema_id],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?
            .ok_or(StoreError::NotFound)
    }
}
