#![forbid(unsafe_code)]

use super::StoreError;
use super::tables::ROW_STORES;
use rusqlite::Connection;

const SCHEMA_REGISTRY_SQL: &str = r#"
        CREATE TABLE schemas (
          schema_id INTEGER PRIMARY KEY AUTOINCREMENT,
          schema BLOB NOT NULL
        );
"#;

/// Plain `CREATE TABLE`: running this twice against one file fails.
pub(super) fn install_schema(conn: &Connection) -> Result<(), StoreError> {
    let mut sql = String::new();
    for table in &ROW_STORES {
        sql.push_str(&table.create_sql());
    }
    sql.push_str(SCHEMA_REGISTRY_SQL);

    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(&sql)?;
    tx.commit()?;
    Ok(())
}
