#![forbid(unsafe_code)]

mod dataproduct;
mod header;
mod metadata;

pub(in crate::store) use dataproduct::*;
pub(in crate::store) use header::*;
pub(in crate::store) use metadata::*;

use rusqlite::{Transaction, params};

/// A column as created in SQLite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnDescription {
    pub name: &'static str,
    pub sql_type: &'static str,
}

/// Column layout of one store. Every row store starts with the record key
/// columns and an insertion sequence; `fields` lists what follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableDescription {
    pub name: &'static str,
    pub fields: &'static [ColumnDescription],
}

const fn column(name: &'static str, sql_type: &'static str) -> ColumnDescription {
    ColumnDescription { name, sql_type }
}

pub(in crate::store) const KEY_COLUMNS: &[ColumnDescription] = &[
    column("owner_id", "TEXT"),
    column("generation_id", "INTEGER"),
    column("key", "TEXT"),
];

pub(in crate::store) const DATAPRODUCT: TableDescription = TableDescription {
    name: "dataproduct",
    fields: &[column("value", "BLOB")],
};

pub(in crate::store) const HEADER: TableDescription = TableDescription {
    name: "header",
    fields: &[
        column("create_time", "REAL"),
        column("expiration_time", "REAL"),
        column("scheduled_create_time", "REAL"),
        column("creator", "TEXT"),
        column("schema_id", "INTEGER"),
    ],
};

pub(in crate::store) const METADATA: TableDescription = TableDescription {
    name: "metadata",
    fields: &[
        column("state", "TEXT"),
        column("generation_time", "REAL"),
        column("missed_update_count", "INTEGER"),
    ],
};

/// Row stores in the order every multi-store write touches them.
pub(in crate::store) const ROW_STORES: [TableDescription; 3] = [DATAPRODUCT, HEADER, METADATA];

impl TableDescription {
    fn field_list(&self) -> String {
        self.fields
            .iter()
            .map(|c| c.name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Full column list as stored, key columns first.
    pub fn columns(&self) -> Vec<ColumnDescription> {
        KEY_COLUMNS.iter().chain(self.fields).copied().collect()
    }

    pub(in crate::store) fn create_sql(&self) -> String {
        let mut columns = vec!["seq INTEGER PRIMARY KEY AUTOINCREMENT".to_string()];
        for c in self.columns() {
            columns.push(format!("{} {} NOT NULL", c.name, c.sql_type));
        }
        format!(
            "CREATE TABLE {name} (\n  {cols}\n);\n\
             CREATE INDEX idx_{name}_record ON {name}(owner_id, generation_id, key, seq);\n",
            name = self.name,
            cols = columns.join(",\n  "),
        )
    }
}

/// Appends a copy of every row of `from_generation` into `to_generation`,
/// keeping the original insertion order.
pub(in crate::store) fn copy_generation_tx(
    tx: &Transaction<'_>,
    table: &TableDescription,
    owner_id: &str,
    from_generation: i64,
    to_generation: i64,
) -> Result<usize, rusqlite::Error> {
    let fields = table.field_list();
    let sql = format!(
        "INSERT INTO {name} (owner_id, generation_id, key, {fields}) \
         SELECT owner_id, ?3, key, {fields} FROM {name} \
         WHERE owner_id=?1 AND generation_id=?2 \
         ORDER BY seq ASC",
        name = table.name,
    );
    tx.execute(&sql, params![owner_id, from_generation, to_generation])
}

pub(in crate::store) fn delete_generation_tx(
    tx: &Transaction<'_>,
    table: &TableDescription,
    owner_id: &str,
    generation: i64,
) -> Result<usize, rusqlite::Error> {
    let sql = format!(
        "DELETE FROM {} WHERE owner_id=?1 AND generation_id=?2",
        table.name
    );
    tx.execute(&sql, params![owner_id, generation])
}

pub(in crate::store) fn delete_owner_tx(
    tx: &Transaction<'_>,
    table: &TableDescription,
    owner_id: &str,
) -> Result<usize, rusqlite::Error> {
    let sql = format!("DELETE FROM {} WHERE owner_id=?1", table.name);
    tx.execute(&sql, params![owner_id])
}
