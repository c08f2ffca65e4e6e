#![forbid(unsafe_code)]

use ds_core::{DataProduct, RecordKey};
use rusqlite::{Connection, OptionalExtension, Transaction, params};

pub(in crate::store) fn insert_dataproduct_tx(
    tx: &Transaction<'_>,
    key: &RecordKey,
    value: &DataProduct,
) -> Result<usize, rusqlite::Error> {
    tx.execute(
        "INSERT INTO dataproduct(owner_id, generation_id, key, value) VALUES (?1, ?2, ?3, ?4)",
        params![
            key.owner_id().as_str(),
            key.generation_id().get(),
            key.key(),
            value.as_bytes(),
        ],
    )
}

pub(in crate::store) fn update_latest_dataproduct_tx(
    tx: &Transaction<'_>,
    key: &RecordKey,
    value: &DataProduct,
) -> Result<usize, rusqlite::Error> {
    tx.execute(
        "UPDATE dataproduct SET value=?4 \
         WHERE seq = (SELECT MAX(seq) FROM dataproduct WHERE owner_id=?1 AND generation_id=?2 AND key=?3)",
        params![
            key.owner_id().as_str(),
            key.generation_id().get(),
            key.key(),
            value.as_bytes(),
        ],
    )
}

pub(in crate::store) fn latest_dataproduct(
    conn: &Connection,
    key: &RecordKey,
) -> Result<Option<DataProduct>, rusqlite::Error> {
    conn.query_row(
        "SELECT value FROM dataproduct \
         WHERE owner_id=?1 AND generation_id=?2 AND key=?3 \
         ORDER BY seq DESC LIMIT 1",
        params![key.owner_id().as_str(), key.generation_id().get(), key.key()],
        |row| row.get::<_, Vec<u8>>(0),
    )
    .optional()
    .map(|value| value.map(DataProduct::from))
}

/// Highest generation stored for the owner, if any row exists.
pub(in crate::store) fn max_generation(
    conn: &Connection,
    owner_id: &str,
) -> Result<Option<i64>, rusqlite::Error> {
    conn.query_row(
        "SELECT MAX(generation_id) FROM dataproduct WHERE owner_id=?1",
        params![owner_id],
        |row| row.get::<_, Option<i64>>(0),
    )
}

pub(in crate::store) fn generations(
    conn: &Connection,
    owner_id: &str,
) -> Result<Vec<i64>, rusqlite::Error> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT generation_id FROM dataproduct WHERE owner_id=?1 ORDER BY generation_id ASC",
    )?;
    let mut rows = stmt.query(params![owner_id])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        out.push(row.get::<_, i64>(0)?);
    }
    Ok(out)
}

/// Keys of one generation in first-insertion order, each listed once.
pub(in crate::store) fn generation_keys(
    conn: &Connection,
    owner_id: &str,
    generation: i64,
) -> Result<Vec<String>, rusqlite::Error> {
    let mut stmt = conn.prepare(
        "SELECT key FROM dataproduct \
         WHERE owner_id=?1 AND generation_id=?2 \
         GROUP BY key \
         ORDER BY MIN(seq) ASC",
    )?;
    let mut rows = stmt.query(params![owner_id, generation])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        out.push(row.get::<_, String>(0)?);
    }
    Ok(out)
}
