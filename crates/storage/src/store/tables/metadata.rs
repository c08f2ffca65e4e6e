#![forbid(unsafe_code)]

use ds_core::{Metadata, RecordKey};
use rusqlite::{Connection, OptionalExtension, Transaction, params};

pub(in crate::store) fn insert_metadata_tx(
    tx: &Transaction<'_>,
    key: &RecordKey,
    metadata: &Metadata,
) -> Result<usize, rusqlite::Error> {
    tx.execute(
        "INSERT INTO metadata(owner_id, generation_id, key, state, generation_time, missed_update_count) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            key.owner_id().as_str(),
            key.generation_id().get(),
            key.key(),
            metadata.state,
            metadata.generation_time,
            metadata.missed_update_count,
        ],
    )
}

pub(in crate::store) fn update_latest_metadata_tx(
    tx: &Transaction<'_>,
    key: &RecordKey,
    metadata: &Metadata,
) -> Result<usize, rusqlite::Error> {
    tx.execute(
        "UPDATE metadata \
         SET state=?4, generation_time=?5, missed_update_count=?6 \
         WHERE seq = (SELECT MAX(seq) FROM metadata WHERE owner_id=?1 AND generation_id=?2 AND key=?3)",
        params![
            key.owner_id().as_str(),
            key.generation_id().get(),
            key.key(),
            metadata.state,
            metadata.generation_time,
            metadata.missed_update_count,
        ],
    )
}

pub(in crate::store) fn latest_metadata(
    conn: &Connection,
    key: &RecordKey,
) -> Result<Option<Metadata>, rusqlite::Error> {
    conn.query_row(
        "SELECT state, generation_time, missed_update_count \
         FROM metadata \
         WHERE owner_id=?1 AND generation_id=?2 AND key=?3 \
         ORDER BY seq DESC LIMIT 1",
        params![key.owner_id().as_str(), key.generation_id().get(), key.key()],
        |row| {
            Ok(Metadata {
                state: row.get(0)?,
                generation_time: row.get(1)?,
                missed_update_count: row.get(2)?,
            })
        },
    )
    .optional()
}
