#![forbid(unsafe_code)]

use ds_core::{Header, RecordKey};
use rusqlite::{Connection, OptionalExtension, Transaction, params};

pub(in crate::store) fn insert_header_tx(
    tx: &Transaction<'_>,
    key: &RecordKey,
    header: &Header,
) -> Result<usize, rusqlite::Error> {
    tx.execute(
        "INSERT INTO header(owner_id, generation_id, key, create_time, expiration_time, scheduled_create_time, creator, schema_id) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            key.owner_id().as_str(),
            key.generation_id().get(),
            key.key(),
            header.create_time,
            header.expiration_time,
            header.scheduled_create_time,
            header.creator,
            header.schema_id,
        ],
    )
}

pub(in crate::store) fn update_latest_header_tx(
    tx: &Transaction<'_>,
    key: &RecordKey,
    header: &Header,
) -> Result<usize, rusqlite::Error> {
    tx.execute(
        "UPDATE header \
         SET create_time=?4, expiration_time=?5, scheduled_create_time=?6, creator=?7, schema_id=?8 \
         WHERE seq = (SELECT MAX(seq) FROM header WHERE owner_id=?1 AND generation_id=?2 AND key=?3)",
        params![
            key.owner_id().as_str(),
            key.generation_id().get(),
            key.key(),
            header.create_time,
            header.expiration_time,
            header.scheduled_create_time,
            header.creator,
            header.schema_id,
        ],
    )
}

pub(in crate::store) fn latest_header(
    conn: &Connection,
    key: &RecordKey,
) -> Result<Option<Header>, rusqlite::Error> {
    conn.query_row(
        "SELECT create_time, expiration_time, scheduled_create_time, creator, schema_id \
         FROM header \
         WHERE owner_id=?1 AND generation_id=?2 AND key=?3 \
         ORDER BY seq DESC LIMIT 1",
        params![key.owner_id().as_str(), key.generation_id().get(), key.key()],
        |row| {
            Ok(Header {
                create_time: row.get(0)?,
                expiration_time: row.get(1)?,
                scheduled_create_time: row.get(2)?,
                creator: row.get(3)?,
                schema_id: row.get(4)?,
            })
        },
    )
    .optional()
}
