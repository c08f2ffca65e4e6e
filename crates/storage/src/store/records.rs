#![forbid(unsafe_code)]

use super::error::WriteFailure;
use super::tables::*;
use super::{DataSpace, StoreError};
use ds_core::{DataProduct, Header, Metadata, Record, RecordKey};
use rusqlite::Transaction;
use tracing::{debug, warn};

impl DataSpace {
    /// Appends one row per store for `key`. Earlier rows with the same key are
    /// kept; reads return the newest.
    pub fn insert(
        &mut self,
        key: &RecordKey,
        value: &DataProduct,
        header: &Header,
        metadata: &Metadata,
    ) -> Result<(), StoreError> {
        validate_payload(header, metadata)?;

        let tx = self
            .conn_mut()?
            .transaction()
            .map_err(|err| StoreError::write("insert", err))?;
        insert_record_tx(&tx, key, value, header, metadata)
            .map_err(|err| rolled_back("insert", key, err))?;
        tx.commit()
            .map_err(|err| rolled_back("insert", key, err))?;

        debug!(record = %key, bytes = value.len(), "record inserted");
        Ok(())
    }

    /// Rewrites the newest row for `key` in each store. Fails with `NotFound`
    /// when the key was never inserted.
    pub fn update(
        &mut self,
        key: &RecordKey,
        value: &DataProduct,
        header: &Header,
        metadata: &Metadata,
    ) -> Result<(), StoreError> {
        validate_payload(header, metadata)?;

        let tx = self
            .conn_mut()?
            .transaction()
            .map_err(|err| StoreError::write("update", err))?;
        let touched = update_record_tx(&tx, key, value, header, metadata)
            .map_err(|err| rolled_back("update", key, err))?;

        match touched {
            (1, 1, 1) => {}
            (0, 0, 0) => return Err(StoreError::NotFound),
            (dataproduct, header, metadata) => {
                warn!(record = %key, "update touched misaligned stores; rolled back");
                return Err(StoreError::Write {
                    op: "update",
                    source: WriteFailure::Misaligned {
                        dataproduct,
                        header,
                        metadata,
                    },
                });
            }
        }

        tx.commit()
            .map_err(|err| rolled_back("update", key, err))?;

        debug!(record = %key, bytes = value.len(), "record updated");
        Ok(())
    }

    pub fn get_dataproduct(&self, key: &RecordKey) -> Result<DataProduct, StoreError> {
        latest_dataproduct(self.conn()?, key)?.ok_or(StoreError::NotFound)
    }

    pub fn get_header(&self, key: &RecordKey) -> Result<Header, StoreError> {
        latest_header(self.conn()?, key)?.ok_or(StoreError::NotFound)
    }

    pub fn get_metadata(&self, key: &RecordKey) -> Result<Metadata, StoreError> {
        latest_metadata(self.conn()?, key)?.ok_or(StoreError::NotFound)
    }

    /// Newest value, header and metadata for `key`, read from one snapshot.
    pub fn get_record(&self, key: &RecordKey) -> Result<Record, StoreError> {
        let conn = self.conn()?;
        let tx = conn.unchecked_transaction()?;
        let value = latest_dataproduct(&tx, key)?.ok_or(StoreError::NotFound)?;
        let header = latest_header(&tx, key)?.ok_or(StoreError::NotFound)?;
        let metadata = latest_metadata(&tx, key)?.ok_or(StoreError::NotFound)?;
        tx.finish()?;

        Ok(Record {
            key: key.clone(),
            value,
            header,
            metadata,
        })
    }
}

fn insert_record_tx(
    tx: &Transaction<'_>,
    key: &RecordKey,
    value: &DataProduct,
    header: &Header,
    metadata: &Metadata,
) -> Result<(), rusqlite::Error> {
    insert_dataproduct_tx(tx, key, value)?;
    insert_header_tx(tx, key, header)?;
    insert_metadata_tx(tx, key, metadata)?;
    Ok(())
}

fn update_record_tx(
    tx: &Transaction<'_>,
    key: &RecordKey,
    value: &DataProduct,
    header: &Header,
    metadata: &Metadata,
) -> Result<(usize, usize, usize), rusqlite::Error> {
    Ok((
        update_latest_dataproduct_tx(tx, key, value)?,
        update_latest_header_tx(tx, key, header)?,
        update_latest_metadata_tx(tx, key, metadata)?,
    ))
}

fn rolled_back(op: &'static str, key: &RecordKey, err: rusqlite::Error) -> StoreError {
    warn!(record = %key, op, error = %err, "write rolled back");
    StoreError::write(op, err)
}

// SQLite stores NaN as NULL, which would make the row unreadable.
fn validate_payload(header: &Header, metadata: &Metadata) -> Result<(), StoreError> {
    let times = [
        header.create_time,
        header.expiration_time,
        header.scheduled_create_time,
        metadata.generation_time,
    ];
    if times.iter().any(|t| !t.is_finite()) {
        return Err(StoreError::InvalidInput("timestamps must be finite"));
    }
    if metadata.missed_update_count < 0 {
        return Err(StoreError::InvalidInput(
            "missed_update_count must not be negative",
        ));
    }
    Ok(())
}
