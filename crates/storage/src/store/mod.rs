#![forbid(unsafe_code)]

mod config;
mod error;
mod generations;
mod records;
mod requests;
mod schema;
mod schema_registry;
mod tables;

pub use config::DataSpaceConfig;
pub use error::{StoreError, WriteFailure};
pub use requests::*;
pub use schema_registry::MAX_SCHEMA_BYTES;
pub use tables::{ColumnDescription, TableDescription};

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Where a [`DataSpace`] is in its life. Tables are created exactly once,
/// on the way from `Uninitialized` to `Ready`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Ready,
    Closed,
}

/// Generational record store split over three row-aligned tables
/// (`dataproduct`, `header`, `metadata`) plus a schema registry.
///
/// Opening a dataspace always starts from an empty file. Every write that
/// spans more than one table runs in a single transaction.
#[derive(Debug)]
pub struct DataSpace {
    path: PathBuf,
    conn: Option<Connection>,
    lifecycle: Lifecycle,
}

impl DataSpace {
    /// Destroys whatever is stored at `config.filename`, then creates a fresh
    /// dataspace there.
    pub fn open(config: &DataSpaceConfig) -> Result<Self, StoreError> {
        let config = config.clone().validated()?;
        let path = config.filename;

        remove_existing(&path)?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|err| StoreError::connection(&path, err))?;
        }

        let conn = Connection::open(&path).map_err(|err| StoreError::connection(&path, err))?;
        conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))
            .map_err(|err| StoreError::connection(&path, err))?;

        let mut store = Self {
            path,
            conn: Some(conn),
            lifecycle: Lifecycle::Uninitialized,
        };
        store.create().map_err(|err| match err {
            StoreError::Sql(err) => StoreError::connection(&store.path, err),
            other => other,
        })?;

        info!(path = %store.path.display(), "dataspace opened");
        Ok(store)
    }

    /// Creates the tables. Only valid once per dataspace; `open` already
    /// does this, so a second call reports `AlreadyInitialized`.
    pub fn create(&mut self) -> Result<(), StoreError> {
        match self.lifecycle {
            Lifecycle::Uninitialized => {}
            Lifecycle::Ready => return Err(StoreError::AlreadyInitialized),
            Lifecycle::Closed => return Err(StoreError::Closed),
        }
        let conn = self.conn.as_ref().ok_or(StoreError::Closed)?;
        schema::install_schema(conn)?;
        self.lifecycle = Lifecycle::Ready;
        Ok(())
    }

    /// Releases the connection. Closing twice is an error.
    pub fn close(&mut self) -> Result<(), StoreError> {
        if self.lifecycle == Lifecycle::Closed {
            return Err(StoreError::Closed);
        }
        let conn = self.conn.take().ok_or(StoreError::Closed)?;
        if let Err((conn, err)) = conn.close() {
            self.conn = Some(conn);
            return Err(StoreError::Sql(err));
        }
        self.lifecycle = Lifecycle::Closed;
        info!(path = %self.path.display(), "dataspace closed");
        Ok(())
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Column layout of the three row stores. The schema registry table is
    /// not keyed by record and is not listed.
    pub fn tables() -> &'static [TableDescription] {
        &tables::ROW_STORES
    }

    fn conn(&self) -> Result<&Connection, StoreError> {
        match self.lifecycle {
            Lifecycle::Ready => self.conn.as_ref().ok_or(StoreError::Closed),
            Lifecycle::Uninitialized => Err(StoreError::NotInitialized),
            Lifecycle::Closed => Err(StoreError::Closed),
        }
    }

    fn conn_mut(&mut self) -> Result<&mut Connection, StoreError> {
        match self.lifecycle {
            Lifecycle::Ready => self.conn.as_mut().ok_or(StoreError::Closed),
            Lifecycle::Uninitialized => Err(StoreError::NotInitialized),
            Lifecycle::Closed => Err(StoreError::Closed),
        }
    }
}

fn remove_existing(path: &Path) -> Result<(), StoreError> {
    if path.exists() {
        warn!(path = %path.display(), "destroying existing dataspace");
        std::fs::remove_file(path).map_err(|err| StoreError::connection(path, err))?;
    }
    for suffix in ["-journal", "-wal", "-shm"] {
        let mut sidecar = path.as_os_str().to_owned();
        sidecar.push(suffix);
        let sidecar = PathBuf::from(sidecar);
        if sidecar.exists() {
            std::fs::remove_file(&sidecar).map_err(|err| StoreError::connection(&sidecar, err))?;
        }
    }
    Ok(())
}
