#![forbid(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Sql(rusqlite::Error),
    Connection {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    AlreadyInitialized,
    NotInitialized,
    Closed,
    NotFound,
    Write {
        op: &'static str,
        source: WriteFailure,
    },
    InvalidInput(&'static str),
    Config(String),
}

impl StoreError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "IO",
            Self::Sql(_) => "SQL",
            Self::Connection { .. } => "CONNECTION",
            Self::AlreadyInitialized => "ALREADY_INITIALIZED",
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::Closed => "CLOSED",
            Self::NotFound => "NOT_FOUND",
            Self::Write { .. } => "WRITE",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Config(_) => "CONFIG",
        }
    }

    pub(in crate::store) fn write(op: &'static str, err: rusqlite::Error) -> Self {
        Self::Write {
            op,
            source: WriteFailure::Sql(err),
        }
    }

    pub(in crate::store) fn connection(
        path: impl Into<PathBuf>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Connection {
            path: path.into(),
            source: Box::new(err),
        }
    }
}

/// Why a write transaction was rolled back.
#[derive(Debug)]
pub enum WriteFailure {
    Sql(rusqlite::Error),
    /// The three stores disagreed on how many rows a statement touched.
    Misaligned {
        dataproduct: usize,
        header: usize,
        metadata: usize,
    },
}

impl std::fmt::Display for WriteFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sql(err) => write!(f, "sqlite: {err}"),
            Self::Misaligned {
                dataproduct,
                header,
                metadata,
            } => write!(
                f,
                "stores out of alignment (dataproduct={dataproduct}, header={header}, metadata={metadata})"
            ),
        }
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io: {err}"),
            Self::Sql(err) => write!(f, "sqlite: {err}"),
            Self::Connection { path, source } => {
                write!(f, "cannot open dataspace at {}: {source}", path.display())
            }
            Self::AlreadyInitialized => write!(f, "dataspace tables already created"),
            Self::NotInitialized => write!(f, "dataspace tables not created"),
            Self::Closed => write!(f, "dataspace is closed"),
            Self::NotFound => write!(f, "record not found"),
            Self::Write { op, source } => write!(f, "{op} failed and was rolled back: {source}"),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::Config(message) => write!(f, "config: {message}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sql(value)
    }
}
