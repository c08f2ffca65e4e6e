#![forbid(unsafe_code)]

use super::StoreError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Where the dataspace lives. The file at `filename` is destroyed and
/// recreated every time a [`super::DataSpace`] is opened on it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSpaceConfig {
    pub filename: PathBuf,
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

#[derive(Deserialize)]
struct ConfigFile {
    dataspace: DataSpaceConfig,
}

fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

impl DataSpaceConfig {
    pub fn new(filename: impl Into<PathBuf>) -> Self {
        Self {
            filename: filename.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    /// Parses `{"dataspace": {"filename": ..., "busy_timeout_ms": ...}}`.
    pub fn from_json_str(raw: &str) -> Result<Self, StoreError> {
        let file: ConfigFile =
            serde_json::from_str(raw).map_err(|err| StoreError::Config(err.to_string()))?;
        file.dataspace.validated()
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub(in crate::store) fn validated(self) -> Result<Self, StoreError> {
        if self.filename.as_os_str().is_empty() {
            return Err(StoreError::Config(
                "dataspace.filename must not be empty".to_string(),
            ));
        }
        Ok(self)
    }
}
