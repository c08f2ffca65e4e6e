#![forbid(unsafe_code)]

use super::RecordKey;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Provenance facts for a record. `schema_id` points into the schema
/// registry; its blob is never interpreted here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub create_time: f64,
    pub expiration_time: f64,
    pub scheduled_create_time: f64,
    pub creator: String,
    pub schema_id: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub state: String,
    pub generation_time: f64,
    pub missed_update_count: i64,
}

impl Metadata {
    pub fn new(state: impl Into<String>, generation_time: f64) -> Self {
        Self {
            state: state.into(),
            generation_time,
            missed_update_count: 0,
        }
    }

    pub fn record_missed_update(&mut self) {
        self.missed_update_count = self.missed_update_count.saturating_add(1);
    }
}

/// Opaque value payload of a record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataProduct(Vec<u8>);

impl DataProduct {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn from_json<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_vec(value).map(Self)
    }

    pub fn decode_json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for DataProduct {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl From<&[u8]> for DataProduct {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub key: RecordKey,
    pub value: DataProduct,
    pub header: Header,
    pub metadata: Metadata,
}
