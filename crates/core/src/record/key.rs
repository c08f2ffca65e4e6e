#![forbid(unsafe_code)]

use crate::ids::{GenerationId, GenerationIdError, OwnerId, OwnerIdError};
use serde::{Deserialize, Serialize};

const MAX_KEY_LEN: usize = 256;

/// Composite address of one logical slot, shared by the header, metadata and
/// dataproduct stores. Ordered by owner, then generation, then key.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RecordKeyParts")]
pub struct RecordKey {
    owner_id: OwnerId,
    generation_id: GenerationId,
    key: String,
}

impl RecordKey {
    pub fn new(
        owner_id: impl Into<String>,
        generation_id: i64,
        key: impl Into<String>,
    ) -> Result<Self, RecordKeyError> {
        let owner_id = OwnerId::try_new(owner_id).map_err(RecordKeyError::Owner)?;
        let generation_id =
            GenerationId::try_new(generation_id).map_err(RecordKeyError::Generation)?;
        Self::from_parts(owner_id, generation_id, key)
    }

    pub fn from_parts(
        owner_id: OwnerId,
        generation_id: GenerationId,
        key: impl Into<String>,
    ) -> Result<Self, RecordKeyError> {
        let key = key.into();
        validate_key(&key)?;
        Ok(Self {
            owner_id,
            generation_id,
            key,
        })
    }

    pub fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    pub fn generation_id(&self) -> GenerationId {
        self.generation_id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Same owner and key, addressed in another generation.
    pub fn with_generation(&self, generation_id: GenerationId) -> Self {
        Self {
            owner_id: self.owner_id.clone(),
            generation_id,
            key: self.key.clone(),
        }
    }
}

#[derive(Deserialize)]
struct RecordKeyParts {
    owner_id: String,
    generation_id: i64,
    key: String,
}

impl TryFrom<RecordKeyParts> for RecordKey {
    type Error = RecordKeyError;

    fn try_from(parts: RecordKeyParts) -> Result<Self, Self::Error> {
        Self::new(parts.owner_id, parts.generation_id, parts.key)
    }
}

impl std::fmt::Display for RecordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.owner_id, self.generation_id, self.key)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordKeyError {
    Owner(OwnerIdError),
    Generation(GenerationIdError),
    EmptyKey,
    KeyTooLong,
    KeyContainsControl,
}

impl RecordKeyError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Owner(err) => err.message(),
            Self::Generation(err) => err.message(),
            Self::EmptyKey => "record key must not be empty",
            Self::KeyTooLong => "record key is too long",
            Self::KeyContainsControl => "record key contains control characters",
        }
    }
}

impl std::fmt::Display for RecordKeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for RecordKeyError {}

fn validate_key(value: &str) -> Result<(), RecordKeyError> {
    if value.trim().is_empty() {
        return Err(RecordKeyError::EmptyKey);
    }
    if value.len() > MAX_KEY_LEN {
        return Err(RecordKeyError::KeyTooLong);
    }
    if value.chars().any(|c| c.is_control()) {
        return Err(RecordKeyError::KeyContainsControl);
    }
    Ok(())
}
