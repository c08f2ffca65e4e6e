#![forbid(unsafe_code)]

pub mod record;

pub use record::*;

pub mod ids {
    use serde::{Deserialize, Serialize};

    const MAX_OWNER_ID_LEN: usize = 128;

    #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
    #[serde(try_from = "String", into = "String")]
    pub struct OwnerId(String);

    impl OwnerId {
        pub fn as_str(&self) -> &str {
            &self.0
        }

        pub fn into_string(self) -> String {
            self.0
        }

        pub fn try_new(value: impl Into<String>) -> Result<Self, OwnerIdError> {
            let value = value.into();
            validate_owner_id(&value)?;
            Ok(Self(value))
        }
    }

    impl std::fmt::Display for OwnerId {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl TryFrom<String> for OwnerId {
        type Error = OwnerIdError;

        fn try_from(value: String) -> Result<Self, Self::Error> {
            Self::try_new(value)
        }
    }

    impl From<OwnerId> for String {
        fn from(value: OwnerId) -> Self {
            value.0
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum OwnerIdError {
        Empty,
        TooLong,
        ContainsControl,
    }

    impl OwnerIdError {
        pub fn message(&self) -> &'static str {
            match self {
                Self::Empty => "owner id must not be empty",
                Self::TooLong => "owner id is too long",
                Self::ContainsControl => "owner id contains control characters",
            }
        }
    }

    impl std::fmt::Display for OwnerIdError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.message())
        }
    }

    impl std::error::Error for OwnerIdError {}

    fn validate_owner_id(value: &str) -> Result<(), OwnerIdError> {
        if value.trim().is_empty() {
            return Err(OwnerIdError::Empty);
        }
        if value.len() > MAX_OWNER_ID_LEN {
            return Err(OwnerIdError::TooLong);
        }
        if value.chars().any(|c| c.is_control()) {
            return Err(OwnerIdError::ContainsControl);
        }
        Ok(())
    }

    /// Caller-assigned generation marker. Generation 0 doubles as "nothing
    /// stored yet" when asking for the latest generation of an owner.
    #[derive(
        Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    )]
    #[serde(try_from = "i64", into = "i64")]
    pub struct GenerationId(i64);

    impl GenerationId {
        pub const ZERO: Self = Self(0);

        pub fn try_new(value: i64) -> Result<Self, GenerationIdError> {
            if value < 0 {
                return Err(GenerationIdError::Negative);
            }
            Ok(Self(value))
        }

        pub fn get(self) -> i64 {
            self.0
        }

        pub fn next(self) -> Self {
            Self(self.0.saturating_add(1))
        }
    }

    impl std::fmt::Display for GenerationId {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    impl TryFrom<i64> for GenerationId {
        type Error = GenerationIdError;

        fn try_from(value: i64) -> Result<Self, Self::Error> {
            Self::try_new(value)
        }
    }

    impl From<GenerationId> for i64 {
        fn from(value: GenerationId) -> Self {
            value.0
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum GenerationIdError {
        Negative,
    }

    impl GenerationIdError {
        pub fn message(&self) -> &'static str {
            match self {
                Self::Negative => "generation id must not be negative",
            }
        }
    }

    impl std::fmt::Display for GenerationIdError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.message())
        }
    }

    impl std::error::Error for GenerationIdError {}
}
