#![forbid(unsafe_code)]

//! SQLite-backed dataspace: versioned key/value records grouped by owner and
//! generation, with provenance headers and lifecycle metadata kept in
//! separate, row-aligned tables.

mod store;

pub use ds_core::ids::{GenerationId, OwnerId};
pub use ds_core::{DataProduct, Header, Metadata, Record, RecordKey};
pub use store::*;
