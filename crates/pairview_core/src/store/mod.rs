//! Persistence bridge contracts and implementations.
//!
//! # Responsibility
//! - Define the snapshot load/save and binary blob contracts the core
//!   depends on.
//! - Keep storage failures invisible to the state model: corrupt state
//!   loads as `None`, failed saves are logged and swallowed.
//!
//! # Invariants
//! - `load` never returns a value the normalizer cannot repair.
//! - The in-memory snapshot stays authoritative even when persistence
//!   silently fails.

use crate::model::snapshot::{RawSnapshot, Snapshot};
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemorySnapshotStore;
pub use sqlite::SqliteSnapshotStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error opening or querying the backing store.
///
/// Only surfaced by store construction and the blob API; snapshot load/save
/// absorb failures per the bridge contract.
#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    Serialization(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Serialization(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Snapshot persistence contract consumed by the session layer.
pub trait SnapshotStore {
    /// Loads the persisted snapshot.
    ///
    /// `None` means no prior state, or state the store considers corrupt.
    fn load(&self) -> Option<RawSnapshot>;

    /// Persists `snapshot`, best-effort. Failures are absorbed.
    fn save(&self, snapshot: &Snapshot);
}

/// Binary content storage keyed by opaque handle keys.
pub trait BlobStore {
    fn put_blob(&self, handle_key: &str, bytes: &[u8]) -> StoreResult<()>;
    fn get_blob(&self, handle_key: &str) -> StoreResult<Option<Vec<u8>>>;
}
