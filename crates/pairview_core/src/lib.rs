//! Core state model for PairView, a local-only image-pair comparison tool.
//! This crate is the single source of truth for referential integrity:
//! groups, image entries, and per-group A/B selections stay mutually
//! consistent under arbitrary create/rename/delete/select operations,
//! including recovery from corrupted persisted snapshots.

pub mod bridge;
mod clock;
pub mod ident;
pub mod logging;
pub mod model;
pub mod service;
pub mod state;
pub mod store;

pub use bridge::{BinaryResolver, DirectoryImport, FileAcquisition};
pub use logging::{default_log_level, init_logging};
pub use model::comparison::{ComparisonState, Slot};
pub use model::group::{Group, GroupId, UNTITLED_GROUP_NAME};
pub use model::image::{ImageEntry, ImageId};
pub use model::snapshot::{
    RawComparisonState, RawGroup, RawImageEntry, RawSnapshot, Snapshot,
};
pub use service::session::ComparisonSession;
pub use state::{default_snapshot, from_raw, normalize, transition, Action};
pub use store::{
    BlobStore, MemorySnapshotStore, SnapshotStore, SqliteSnapshotStore, StoreError, StoreResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
