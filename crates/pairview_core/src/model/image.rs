//! Image entry domain model.
//!
//! # Responsibility
//! - Define one imported image's metadata and storage-key reference.
//!
//! # Invariants
//! - `group_id` must reference an existing group in any normalized snapshot.
//! - `handle_key` is opaque to the core; only the binary store interprets it.

use crate::ident;
use crate::model::group::GroupId;
use serde::{Deserialize, Serialize};

/// Stable identifier for an image entry.
pub type ImageId = String;

/// One imported image's metadata within a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageEntry {
    pub id: ImageId,
    /// Owning group; orphaned entries are dropped during normalization.
    pub group_id: GroupId,
    /// Display string, typically the original file name.
    pub file_name: String,
    /// Opaque lookup key into the binary content store.
    pub handle_key: String,
    /// Unix epoch milliseconds at import time.
    pub added_at: i64,
}

impl ImageEntry {
    /// Creates an entry with a freshly generated id.
    pub fn new(
        group_id: impl Into<GroupId>,
        file_name: impl Into<String>,
        handle_key: impl Into<String>,
        added_at: i64,
    ) -> Self {
        Self::with_id(
            ident::tagged_id("image"),
            group_id,
            file_name,
            handle_key,
            added_at,
        )
    }

    /// Creates an entry with a caller-provided id.
    pub fn with_id(
        id: impl Into<ImageId>,
        group_id: impl Into<GroupId>,
        file_name: impl Into<String>,
        handle_key: impl Into<String>,
        added_at: i64,
    ) -> Self {
        Self {
            id: id.into(),
            group_id: group_id.into(),
            file_name: file_name.into(),
            handle_key: handle_key.into(),
            added_at,
        }
    }
}
