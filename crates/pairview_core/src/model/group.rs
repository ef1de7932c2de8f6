//! Group domain model.
//!
//! # Responsibility
//! - Define the named image collection users compare within.
//!
//! # Invariants
//! - `id` is stable and never reused for another group.
//! - `name` is never empty after normalization.
//! - Display order is `(order, created_at)` ascending.

use crate::ident;
use serde::{Deserialize, Serialize};

/// Stable identifier for a group.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type GroupId = String;

/// Placeholder substituted for blank group names.
pub const UNTITLED_GROUP_NAME: &str = "untitled";

/// A named collection of images, independently ordered and comparable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Stable tag-prefixed id used by images and comparisons to reference
    /// this group.
    pub id: GroupId,
    /// Free-text display name; blank names are repaired during
    /// normalization.
    pub name: String,
    /// Unix epoch milliseconds; breaks display-order ties.
    pub created_at: i64,
    /// Display position within the group list.
    pub order: i64,
}

impl Group {
    /// Creates a group with a freshly generated id.
    pub fn new(name: impl Into<String>, order: i64, created_at: i64) -> Self {
        Self::with_id(ident::tagged_id("group"), name, order, created_at)
    }

    /// Creates a group with a caller-provided id.
    ///
    /// Used by hydration paths where identity already exists externally.
    pub fn with_id(
        id: impl Into<GroupId>,
        name: impl Into<String>,
        order: i64,
        created_at: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            created_at,
            order,
        }
    }
}
