//! Snapshot root value and its loosely-typed persisted mirror.
//!
//! # Responsibility
//! - Hold the complete tool state at one instant: three flat collections
//!   plus the active group reference.
//! - Tolerate partially-invalid persisted data via [`RawSnapshot`], whose
//!   every field deserializes with a default.
//!
//! # Invariants
//! - `Snapshot` values produced by the normalizer satisfy all referential
//!   integrity rules; `RawSnapshot` promises nothing.
//! - The persisted record is exactly this shape, no versioning envelope.

use crate::model::comparison::ComparisonState;
use crate::model::group::{Group, GroupId};
use crate::model::image::{ImageEntry, ImageId};
use serde::{Deserialize, Serialize};

/// The complete state of the tool at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub groups: Vec<Group>,
    pub images: Vec<ImageEntry>,
    pub comparisons: Vec<ComparisonState>,
    pub active_group_id: Option<GroupId>,
}

impl Snapshot {
    /// Looks up a group by id.
    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|group| group.id == id)
    }

    /// Looks up an image entry by id.
    pub fn image(&self, id: &str) -> Option<&ImageEntry> {
        self.images.iter().find(|image| image.id == id)
    }

    /// Looks up the comparison belonging to a group.
    pub fn comparison(&self, group_id: &str) -> Option<&ComparisonState> {
        self.comparisons
            .iter()
            .find(|comparison| comparison.group_id == group_id)
    }

    /// Returns all groups sorted by `(order, created_at)` ascending.
    pub fn groups_by_display_order(&self) -> Vec<&Group> {
        let mut ordered: Vec<&Group> = self.groups.iter().collect();
        // Stable sort keeps collection order for full ties.
        ordered.sort_by_key(|group| (group.order, group.created_at));
        ordered
    }

    /// Returns the first group by display order, if any group exists.
    pub fn first_group_by_display_order(&self) -> Option<&Group> {
        self.groups_by_display_order().into_iter().next()
    }

    /// Iterates the image entries belonging to one group, in insertion
    /// order.
    pub fn images_in_group<'a>(
        &'a self,
        group_id: &'a str,
    ) -> impl Iterator<Item = &'a ImageEntry> + 'a {
        self.images
            .iter()
            .filter(move |image| image.group_id == group_id)
    }
}

/// Loosely-typed mirror of [`Snapshot`] used on the hydration path.
///
/// Every field carries a serde default so a snapshot with missing or null
/// fields still deserializes; entries missing required identity fields are
/// dropped when lowering into a typed [`Snapshot`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSnapshot {
    pub groups: Vec<RawGroup>,
    pub images: Vec<RawImageEntry>,
    pub comparisons: Vec<RawComparisonState>,
    pub active_group_id: Option<GroupId>,
}

/// Persisted group record with every field optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawGroup {
    pub id: Option<GroupId>,
    pub name: Option<String>,
    pub created_at: Option<i64>,
    pub order: Option<i64>,
}

/// Persisted image record with every field optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawImageEntry {
    pub id: Option<ImageId>,
    pub group_id: Option<GroupId>,
    pub file_name: Option<String>,
    pub handle_key: Option<String>,
    pub added_at: Option<i64>,
}

/// Persisted comparison record with every field optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawComparisonState {
    pub group_id: Option<GroupId>,
    pub image_a_id: Option<ImageId>,
    pub image_b_id: Option<ImageId>,
}

impl From<Snapshot> for RawSnapshot {
    fn from(snapshot: Snapshot) -> Self {
        Self {
            groups: snapshot
                .groups
                .into_iter()
                .map(|group| RawGroup {
                    id: Some(group.id),
                    name: Some(group.name),
                    created_at: Some(group.created_at),
                    order: Some(group.order),
                })
                .collect(),
            images: snapshot
                .images
                .into_iter()
                .map(|image| RawImageEntry {
                    id: Some(image.id),
                    group_id: Some(image.group_id),
                    file_name: Some(image.file_name),
                    handle_key: Some(image.handle_key),
                    added_at: Some(image.added_at),
                })
                .collect(),
            comparisons: snapshot
                .comparisons
                .into_iter()
                .map(|comparison| RawComparisonState {
                    group_id: Some(comparison.group_id),
                    image_a_id: comparison.image_a_id,
                    image_b_id: comparison.image_b_id,
                })
                .collect(),
            active_group_id: snapshot.active_group_id,
        }
    }
}
