//! Consistency normalizer.
//!
//! # Responsibility
//! - Turn any snapshot, however malformed, into one satisfying every
//!   referential integrity rule.
//! - Lower loosely-typed persisted records into typed snapshots.
//!
//! # Invariants
//! - Total and idempotent: `normalize(normalize(s)) == normalize(s)`.
//! - Never errors; invalid references are silently repaired, never
//!   reported.

use crate::clock;
use crate::model::comparison::ComparisonState;
use crate::model::group::{Group, UNTITLED_GROUP_NAME};
use crate::model::image::ImageEntry;
use crate::model::snapshot::{RawSnapshot, Snapshot};
use std::collections::HashSet;

/// Synthesizes the state used when no group survives: one placeholder-named
/// group with an empty comparison, active.
pub fn default_snapshot() -> Snapshot {
    let group = Group::new(UNTITLED_GROUP_NAME, 0, clock::now_ms());
    Snapshot {
        active_group_id: Some(group.id.clone()),
        comparisons: vec![ComparisonState::empty(group.id.clone())],
        images: Vec::new(),
        groups: vec![group],
    }
}

/// Repairs `snapshot` into one satisfying all referential integrity rules.
///
/// Rules applied, in order:
/// - at least one group exists, else the default snapshot is synthesized;
/// - group ids are unique (first occurrence wins) and names are trimmed,
///   with blanks replaced by the fixed placeholder;
/// - image entries referencing unknown groups or reusing an id are dropped;
/// - exactly one comparison exists per group: extras and strays are dropped,
///   missing ones are created empty;
/// - comparison slots referencing a missing or cross-group image are reset
///   to null;
/// - the active group falls back to the first group by display order when
///   it does not reference a known group.
pub fn normalize(snapshot: Snapshot) -> Snapshot {
    if snapshot.groups.is_empty() {
        return default_snapshot();
    }

    let mut seen_group_ids = HashSet::new();
    let mut groups: Vec<Group> = Vec::with_capacity(snapshot.groups.len());
    for mut group in snapshot.groups {
        if !seen_group_ids.insert(group.id.clone()) {
            continue;
        }
        let trimmed = group.name.trim();
        group.name = if trimmed.is_empty() {
            UNTITLED_GROUP_NAME.to_string()
        } else {
            trimmed.to_string()
        };
        groups.push(group);
    }

    let mut seen_image_ids = HashSet::new();
    let images: Vec<ImageEntry> = snapshot
        .images
        .into_iter()
        .filter(|image| seen_group_ids.contains(&image.group_id))
        .filter(|image| seen_image_ids.insert(image.id.clone()))
        .collect();

    let comparisons: Vec<ComparisonState> = groups
        .iter()
        .map(|group| {
            let mut comparison = snapshot
                .comparisons
                .iter()
                .find(|comparison| comparison.group_id == group.id)
                .cloned()
                .unwrap_or_else(|| ComparisonState::empty(group.id.clone()));
            comparison.image_a_id = valid_slot(&images, &group.id, comparison.image_a_id);
            comparison.image_b_id = valid_slot(&images, &group.id, comparison.image_b_id);
            comparison
        })
        .collect();

    let next = Snapshot {
        groups,
        images,
        comparisons,
        active_group_id: snapshot.active_group_id,
    };

    let active_group_id = match next.active_group_id.as_deref() {
        Some(id) if next.group(id).is_some() => next.active_group_id.clone(),
        _ => next
            .first_group_by_display_order()
            .map(|group| group.id.clone()),
    };

    Snapshot {
        active_group_id,
        ..next
    }
}

/// Lowers a persisted record into a typed, normalized snapshot.
///
/// Entries missing identity fields (or, for images, the storage key they
/// would be unresolvable without) are dropped; remaining optional fields
/// default.
pub fn from_raw(raw: RawSnapshot) -> Snapshot {
    let groups = raw
        .groups
        .into_iter()
        .filter_map(|group| {
            Some(Group::with_id(
                group.id?,
                group.name.unwrap_or_default(),
                group.order.unwrap_or(0),
                group.created_at.unwrap_or(0),
            ))
        })
        .collect();

    let images = raw
        .images
        .into_iter()
        .filter_map(|image| {
            Some(ImageEntry::with_id(
                image.id?,
                image.group_id?,
                image.file_name.unwrap_or_default(),
                image.handle_key?,
                image.added_at.unwrap_or(0),
            ))
        })
        .collect();

    let comparisons = raw
        .comparisons
        .into_iter()
        .filter_map(|comparison| {
            Some(ComparisonState {
                group_id: comparison.group_id?,
                image_a_id: comparison.image_a_id,
                image_b_id: comparison.image_b_id,
            })
        })
        .collect();

    normalize(Snapshot {
        groups,
        images,
        comparisons,
        active_group_id: raw.active_group_id,
    })
}

fn valid_slot(
    images: &[ImageEntry],
    group_id: &str,
    slot: Option<String>,
) -> Option<String> {
    let image_id = slot?;
    let belongs = images
        .iter()
        .any(|image| image.id == image_id && image.group_id == group_id);
    belongs.then_some(image_id)
}
