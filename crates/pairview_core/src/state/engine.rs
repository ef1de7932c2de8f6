//! State transition engine.
//!
//! # Responsibility
//! - Apply one user action to the current snapshot and return the next one.
//!
//! # Invariants
//! - Every mutating branch ends in [`normalize`] before returning.
//! - No-op branches return a clone of the input `Arc`, so consumers can use
//!   `Arc::ptr_eq` for change detection.
//! - Never errors, never panics: unknown ids and invalid requests degrade
//!   to no-ops.

use crate::clock;
use crate::model::comparison::{ComparisonState, Slot};
use crate::model::group::{Group, GroupId, UNTITLED_GROUP_NAME};
use crate::model::image::{ImageEntry, ImageId};
use crate::model::snapshot::{RawSnapshot, Snapshot};
use crate::state::normalize::{from_raw, normalize};
use std::collections::HashSet;
use std::sync::Arc;

/// One user-issued mutation of the comparison state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Creates a group at the end of the display order and makes it active.
    ///
    /// A missing or blank `name` becomes the fixed placeholder; a missing
    /// `now_ms` falls back to the wall clock.
    CreateGroup {
        name: Option<String>,
        now_ms: Option<i64>,
    },
    /// Renames a group; blank trimmed names and unknown ids are no-ops.
    RenameGroup { group_id: GroupId, name: String },
    /// Removes a group, cascading to its images and comparison.
    DeleteGroup { group_id: GroupId },
    /// Appends pre-built entries to a group, preserving input order.
    ///
    /// Entries targeting a different group or reusing an existing id are
    /// discarded.
    AddImages {
        group_id: GroupId,
        entries: Vec<ImageEntry>,
    },
    /// Removes one image entry and clears any comparison slot referencing
    /// it.
    RemoveImage { image_id: ImageId },
    /// Writes one comparison slot; cross-group or unknown images are
    /// rejected as no-ops.
    SetImageSlot {
        group_id: GroupId,
        slot: Slot,
        image_id: Option<ImageId>,
    },
    /// Switches the active group, resolving invalid ids to the first group
    /// by display order.
    SetActiveGroup { group_id: Option<GroupId> },
    /// Replaces the whole snapshot with a normalized rendition of `raw`.
    ///
    /// Used at startup hydration and to seed state in tests.
    Replace { raw: RawSnapshot },
}

/// Applies `action` to `current` and returns the resulting snapshot.
///
/// Always terminates and never fails partway: the result is either a
/// complete replacement value satisfying every invariant, or the original
/// reference when nothing changed.
pub fn transition(current: &Arc<Snapshot>, action: Action) -> Arc<Snapshot> {
    match action {
        Action::CreateGroup { name, now_ms } => create_group(current, name, now_ms),
        Action::RenameGroup { group_id, name } => rename_group(current, &group_id, &name),
        Action::DeleteGroup { group_id } => delete_group(current, &group_id),
        Action::AddImages { group_id, entries } => add_images(current, &group_id, entries),
        Action::RemoveImage { image_id } => remove_image(current, &image_id),
        Action::SetImageSlot {
            group_id,
            slot,
            image_id,
        } => set_image_slot(current, &group_id, slot, image_id),
        Action::SetActiveGroup { group_id } => set_active_group(current, group_id),
        Action::Replace { raw } => Arc::new(from_raw(raw)),
    }
}

fn create_group(
    current: &Arc<Snapshot>,
    name: Option<String>,
    now_ms: Option<i64>,
) -> Arc<Snapshot> {
    let name = name
        .as_deref()
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .unwrap_or(UNTITLED_GROUP_NAME)
        .to_string();
    let order = current
        .groups
        .iter()
        .map(|group| group.order)
        .max()
        .map_or(0, |max| max + 1);
    let group = Group::new(name, order, now_ms.unwrap_or_else(clock::now_ms));

    let mut next = (**current).clone();
    next.comparisons.push(ComparisonState::empty(group.id.clone()));
    next.active_group_id = Some(group.id.clone());
    next.groups.push(group);
    Arc::new(normalize(next))
}

fn rename_group(current: &Arc<Snapshot>, group_id: &str, name: &str) -> Arc<Snapshot> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Arc::clone(current);
    }
    match current.group(group_id) {
        None => Arc::clone(current),
        Some(group) if group.name == trimmed => Arc::clone(current),
        Some(_) => {
            let mut next = (**current).clone();
            for group in &mut next.groups {
                if group.id == group_id {
                    group.name = trimmed.to_string();
                }
            }
            Arc::new(normalize(next))
        }
    }
}

fn delete_group(current: &Arc<Snapshot>, group_id: &str) -> Arc<Snapshot> {
    if current.group(group_id).is_none() {
        return Arc::clone(current);
    }
    let mut next = (**current).clone();
    next.groups.retain(|group| group.id != group_id);
    // Orphaned images, the stale comparison, and a dangling active id are
    // all repaired by normalization.
    Arc::new(normalize(next))
}

fn add_images(
    current: &Arc<Snapshot>,
    group_id: &str,
    entries: Vec<ImageEntry>,
) -> Arc<Snapshot> {
    if entries.is_empty() || current.group(group_id).is_none() {
        return Arc::clone(current);
    }

    let mut known_ids: HashSet<ImageId> = current
        .images
        .iter()
        .map(|image| image.id.clone())
        .collect();
    let accepted: Vec<ImageEntry> = entries
        .into_iter()
        .filter(|entry| entry.group_id == group_id)
        .filter(|entry| known_ids.insert(entry.id.clone()))
        .collect();
    if accepted.is_empty() {
        return Arc::clone(current);
    }

    let mut next = (**current).clone();
    next.images.extend(accepted);
    Arc::new(normalize(next))
}

fn remove_image(current: &Arc<Snapshot>, image_id: &str) -> Arc<Snapshot> {
    if current.image(image_id).is_none() {
        return Arc::clone(current);
    }
    let mut next = (**current).clone();
    next.images.retain(|image| image.id != image_id);
    // Slots still pointing at the removed entry are nulled by
    // normalization.
    Arc::new(normalize(next))
}

fn set_image_slot(
    current: &Arc<Snapshot>,
    group_id: &str,
    slot: Slot,
    image_id: Option<ImageId>,
) -> Arc<Snapshot> {
    let Some(comparison) = current.comparison(group_id) else {
        return Arc::clone(current);
    };
    if let Some(candidate) = image_id.as_deref() {
        let belongs = current
            .image(candidate)
            .is_some_and(|image| image.group_id == group_id);
        if !belongs {
            return Arc::clone(current);
        }
    }
    if comparison.slot(slot).map(String::as_str) == image_id.as_deref() {
        return Arc::clone(current);
    }

    let mut next = (**current).clone();
    for comparison in &mut next.comparisons {
        if comparison.group_id == group_id {
            comparison.set_slot(slot, image_id.clone());
        }
    }
    Arc::new(normalize(next))
}

fn set_active_group(current: &Arc<Snapshot>, group_id: Option<GroupId>) -> Arc<Snapshot> {
    let resolved = match group_id {
        Some(id) if current.group(&id).is_some() => Some(id),
        _ => current
            .first_group_by_display_order()
            .map(|group| group.id.clone()),
    };
    if resolved == current.active_group_id {
        return Arc::clone(current);
    }
    let mut next = (**current).clone();
    next.active_group_id = resolved;
    Arc::new(normalize(next))
}
