//! Per-group A/B comparison selection.
//!
//! # Responsibility
//! - Record which two images a group currently designates as A and B.
//!
//! # Invariants
//! - Exactly one comparison exists per group in any normalized snapshot.
//! - A non-null slot references an image that exists and belongs to the
//!   same group.

use crate::model::group::GroupId;
use crate::model::image::ImageId;
use serde::{Deserialize, Serialize};

/// The two overlay positions a comparison can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    A,
    B,
}

/// The per-group selection of which two images are designated A and B.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonState {
    pub group_id: GroupId,
    pub image_a_id: Option<ImageId>,
    pub image_b_id: Option<ImageId>,
}

impl ComparisonState {
    /// Creates a comparison with both slots unset.
    pub fn empty(group_id: impl Into<GroupId>) -> Self {
        Self {
            group_id: group_id.into(),
            image_a_id: None,
            image_b_id: None,
        }
    }

    /// Returns the image currently occupying `slot`.
    pub fn slot(&self, slot: Slot) -> Option<&ImageId> {
        match slot {
            Slot::A => self.image_a_id.as_ref(),
            Slot::B => self.image_b_id.as_ref(),
        }
    }

    /// Overwrites `slot` with `image_id`.
    pub fn set_slot(&mut self, slot: Slot, image_id: Option<ImageId>) {
        match slot {
            Slot::A => self.image_a_id = image_id,
            Slot::B => self.image_b_id = image_id,
        }
    }
}
