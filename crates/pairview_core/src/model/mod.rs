//! Domain model for the image-pair comparison state.
//!
//! # Responsibility
//! - Define the three flat collections (groups, images, comparisons) and the
//!   snapshot value that holds them together.
//! - Keep cross-references as plain id fields so cascade deletion stays a
//!   filter over flat collections, never a graph traversal.
//!
//! # Invariants
//! - Every entity carries a stable tag-prefixed string id.
//! - Wire field names are camelCase to match the persisted snapshot record.

pub mod comparison;
pub mod group;
pub mod image;
pub mod snapshot;
