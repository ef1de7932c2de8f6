//! Identifier generation for domain entities.
//!
//! # Responsibility
//! - Produce collision-resistant string identifiers for new entities.
//!
//! # Invariants
//! - Generated ids are prefixed with the caller-supplied tag.
//! - Generation is synchronous and never fails.

use uuid::Uuid;

/// Returns a fresh tag-prefixed identifier, e.g. `group-550e8400-...`.
///
/// Unique with overwhelming probability across the process lifetime; no
/// network access or persistent counters involved.
pub fn tagged_id(tag: &str) -> String {
    format!("{tag}-{}", Uuid::new_v4())
}
