//! Referential-integrity state machine.
//!
//! # Responsibility
//! - Repair arbitrary snapshots into invariant-satisfying ones
//!   ([`normalize`]).
//! - Map `(snapshot, action)` to the next snapshot ([`transition`]).
//!
//! # Invariants
//! - Every value returned from this module satisfies the full referential
//!   integrity ruleset; callers never observe an intermediate state.
//! - Nothing here performs I/O or suspends.

pub mod engine;
pub mod normalize;

pub use engine::{transition, Action};
pub use normalize::{default_snapshot, from_raw, normalize};
