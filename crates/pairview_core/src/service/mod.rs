//! Session layer owning the live snapshot.
//!
//! # Responsibility
//! - Thread every user action through the transition engine.
//! - Keep the persistence bridge fed with the latest snapshot.

pub mod session;
