//! Comparison session: the single logical owner of the current snapshot.
//!
//! # Responsibility
//! - Hydrate persisted state through the normalizer on startup.
//! - Apply actions one at a time and persist each changed snapshot.
//!
//! # Invariants
//! - The held snapshot satisfies all referential integrity rules at every
//!   observable point.
//! - Saves are fire-and-forget: a failing store never affects the
//!   in-memory snapshot, which stays authoritative.

use crate::model::snapshot::Snapshot;
use crate::state::engine::{transition, Action};
use crate::state::normalize::{default_snapshot, from_raw};
use crate::store::SnapshotStore;
use log::{debug, info};
use std::sync::Arc;

/// Owns the live snapshot and the persistence bridge behind it.
pub struct ComparisonSession<S: SnapshotStore> {
    store: S,
    snapshot: Arc<Snapshot>,
}

impl<S: SnapshotStore> ComparisonSession<S> {
    /// Hydrates a session from the store.
    ///
    /// Missing or corrupt persisted state synthesizes the default snapshot.
    /// The repaired snapshot is written back immediately so the store
    /// converges on a normalized document.
    pub fn open(store: S) -> Self {
        let snapshot = match store.load() {
            Some(raw) => Arc::new(from_raw(raw)),
            None => Arc::new(default_snapshot()),
        };
        store.save(&snapshot);
        info!(
            "event=session_open module=service status=ok groups={} images={}",
            snapshot.groups.len(),
            snapshot.images.len()
        );
        Self { store, snapshot }
    }

    /// The current snapshot. Clones of the `Arc` stay valid after further
    /// dispatches; use `Arc::ptr_eq` against a retained clone for change
    /// detection.
    pub fn snapshot(&self) -> &Arc<Snapshot> {
        &self.snapshot
    }

    /// Applies one action. Returns whether the snapshot changed.
    ///
    /// Changed snapshots are saved fire-and-forget before returning.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let next = transition(&self.snapshot, action);
        if Arc::ptr_eq(&next, &self.snapshot) {
            debug!("event=dispatch module=service status=noop");
            return false;
        }
        self.snapshot = next;
        self.store.save(&self.snapshot);
        debug!(
            "event=dispatch module=service status=ok groups={} images={}",
            self.snapshot.groups.len(),
            self.snapshot.images.len()
        );
        true
    }

    /// The underlying store, e.g. for blob access alongside the session.
    pub fn store(&self) -> &S {
        &self.store
    }
}
