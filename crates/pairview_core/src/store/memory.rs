//! In-memory store for tests and throwaway embedding.

use crate::model::snapshot::{RawSnapshot, Snapshot};
use crate::store::{BlobStore, SnapshotStore, StoreResult};
use std::cell::RefCell;
use std::collections::HashMap;

/// Keeps the snapshot document and blobs in process memory.
///
/// Serializes through the same JSON document shape as the SQLite store so
/// tests exercise the real persistence round trip.
#[derive(Default)]
pub struct MemorySnapshotStore {
    document: RefCell<Option<String>>,
    blobs: RefCell<HashMap<String, Vec<u8>>>,
    save_count: RefCell<usize>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with an arbitrary document, parseable or
    /// not.
    pub fn with_document(document: impl Into<String>) -> Self {
        let store = Self::new();
        *store.document.borrow_mut() = Some(document.into());
        store
    }

    /// Returns the currently persisted document, if any.
    pub fn document(&self) -> Option<String> {
        self.document.borrow().clone()
    }

    /// Number of completed `save` calls, for fire-and-forget assertions.
    pub fn save_count(&self) -> usize {
        *self.save_count.borrow()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Option<RawSnapshot> {
        let document = self.document.borrow();
        serde_json::from_str(document.as_deref()?).ok()
    }

    fn save(&self, snapshot: &Snapshot) {
        if let Ok(document) = serde_json::to_string(snapshot) {
            *self.document.borrow_mut() = Some(document);
            *self.save_count.borrow_mut() += 1;
        }
    }
}

impl BlobStore for MemorySnapshotStore {
    fn put_blob(&self, handle_key: &str, bytes: &[u8]) -> StoreResult<()> {
        self.blobs
            .borrow_mut()
            .insert(handle_key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn get_blob(&self, handle_key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.blobs.borrow().get(handle_key).cloned())
    }
}
