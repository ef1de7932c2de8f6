//! File acquisition and binary resolution contracts.
//!
//! # Responsibility
//! - Define how external collaborators hand images to the state model and
//!   how rendering code gets bytes back.
//!
//! # Invariants
//! - Acquisition only produces well-formed entries: correct group id and a
//!   resolvable handle key. Entries that could not be fully prepared are
//!   omitted, never returned with a broken key.

use crate::model::image::ImageEntry;
use crate::store::BlobStore;

pub mod fs;

pub use fs::DirectoryImport;

/// Turns user file selections into image entries for one target group.
pub trait FileAcquisition {
    fn acquire(&self, group_id: &str) -> Vec<ImageEntry>;
}

/// Resolves a handle key to the underlying bytes, `None` on any failure.
///
/// Consumed by rendering code only; the state model never reads content.
pub trait BinaryResolver {
    fn resolve(&self, handle_key: &str) -> Option<Vec<u8>>;
}

impl<S: BlobStore> BinaryResolver for S {
    fn resolve(&self, handle_key: &str) -> Option<Vec<u8>> {
        self.get_blob(handle_key).ok().flatten()
    }
}
