//! Filesystem-backed image acquisition.
//!
//! Scans a directory for image files and eagerly copies their bytes into
//! the blob store, so entries stay resolvable after the source files move.

use crate::bridge::FileAcquisition;
use crate::clock;
use crate::ident;
use crate::model::image::ImageEntry;
use crate::store::BlobStore;
use log::{debug, warn};
use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: &[&str] = &["bmp", "gif", "jpeg", "jpg", "png", "webp"];

/// Imports every recognized image file in one directory.
pub struct DirectoryImport<'store, B: BlobStore> {
    dir: PathBuf,
    blobs: &'store B,
}

impl<'store, B: BlobStore> DirectoryImport<'store, B> {
    pub fn new(dir: impl Into<PathBuf>, blobs: &'store B) -> Self {
        Self {
            dir: dir.into(),
            blobs,
        }
    }

    fn prepare(&self, group_id: &str, path: &Path) -> Option<ImageEntry> {
        let file_name = path.file_name()?.to_str()?.to_string();
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(
                    "event=image_import module=bridge status=skipped file={file_name} error={err}"
                );
                return None;
            }
        };

        let handle_key = ident::tagged_id("blob");
        if let Err(err) = self.blobs.put_blob(&handle_key, &bytes) {
            warn!("event=image_import module=bridge status=skipped file={file_name} error={err}");
            return None;
        }

        Some(ImageEntry::new(
            group_id,
            file_name,
            handle_key,
            clock::now_ms(),
        ))
    }
}

impl<B: BlobStore> FileAcquisition for DirectoryImport<'_, B> {
    fn acquire(&self, group_id: &str) -> Vec<ImageEntry> {
        let read_dir = match std::fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            Err(err) => {
                warn!(
                    "event=image_import module=bridge status=error dir={} error={err}",
                    self.dir.display()
                );
                return Vec::new();
            }
        };

        let mut paths: Vec<PathBuf> = read_dir
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| has_image_extension(path))
            .collect();
        // Deterministic import order regardless of directory iteration
        // order.
        paths.sort();

        let entries: Vec<ImageEntry> = paths
            .iter()
            .filter_map(|path| self.prepare(group_id, path))
            .collect();
        debug!(
            "event=image_import module=bridge status=ok dir={} imported={}",
            self.dir.display(),
            entries.len()
        );
        entries
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}
