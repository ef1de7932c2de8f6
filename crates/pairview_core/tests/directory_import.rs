use pairview_core::{
    Action, BinaryResolver, ComparisonSession, DirectoryImport, FileAcquisition,
    MemorySnapshotStore, SqliteSnapshotStore,
};
use std::fs;

fn write_file(dir: &std::path::Path, name: &str, bytes: &[u8]) {
    fs::write(dir.join(name), bytes).unwrap();
}

#[test]
fn import_prepares_only_recognized_image_files() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "b.jpg", b"jpg-bytes");
    write_file(dir.path(), "a.png", b"png-bytes");
    write_file(dir.path(), "notes.txt", b"not an image");
    write_file(dir.path(), "c.WEBP", b"webp-bytes");

    let blobs = MemorySnapshotStore::new();
    let entries = DirectoryImport::new(dir.path(), &blobs).acquire("g1");

    let names: Vec<&str> = entries.iter().map(|e| e.file_name.as_str()).collect();
    assert_eq!(names, vec!["a.png", "b.jpg", "c.WEBP"]);

    for entry in &entries {
        assert_eq!(entry.group_id, "g1");
        assert!(entry.id.starts_with("image-"));
        assert!(entry.handle_key.starts_with("blob-"));
        // Every returned entry is already resolvable.
        assert!(blobs.resolve(&entry.handle_key).is_some());
    }
    assert_eq!(blobs.resolve(&entries[0].handle_key).as_deref(), Some(&b"png-bytes"[..]));
}

#[test]
fn missing_directory_produces_no_entries() {
    let blobs = MemorySnapshotStore::new();
    let entries =
        DirectoryImport::new("/definitely/not/here", &blobs).acquire("g1");
    assert!(entries.is_empty());
}

#[test]
fn imported_entries_flow_through_the_session() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "left.png", b"left");
    write_file(dir.path(), "right.png", b"right");

    let store = SqliteSnapshotStore::open_in_memory().unwrap();
    let mut session = ComparisonSession::open(store);
    let group_id = session.snapshot().active_group_id.clone().unwrap();

    let entries = DirectoryImport::new(dir.path(), session.store()).acquire(&group_id);
    assert_eq!(entries.len(), 2);
    let first = entries[0].id.clone();

    let changed = session.dispatch(Action::AddImages {
        group_id: group_id.clone(),
        entries,
    });
    assert!(changed);

    let snapshot = session.snapshot();
    assert_eq!(snapshot.images_in_group(&group_id).count(), 2);
    let image = snapshot.image(&first).unwrap();
    assert_eq!(
        session.store().resolve(&image.handle_key).as_deref(),
        Some(&b"left"[..])
    );
}
