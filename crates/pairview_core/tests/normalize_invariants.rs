use pairview_core::{
    from_raw, normalize, ComparisonState, Group, ImageEntry, RawSnapshot, Snapshot,
    UNTITLED_GROUP_NAME,
};
use std::collections::HashSet;

fn group(id: &str, name: &str, order: i64, created_at: i64) -> Group {
    Group::with_id(id, name, order, created_at)
}

fn image(id: &str, group_id: &str) -> ImageEntry {
    ImageEntry::with_id(id, group_id, format!("{id}.png"), format!("blob-{id}"), 0)
}

fn assert_invariants(snapshot: &Snapshot) {
    assert!(!snapshot.groups.is_empty(), "at least one group must exist");

    let group_ids: HashSet<&str> = snapshot.groups.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(group_ids.len(), snapshot.groups.len(), "group ids unique");
    for g in &snapshot.groups {
        assert!(!g.name.trim().is_empty(), "group names never blank");
    }

    let image_ids: HashSet<&str> = snapshot.images.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(image_ids.len(), snapshot.images.len(), "image ids unique");
    for i in &snapshot.images {
        assert!(group_ids.contains(i.group_id.as_str()), "no orphaned images");
    }

    assert_eq!(
        snapshot.comparisons.len(),
        snapshot.groups.len(),
        "exactly one comparison per group"
    );
    let comparison_groups: HashSet<&str> = snapshot
        .comparisons
        .iter()
        .map(|c| c.group_id.as_str())
        .collect();
    assert_eq!(comparison_groups, group_ids);
    for c in &snapshot.comparisons {
        for slot in [&c.image_a_id, &c.image_b_id] {
            if let Some(image_id) = slot {
                let entry = snapshot.image(image_id).expect("slot references an image");
                assert_eq!(entry.group_id, c.group_id, "slot stays within its group");
            }
        }
    }

    let active = snapshot.active_group_id.as_deref().expect("active group set");
    assert!(group_ids.contains(active), "active references a known group");
}

#[test]
fn empty_snapshot_synthesizes_default_group() {
    let normalized = normalize(Snapshot::default());

    assert_invariants(&normalized);
    assert_eq!(normalized.groups.len(), 1);
    assert_eq!(normalized.groups[0].name, UNTITLED_GROUP_NAME);
    assert!(normalized.images.is_empty());
    assert_eq!(normalized.comparisons.len(), 1);
    assert_eq!(normalized.comparisons[0].image_a_id, None);
    assert_eq!(normalized.comparisons[0].image_b_id, None);
    assert_eq!(
        normalized.active_group_id.as_deref(),
        Some(normalized.groups[0].id.as_str())
    );
}

#[test]
fn adversarial_snapshot_is_repaired_and_normalize_is_idempotent() {
    let snapshot = Snapshot {
        groups: vec![
            group("g1", "  First  ", 1, 10),
            group("g1", "duplicate id", 2, 20),
            group("g2", "   ", 0, 30),
        ],
        images: vec![
            image("i1", "g1"),
            image("i1", "g1"),
            image("i2", "ghost"),
            image("i3", "g2"),
        ],
        comparisons: vec![
            ComparisonState {
                group_id: "g1".to_string(),
                image_a_id: Some("i3".to_string()),
                image_b_id: Some("missing".to_string()),
            },
            ComparisonState {
                group_id: "g1".to_string(),
                image_a_id: None,
                image_b_id: None,
            },
            ComparisonState {
                group_id: "ghost".to_string(),
                image_a_id: Some("i1".to_string()),
                image_b_id: None,
            },
        ],
        active_group_id: Some("ghost".to_string()),
    };

    let once = normalize(snapshot);
    assert_invariants(&once);

    let twice = normalize(once.clone());
    assert_eq!(twice, once);

    // Duplicates keep their first occurrence.
    assert_eq!(once.group("g1").unwrap().name, "First");
    assert_eq!(once.images.iter().filter(|i| i.id == "i1").count(), 1);
    // Blank names become the placeholder.
    assert_eq!(once.group("g2").unwrap().name, UNTITLED_GROUP_NAME);
    // Cross-group and dangling slot references are nulled.
    let comparison = once.comparison("g1").unwrap();
    assert_eq!(comparison.image_a_id, None);
    assert_eq!(comparison.image_b_id, None);
    // The invalid active id falls back to the first group by display order:
    // g2 has the lowest order.
    assert_eq!(once.active_group_id.as_deref(), Some("g2"));
}

#[test]
fn orphaned_images_are_dropped() {
    let snapshot = Snapshot {
        groups: vec![group("g1", "one", 0, 0)],
        images: vec![image("i1", "g1"), image("i2", "gone")],
        comparisons: Vec::new(),
        active_group_id: Some("g1".to_string()),
    };

    let normalized = normalize(snapshot);
    assert_invariants(&normalized);
    assert_eq!(normalized.images.len(), 1);
    assert_eq!(normalized.images[0].id, "i1");
}

#[test]
fn missing_comparisons_are_created_and_strays_removed() {
    let snapshot = Snapshot {
        groups: vec![group("g1", "one", 0, 0), group("g2", "two", 1, 0)],
        images: Vec::new(),
        comparisons: vec![ComparisonState::empty("gone")],
        active_group_id: Some("g1".to_string()),
    };

    let normalized = normalize(snapshot);
    assert_invariants(&normalized);
    assert!(normalized.comparison("g1").is_some());
    assert!(normalized.comparison("g2").is_some());
    assert!(normalized
        .comparisons
        .iter()
        .all(|c| c.group_id != "gone"));
}

#[test]
fn display_order_ties_break_by_created_at() {
    let snapshot = Snapshot {
        groups: vec![
            group("late", "late", 3, 200),
            group("early", "early", 3, 100),
        ],
        images: Vec::new(),
        comparisons: Vec::new(),
        active_group_id: None,
    };

    let normalized = normalize(snapshot);
    assert_eq!(normalized.active_group_id.as_deref(), Some("early"));
}

#[test]
fn valid_state_passes_through_unchanged() {
    let snapshot = Snapshot {
        groups: vec![group("g1", "one", 0, 0)],
        images: vec![image("i1", "g1")],
        comparisons: vec![ComparisonState {
            group_id: "g1".to_string(),
            image_a_id: Some("i1".to_string()),
            image_b_id: None,
        }],
        active_group_id: Some("g1".to_string()),
    };

    let normalized = normalize(snapshot.clone());
    assert_eq!(normalized, snapshot);
}

#[test]
fn raw_snapshot_tolerates_missing_fields() {
    let raw: RawSnapshot = serde_json::from_value(serde_json::json!({
        "groups": [
            { "id": "g1" },
            { "name": "no id, dropped" }
        ],
        "images": [
            { "id": "i1", "groupId": "g1", "handleKey": "blob-1" },
            { "id": "i2", "groupId": "g1" },
            { "id": "i3" }
        ],
        "comparisons": [
            { "groupId": "g1", "imageAId": "i1" },
            { "imageAId": "i1" }
        ]
    }))
    .unwrap();

    let snapshot = from_raw(raw);
    assert_invariants(&snapshot);

    // The id-less group is dropped; the surviving one gets a placeholder
    // name and defaulted timestamps.
    assert_eq!(snapshot.groups.len(), 1);
    let g1 = snapshot.group("g1").unwrap();
    assert_eq!(g1.name, UNTITLED_GROUP_NAME);
    assert_eq!(g1.created_at, 0);
    assert_eq!(g1.order, 0);

    // Images without a group or handle key are dropped.
    assert_eq!(snapshot.images.len(), 1);
    assert_eq!(snapshot.images[0].id, "i1");

    let comparison = snapshot.comparison("g1").unwrap();
    assert_eq!(comparison.image_a_id.as_deref(), Some("i1"));
}

#[test]
fn completely_empty_document_yields_default_snapshot() {
    let raw: RawSnapshot = serde_json::from_value(serde_json::json!({})).unwrap();

    let snapshot = from_raw(raw);
    assert_invariants(&snapshot);
    assert_eq!(snapshot.groups.len(), 1);
}
