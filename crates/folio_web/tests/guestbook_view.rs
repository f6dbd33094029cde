use folio_core::{FixedClock, GuestbookStore, MemoryStore, STORAGE_KEY};
use folio_web::api::{to_json, GuestbookView};
use pretty_assertions::assert_eq;

const NOW: i64 = 1_700_000_000_000;

#[test]
fn snapshot_lists_newest_first_with_labels() {
    let storage = MemoryStore::new();
    let clock = FixedClock::new(NOW);
    let mut view = GuestbookView::open(GuestbookStore::with_clock(&storage, &clock));

    view.submit("ada", "first");
    clock.advance(2 * 3_600_000);
    view.submit("grace", "second");
    clock.advance(30_000);

    let snapshot = view.snapshot();
    let bodies: Vec<&str> = snapshot.items.iter().map(|item| item.body.as_str()).collect();
    assert_eq!(bodies, ["second", "first"]);
    assert_eq!(snapshot.items[0].relative_time, "Just now");
    assert_eq!(snapshot.items[1].relative_time, "2h ago");
    assert_eq!(snapshot.items[1].initial, "A");
}

#[test]
fn quota_failure_keeps_message_in_memory() {
    let storage = MemoryStore::with_quota(8);
    let mut view = GuestbookView::open(GuestbookStore::with_clock(&storage, FixedClock::new(NOW)));

    let response = view.submit("ada", "too large for the quota");
    assert!(response.ok);
    assert_eq!(response.count, 1);

    let snapshot = view.snapshot();
    assert_eq!(snapshot.count, 1);
    assert!(!snapshot.persistence_available);
    assert_eq!(storage.peek(STORAGE_KEY), None);
}

#[test]
fn disabled_storage_opens_empty() {
    let storage = MemoryStore::new();
    storage.set_disabled(true);
    let view = GuestbookView::open(GuestbookStore::with_clock(&storage, FixedClock::new(NOW)));

    let snapshot = view.snapshot();
    assert!(snapshot.items.is_empty());
    assert!(!snapshot.persistence_available);
}

#[test]
fn format_relative_time_uses_view_clock() {
    let storage = MemoryStore::new();
    let view = GuestbookView::open(GuestbookStore::with_clock(&storage, FixedClock::new(NOW)));

    assert_eq!(view.format_relative_time(NOW - 90_000), "1m ago");
    assert_eq!(view.format_relative_time(NOW - 3 * 86_400_000), "3d ago");
    assert_eq!(view.format_relative_time(NOW + 5_000), "Just now");
}

#[test]
fn snapshot_json_carries_display_fields() {
    let storage = MemoryStore::new();
    let mut view = GuestbookView::open(GuestbookStore::with_clock(&storage, FixedClock::new(NOW)));
    view.submit("ada", "hi");

    let json = to_json(&view.snapshot());
    assert!(json.contains(r#""relative_time":"Just now""#));
    assert!(json.contains(r#""persistence_available":true"#));
    assert!(json.contains(r#""count":1"#));
}
