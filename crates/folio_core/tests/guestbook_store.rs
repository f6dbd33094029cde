use folio_core::{
    FixedClock, GuestbookStore, KeyValueStore, MemoryStore, MessageValidationError, STORAGE_KEY,
};

const NOW: i64 = 1_700_000_000_000;

#[test]
fn submit_prepends_trimmed_message() {
    let storage = MemoryStore::new();
    let clock = FixedClock::new(NOW);
    let mut store = GuestbookStore::with_clock(&storage, &clock);
    store.load();

    store.submit("Ada", "first").unwrap();
    clock.advance(1_000);
    let messages = store.submit("  Grace ", "  second  ").unwrap();

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].author, "Grace");
    assert_eq!(messages[0].body, "second");
    assert_eq!(messages[0].created_at, NOW + 1_000);
    assert_eq!(messages[1].author, "Ada");
}

#[test]
fn submit_grows_collection_by_exactly_one() {
    let storage = MemoryStore::new();
    let mut store = GuestbookStore::with_clock(&storage, FixedClock::new(NOW));

    for (i, (author, body)) in [("a", "x"), ("b", "y"), ("c", "z")].iter().enumerate() {
        let before = store.len();
        let messages = store.submit(author, body).unwrap();
        assert_eq!(messages.len(), before + 1, "submit #{i}");
        assert_eq!(messages[0].author, *author);
    }
}

#[test]
fn invalid_submit_leaves_collection_and_storage_untouched() {
    let storage = MemoryStore::new();
    let mut store = GuestbookStore::with_clock(&storage, FixedClock::new(NOW));
    store.submit("Ada", "hello").unwrap();
    let persisted = storage.peek(STORAGE_KEY);

    let cases = [("", "hello"), ("   ", "hello"), ("Ada", ""), ("Ada", " \n\t "), ("", "")];
    for (author, body) in cases {
        assert!(store.submit(author, body).is_err(), "{author:?}/{body:?}");
        assert_eq!(store.len(), 1);
    }
    assert_eq!(storage.peek(STORAGE_KEY), persisted);
}

#[test]
fn oversized_input_is_rejected() {
    let storage = MemoryStore::new();
    let mut store = GuestbookStore::with_clock(&storage, FixedClock::new(NOW));

    let err = store.submit(&"a".repeat(51), "hi").unwrap_err();
    assert!(matches!(err, MessageValidationError::AuthorTooLong { chars: 51, max: 50 }));
    let err = store.submit("Ada", &"b".repeat(501)).unwrap_err();
    assert!(matches!(err, MessageValidationError::BodyTooLong { chars: 501, max: 500 }));
    assert!(store.is_empty());
}

#[test]
fn persisted_collection_reloads_in_fresh_store() {
    let storage = MemoryStore::new();
    let clock = FixedClock::new(NOW);
    let mut first = GuestbookStore::with_clock(&storage, &clock);
    first.load();
    first.submit("Ada", "one").unwrap();
    clock.advance(60_000);
    first.submit("Grace", "two").unwrap();
    let expected = first.messages().to_vec();
    drop(first);

    let mut second = GuestbookStore::with_clock(&storage, &clock);
    assert_eq!(second.load(), expected.as_slice());
}

#[test]
fn clear_then_reload_is_empty_and_slot_removed() {
    let storage = MemoryStore::new();
    let mut store = GuestbookStore::with_clock(&storage, FixedClock::new(NOW));
    store.submit("Ada", "one").unwrap();
    store.submit("Grace", "two").unwrap();

    store.clear();
    assert!(store.is_empty());
    assert_eq!(storage.peek(STORAGE_KEY), None);

    let mut reloaded = GuestbookStore::with_clock(&storage, FixedClock::new(NOW));
    assert!(reloaded.load().is_empty());
}

#[test]
fn corrupt_payloads_reset_to_empty_and_are_removed() {
    for raw in ["not json at all", r#"{"id":"1","name":"a"}"#, "42", r#"[{"id":1}]"#] {
        let storage = MemoryStore::new();
        storage.set_item(STORAGE_KEY, raw).unwrap();

        let mut store = GuestbookStore::with_clock(&storage, FixedClock::new(NOW));
        assert!(store.load().is_empty(), "payload {raw:?}");
        assert_eq!(storage.peek(STORAGE_KEY), None, "payload {raw:?}");
        assert!(store.persistence_available());
    }
}

#[test]
fn corrupt_payload_that_cannot_be_removed_disables_persistence() {
    let storage = MemoryStore::new();
    storage.set_item(STORAGE_KEY, "not json at all").unwrap();
    storage.set_read_only(true);

    let mut store = GuestbookStore::with_clock(&storage, FixedClock::new(NOW));
    assert!(store.load().is_empty());
    assert!(!store.persistence_available());
    assert_eq!(storage.peek(STORAGE_KEY).as_deref(), Some("not json at all"));

    storage.set_read_only(false);
    store.submit("Ada", "kept in memory").unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(storage.peek(STORAGE_KEY).as_deref(), Some("not json at all"));
}

#[test]
fn load_accepts_payload_from_previous_site_version() {
    let storage = MemoryStore::new();
    storage
        .set_item(
            STORAGE_KEY,
            r#"[{"id":"1700000005000","name":"Grace","message":"newer","timestamp":1700000005000},
                {"id":"1700000000000","name":"Ada","message":"older","timestamp":1700000000000}]"#,
        )
        .unwrap();

    let clock = FixedClock::new(1_700_000_005_000);
    let mut store = GuestbookStore::with_clock(&storage, &clock);
    let loaded = store.load();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].author, "Grace");

    let messages = store.submit("Linus", "newest").unwrap();
    assert_eq!(messages[0].id, "1700000005001");
}

#[test]
fn read_failure_keeps_store_usable_in_memory() {
    let storage = MemoryStore::new();
    storage.set_disabled(true);

    let mut store = GuestbookStore::with_clock(&storage, FixedClock::new(NOW));
    assert!(store.load().is_empty());
    assert!(!store.persistence_available());

    store.submit("Ada", "still works").unwrap();
    store.submit("Grace", "offline").unwrap();
    assert_eq!(store.len(), 2);
    store.clear();
    assert!(store.is_empty());
}

#[test]
fn quota_exceeded_keeps_in_memory_state_authoritative() {
    let storage = MemoryStore::with_quota(160);
    let mut store = GuestbookStore::with_clock(&storage, FixedClock::new(NOW));

    store.submit("Ada", "short").unwrap();
    assert!(store.persistence_available());
    let persisted = storage.peek(STORAGE_KEY);
    assert!(persisted.is_some());

    store.submit("Grace", &"long ".repeat(40)).unwrap();
    assert!(!store.persistence_available());
    assert_eq!(store.len(), 2);
    assert_eq!(storage.peek(STORAGE_KEY), persisted);
}

#[test]
fn relative_time_uses_store_clock() {
    let storage = MemoryStore::new();
    let clock = FixedClock::new(NOW);
    let mut store = GuestbookStore::with_clock(&storage, &clock);
    store.submit("Ada", "hello").unwrap();
    let message = store.messages()[0].clone();

    let cases = [
        (30_000, "Just now"),
        (90_000, "1m ago"),
        (61 * 60_000, "1h ago"),
        (25 * 3_600_000, "1d ago"),
    ];
    for (elapsed, expected) in cases {
        clock.set(NOW + elapsed);
        assert_eq!(store.format_relative_time(&message), expected);
    }
}

#[test]
fn custom_slot_does_not_touch_default_key() {
    let storage = MemoryStore::new();
    let mut store = GuestbookStore::with_key(&storage, FixedClock::new(NOW), "other-comments");
    store.submit("Ada", "hello").unwrap();

    assert!(storage.peek("other-comments").is_some());
    assert_eq!(storage.peek(STORAGE_KEY), None);
}
