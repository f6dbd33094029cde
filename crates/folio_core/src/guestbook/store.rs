//! Guestbook store: newest-first messages mirrored to key-value storage.
//!
//! # Responsibility
//! - Load, submit and clear visitor messages.
//! - Mirror the full collection into one storage slot after every change.
//!
//! # Invariants
//! - `messages()` is ordered newest-first.
//! - Message ids are strictly increasing in collection order (newest has
//!   the largest id). A newest stored id of `i64::MAX` cannot be bumped;
//!   the clock value is used instead.
//! - Persistence is unconditional: an empty collection is written as `[]`,
//!   `clear()` removes the slot.
//! - Storage failures are logged and absorbed; after the first failure the
//!   store stops writing for the rest of the session.

use crate::guestbook::clock::{Clock, SystemClock};
use crate::guestbook::payload::{decode_messages, encode_messages};
use crate::guestbook::time;
use crate::model::message::{normalize_input, Message, MessageValidationError};
use crate::storage::{KeyValueStore, StorageError};
use log::{debug, info, warn};

/// Storage slot used by the portfolio site.
pub const STORAGE_KEY: &str = "portfolio-comments";

/// Guestbook state plus its persisted mirror.
pub struct GuestbookStore<S: KeyValueStore, C: Clock = SystemClock> {
    storage: S,
    clock: C,
    key: String,
    messages: Vec<Message>,
    persistence_available: bool,
}

impl<S: KeyValueStore> GuestbookStore<S, SystemClock> {
    /// Creates an empty store on the default slot with the system clock.
    ///
    /// Call `load()` to pick up persisted messages.
    pub fn new(storage: S) -> Self {
        Self::with_clock(storage, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> GuestbookStore<S, C> {
    /// Creates an empty store on the default slot.
    pub fn with_clock(storage: S, clock: C) -> Self {
        Self::with_key(storage, clock, STORAGE_KEY)
    }

    /// Creates an empty store on a caller-chosen slot.
    pub fn with_key(storage: S, clock: C, key: impl Into<String>) -> Self {
        Self {
            storage,
            clock,
            key: key.into(),
            messages: Vec::new(),
            persistence_available: true,
        }
    }

    /// Replaces in-memory state with the persisted slot.
    ///
    /// - Missing slot: empty collection.
    /// - Corrupt slot: empty collection and the slot is removed.
    /// - Unreadable storage: empty collection, persistence disabled.
    pub fn load(&mut self) -> &[Message] {
        self.messages.clear();

        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("event=guestbook_load module=guestbook status=ok count=0 source=empty");
                return &self.messages;
            }
            Err(err) => {
                self.mark_unavailable("load", &err);
                return &self.messages;
            }
        };

        match decode_messages(&raw) {
            Ok(messages) => {
                self.messages = messages;
                info!(
                    "event=guestbook_load module=guestbook status=ok count={}",
                    self.messages.len()
                );
            }
            Err(err) => {
                warn!(
                    "event=guestbook_load module=guestbook status=reset bytes={} error={}",
                    raw.len(),
                    err
                );
                if let Err(err) = self.storage.remove_item(&self.key) {
                    self.mark_unavailable("reset", &err);
                }
            }
        }

        &self.messages
    }

    /// Adds a message at the front of the collection and persists.
    ///
    /// # Errors
    /// - Returns `MessageValidationError` when input is empty after trimming
    ///   or too long; the collection is left untouched.
    pub fn submit(
        &mut self,
        author: &str,
        body: &str,
    ) -> Result<&[Message], MessageValidationError> {
        let (author, body) = match normalize_input(author, body) {
            Ok(input) => input,
            Err(err) => {
                debug!("event=guestbook_submit module=guestbook status=rejected reason={err}");
                return Err(err);
            }
        };

        let created_at = self.clock.now_ms();
        let message = Message {
            id: self.next_id(created_at),
            author,
            body,
            created_at,
        };
        self.messages.insert(0, message);
        info!(
            "event=guestbook_submit module=guestbook status=ok count={}",
            self.messages.len()
        );

        self.persist();
        Ok(&self.messages)
    }

    /// Writes the full collection to storage, including the empty case.
    pub fn persist(&mut self) {
        if !self.persistence_available {
            debug!("event=guestbook_persist module=guestbook status=skipped");
            return;
        }

        let encoded = match encode_messages(&self.messages) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!("event=guestbook_persist module=guestbook status=error error={err}");
                return;
            }
        };

        match self.storage.set_item(&self.key, &encoded) {
            Ok(()) => debug!(
                "event=guestbook_persist module=guestbook status=ok count={} bytes={}",
                self.messages.len(),
                encoded.len()
            ),
            Err(err) => self.mark_unavailable("persist", &err),
        }
    }

    /// Empties the collection and removes the persisted slot.
    pub fn clear(&mut self) {
        let removed = self.messages.len();
        self.messages.clear();

        match self.storage.remove_item(&self.key) {
            Ok(()) => info!("event=guestbook_clear module=guestbook status=ok removed={removed}"),
            Err(err) => self.mark_unavailable("clear", &err),
        }
    }

    /// Current collection, newest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Whether storage has accepted every operation so far this session.
    pub fn persistence_available(&self) -> bool {
        self.persistence_available
    }

    /// Relative-time label for `message` against this store's clock.
    pub fn format_relative_time(&self, message: &Message) -> String {
        time::format_relative_time(message, self.clock.now_ms())
    }

    /// Underlying storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn next_id(&self, created_at: i64) -> String {
        let newest = self
            .messages
            .first()
            .and_then(|message| message.id.parse::<i64>().ok());
        let id = match newest {
            Some(newest) if newest >= created_at => newest.checked_add(1).unwrap_or_else(|| {
                warn!(
                    "event=guestbook_submit module=guestbook status=id_overflow newest={newest}"
                );
                created_at
            }),
            _ => created_at,
        };
        id.to_string()
    }

    fn mark_unavailable(&mut self, operation: &str, err: &StorageError) {
        warn!(
            "event=guestbook_storage module=guestbook status=unavailable operation={} error={}",
            operation, err
        );
        self.persistence_available = false;
    }
}

#[cfg(test)]
mod tests {
    use super::{GuestbookStore, STORAGE_KEY};
    use crate::guestbook::clock::FixedClock;
    use crate::storage::{KeyValueStore, MemoryStore};

    #[test]
    fn ids_stay_increasing_when_clock_stalls() {
        let storage = MemoryStore::new();
        let clock = FixedClock::new(5_000);
        let mut store = GuestbookStore::with_clock(&storage, &clock);

        store.submit("a", "one").unwrap();
        store.submit("b", "two").unwrap();
        clock.set(4_000);
        store.submit("c", "three").unwrap();

        let ids: Vec<&str> = store.messages().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["5002", "5001", "5000"]);
    }

    #[test]
    fn max_stored_id_falls_back_to_clock() {
        let storage = MemoryStore::new();
        storage
            .set_item(
                STORAGE_KEY,
                r#"[{"id":"9223372036854775807","name":"a","message":"b","timestamp":1}]"#,
            )
            .unwrap();
        let mut store = GuestbookStore::with_clock(&storage, FixedClock::new(5_000));
        store.load();

        let messages = store.submit("c", "d").unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].id, "5000");
    }

    #[test]
    fn persist_writes_empty_array_for_empty_collection() {
        let storage = MemoryStore::new();
        let mut store = GuestbookStore::with_clock(&storage, FixedClock::new(0));
        store.persist();
        assert_eq!(storage.peek(STORAGE_KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn skips_writes_after_first_failure() {
        let storage = MemoryStore::new();
        let mut store = GuestbookStore::with_clock(&storage, FixedClock::new(0));

        storage.set_disabled(true);
        store.submit("a", "one").unwrap();
        assert!(!store.persistence_available());

        storage.set_disabled(false);
        store.submit("b", "two").unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(storage.peek(STORAGE_KEY), None);
    }
}
