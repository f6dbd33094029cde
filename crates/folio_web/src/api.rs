//! View-layer API for the guestbook.
//!
//! # Responsibility
//! - Wrap `GuestbookStore` in the envelopes the page renders.
//! - Keep the contract platform-neutral so it is testable off-browser.
//!
//! # Invariants
//! - No call panics; failures come back as `ActionResponse { ok: false }`.
//! - Snapshots list messages newest-first with display-ready fields.

use folio_core::{
    author_initial, body_counter, format_elapsed, Clock, GuestbookDraft, GuestbookStore,
    KeyValueStore, Message,
};
use serde::Serialize;

/// One message as rendered in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageItem {
    pub id: String,
    pub author: String,
    pub body: String,
    pub timestamp: i64,
    /// `Just now`, `5m ago`, ...
    pub relative_time: String,
    /// Avatar letter.
    pub initial: String,
}

/// Everything the guestbook section needs for one render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuestbookSnapshot {
    pub items: Vec<MessageItem>,
    pub count: usize,
    /// `false` once storage refused a read or write this session.
    pub persistence_available: bool,
}

/// Result envelope for submit/clear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionResponse {
    pub ok: bool,
    /// Human-readable outcome for diagnostics/UI.
    pub message: String,
    /// Collection size after the action.
    pub count: usize,
}

/// Guestbook facade used by the browser bindings.
pub struct GuestbookView<S: KeyValueStore, C: Clock> {
    store: GuestbookStore<S, C>,
}

impl<S: KeyValueStore, C: Clock> GuestbookView<S, C> {
    /// Wraps `store` and loads the persisted collection.
    pub fn open(mut store: GuestbookStore<S, C>) -> Self {
        store.load();
        Self { store }
    }

    /// Re-reads the persisted slot, dropping unsaved in-memory state.
    pub fn reload(&mut self) -> GuestbookSnapshot {
        self.store.load();
        self.snapshot()
    }

    pub fn snapshot(&self) -> GuestbookSnapshot {
        let now_ms = self.store.clock().now_ms();
        let items = self
            .store
            .messages()
            .iter()
            .map(|message| to_item(message, now_ms))
            .collect::<Vec<_>>();
        GuestbookSnapshot {
            count: items.len(),
            items,
            persistence_available: self.store.persistence_available(),
        }
    }

    pub fn submit(&mut self, author: &str, body: &str) -> ActionResponse {
        match self.store.submit(author, body) {
            Ok(messages) => ActionResponse {
                ok: true,
                message: "Message posted.".to_string(),
                count: messages.len(),
            },
            Err(err) => ActionResponse {
                ok: false,
                message: format!("submit rejected: {err}"),
                count: self.store.len(),
            },
        }
    }

    pub fn clear(&mut self) -> ActionResponse {
        self.store.clear();
        ActionResponse {
            ok: true,
            message: "All messages cleared.".to_string(),
            count: 0,
        }
    }

    /// Relative-time label for an epoch-millisecond timestamp.
    pub fn format_relative_time(&self, timestamp: i64) -> String {
        format_elapsed(self.store.clock().now_ms().saturating_sub(timestamp))
    }

    pub fn store(&self) -> &GuestbookStore<S, C> {
        &self.store
    }
}

/// Whether the submit button should be enabled for this input.
pub fn can_submit(author: &str, body: &str) -> bool {
    GuestbookDraft::new(author, body).can_submit()
}

/// `<chars>/500` counter for the message field.
pub fn message_counter(body: &str) -> String {
    body_counter(body)
}

/// Serializes an envelope for the JS side.
pub fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        serde_json::json!({ "ok": false, "message": format!("serialization failed: {err}") })
            .to_string()
    })
}

fn to_item(message: &Message, now_ms: i64) -> MessageItem {
    MessageItem {
        id: message.id.clone(),
        author: message.author.clone(),
        body: message.body.clone(),
        timestamp: message.created_at,
        relative_time: format_elapsed(now_ms.saturating_sub(message.created_at)),
        initial: author_initial(&message.author),
    }
}
