//! Domain model for guestbook entries.
//!
//! # Responsibility
//! - Define the canonical message record shared by the store and view layer.
//! - Keep the persisted field names stable for existing browser payloads.
//!
//! # Invariants
//! - A message is immutable once created.
//! - Author and body are trimmed and non-empty at creation time.

pub mod message;
