//! Guestbook use-cases.
//!
//! # Responsibility
//! - Keep the newest-first message collection and its persisted mirror.
//! - Format messages for display (relative time, avatar initial, counters).
//!
//! # Invariants
//! - The in-memory collection is authoritative; storage failures never
//!   reach callers as operation errors.
//! - Every mutation is mirrored to storage with one whole-collection write.

pub mod clock;
pub mod draft;
pub mod payload;
pub mod store;
pub mod time;
