//! Scoped animation timelines.
//!
//! # Responsibility
//! - Tween numeric properties of host targets over time.
//! - Tie every tween to a context whose teardown restores initial values.
//!
//! # Invariants
//! - A context reverts exactly once: on `revert()` or on drop.
//! - Tweens never outlive the context that created them.

pub mod context;
pub mod ease;
pub mod reveal;
pub mod tween;
