//! Core logic for the folio portfolio site.
//! This crate is the single source of truth for guestbook and ambient-layer
//! invariants; hosts (browser, CLI) only adapt it to their surfaces.

pub mod animation;
pub mod config;
#[cfg(feature = "native")]
pub mod db;
pub mod guestbook;
#[cfg(feature = "native")]
pub mod logging;
pub mod model;
pub mod particles;
pub mod storage;

pub use animation::context::{AnimationContext, AnimationTarget, Property, TargetId};
pub use animation::ease::Ease;
pub use animation::reveal::{Reveal, RevealFrame, RevealKind};
pub use animation::tween::{Repeat, TweenSpec};
pub use config::{init_site_config, site_config, ConfigError, GuestbookConfig, SiteConfig, Theme};
pub use guestbook::clock::{Clock, FixedClock, SystemClock};
pub use guestbook::draft::{body_counter, GuestbookDraft};
pub use guestbook::payload::PayloadError;
pub use guestbook::store::{GuestbookStore, STORAGE_KEY};
pub use guestbook::time::{format_elapsed, format_relative_time};
#[cfg(feature = "native")]
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::message::{
    author_initial, Message, MessageId, MessageValidationError, MAX_AUTHOR_CHARS, MAX_BODY_CHARS,
};
pub use particles::backdrop::{
    BackdropConfig, GridAxis, GridLayer, GridLine, MoteFrame, MoteLayer,
};
pub use particles::field::{FieldConfig, ParticleField, Projection};
pub use particles::orbs::{OrbConfig, OrbFrame, OrbLayer};
pub use particles::particle::{Hsl, Particle, Vec3, PALETTE};
pub use particles::surface::{FieldSurface, MountedField};
pub use particles::viewport::Viewport;
#[cfg(feature = "native")]
pub use storage::SqliteKvStore;
pub use storage::{KeyValueStore, MemoryStore, StorageError, StorageResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
