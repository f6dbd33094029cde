//! Browser host for folio.
//!
//! `api` and `style` are platform-neutral and tested natively; the DOM,
//! console and localStorage adapters only build for `wasm32`.

pub mod api;
pub mod style;

#[cfg(target_arch = "wasm32")]
mod bindings;
#[cfg(target_arch = "wasm32")]
mod console;
#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;

#[cfg(target_arch = "wasm32")]
pub use bindings::{Guestbook, ParticleLayer, Reveal};
