//! Ambient background layers: the particle field, floating orbs, grid lines
//! and rising motes.
//!
//! # Responsibility
//! - Simulate a fixed pool of particles once per display frame.
//! - Bind a simulation to a host surface with guaranteed teardown.
//!
//! # Invariants
//! - Pool size never changes between mount and unmount.
//! - Depth stays in `[0, z_max]`; screen position wraps instead of clipping.
//! - Nothing in this module fails; bad host input degrades to an inert field.

pub mod backdrop;
pub mod field;
pub mod orbs;
pub mod particle;
pub mod surface;
pub mod viewport;
