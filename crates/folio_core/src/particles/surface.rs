//! Binding between a particle field and the surface that draws it.
//!
//! # Responsibility
//! - Create one surface element per particle on mount.
//! - Push projections to the surface every frame.
//! - Remove every element exactly once on unmount, including on drop.

use crate::particles::field::{ParticleField, Projection};
use crate::particles::particle::Particle;
use crate::particles::viewport::Viewport;
use log::{debug, info};

/// Host-side drawing target for a particle field (DOM nodes, terminal cells).
///
/// Elements are addressed by their particle index.
pub trait FieldSurface {
    fn create_element(&mut self, index: usize, particle: &Particle);
    fn render(&mut self, index: usize, projection: &Projection);
    fn remove_element(&mut self, index: usize);
}

/// A field attached to a surface.
///
/// Dropping the handle tears the surface down; `unmount()` does the same
/// earlier and is idempotent.
pub struct MountedField<S: FieldSurface> {
    surface: S,
    field: Option<ParticleField>,
}

impl<S: FieldSurface> MountedField<S> {
    /// Creates surface elements for every particle in `field`.
    pub fn mount(mut surface: S, field: ParticleField) -> Self {
        for (index, particle) in field.particles().iter().enumerate() {
            surface.create_element(index, particle);
        }
        info!(
            "event=field_mount module=particles status=ok count={} width={} height={}",
            field.len(),
            field.viewport().width,
            field.viewport().height
        );
        Self {
            surface,
            field: Some(field),
        }
    }

    /// Runs one simulation step and renders it.
    ///
    /// Returns `false` once unmounted so frame loops can stop rescheduling.
    pub fn frame(&mut self) -> bool {
        let Some(field) = self.field.as_mut() else {
            return false;
        };
        for (index, projection) in field.step().iter().enumerate() {
            self.surface.render(index, projection);
        }
        true
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        if let Some(field) = self.field.as_mut() {
            field.pointer_moved(x, y);
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        if let Some(field) = self.field.as_mut() {
            field.resize(viewport);
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.field.is_some()
    }

    pub fn field(&self) -> Option<&ParticleField> {
        self.field.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Removes all surface elements and releases the pool.
    pub fn unmount(&mut self) {
        let Some(field) = self.field.take() else {
            return;
        };
        for index in (0..field.len()).rev() {
            self.surface.remove_element(index);
        }
        debug!(
            "event=field_unmount module=particles status=ok removed={}",
            field.len()
        );
    }
}

impl<S: FieldSurface> Drop for MountedField<S> {
    fn drop(&mut self) {
        self.unmount();
    }
}
