//! Particle field simulation.
//!
//! # Responsibility
//! - Spawn a fixed pool of particles across the viewport.
//! - Advance positions once per frame and project them to screen space.
//! - Steer particles toward the pointer when it passes nearby.
//!
//! # Invariants
//! - `len()` is constant for the lifetime of a field.
//! - After `step()`, every particle satisfies `-margin <= x <= width + margin`,
//!   `-margin <= y <= height + margin` and `0 <= z <= z_max`.
//! - Speed never exceeds `max_speed` through pointer interaction.

use crate::particles::particle::{Particle, Vec3, PALETTE};
use crate::particles::viewport::Viewport;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Tunables for the ambient field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of particles in the pool.
    pub count: usize,
    /// Depth assigned to particles that pass the viewer.
    pub z_max: f64,
    /// Perspective reference distance.
    pub z_ref: f64,
    /// Off-screen band, in pixels, crossed before a particle wraps.
    pub wrap_margin: f64,
    pub pointer_radius: f64,
    pub max_speed: f64,
    pub min_base_speed: f64,
    pub max_base_speed: f64,
    pub min_size: f64,
    pub max_size: f64,
    /// Depth travelled per frame, as a multiple of speed.
    pub depth_speed_factor: f64,
    /// Opacity at full perspective scale.
    pub opacity_factor: f64,
    /// Fraction of the bearing delta applied per pointer event at full force.
    pub steering: f64,
    /// Speed gained per pointer event at full force.
    pub speed_boost: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: 50,
            z_max: 1000.0,
            z_ref: 1000.0,
            wrap_margin: 50.0,
            pointer_radius: 100.0,
            max_speed: 2.0,
            min_base_speed: 0.1,
            max_base_speed: 0.6,
            min_size: 1.0,
            max_size: 5.0,
            depth_speed_factor: 2.0,
            opacity_factor: 0.8,
            steering: 0.1,
            speed_boost: 0.1,
        }
    }
}

/// Screen-space output for one particle after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Projection {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub opacity: f64,
}

/// Fixed-size pool of particles plus the viewport they live in.
#[derive(Debug, Clone)]
pub struct ParticleField {
    config: FieldConfig,
    viewport: Viewport,
    particles: Vec<Particle>,
    projections: Vec<Projection>,
}

impl ParticleField {
    /// Spawns `config.count` particles uniformly over `viewport`.
    pub fn spawn(config: FieldConfig, viewport: Viewport, rng: &mut impl Rng) -> Self {
        let particles = (0..config.count)
            .map(|_| spawn_particle(&config, viewport, rng))
            .collect::<Vec<_>>();
        let projections = vec![Projection::default(); particles.len()];
        Self {
            config,
            viewport,
            particles,
            projections,
        }
    }

    /// Builds a field from existing particles (replays, tests).
    pub fn from_particles(config: FieldConfig, viewport: Viewport, particles: Vec<Particle>) -> Self {
        let projections = vec![Projection::default(); particles.len()];
        Self {
            config,
            viewport,
            particles,
            projections,
        }
    }

    /// Advances every particle by one frame and returns the projections.
    ///
    /// An empty viewport yields fully transparent projections.
    pub fn step(&mut self) -> &[Projection] {
        let visible = !self.viewport.is_empty();
        for (particle, projection) in self.particles.iter_mut().zip(self.projections.iter_mut()) {
            advance(particle, &self.config);
            wrap(particle, &self.config, self.viewport);
            *projection = project(particle, &self.config, visible);
        }
        &self.projections
    }

    /// Steers particles within `pointer_radius` toward the pointer.
    pub fn pointer_moved(&mut self, pointer_x: f64, pointer_y: f64) {
        let radius = self.config.pointer_radius;
        if radius <= 0.0 {
            return;
        }
        for particle in &mut self.particles {
            let dx = pointer_x - particle.position.x;
            let dy = pointer_y - particle.position.y;
            let distance = dx.hypot(dy);
            if distance >= radius {
                continue;
            }

            let force = (radius - distance) / radius;
            let bearing = dy.atan2(dx);
            particle.heading += (bearing - particle.heading) * self.config.steering * force;
            particle.speed =
                (particle.speed + force * self.config.speed_boost).min(self.config.max_speed);
        }
    }

    /// Adopts a new viewport; particles outside it wrap on the next step.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Projections computed by the latest `step()`.
    pub fn projections(&self) -> &[Projection] {
        &self.projections
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

fn spawn_particle(config: &FieldConfig, viewport: Viewport, rng: &mut impl Rng) -> Particle {
    let position = Vec3::new(
        rng.gen::<f64>() * viewport.width,
        rng.gen::<f64>() * viewport.height,
        rng.gen::<f64>() * config.z_max,
    );
    let size = lerp(config.min_size, config.max_size, rng.gen::<f64>());
    let color = PALETTE[rng.gen_range(0..PALETTE.len())];
    let speed = lerp(config.min_base_speed, config.max_base_speed, rng.gen::<f64>());
    let heading = rng.gen::<f64>() * TAU;
    Particle::new(position, size, color, heading, speed)
}

fn advance(particle: &mut Particle, config: &FieldConfig) {
    let (sin, cos) = particle.heading.sin_cos();
    particle.position.x += cos * particle.speed;
    particle.position.y += sin * particle.speed;
    particle.position.z -= particle.speed * config.depth_speed_factor;
}

fn wrap(particle: &mut Particle, config: &FieldConfig, viewport: Viewport) {
    let margin = config.wrap_margin;
    let position = &mut particle.position;

    if position.x > viewport.width + margin {
        position.x = -margin;
    } else if position.x < -margin {
        position.x = viewport.width + margin;
    }
    if position.y > viewport.height + margin {
        position.y = -margin;
    } else if position.y < -margin {
        position.y = viewport.height + margin;
    }
    if position.z < 0.0 {
        position.z = config.z_max;
    }
}

fn project(particle: &Particle, config: &FieldConfig, visible: bool) -> Projection {
    let scale = config.z_ref / (config.z_ref + particle.position.z);
    Projection {
        x: particle.position.x,
        y: particle.position.y,
        scale,
        opacity: if visible {
            scale * config.opacity_factor
        } else {
            0.0
        },
    }
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::{project, FieldConfig};
    use crate::particles::particle::{Particle, Vec3, PALETTE};

    #[test]
    fn projection_at_reference_depth_is_half_scale() {
        let particle = Particle::new(Vec3::new(0.0, 0.0, 1000.0), 2.0, PALETTE[0], 0.0, 0.1);
        let projection = project(&particle, &FieldConfig::default(), true);
        assert!((projection.scale - 0.5).abs() < 1e-12);
        assert!((projection.opacity - 0.4).abs() < 1e-12);
    }

    #[test]
    fn invisible_projection_has_zero_opacity() {
        let particle = Particle::new(Vec3::new(0.0, 0.0, 0.0), 2.0, PALETTE[0], 0.0, 0.1);
        let projection = project(&particle, &FieldConfig::default(), false);
        assert_eq!(projection.scale, 1.0);
        assert_eq!(projection.opacity, 0.0);
    }
}
