//! Animation context: a scoped owner for tweens.
//!
//! # Responsibility
//! - Register tweens against `(target, property)` pairs of a host sink.
//! - Advance them together and push sampled values into the sink.
//! - Restore initial values when the context is reverted or dropped.
//!
//! # Invariants
//! - Revert applies initial values in reverse registration order, so the
//!   first-registered value for a pair wins.
//! - After revert the context holds no tweens and `tick()` is a no-op.

use crate::animation::tween::TweenSpec;
use log::debug;

/// Index of an animated element inside its sink.
pub type TargetId = usize;

/// Animatable property of a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    X,
    Y,
    Scale,
    Rotation,
    Opacity,
}

/// Receives sampled values for animated targets.
pub trait AnimationTarget {
    fn apply(&mut self, target: TargetId, property: Property, value: f64);
}

#[derive(Debug, Clone)]
struct Track {
    target: TargetId,
    property: Property,
    initial: f64,
    spec: TweenSpec,
    elapsed: f64,
    finished: bool,
}

/// Owns a set of tweens and the sink they animate.
pub struct AnimationContext<T: AnimationTarget> {
    sink: T,
    tracks: Vec<Track>,
    reverted: bool,
}

impl<T: AnimationTarget> AnimationContext<T> {
    pub fn new(sink: T) -> Self {
        Self {
            sink,
            tracks: Vec::new(),
            reverted: false,
        }
    }

    /// Sets a property immediately.
    ///
    /// Not tracked: `revert()` leaves the value in place.
    pub fn set(&mut self, target: TargetId, property: Property, value: f64) {
        self.sink.apply(target, property, value);
    }

    /// Starts a tween; `initial` is the value restored on revert.
    ///
    /// The sink receives `spec.from` right away.
    pub fn tween(&mut self, target: TargetId, property: Property, initial: f64, spec: TweenSpec) {
        if self.reverted {
            return;
        }
        self.sink.apply(target, property, spec.from);
        self.tracks.push(Track {
            target,
            property,
            initial,
            spec,
            elapsed: 0.0,
            finished: false,
        });
    }

    /// Moves every tween on `(target, property)` by `delta`, keeping its
    /// timing, and pushes the shifted value to the sink.
    pub fn shift(&mut self, target: TargetId, property: Property, delta: f64) {
        for track in self
            .tracks
            .iter_mut()
            .filter(|track| track.target == target && track.property == property)
        {
            track.initial += delta;
            track.spec.from += delta;
            track.spec.to += delta;
            let sample = track.spec.sample(track.elapsed);
            self.sink.apply(target, property, sample.value);
        }
    }

    /// Advances every tween by `dt` seconds.
    ///
    /// Returns the number of tweens still running.
    pub fn tick(&mut self, dt: f64) -> usize {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let mut running = 0;
        for track in self.tracks.iter_mut().filter(|track| !track.finished) {
            track.elapsed += dt;
            let sample = track.spec.sample(track.elapsed);
            self.sink.apply(track.target, track.property, sample.value);
            track.finished = sample.finished;
            if !sample.finished {
                running += 1;
            }
        }
        running
    }

    /// Stops all tweens and restores initial values.
    pub fn revert(&mut self) {
        if self.reverted {
            return;
        }
        self.reverted = true;
        let tracks = std::mem::take(&mut self.tracks);
        for track in tracks.iter().rev() {
            self.sink.apply(track.target, track.property, track.initial);
        }
        debug!(
            "event=animation_revert module=animation status=ok tweens={}",
            tracks.len()
        );
    }

    pub fn is_reverted(&self) -> bool {
        self.reverted
    }

    pub fn tween_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn sink(&self) -> &T {
        &self.sink
    }
}

impl<T: AnimationTarget> Drop for AnimationContext<T> {
    fn drop(&mut self) {
        self.revert();
    }
}
