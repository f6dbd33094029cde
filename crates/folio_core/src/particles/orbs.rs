//! Floating orbs behind the particle field.
//!
//! Each orb drifts up to `drift_px` from its anchor while rotating a full
//! turn, and pulses its opacity, forever, back and forth. All tweens belong
//! to one `AnimationContext`, so dropping the layer reverts them. A resize
//! moves every anchor to a fresh random spot inside the new viewport.

use crate::animation::context::{AnimationContext, AnimationTarget, Property, TargetId};
use crate::animation::ease::Ease;
use crate::animation::tween::{Repeat, TweenSpec};
use crate::particles::viewport::Viewport;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbConfig {
    pub count: usize,
    pub drift_px: f64,
    pub min_drift_secs: f64,
    pub max_drift_secs: f64,
    pub min_pulse_secs: f64,
    pub max_pulse_secs: f64,
    /// Delay between consecutive orbs starting to drift.
    pub stagger_secs: f64,
    pub min_pulse_opacity: f64,
    pub max_pulse_opacity: f64,
}

impl Default for OrbConfig {
    fn default() -> Self {
        Self {
            count: 6,
            drift_px: 100.0,
            min_drift_secs: 20.0,
            max_drift_secs: 30.0,
            min_pulse_secs: 3.0,
            max_pulse_secs: 5.0,
            stagger_secs: 0.5,
            min_pulse_opacity: 0.3,
            max_pulse_opacity: 0.7,
        }
    }
}

/// Current render state of one orb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbFrame {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    /// Degrees.
    pub rotation: f64,
    pub opacity: f64,
}

impl Default for OrbFrame {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            rotation: 0.0,
            opacity: 1.0,
        }
    }
}

/// Frame buffer the orb context writes into.
#[derive(Debug, Default)]
pub struct OrbFrames(Vec<OrbFrame>);

impl AnimationTarget for OrbFrames {
    fn apply(&mut self, target: TargetId, property: Property, value: f64) {
        let Some(frame) = self.0.get_mut(target) else {
            return;
        };
        match property {
            Property::X => frame.x = value,
            Property::Y => frame.y = value,
            Property::Scale => frame.scale = value,
            Property::Rotation => frame.rotation = value,
            Property::Opacity => frame.opacity = value,
        }
    }
}

/// Animated orb layer.
pub struct OrbLayer {
    context: AnimationContext<OrbFrames>,
    anchors: Vec<(f64, f64)>,
}

impl OrbLayer {
    /// Places `config.count` orbs and starts their drift and pulse tweens.
    pub fn spawn(config: &OrbConfig, viewport: Viewport, rng: &mut impl Rng) -> Self {
        let frames = OrbFrames(vec![OrbFrame::default(); config.count]);
        let mut context = AnimationContext::new(frames);
        let mut anchors = Vec::with_capacity(config.count);

        for index in 0..config.count {
            let x = rng.gen::<f64>() * viewport.width;
            let y = rng.gen::<f64>() * viewport.height;
            context.set(index, Property::X, x);
            context.set(index, Property::Y, y);
            context.set(index, Property::Scale, 0.5 + rng.gen::<f64>() * 0.5);
            anchors.push((x, y));

            let drift_x = x + (rng.gen::<f64>() * 2.0 - 1.0) * config.drift_px;
            let drift_y = y + (rng.gen::<f64>() * 2.0 - 1.0) * config.drift_px;
            let duration = between(rng, config.min_drift_secs, config.max_drift_secs);
            let delay = index as f64 * config.stagger_secs;
            let float = |from: f64, to: f64| {
                TweenSpec::new(from, to, duration)
                    .delay(delay)
                    .repeat(Repeat::Infinite)
                    .yoyo(true)
            };
            context.tween(index, Property::X, x, float(x, drift_x));
            context.tween(index, Property::Y, y, float(y, drift_y));
            context.tween(index, Property::Rotation, 0.0, float(0.0, 360.0));

            let pulse_to = between(rng, config.min_pulse_opacity, config.max_pulse_opacity);
            let pulse_secs = between(rng, config.min_pulse_secs, config.max_pulse_secs);
            let pulse = TweenSpec::new(1.0, pulse_to, pulse_secs)
                .delay(rng.gen::<f64>() * 2.0)
                .repeat(Repeat::Infinite)
                .yoyo(true)
                .ease(Ease::Power2InOut);
            context.tween(index, Property::Opacity, 1.0, pulse);
        }

        Self { context, anchors }
    }

    /// Re-anchors every orb at a random point of `viewport`.
    ///
    /// Running drift tweens keep their timing and travel; only their
    /// origin moves.
    pub fn resize(&mut self, viewport: Viewport, rng: &mut impl Rng) {
        for (index, anchor) in self.anchors.iter_mut().enumerate() {
            let x = rng.gen::<f64>() * viewport.width;
            let y = rng.gen::<f64>() * viewport.height;
            self.context.shift(index, Property::X, x - anchor.0);
            self.context.shift(index, Property::Y, y - anchor.1);
            *anchor = (x, y);
        }
    }

    /// Drift origin of each orb.
    pub fn anchors(&self) -> &[(f64, f64)] {
        &self.anchors
    }

    /// Advances all orbs by `dt` seconds.
    pub fn tick(&mut self, dt: f64) -> &[OrbFrame] {
        self.context.tick(dt);
        self.frames()
    }

    pub fn frames(&self) -> &[OrbFrame] {
        &self.context.sink().0
    }

    pub fn len(&self) -> usize {
        self.frames().len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames().is_empty()
    }
}

fn between(rng: &mut impl Rng, min: f64, max: f64) -> f64 {
    min + (max - min) * rng.gen::<f64>()
}

#[cfg(test)]
mod tests {
    use super::{OrbConfig, OrbLayer};
    use crate::particles::viewport::Viewport;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn orbs_stay_within_drift_band() {
        let config = OrbConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut layer = OrbLayer::spawn(&config, Viewport::new(1280.0, 720.0), &mut rng);
        let spawned = layer.frames().to_vec();

        for _ in 0..600 {
            layer.tick(0.1);
        }
        for (start, now) in spawned.iter().zip(layer.frames()) {
            assert!((now.x - start.x).abs() <= config.drift_px + 1e-9);
            assert!((now.y - start.y).abs() <= config.drift_px + 1e-9);
            assert!((0.0..=360.0).contains(&now.rotation));
            assert!(now.opacity >= config.min_pulse_opacity - 1e-9 && now.opacity <= 1.0);
            assert!((0.5..=1.0).contains(&now.scale));
        }
    }

    #[test]
    fn resize_reanchors_orbs_inside_new_viewport() {
        let config = OrbConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        let mut layer = OrbLayer::spawn(&config, Viewport::new(1920.0, 1080.0), &mut rng);
        for _ in 0..50 {
            layer.tick(0.2);
        }
        let before = layer.anchors().to_vec();

        let small = Viewport::new(320.0, 240.0);
        layer.resize(small, &mut rng);
        assert_ne!(layer.anchors(), before.as_slice());

        for _ in 0..300 {
            layer.tick(0.1);
        }
        for ((ax, ay), frame) in layer.anchors().iter().zip(layer.frames()) {
            assert!((0.0..=small.width).contains(ax));
            assert!((0.0..=small.height).contains(ay));
            assert!((frame.x - ax).abs() <= config.drift_px + 1e-9);
            assert!((frame.y - ay).abs() <= config.drift_px + 1e-9);
        }
    }

    #[test]
    fn zero_viewport_spawns_orbs_at_origin() {
        let mut rng = StdRng::seed_from_u64(1);
        let layer = OrbLayer::spawn(&OrbConfig::default(), Viewport::ZERO, &mut rng);
        assert_eq!(layer.len(), 6);
        assert!(layer.frames().iter().all(|frame| frame.x == 0.0 && frame.y == 0.0));
    }
}
