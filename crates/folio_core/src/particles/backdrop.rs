//! Background grid and rising motes.
//!
//! # Responsibility
//! - Sway the grid lines sideways in alternating directions.
//! - Float small motes upward across the viewport, respawning each one
//!   below the bottom edge at a new column every time it finishes a rise.
//!
//! # Invariants
//! - Line `i` sways `±grid_drift_px` over `grid_base_secs + i * grid_step_secs`;
//!   even lines move left first, odd lines right.
//! - A respawned mote starts `respawn_offset_px` below the viewport and
//!   climbs exactly one viewport height per cycle.

use crate::animation::context::{AnimationContext, AnimationTarget, Property, TargetId};
use crate::animation::tween::{Repeat, TweenSpec};
use crate::particles::particle::{Hsl, PALETTE};
use crate::particles::viewport::Viewport;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropConfig {
    pub vertical_lines: usize,
    pub horizontal_lines: usize,
    pub grid_drift_px: f64,
    pub grid_base_secs: f64,
    pub grid_step_secs: f64,
    pub mote_count: usize,
    pub min_rise_secs: f64,
    pub max_rise_secs: f64,
    /// Delay between consecutive motes starting to rise.
    pub mote_stagger_secs: f64,
    pub respawn_offset_px: f64,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            vertical_lines: 8,
            horizontal_lines: 6,
            grid_drift_px: 100.0,
            grid_base_secs: 30.0,
            grid_step_secs: 5.0,
            mote_count: 15,
            min_rise_secs: 15.0,
            max_rise_secs: 25.0,
            mote_stagger_secs: 0.2,
            respawn_offset_px: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAxis {
    /// Full-height line placed along x.
    Vertical,
    /// Full-width line placed along y.
    Horizontal,
}

/// Static placement of one grid line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub axis: GridAxis,
    /// Distance from the left (vertical) or top (horizontal) edge, in percent.
    pub position_pct: f64,
}

#[derive(Debug, Default)]
struct GridOffsets(Vec<f64>);

impl AnimationTarget for GridOffsets {
    fn apply(&mut self, target: TargetId, property: Property, value: f64) {
        if property != Property::X {
            return;
        }
        if let Some(offset) = self.0.get_mut(target) {
            *offset = value;
        }
    }
}

/// Swaying grid lines; vertical lines first, then horizontal.
pub struct GridLayer {
    lines: Vec<GridLine>,
    context: AnimationContext<GridOffsets>,
}

impl GridLayer {
    pub fn spawn(config: &BackdropConfig) -> Self {
        let lines = evenly_spaced(GridAxis::Vertical, config.vertical_lines)
            .chain(evenly_spaced(GridAxis::Horizontal, config.horizontal_lines))
            .collect::<Vec<_>>();

        let mut context = AnimationContext::new(GridOffsets(vec![0.0; lines.len()]));
        for index in 0..lines.len() {
            let direction = if index % 2 == 0 { -1.0 } else { 1.0 };
            let duration = config.grid_base_secs + index as f64 * config.grid_step_secs;
            let sway = TweenSpec::new(0.0, direction * config.grid_drift_px, duration)
                .repeat(Repeat::Infinite)
                .yoyo(true);
            context.tween(index, Property::X, 0.0, sway);
        }

        Self { lines, context }
    }

    /// Advances by `dt` seconds; returns the x offset of every line.
    pub fn tick(&mut self, dt: f64) -> &[f64] {
        self.context.tick(dt);
        self.offsets()
    }

    pub fn offsets(&self) -> &[f64] {
        &self.context.sink().0
    }

    pub fn lines(&self) -> &[GridLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

fn evenly_spaced(axis: GridAxis, count: usize) -> impl Iterator<Item = GridLine> {
    (0..count).map(move |i| GridLine {
        axis,
        position_pct: (i + 1) as f64 * 100.0 / count as f64,
    })
}

/// Render state of one mote.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoteFrame {
    pub x: f64,
    pub y: f64,
    pub color: Hsl,
}

#[derive(Debug, Clone)]
struct Mote {
    origin_y: f64,
    rise_secs: f64,
    delay: f64,
    elapsed: f64,
    cycle: u64,
}

/// Motes drifting up the page.
pub struct MoteLayer {
    viewport: Viewport,
    respawn_offset_px: f64,
    motes: Vec<Mote>,
    frames: Vec<MoteFrame>,
}

impl MoteLayer {
    /// Scatters `config.mote_count` motes over `viewport`.
    pub fn spawn(config: &BackdropConfig, viewport: Viewport, rng: &mut impl Rng) -> Self {
        // Purple, blue, pink, cyan.
        const COLOR_ORDER: [usize; 4] = [0, 1, 3, 2];

        let mut motes = Vec::with_capacity(config.mote_count);
        let mut frames = Vec::with_capacity(config.mote_count);
        for index in 0..config.mote_count {
            let x = rng.gen::<f64>() * viewport.width;
            let y = rng.gen::<f64>() * viewport.height;
            let rise_secs =
                config.min_rise_secs + (config.max_rise_secs - config.min_rise_secs) * rng.gen::<f64>();
            motes.push(Mote {
                origin_y: y,
                rise_secs,
                delay: index as f64 * config.mote_stagger_secs,
                elapsed: 0.0,
                cycle: 0,
            });
            frames.push(MoteFrame {
                x,
                y,
                color: PALETTE[COLOR_ORDER[index % COLOR_ORDER.len()]],
            });
        }

        Self {
            viewport,
            respawn_offset_px: config.respawn_offset_px,
            motes,
            frames,
        }
    }

    /// Advances by `dt` seconds; motes that completed a rise respawn below
    /// the viewport at a random column.
    pub fn tick(&mut self, dt: f64, rng: &mut impl Rng) -> &[MoteFrame] {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let height = self.viewport.height;

        for (mote, frame) in self.motes.iter_mut().zip(self.frames.iter_mut()) {
            mote.elapsed += dt;
            let local = mote.elapsed - mote.delay;
            if local <= 0.0 || mote.rise_secs <= 0.0 {
                continue;
            }

            let cycle = (local / mote.rise_secs).floor() as u64;
            if cycle > mote.cycle {
                mote.cycle = cycle;
                mote.origin_y = height + self.respawn_offset_px;
                frame.x = rng.gen::<f64>() * self.viewport.width;
            }
            let progress = local / mote.rise_secs - cycle as f64;
            frame.y = mote.origin_y - height * progress;
        }
        &self.frames
    }

    /// Adopts a new viewport; it applies from each mote's next respawn.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn frames(&self) -> &[MoteFrame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{BackdropConfig, GridAxis, GridLayer, MoteLayer};
    use crate::particles::viewport::Viewport;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn grid_lines_are_evenly_spaced_per_axis() {
        let grid = GridLayer::spawn(&BackdropConfig::default());
        assert_eq!(grid.len(), 14);

        let lines = grid.lines();
        assert_eq!(lines[0].axis, GridAxis::Vertical);
        assert_eq!(lines[0].position_pct, 12.5);
        assert_eq!(lines[7].position_pct, 100.0);
        assert_eq!(lines[8].axis, GridAxis::Horizontal);
        assert!((lines[8].position_pct - 16.67).abs() < 0.01);
    }

    #[test]
    fn grid_lines_sway_in_alternating_directions() {
        let mut grid = GridLayer::spawn(&BackdropConfig::default());
        let offsets = grid.tick(15.0).to_vec();

        // Line 0 runs 30s, line 1 runs 35s.
        assert_eq!(offsets[0], -50.0);
        assert!(offsets[1] > 0.0 && offsets[1] < 50.0);
        for (index, offset) in offsets.iter().enumerate() {
            assert!(offset.abs() <= 100.0, "line {index}");
        }
    }

    #[test]
    fn motes_rise_and_respawn_below_viewport() {
        let config = BackdropConfig {
            mote_count: 1,
            min_rise_secs: 10.0,
            max_rise_secs: 10.0,
            ..BackdropConfig::default()
        };
        let viewport = Viewport::new(800.0, 600.0);
        let mut rng = StdRng::seed_from_u64(3);
        let mut motes = MoteLayer::spawn(&config, viewport, &mut rng);
        let start = motes.frames()[0];

        let halfway = motes.tick(5.0, &mut rng)[0];
        assert!((halfway.y - (start.y - 300.0)).abs() < 1e-9);
        assert_eq!(halfway.x, start.x);

        let respawned = motes.tick(6.0, &mut rng)[0];
        // One second into the second rise.
        assert!((respawned.y - (650.0 - 60.0)).abs() < 1e-9);
        assert!((0.0..=800.0).contains(&respawned.x));
    }

    #[test]
    fn staggered_motes_wait_for_their_delay() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut motes = MoteLayer::spawn(&BackdropConfig::default(), Viewport::new(800.0, 600.0), &mut rng);
        let start = motes.frames().to_vec();

        let frames = motes.tick(0.1, &mut rng);
        assert_ne!(frames[0].y, start[0].y);
        assert_eq!(frames[14].y, start[14].y);
    }

    #[test]
    fn resized_motes_respawn_against_new_height() {
        let config = BackdropConfig {
            mote_count: 1,
            min_rise_secs: 10.0,
            max_rise_secs: 10.0,
            ..BackdropConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let mut motes = MoteLayer::spawn(&config, Viewport::new(800.0, 600.0), &mut rng);
        motes.resize(Viewport::new(400.0, 300.0));

        let frame = motes.tick(10.0, &mut rng)[0];
        assert!((frame.y - 350.0).abs() < 1e-9);
        assert!((0.0..=400.0).contains(&frame.x));
    }
}
