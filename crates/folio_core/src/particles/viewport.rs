//! Host viewport dimensions.

use serde::{Deserialize, Serialize};

/// Renderable area in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Fallback when the host cannot report its size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Builds a viewport, mapping negative or non-finite sides to zero.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }

    /// Builds a viewport from optional host readings.
    ///
    /// Any missing side collapses the whole viewport to `ZERO`.
    pub fn from_host(width: Option<f64>, height: Option<f64>) -> Self {
        match (width, height) {
            (Some(width), Some(height)) => Self::new(width, height),
            _ => Self::ZERO,
        }
    }

    /// True when nothing can be drawn.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

fn sanitize(side: f64) -> f64 {
    if side.is_finite() && side > 0.0 {
        side
    } else {
        0.0
    }
}
