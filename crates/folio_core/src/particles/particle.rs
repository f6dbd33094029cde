//! Particle state and palette.

use serde::{Deserialize, Serialize};

/// Simulated position: `x`/`y` in CSS pixels, `z` as depth away from the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// HSL color as emitted into CSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hsl {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

impl Hsl {
    pub const fn new(hue: u16, saturation: u8, lightness: u8) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// CSS Color 4 space-separated form, e.g. `hsl(280 100% 70%)`.
    pub fn css(&self) -> String {
        format!("hsl({} {}% {}%)", self.hue, self.saturation, self.lightness)
    }

    /// Same color with an alpha channel, e.g. `hsl(280 100% 70% / 0.8)`.
    pub fn css_alpha(&self, alpha: f64) -> String {
        format!(
            "hsl({} {}% {}% / {})",
            self.hue, self.saturation, self.lightness, alpha
        )
    }
}

/// Neon purple, blue, cyan and pink.
pub const PALETTE: [Hsl; 4] = [
    Hsl::new(280, 100, 70),
    Hsl::new(200, 100, 60),
    Hsl::new(180, 100, 50),
    Hsl::new(320, 100, 75),
];

/// One element of the ambient field.
///
/// `size` and `color` are fixed at creation; position, heading and speed
/// evolve every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    /// Direction of travel in radians.
    pub heading: f64,
    pub speed: f64,
    size: f64,
    color: Hsl,
}

impl Particle {
    pub fn new(position: Vec3, size: f64, color: Hsl, heading: f64, speed: f64) -> Self {
        Self {
            position,
            heading,
            speed,
            size,
            color,
        }
    }

    /// Diameter in CSS pixels before perspective scaling.
    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn color(&self) -> Hsl {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::{Hsl, PALETTE};

    #[test]
    fn css_uses_space_separated_syntax() {
        assert_eq!(Hsl::new(280, 100, 70).css(), "hsl(280 100% 70%)");
        assert_eq!(Hsl::new(180, 100, 50).css_alpha(0.8), "hsl(180 100% 50% / 0.8)");
    }

    #[test]
    fn palette_has_distinct_hues() {
        let mut hues: Vec<u16> = PALETTE.iter().map(|c| c.hue).collect();
        hues.dedup();
        assert_eq!(hues.len(), PALETTE.len());
    }
}
