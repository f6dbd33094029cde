//! Easing curves.

use serde::{Deserialize, Serialize};

/// Progress curve applied to normalized tween time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Linear.
    #[default]
    None,
    /// Quadratic in-out.
    Power2InOut,
    /// Cubic out.
    Power3Out,
    /// Overshooting cubic out; `overshoot` 1.7 is the usual pop-in.
    BackOut { overshoot: f64 },
}

impl Ease {
    /// Maps `t` in `[0, 1]` to eased progress. Input is clamped.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::None => t,
            Self::Power2InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Self::Power3Out => 1.0 - (1.0 - t).powi(3),
            Self::BackOut { overshoot } => {
                let c3 = overshoot + 1.0;
                1.0 + c3 * (t - 1.0).powi(3) + overshoot * (t - 1.0).powi(2)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Ease;

    #[test]
    fn every_curve_hits_both_endpoints() {
        for ease in [
            Ease::None,
            Ease::Power2InOut,
            Ease::Power3Out,
            Ease::BackOut { overshoot: 1.7 },
        ] {
            assert!(ease.apply(0.0).abs() < 1e-12, "{ease:?} at 0");
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-12, "{ease:?} at 1");
        }
    }

    #[test]
    fn back_out_overshoots_before_settling() {
        assert!(Ease::BackOut { overshoot: 1.7 }.apply(0.8) > 1.0);
    }

    #[test]
    fn power2_in_out_is_symmetric() {
        let ease = Ease::Power2InOut;
        assert!((ease.apply(0.25) + ease.apply(0.75) - 1.0).abs() < 1e-12);
    }
}
