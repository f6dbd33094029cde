//! Tween timing: delay, repeat, yoyo and easing over one numeric value.

use crate::animation::ease::Ease;

/// How many times a tween plays after the first run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Count(u32),
    Infinite,
}

/// Declarative description of one tween. Times are in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct TweenSpec {
    pub from: f64,
    pub to: f64,
    pub duration: f64,
    pub delay: f64,
    pub repeat: Repeat,
    /// Alternate direction on every repeat.
    pub yoyo: bool,
    pub ease: Ease,
}

impl TweenSpec {
    /// Single linear run from `from` to `to`.
    pub fn new(from: f64, to: f64, duration: f64) -> Self {
        Self {
            from,
            to,
            duration,
            delay: 0.0,
            repeat: Repeat::Count(0),
            yoyo: false,
            ease: Ease::None,
        }
    }

    pub fn delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Value of the tween `elapsed` seconds after it was created.
    pub fn sample(&self, elapsed: f64) -> TweenSample {
        let local = elapsed - self.delay;
        if local <= 0.0 {
            return TweenSample::running(self.from);
        }
        if self.duration <= 0.0 {
            return TweenSample::finished(self.final_value());
        }

        let cycle = (local / self.duration).floor();
        if let Repeat::Count(extra) = self.repeat {
            if cycle >= f64::from(extra) + 1.0 {
                return TweenSample::finished(self.final_value());
            }
        }

        let progress = (local - cycle * self.duration) / self.duration;
        let reversed = self.yoyo && cycle % 2.0 == 1.0;
        let progress = if reversed { 1.0 - progress } else { progress };
        TweenSample::running(self.from + (self.to - self.from) * self.ease.apply(progress))
    }

    fn final_value(&self) -> f64 {
        match self.repeat {
            // Odd number of yoyo runs ends back at the start.
            Repeat::Count(extra) if self.yoyo && extra % 2 == 1 => self.from,
            _ => self.to,
        }
    }
}

/// Result of sampling a tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSample {
    pub value: f64,
    pub finished: bool,
}

impl TweenSample {
    fn running(value: f64) -> Self {
        Self {
            value,
            finished: false,
        }
    }

    fn finished(value: f64) -> Self {
        Self {
            value,
            finished: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Repeat, TweenSpec};

    #[test]
    fn holds_start_value_during_delay() {
        let spec = TweenSpec::new(10.0, 20.0, 1.0).delay(0.5);
        let sample = spec.sample(0.25);
        assert_eq!(sample.value, 10.0);
        assert!(!sample.finished);
    }

    #[test]
    fn single_run_finishes_at_target() {
        let spec = TweenSpec::new(0.0, 100.0, 2.0);
        assert_eq!(spec.sample(1.0).value, 50.0);
        let done = spec.sample(2.5);
        assert!(done.finished);
        assert_eq!(done.value, 100.0);
    }

    #[test]
    fn yoyo_plays_backwards_on_odd_cycles() {
        let spec = TweenSpec::new(0.0, 100.0, 1.0)
            .repeat(Repeat::Infinite)
            .yoyo(true);
        assert_eq!(spec.sample(0.25).value, 25.0);
        assert_eq!(spec.sample(1.25).value, 75.0);
        assert_eq!(spec.sample(2.25).value, 25.0);
        assert!(!spec.sample(1_000.5).finished);
    }

    #[test]
    fn finite_yoyo_with_one_repeat_ends_at_start() {
        let spec = TweenSpec::new(0.0, 1.0, 1.0).repeat(Repeat::Count(1)).yoyo(true);
        let done = spec.sample(3.0);
        assert!(done.finished);
        assert_eq!(done.value, 0.0);
    }

    #[test]
    fn zero_duration_jumps_to_target() {
        let done = TweenSpec::new(1.0, 2.0, 0.0).sample(0.1);
        assert!(done.finished);
        assert_eq!(done.value, 2.0);
    }
}
