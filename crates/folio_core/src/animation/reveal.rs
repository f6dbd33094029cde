//! Entrance animations for guestbook UI elements.
//!
//! # Responsibility
//! - Define the fade/slide presets for the section title, the form and a
//!   newly posted message.
//! - Run one preset inside its own `AnimationContext`.
//!
//! # Invariants
//! - Every preset ends at `RevealFrame::SETTLED`.
//! - Reverting or dropping a reveal leaves the frame settled, so an
//!   interrupted entrance never strands an element half-visible.

use crate::animation::context::{AnimationContext, AnimationTarget, Property, TargetId};
use crate::animation::ease::Ease;
use crate::animation::tween::TweenSpec;
use serde::{Deserialize, Serialize};

/// Which element is entering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealKind {
    /// Section title: rises 50px over 1s.
    Section,
    /// Submission form: rises 30px over 0.8s.
    Form,
    /// Freshly posted message: pops in with overshoot.
    NewMessage,
}

impl RevealKind {
    /// Parses `section`, `form` or `new_message`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "section" => Some(Self::Section),
            "form" => Some(Self::Form),
            "new_message" => Some(Self::NewMessage),
            _ => None,
        }
    }
}

/// Style values of the element being revealed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealFrame {
    pub opacity: f64,
    /// Vertical offset in CSS pixels; positive is below the resting spot.
    pub y: f64,
    pub scale: f64,
}

impl RevealFrame {
    /// Fully visible at the resting position.
    pub const SETTLED: Self = Self {
        opacity: 1.0,
        y: 0.0,
        scale: 1.0,
    };
}

impl Default for RevealFrame {
    fn default() -> Self {
        Self::SETTLED
    }
}

#[derive(Debug, Default)]
struct RevealSink(RevealFrame);

impl AnimationTarget for RevealSink {
    fn apply(&mut self, _target: TargetId, property: Property, value: f64) {
        match property {
            Property::Opacity => self.0.opacity = value,
            Property::Y => self.0.y = value,
            Property::Scale => self.0.scale = value,
            Property::X | Property::Rotation => {}
        }
    }
}

/// One running entrance animation.
pub struct Reveal {
    kind: RevealKind,
    context: AnimationContext<RevealSink>,
    running: bool,
}

impl Reveal {
    /// Starts `kind`; the first frame is the hidden starting state.
    pub fn start(kind: RevealKind) -> Self {
        let mut context = AnimationContext::new(RevealSink::default());
        let settled = RevealFrame::SETTLED;

        let (rise_px, duration, ease) = match kind {
            RevealKind::Section => (50.0, 1.0, Ease::Power3Out),
            RevealKind::Form => (30.0, 0.8, Ease::Power3Out),
            RevealKind::NewMessage => (20.0, 0.5, Ease::BackOut { overshoot: 1.7 }),
        };
        let tween = |from: f64, to: f64| TweenSpec::new(from, to, duration).ease(ease);

        context.tween(0, Property::Opacity, settled.opacity, tween(0.0, 1.0));
        context.tween(0, Property::Y, settled.y, tween(rise_px, 0.0));
        if kind == RevealKind::NewMessage {
            context.tween(0, Property::Scale, settled.scale, tween(0.9, 1.0));
        }

        Self {
            kind,
            context,
            running: true,
        }
    }

    /// Advances by `dt` seconds and returns the new frame.
    pub fn tick(&mut self, dt: f64) -> RevealFrame {
        if self.running {
            self.running = self.context.tick(dt) > 0;
        }
        self.frame()
    }

    pub fn frame(&self) -> RevealFrame {
        self.context.sink().0
    }

    pub fn kind(&self) -> RevealKind {
        self.kind
    }

    pub fn is_finished(&self) -> bool {
        !self.running
    }

    /// Stops early and snaps to the settled frame.
    pub fn finish(&mut self) {
        self.context.revert();
        self.running = false;
    }
}
