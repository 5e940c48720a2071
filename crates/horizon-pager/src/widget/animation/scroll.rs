//! Eased content-offset animation.

use std::time::{Duration, Instant};

use super::easing::{Easing, lerp_eased};

/// An in-flight scroll from one content offset to another.
///
/// The animation is a pure function of time: the owner samples
/// [`offset_at`](Self::offset_at) on every frame and stops once
/// [`is_finished`](Self::is_finished) reports `true`. The final sample is
/// exactly the target offset.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollAnimation {
    from: f32,
    to: f32,
    started: Instant,
    duration: Duration,
    easing: Easing,
}

impl ScrollAnimation {
    /// Create an animation starting at `started`.
    pub fn new(from: f32, to: f32, started: Instant, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            started,
            duration,
            easing,
        }
    }

    /// The offset the animation ends at.
    pub fn target(&self) -> f32 {
        self.to
    }

    /// The offset the animation started from.
    pub fn origin(&self) -> f32 {
        self.from
    }

    /// Progress in `0.0..=1.0` at `now`.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Whether the animation has reached its target at `now`.
    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    /// The content offset at `now`.
    pub fn offset_at(&self, now: Instant) -> f32 {
        if self.is_finished(now) {
            self.to
        } else {
            lerp_eased(self.easing, self.from, self.to, self.progress(now))
        }
    }
}
