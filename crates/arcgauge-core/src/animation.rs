//! Easing curves and explicit tweens.
//!
//! A [`Tween`] is a plain `{from, to, start_time, duration, easing}` record.
//! Nothing runs on its own: the host's render loop samples it with the
//! current time.

use serde::{Deserialize, Serialize};

/// Standard easing functions for animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Linear interpolation (no easing)
    #[default]
    Linear,
    /// Ease in (slow start)
    EaseIn,
    /// Ease out (slow end)
    EaseOut,
    /// Ease in and out (slow start and end)
    EaseInOut,
    /// Cubic ease in and out
    CubicInOut,
}

impl Easing {
    /// Apply easing function to a normalized time value (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => (1.0 - t).mul_add(-(1.0 - t), 1.0),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0f64).mul_add(t, 2.0).powi(2) / 2.0
                }
            }
            Self::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0f64).mul_add(t, 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// A time-bounded interpolation between two values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    /// Start value
    pub from: f64,
    /// End value
    pub to: f64,
    /// Time (seconds) at which the tween starts
    pub start_time: f64,
    /// Duration in seconds
    pub duration: f64,
    /// Easing function
    pub easing: Easing,
}

impl Tween {
    /// Create a new linear tween.
    #[must_use]
    pub const fn new(from: f64, to: f64, start_time: f64, duration: f64) -> Self {
        Self {
            from,
            to,
            start_time,
            duration,
            easing: Easing::Linear,
        }
    }

    /// A tween that already sits at `value`.
    #[must_use]
    pub const fn at_rest(value: f64) -> Self {
        Self::new(value, value, 0.0, 0.0)
    }

    /// Set easing function.
    #[must_use]
    pub const fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Normalized progress at `now`, from 0.0 to 1.0.
    #[must_use]
    pub fn progress(&self, now: f64) -> f64 {
        if self.duration > 0.0 {
            ((now - self.start_time) / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Value at `now`. Returns exactly `to` once finished.
    #[must_use]
    pub fn sample(&self, now: f64) -> f64 {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.to;
        }
        (self.to - self.from).mul_add(self.easing.apply(t), self.from)
    }

    /// Whether the tween has reached its end at `now`.
    #[must_use]
    pub fn is_finished(&self, now: f64) -> bool {
        self.progress(now) >= 1.0
    }

    /// A new tween from the value at `now` towards `to`, keeping the easing.
    #[must_use]
    pub fn retarget(&self, now: f64, to: f64, duration: f64) -> Self {
        Self::new(self.sample(now), to, now, duration).with_easing(self.easing)
    }

    /// Jump to the end value.
    #[must_use]
    pub const fn settled(&self) -> Self {
        Self::at_rest(self.to)
    }
}
