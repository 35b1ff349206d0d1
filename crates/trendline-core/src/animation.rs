// File: crates/trendline-core/src/animation.rs
// Summary: Frame-driven value animator (scalars, ranges, colors) and a wall-clock frame ticker.
// Notes:
// - Animators never read the clock themselves. The owner advances them once per
//   frame with the elapsed delta, so `current()` is the eased value at the last tick
//   and rendering stays a pure read.

use std::time::{Duration, Instant};

use skia_safe as skia;

use crate::geometry::ValueRange;

/// Types that can be linearly interpolated between two values.
pub trait Interpolate: Copy + PartialEq {
    fn interpolate(start: Self, end: Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(start: Self, end: Self, t: f64) -> Self {
        start + (end - start) * t
    }
}

impl Interpolate for ValueRange {
    fn interpolate(start: Self, end: Self, t: f64) -> Self {
        ValueRange {
            lower: f64::interpolate(start.lower, end.lower, t),
            upper: f64::interpolate(start.upper, end.upper, t),
        }
    }
}

impl Interpolate for skia::Color {
    fn interpolate(start: Self, end: Self, t: f64) -> Self {
        let ch = |a: u8, b: u8| -> u8 { f64::interpolate(a as f64, b as f64, t).round().clamp(0.0, 255.0) as u8 };
        skia::Color::from_argb(
            ch(start.a(), end.a()),
            ch(start.r(), end.r()),
            ch(start.g(), end.g()),
            ch(start.b(), end.b()),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    #[default]
    EaseInOut,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// Interpolates one value toward a target over a duration.
#[derive(Clone, Debug)]
pub struct ValueAnimator<T: Interpolate> {
    start: T,
    end: T,
    current: T,
    elapsed: Duration,
    duration: Duration,
    easing: Easing,
}

impl<T: Interpolate> ValueAnimator<T> {
    pub fn new(value: T) -> Self {
        Self { start: value, end: value, current: value, elapsed: Duration::ZERO, duration: Duration::ZERO, easing: Easing::default() }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Jump to `value`, cancelling any in-flight animation.
    pub fn set_immediate(&mut self, value: T) {
        self.start = value;
        self.end = value;
        self.current = value;
        self.elapsed = Duration::ZERO;
        self.duration = Duration::ZERO;
    }

    /// Animate from the current value to `target`. A zero duration jumps.
    /// Every call re-bases at the current value and restarts the timer;
    /// callers skip the call when the target has not changed.
    pub fn animate(&mut self, target: T, duration: Duration) {
        if duration.is_zero() {
            self.set_immediate(target);
            return;
        }
        self.start = self.current;
        self.end = target;
        self.elapsed = Duration::ZERO;
        self.duration = duration;
    }

    /// Advance by `dt`. Returns true when the value moved this frame,
    /// including the final snap onto the target.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if !self.is_animating() {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.set_immediate(self.end);
            return true;
        }
        let fraction = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.current = T::interpolate(self.start, self.end, self.easing.apply(fraction));
        true
    }

    #[inline]
    pub fn current(&self) -> T { self.current }
    #[inline]
    pub fn end(&self) -> T { self.end }
    #[inline]
    pub fn start(&self) -> T { self.start }

    pub fn is_animating(&self) -> bool {
        !self.duration.is_zero()
    }
}

impl<T: Interpolate + Default> Default for ValueAnimator<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Measures wall-clock time between frames for hosts driving `tick`.
#[derive(Debug, Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self { Self::default() }

    /// Delta since the previous call; zero on the first frame.
    pub fn tick(&mut self) -> Duration {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> Duration {
        let dt = self.last.map(|l| now.saturating_duration_since(l)).unwrap_or(Duration::ZERO);
        self.last = Some(now);
        dt
    }
}
