//! Time-based fade primitives used by the sequencer.
//!
//! A [`Fade`] only accumulates elapsed time; the caller decides when to tick it.
//! Nothing here knows about a rendering backend.

use std::time::Duration;

/// Maps `t` in [0, 1] to an eased value in [0, 1].
pub type EasingFn = fn(f32) -> f32;

#[inline]
#[must_use]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-out (slow end).
#[inline]
#[must_use]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out.
#[inline]
#[must_use]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Progress from 0.0 to 1.0 over a fixed duration.
///
/// Elapsed time is kept as a [`Duration`] so repeated small ticks do not drift, and
/// the time spent past the end is available through [`Fade::overshoot`] for chaining.
#[derive(Debug, Clone, Copy)]
pub struct Fade {
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl Fade {
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            easing: linear,
        }
    }

    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Start the fade as if `progress` (0..=1, linear) had already elapsed.
    #[must_use]
    pub fn starting_at(mut self, progress: f32) -> Self {
        let progress = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.elapsed = self.duration.mul_f32(progress);
        self
    }

    pub fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Linear progress before easing.
    #[must_use]
    pub fn raw_progress(&self) -> f32 {
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        #[allow(clippy::cast_possible_truncation)]
        let t = t as f32;
        t.clamp(0.0, 1.0)
    }

    /// Eased progress.
    #[must_use]
    pub fn value(&self) -> f32 {
        (self.easing)(self.raw_progress())
    }

    /// Time accumulated past completion.
    #[must_use]
    pub fn overshoot(&self) -> Duration {
        self.elapsed.saturating_sub(self.duration)
    }
}

/// Interpolate `from → to` by an eased `t`.
#[inline]
#[must_use]
pub fn mix(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_100: Duration = Duration::from_millis(100);

    #[test]
    fn easing_endpoints() {
        for easing in [linear as EasingFn, ease_out, ease_in_out] {
            assert!((easing(0.0)).abs() < f32::EPSILON);
            assert!((easing(1.0) - 1.0).abs() < f32::EPSILON);
            assert!((easing(-3.0)).abs() < f32::EPSILON);
            assert!((easing(4.0) - 1.0).abs() < f32::EPSILON);
        }
        assert!(ease_out(0.5) > 0.5);
    }

    #[test]
    fn fade_completes_and_reports_overshoot() {
        let mut fade = Fade::new(MS_100);
        fade.tick(Duration::from_millis(40));
        assert!(!fade.is_complete());
        assert!((fade.value() - 0.4).abs() < 1e-4);

        fade.tick(Duration::from_millis(90));
        assert!(fade.is_complete());
        assert!((fade.value() - 1.0).abs() < f32::EPSILON);
        assert_eq!(fade.overshoot(), Duration::from_millis(30));
    }

    #[test]
    fn zero_duration_fade_completes_on_first_tick() {
        let mut fade = Fade::new(Duration::ZERO);
        assert!(!fade.is_complete());
        fade.tick(Duration::from_nanos(1));
        assert!(fade.is_complete());
    }

    #[test]
    fn starting_at_skips_ahead() {
        let fade = Fade::new(MS_100).starting_at(0.25);
        assert!((fade.raw_progress() - 0.25).abs() < 1e-4);
        let fade = Fade::new(MS_100).starting_at(f32::NAN);
        assert!(fade.raw_progress().abs() < f32::EPSILON);
    }

    #[test]
    fn mix_interpolates() {
        assert!((mix(1.0, 0.0, 0.25) - 0.75).abs() < f32::EPSILON);
        assert!((mix(0.2, 1.0, 2.0) - 1.0).abs() < f32::EPSILON);
    }
}
