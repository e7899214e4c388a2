use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::palette::Palette;
use crate::model::step::{StepError, StepSequence};

/// Upper bound for any single animation; transitions must stay short.
pub const MAX_ANIMATION_MS: u64 = 5_000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TimingError {
    #[error("{name} must be between 1 and {MAX_ANIMATION_MS} ms, got {value}")]
    OutOfRange { name: &'static str, value: u64 },
}

/// Durations of every animation the sequencer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationTimings {
    progress_fill: Duration,
    label_fade: Duration,
    color_fade: Duration,
    count_fade: Duration,
}

impl AnimationTimings {
    /// Progress fill 200ms, label fade 200ms, color cross-fade 300ms,
    /// count morph 100ms per half.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            progress_fill: Duration::from_millis(200),
            label_fade: Duration::from_millis(200),
            color_fade: Duration::from_millis(300),
            count_fade: Duration::from_millis(100),
        }
    }

    #[must_use]
    pub fn progress_fill(&self) -> Duration {
        self.progress_fill
    }

    #[must_use]
    pub fn label_fade(&self) -> Duration {
        self.label_fade
    }

    #[must_use]
    pub fn color_fade(&self) -> Duration {
        self.color_fade
    }

    /// Duration of one half (out or in) of the count morph.
    #[must_use]
    pub fn count_fade(&self) -> Duration {
        self.count_fade
    }
}

impl Default for AnimationTimings {
    fn default() -> Self {
        Self::standard()
    }
}

/// Millisecond timings as written in configuration; missing fields use the standard values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingsDraft {
    pub progress_fill_ms: u64,
    pub label_fade_ms: u64,
    pub color_fade_ms: u64,
    pub count_fade_ms: u64,
}

impl Default for TimingsDraft {
    fn default() -> Self {
        Self {
            progress_fill_ms: 200,
            label_fade_ms: 200,
            color_fade_ms: 300,
            count_fade_ms: 100,
        }
    }
}

impl TimingsDraft {
    /// # Errors
    ///
    /// Returns `TimingError::OutOfRange` for the first value outside `1..=MAX_ANIMATION_MS`.
    pub fn validate(self) -> Result<AnimationTimings, TimingError> {
        let check = |name: &'static str, value: u64| {
            if (1..=MAX_ANIMATION_MS).contains(&value) {
                Ok(Duration::from_millis(value))
            } else {
                Err(TimingError::OutOfRange { name, value })
            }
        };

        Ok(AnimationTimings {
            progress_fill: check("progress_fill_ms", self.progress_fill_ms)?,
            label_fade: check("label_fade_ms", self.label_fade_ms)?,
            color_fade: check("color_fade_ms", self.color_fade_ms)?,
            count_fade: check("count_fade_ms", self.count_fade_ms)?,
        })
    }
}

/// Everything a grounding screen is configured with.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseSettings {
    steps: StepSequence,
    timings: AnimationTimings,
    palette: Palette,
    reset_on_inactive: bool,
}

impl ExerciseSettings {
    #[must_use]
    pub fn new(steps: StepSequence, timings: AnimationTimings, palette: Palette) -> Self {
        Self {
            steps,
            timings,
            palette,
            reset_on_inactive: false,
        }
    }

    /// Classic sequence, standard timings, given palette.
    ///
    /// # Errors
    ///
    /// Only fails if the built-in step table is invalid.
    pub fn for_palette(palette: Palette) -> Result<Self, StepError> {
        Ok(Self::new(
            palette.default_steps()?,
            AnimationTimings::standard(),
            palette,
        ))
    }

    #[must_use]
    pub fn with_reset_on_inactive(mut self, reset_on_inactive: bool) -> Self {
        self.reset_on_inactive = reset_on_inactive;
        self
    }

    #[must_use]
    pub fn steps(&self) -> &StepSequence {
        &self.steps
    }

    #[must_use]
    pub fn timings(&self) -> AnimationTimings {
        self.timings
    }

    #[must_use]
    pub fn palette(&self) -> Palette {
        self.palette
    }

    #[must_use]
    pub fn reset_on_inactive(&self) -> bool {
        self.reset_on_inactive
    }
}
