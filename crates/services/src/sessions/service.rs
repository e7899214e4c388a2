use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use grounding_core::model::{ExerciseSettings, Step, StepSequence};
use grounding_core::{Clock, Counter, Sequencer, SequencerEvent, TapOutcome, VisibleFrame};

/// What triggered a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetReason {
    /// Reset control on screen.
    Manual,
    /// The app stopped being the foreground window.
    Inactive,
}

/// App-lifecycle notifications forwarded by the screen's subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleSignal {
    Active,
    Inactive,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// State owned by one mounted grounding screen.
///
/// The counter holds the logical position; the sequencer holds what is on screen.
/// Taps are refused while a step transition plays so the two never diverge by more
/// than one transition.
pub struct GroundingSession {
    settings: Arc<ExerciseSettings>,
    counter: Counter,
    sequencer: Sequencer,
    clock: Clock,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl GroundingSession {
    /// `started_at` comes from `clock`, so a fixed clock keeps timestamps deterministic.
    #[must_use]
    pub fn new(settings: Arc<ExerciseSettings>, clock: Clock) -> Self {
        let steps = Arc::new(settings.steps().clone());
        let counter = Counter::new(Arc::clone(&steps));
        let sequencer = Sequencer::new(steps, settings.timings());
        Self {
            settings,
            counter,
            sequencer,
            clock,
            started_at: clock.now(),
            completed_at: None,
        }
    }

    /// Count one item.
    pub fn tap(&mut self) -> TapOutcome {
        if self.sequencer.is_transitioning() {
            tracing::debug!(phase = ?self.sequencer.phase(), "tap ignored: transition in flight");
            return TapOutcome::Busy;
        }

        let outcome = self.counter.tap();
        match outcome {
            TapOutcome::Decremented {
                step_index,
                remaining,
            } => {
                tracing::debug!(step_index, remaining, "item counted");
                self.sequencer.count_down(step_index, remaining);
            }
            TapOutcome::StepCompleted { from, to } => {
                tracing::info!(from, to, "step completed");
                self.sequencer.begin_advance(to);
            }
            TapOutcome::Finished { from } => {
                let now = self.clock.now();
                self.completed_at = Some(now);
                tracing::info!(
                    from,
                    elapsed_secs = (now - self.started_at).num_seconds(),
                    "all steps completed"
                );
                self.sequencer.begin_finish();
            }
            TapOutcome::Ignored | TapOutcome::Busy => {}
        }
        outcome
    }

    /// Back to the first step. Overrides any transition in flight.
    pub fn reset(&mut self, reason: ResetReason) {
        tracing::info!(
            ?reason,
            step_index = self.counter.step_index(),
            remaining = self.counter.remaining(),
            "exercise reset"
        );
        self.counter.reset();
        self.started_at = self.clock.now();
        self.completed_at = None;
        self.sequencer.begin_reset();
    }

    /// Returns `true` when the signal caused a reset.
    pub fn on_lifecycle(&mut self, signal: LifecycleSignal) -> bool {
        match signal {
            LifecycleSignal::Inactive if self.settings.reset_on_inactive() => {
                self.reset(ResetReason::Inactive);
                true
            }
            LifecycleSignal::Inactive | LifecycleSignal::Active => false,
        }
    }

    /// Advance animations by `dt`.
    pub fn tick(&mut self, dt: Duration) -> Vec<SequencerEvent> {
        self.sequencer.tick(dt)
    }

    #[must_use]
    pub fn frame(&self) -> VisibleFrame {
        self.sequencer.frame()
    }

    #[must_use]
    pub fn settings(&self) -> &ExerciseSettings {
        &self.settings
    }

    #[must_use]
    pub fn steps(&self) -> &StepSequence {
        self.counter.steps()
    }

    /// Step currently rendered, which lags the logical step during a transition.
    #[must_use]
    pub fn visible_step(&self) -> &Step {
        let index = self.sequencer.visible_step();
        self.steps().get(index).unwrap_or_else(|| self.steps().first())
    }

    #[must_use]
    pub fn step_index(&self) -> usize {
        self.counter.step_index()
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.counter.remaining()
    }

    #[must_use]
    pub fn progress(&self) -> f32 {
        self.counter.progress()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.counter.is_terminal()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.sequencer.is_animating()
    }

    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.sequencer.is_transitioning()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Time from start (or last reset) to completion.
    #[must_use]
    pub fn elapsed(&self) -> Option<chrono::Duration> {
        self.completed_at.map(|done| done - self.started_at)
    }

    /// Replace the clock; later timestamps use it.
    pub fn set_clock(&mut self, clock: Clock) {
        self.clock = clock;
    }
}
