use std::sync::Arc;

use crate::model::{Step, StepSequence};

/// Logical position in the exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterState {
    Active { step_index: usize, remaining: u32 },
    /// Every step has been counted; only a reset leaves this state.
    Terminal,
}

/// Result of a single tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// One item counted, still inside the same step.
    Decremented { step_index: usize, remaining: u32 },
    /// Last item of `from` counted; `to` is now active with its full count.
    StepCompleted { from: usize, to: usize },
    /// Last item of the last step counted.
    Finished { from: usize },
    /// Tap arrived in the terminal state.
    Ignored,
    /// Tap arrived while a transition was still animating.
    Busy,
}

/// The counting state machine: step index plus remaining items.
#[derive(Debug, Clone)]
pub struct Counter {
    steps: Arc<StepSequence>,
    state: CounterState,
}

impl Counter {
    #[must_use]
    pub fn new(steps: Arc<StepSequence>) -> Self {
        let state = initial_state(&steps);
        Self { steps, state }
    }

    #[must_use]
    pub fn steps(&self) -> &Arc<StepSequence> {
        &self.steps
    }

    #[must_use]
    pub fn state(&self) -> CounterState {
        self.state
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self.state, CounterState::Terminal)
    }

    /// Active step index, or `steps.len()` once terminal.
    #[must_use]
    pub fn step_index(&self) -> usize {
        match self.state {
            CounterState::Active { step_index, .. } => step_index,
            CounterState::Terminal => self.steps.len(),
        }
    }

    /// Items left in the active step, or 0 once terminal.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        match self.state {
            CounterState::Active { remaining, .. } => remaining,
            CounterState::Terminal => 0,
        }
    }

    #[must_use]
    pub fn current_step(&self) -> Option<&Step> {
        match self.state {
            CounterState::Active { step_index, .. } => self.steps.get(step_index),
            CounterState::Terminal => None,
        }
    }

    /// Fraction of the active step already counted, in [0, 1). Terminal reports 1.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.current_step()
            .map_or(1.0, |step| step_progress(step.target_count(), self.remaining()))
    }

    /// Count one item.
    pub fn tap(&mut self) -> TapOutcome {
        let CounterState::Active {
            step_index,
            remaining,
        } = self.state
        else {
            tracing::debug!("tap ignored: all steps completed");
            return TapOutcome::Ignored;
        };

        if remaining > 1 {
            let remaining = remaining - 1;
            self.state = CounterState::Active {
                step_index,
                remaining,
            };
            return TapOutcome::Decremented {
                step_index,
                remaining,
            };
        }

        let next = step_index + 1;
        match self.steps.get(next) {
            Some(step) => {
                self.state = CounterState::Active {
                    step_index: next,
                    remaining: step.target_count(),
                };
                TapOutcome::StepCompleted {
                    from: step_index,
                    to: next,
                }
            }
            None => {
                self.state = CounterState::Terminal;
                TapOutcome::Finished { from: step_index }
            }
        }
    }

    /// Back to the first step with its full count, from any state.
    pub fn reset(&mut self) {
        self.state = initial_state(&self.steps);
    }
}

fn initial_state(steps: &StepSequence) -> CounterState {
    CounterState::Active {
        step_index: 0,
        remaining: steps.first().target_count(),
    }
}

/// `(target - remaining) / target`.
#[must_use]
pub fn step_progress(target: u32, remaining: u32) -> f32 {
    let target = target.max(1);
    let done = target.saturating_sub(remaining);
    #[allow(clippy::cast_precision_loss)]
    let ratio = done as f32 / target as f32;
    ratio
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Palette, Rgb};
    use proptest::prelude::*;

    fn classic() -> Counter {
        Counter::new(Arc::new(Palette::Midnight.default_steps().unwrap()))
    }

    fn custom(counts: &[u32]) -> Counter {
        let steps = counts
            .iter()
            .map(|count| Step::new(*count, "item", Rgb::new(0, 0, 0), None).unwrap())
            .collect();
        Counter::new(Arc::new(StepSequence::new(steps).unwrap()))
    }

    #[test]
    fn starts_at_first_step_with_full_count() {
        let counter = classic();
        assert_eq!(counter.step_index(), 0);
        assert_eq!(counter.remaining(), 5);
        assert!(counter.progress().abs() < f32::EPSILON);
        assert_eq!(
            counter.state(),
            CounterState::Active {
                step_index: 0,
                remaining: 5
            }
        );
    }

    #[test]
    fn five_taps_advance_to_second_step() {
        let mut counter = classic();
        for _ in 0..4 {
            assert!(matches!(counter.tap(), TapOutcome::Decremented { .. }));
        }
        assert_eq!(counter.tap(), TapOutcome::StepCompleted { from: 0, to: 1 });
        assert_eq!(counter.step_index(), 1);
        assert_eq!(counter.remaining(), 4);

        assert_eq!(
            counter.tap(),
            TapOutcome::Decremented {
                step_index: 1,
                remaining: 3
            }
        );
    }

    #[test]
    fn fifteen_taps_reach_terminal() {
        let mut counter = classic();
        for _ in 0..14 {
            counter.tap();
            assert!(!counter.is_terminal());
        }
        assert_eq!(counter.tap(), TapOutcome::Finished { from: 4 });
        assert!(counter.is_terminal());
        assert_eq!(counter.step_index(), 5);
        assert!((counter.progress() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn tap_in_terminal_state_is_a_no_op() {
        let mut counter = classic();
        for _ in 0..15 {
            counter.tap();
        }
        let before = counter.state();
        assert_eq!(counter.tap(), TapOutcome::Ignored);
        assert_eq!(counter.tap(), TapOutcome::Ignored);
        assert_eq!(counter.state(), before);
    }

    #[test]
    fn reset_after_three_taps_restores_full_count() {
        let mut counter = classic();
        for _ in 0..3 {
            counter.tap();
        }
        assert_eq!(counter.remaining(), 2);
        counter.reset();
        assert_eq!(counter.step_index(), 0);
        assert_eq!(counter.remaining(), 5);
    }

    #[test]
    fn reset_leaves_terminal_state() {
        let mut counter = custom(&[1]);
        assert_eq!(counter.tap(), TapOutcome::Finished { from: 0 });
        counter.reset();
        assert_eq!(
            counter.state(),
            CounterState::Active {
                step_index: 0,
                remaining: 1
            }
        );
    }

    #[test]
    fn step_progress_is_fraction_counted() {
        assert!((step_progress(4, 4)).abs() < f32::EPSILON);
        assert!((step_progress(4, 1) - 0.75).abs() < f32::EPSILON);
        assert!((step_progress(4, 0) - 1.0).abs() < f32::EPSILON);
    }

    proptest! {
        #[test]
        fn progress_stays_below_one_while_active(
            counts in prop::collection::vec(1u32..8, 1..7),
            taps in 0usize..60,
        ) {
            let mut counter = custom(&counts);
            for _ in 0..taps {
                counter.tap();
                if !counter.is_terminal() {
                    let progress = counter.progress();
                    prop_assert!((0.0..1.0).contains(&progress));
                    let target = counter.current_step().unwrap().target_count();
                    prop_assert!((1..=target).contains(&counter.remaining()));
                }
            }
        }

        #[test]
        fn total_count_taps_visit_every_step_once(
            counts in prop::collection::vec(1u32..8, 1..7),
        ) {
            let mut counter = custom(&counts);
            let total: u32 = counts.iter().sum();
            let mut completed = Vec::new();
            for tap in 0..total {
                prop_assert!(!counter.is_terminal(), "terminal early at tap {}", tap);
                match counter.tap() {
                    TapOutcome::StepCompleted { from, .. } | TapOutcome::Finished { from } => {
                        completed.push(from);
                    }
                    _ => {}
                }
            }
            prop_assert!(counter.is_terminal());
            prop_assert_eq!(completed, (0..counts.len()).collect::<Vec<_>>());
        }

        #[test]
        fn reset_restores_initial_state_from_anywhere(
            counts in prop::collection::vec(1u32..8, 1..7),
            taps in 0usize..60,
        ) {
            let mut counter = custom(&counts);
            for _ in 0..taps {
                counter.tap();
            }
            counter.reset();
            prop_assert_eq!(counter.step_index(), 0);
            prop_assert_eq!(counter.remaining(), counts[0]);
        }
    }
}
