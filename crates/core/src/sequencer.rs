//! Presentation sequencing for the grounding screen.
//!
//! The [`Sequencer`] tracks what is *visible* and lags the logical [`Counter`] while a
//! transition plays. A step change runs through explicit phases:
//!
//! ```text
//! ProgressFill → ExitFade → Swap → EnterFade
//! ```
//!
//! `Swap` is instantaneous: visible step, count, bar and background change together.
//! Time only moves through [`Sequencer::tick`], so any driver (a UI frame loop or a
//! test) gets the same result for the same sequence of ticks.
//!
//! [`Counter`]: crate::counter::Counter

use std::sync::Arc;
use std::time::Duration;

use crate::animation::{Fade, ease_in_out, ease_out, linear, mix};
use crate::counter::step_progress;
use crate::model::{AnimationTimings, Rgb, StepSequence};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionPhase {
    ProgressFill,
    ExitFade,
    Swap,
    EnterFade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    /// Current step finished, next step exists.
    Advance,
    /// Last step finished; fill the bar and stop.
    Finish,
    /// Back to the first step.
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerEvent {
    PhaseStarted {
        kind: TransitionKind,
        phase: TransitionPhase,
    },
    /// Visible state now shows `step_index` with `count`.
    Swapped { step_index: usize, count: u32 },
    /// Displayed digit changed in place.
    CountMorphed { count: u32 },
    Settled { kind: TransitionKind },
}

/// Snapshot of everything the screen renders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleFrame {
    pub step_index: usize,
    pub count: u32,
    pub label_opacity: f32,
    pub number_opacity: f32,
    /// Progress bar fill in [0, 1].
    pub progress: f32,
    pub background: Rgb,
    pub phase: Option<TransitionPhase>,
    /// The last step has been completed and the finish fill has played.
    pub finished: bool,
}

#[derive(Debug, Clone, Copy)]
struct BarTween {
    from: f32,
    to: f32,
    fade: Fade,
}

impl BarTween {
    fn settled(value: f32) -> Self {
        let mut fade = Fade::new(Duration::from_nanos(1));
        fade.tick(Duration::from_nanos(1));
        Self {
            from: value,
            to: value,
            fade,
        }
    }

    fn value(&self) -> f32 {
        mix(self.from, self.to, self.fade.value())
    }

    fn retarget(&mut self, to: f32, duration: Duration) {
        self.from = self.value();
        self.to = to;
        self.fade = Fade::new(duration).easing(ease_out);
    }

    fn is_complete(&self) -> bool {
        self.fade.is_complete()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MorphHalf {
    Out,
    In,
}

/// In-place cross-fade of the displayed number.
#[derive(Debug, Clone, Copy)]
struct CountMorph {
    half: MorphHalf,
    fade: Fade,
    pending: u32,
}

impl CountMorph {
    fn start(pending: u32, duration: Duration) -> Self {
        Self {
            half: MorphHalf::Out,
            fade: Fade::new(duration),
            pending,
        }
    }

    fn opacity(&self) -> f32 {
        match self.half {
            MorphHalf::Out => 1.0 - self.fade.value(),
            MorphHalf::In => self.fade.value(),
        }
    }

    /// Point the morph at a new digit without jumping back to full opacity.
    fn retarget(&mut self, pending: u32, duration: Duration) {
        if self.half == MorphHalf::In {
            let opacity = self.opacity();
            self.half = MorphHalf::Out;
            self.fade = Fade::new(duration).starting_at(1.0 - opacity);
        }
        self.pending = pending;
    }
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    kind: TransitionKind,
    phase: TransitionPhase,
    target_step: usize,
    target_count: u32,
    from_color: Rgb,
    to_color: Rgb,
    bar_from: f32,
    /// Drives the current phase; during `ExitFade` it is the label fade.
    fade: Fade,
    color: Fade,
}

impl Transition {
    fn label_opacity(&self) -> f32 {
        match self.phase {
            TransitionPhase::ProgressFill => 1.0,
            TransitionPhase::ExitFade => 1.0 - self.fade.value(),
            TransitionPhase::Swap => 0.0,
            TransitionPhase::EnterFade => self.fade.value(),
        }
    }

    fn background(&self) -> Rgb {
        match self.phase {
            TransitionPhase::ProgressFill => self.from_color,
            TransitionPhase::ExitFade => {
                Rgb::lerp(self.from_color, self.to_color, self.color.value())
            }
            TransitionPhase::Swap | TransitionPhase::EnterFade => self.to_color,
        }
    }

    fn progress(&self) -> f32 {
        match (self.phase, self.kind) {
            (TransitionPhase::ProgressFill, _) => mix(self.bar_from, 1.0, self.fade.value()),
            (TransitionPhase::ExitFade, TransitionKind::Reset) => self.bar_from,
            (TransitionPhase::ExitFade, _) => 1.0,
            (TransitionPhase::Swap | TransitionPhase::EnterFade, _) => 0.0,
        }
    }
}

/// Keeps visible state in step with logical state, one transition at a time.
#[derive(Debug, Clone)]
pub struct Sequencer {
    steps: Arc<StepSequence>,
    timings: AnimationTimings,
    visible_step: usize,
    visible_count: u32,
    background: Rgb,
    bar: BarTween,
    morph: Option<CountMorph>,
    transition: Option<Transition>,
    finished: bool,
}

impl Sequencer {
    #[must_use]
    pub fn new(steps: Arc<StepSequence>, timings: AnimationTimings) -> Self {
        let first = steps.first();
        let visible_count = first.target_count();
        let background = first.color();
        Self {
            steps,
            timings,
            visible_step: 0,
            visible_count,
            background,
            bar: BarTween::settled(0.0),
            morph: None,
            transition: None,
            finished: false,
        }
    }

    #[must_use]
    pub fn timings(&self) -> AnimationTimings {
        self.timings
    }

    /// A step transition (advance, finish or reset) is playing.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Anything at all is still moving on screen.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.transition.is_some() || self.morph.is_some() || !self.bar.is_complete()
    }

    #[must_use]
    pub fn phase(&self) -> Option<TransitionPhase> {
        self.transition.map(|transition| transition.phase)
    }

    #[must_use]
    pub fn transition_kind(&self) -> Option<TransitionKind> {
        self.transition.map(|transition| transition.kind)
    }

    #[must_use]
    pub fn visible_step(&self) -> usize {
        self.visible_step
    }

    #[must_use]
    pub fn visible_count(&self) -> u32 {
        self.visible_count
    }

    /// One item counted inside `step_index`, `remaining` left.
    pub fn count_down(&mut self, step_index: usize, remaining: u32) {
        let target = self
            .steps
            .get(step_index)
            .map_or(remaining, |step| step.target_count());
        self.bar
            .retarget(step_progress(target, remaining), self.timings.progress_fill());
        self.morph_to(remaining);
    }

    /// The visible step is complete and `to` should come next.
    pub fn begin_advance(&mut self, to: usize) {
        let Some(step) = self.steps.get(to) else {
            return;
        };
        let (target_count, to_color) = (step.target_count(), step.color());
        self.start_transition(
            TransitionKind::Advance,
            TransitionPhase::ProgressFill,
            to,
            target_count,
            to_color,
        );
    }

    /// The last step is complete.
    pub fn begin_finish(&mut self) {
        let (step, color) = (self.visible_step, self.current_background());
        self.start_transition(
            TransitionKind::Finish,
            TransitionPhase::ProgressFill,
            step,
            0,
            color,
        );
    }

    /// Run the reset sequence towards the first step, overriding whatever is in flight.
    ///
    /// Returns `false` when the screen already shows the settled first step.
    pub fn begin_reset(&mut self) -> bool {
        let first = self.steps.first();
        let (target_count, to_color) = (first.target_count(), first.color());
        let displayed = self.morph.map_or(self.visible_count, |morph| morph.pending);
        if self.transition.is_none()
            && !self.finished
            && self.visible_step == 0
            && displayed == target_count
        {
            return false;
        }

        self.start_transition(
            TransitionKind::Reset,
            TransitionPhase::ExitFade,
            0,
            target_count,
            to_color,
        );
        true
    }

    fn morph_to(&mut self, count: u32) {
        let duration = self.timings.count_fade();
        match self.morph.as_mut() {
            Some(morph) => morph.retarget(count, duration),
            None if count != self.visible_count => {
                self.morph = Some(CountMorph::start(count, duration));
            }
            None => {}
        }
    }

    fn start_transition(
        &mut self,
        kind: TransitionKind,
        phase: TransitionPhase,
        target_step: usize,
        target_count: u32,
        to_color: Rgb,
    ) {
        let label_opacity = self.label_opacity();
        let from_color = self.current_background();
        let bar_from = self.current_progress();

        if matches!(kind, TransitionKind::Advance | TransitionKind::Finish) {
            // The completing tap counts the last item: show 0 while the bar fills.
            self.morph_to(0);
        }

        let fade = match phase {
            TransitionPhase::ProgressFill => {
                Fade::new(self.timings.progress_fill()).easing(ease_out)
            }
            _ => Fade::new(self.timings.label_fade())
                .easing(linear)
                .starting_at(1.0 - label_opacity),
        };

        tracing::debug!(?kind, target_step, "transition started");
        self.background = from_color;
        self.bar = BarTween::settled(bar_from);
        self.finished = false;
        self.transition = Some(Transition {
            kind,
            phase,
            target_step,
            target_count,
            from_color,
            to_color,
            bar_from,
            fade,
            color: Fade::new(self.timings.color_fade()).easing(ease_in_out),
        });
    }

    /// Advance every running animation by `dt`.
    pub fn tick(&mut self, dt: Duration) -> Vec<SequencerEvent> {
        let mut events = Vec::new();
        self.tick_morph(dt, &mut events);
        if self.transition.is_some() {
            self.tick_transition(dt, &mut events);
        } else {
            self.bar.fade.tick(dt);
        }
        events
    }

    fn tick_morph(&mut self, dt: Duration, events: &mut Vec<SequencerEvent>) {
        let Some(morph) = self.morph.as_mut() else {
            return;
        };
        morph.fade.tick(dt);
        if !morph.fade.is_complete() {
            return;
        }
        match morph.half {
            MorphHalf::Out => {
                let overshoot = morph.fade.overshoot();
                self.visible_count = morph.pending;
                morph.half = MorphHalf::In;
                morph.fade = Fade::new(self.timings.count_fade());
                morph.fade.tick(overshoot);
                events.push(SequencerEvent::CountMorphed {
                    count: self.visible_count,
                });
                if morph.fade.is_complete() {
                    self.morph = None;
                }
            }
            MorphHalf::In => self.morph = None,
        }
    }

    fn tick_transition(&mut self, dt: Duration, events: &mut Vec<SequencerEvent>) {
        let mut dt = dt;
        while let Some(transition) = self.transition.as_mut() {
            match transition.phase {
                TransitionPhase::ProgressFill => {
                    transition.fade.tick(dt);
                    if !transition.fade.is_complete() {
                        return;
                    }
                    dt = transition.fade.overshoot();
                    if transition.kind == TransitionKind::Finish {
                        self.transition = None;
                        self.bar = BarTween::settled(1.0);
                        self.finished = true;
                        events.push(SequencerEvent::Settled {
                            kind: TransitionKind::Finish,
                        });
                        return;
                    }
                    transition.phase = TransitionPhase::ExitFade;
                    transition.fade = Fade::new(self.timings.label_fade()).easing(linear);
                    transition.color = Fade::new(self.timings.color_fade()).easing(ease_in_out);
                    events.push(SequencerEvent::PhaseStarted {
                        kind: transition.kind,
                        phase: TransitionPhase::ExitFade,
                    });
                }
                TransitionPhase::ExitFade => {
                    transition.fade.tick(dt);
                    transition.color.tick(dt);
                    if !(transition.fade.is_complete() && transition.color.is_complete()) {
                        return;
                    }
                    // Both finished; the later one bounds the leftover time.
                    dt = transition.fade.overshoot().min(transition.color.overshoot());
                    transition.phase = TransitionPhase::Swap;
                }
                TransitionPhase::Swap => {
                    self.visible_step = transition.target_step;
                    self.visible_count = transition.target_count;
                    self.background = transition.to_color;
                    self.bar = BarTween::settled(0.0);
                    self.morph = None;
                    transition.phase = TransitionPhase::EnterFade;
                    transition.fade = Fade::new(self.timings.label_fade()).easing(linear);
                    events.push(SequencerEvent::Swapped {
                        step_index: self.visible_step,
                        count: self.visible_count,
                    });
                    events.push(SequencerEvent::PhaseStarted {
                        kind: transition.kind,
                        phase: TransitionPhase::EnterFade,
                    });
                }
                TransitionPhase::EnterFade => {
                    transition.fade.tick(dt);
                    if !transition.fade.is_complete() {
                        return;
                    }
                    let kind = transition.kind;
                    self.transition = None;
                    tracing::debug!(?kind, step = self.visible_step, "transition settled");
                    events.push(SequencerEvent::Settled { kind });
                    return;
                }
            }
        }
    }

    fn label_opacity(&self) -> f32 {
        self.transition
            .as_ref()
            .map_or(1.0, Transition::label_opacity)
    }

    fn number_opacity(&self) -> f32 {
        let morph = self.morph.as_ref().map_or(1.0, CountMorph::opacity);
        morph.min(self.label_opacity())
    }

    fn current_background(&self) -> Rgb {
        self.transition
            .as_ref()
            .map_or(self.background, Transition::background)
    }

    fn current_progress(&self) -> f32 {
        self.transition
            .as_ref()
            .map_or_else(|| self.bar.value(), Transition::progress)
    }

    #[must_use]
    pub fn frame(&self) -> VisibleFrame {
        VisibleFrame {
            step_index: self.visible_step,
            count: self.visible_count,
            label_opacity: self.label_opacity(),
            number_opacity: self.number_opacity(),
            progress: self.current_progress().clamp(0.0, 1.0),
            background: self.current_background(),
            phase: self.phase(),
            finished: self.finished,
        }
    }
}
