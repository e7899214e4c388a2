#![forbid(unsafe_code)]

pub mod animation;
pub mod counter;
pub mod model;
pub mod sequencer;
pub mod time;

pub use counter::{Counter, CounterState, TapOutcome};
pub use sequencer::{Sequencer, SequencerEvent, TransitionKind, TransitionPhase, VisibleFrame};
pub use time::Clock;
