mod color;
mod palette;
mod settings;
mod step;

pub use color::{ColorError, Rgb};
pub use palette::{Palette, UnknownPalette};
pub use settings::{
    AnimationTimings, ExerciseSettings, MAX_ANIMATION_MS, TimingError, TimingsDraft,
};
pub use step::{DEFAULT_STEPS, Step, StepDraft, StepError, StepSequence};
