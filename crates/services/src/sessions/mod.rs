mod service;
mod workflow;

// Public API of the session subsystem.
pub use service::{GroundingSession, LifecycleSignal, ResetReason};
pub use workflow::ExerciseService;
