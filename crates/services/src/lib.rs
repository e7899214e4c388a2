#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod sessions;

pub use grounding_core::Clock;

pub use config::{ConfigSource, ExerciseFile};
pub use error::ConfigError;
pub use sessions::{ExerciseService, GroundingSession, LifecycleSignal, ResetReason};
