use std::sync::Arc;

use grounding_core::Clock;
use grounding_core::model::{ExerciseSettings, Palette};

use crate::config::ConfigSource;
use crate::error::ConfigError;
use super::service::GroundingSession;

/// Hands out grounding sessions that share one validated configuration.
#[derive(Clone)]
pub struct ExerciseService {
    clock: Clock,
    settings: Arc<ExerciseSettings>,
}

impl ExerciseService {
    #[must_use]
    pub fn new(clock: Clock, settings: ExerciseSettings) -> Self {
        Self {
            clock,
            settings: Arc::new(settings),
        }
    }

    /// Build the service from a configuration source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the source cannot be loaded or validated.
    pub fn from_source(clock: Clock, source: &ConfigSource) -> Result<Self, ConfigError> {
        Ok(Self::new(clock, source.load()?))
    }

    /// Classic sequence in the given palette.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Steps` only if the built-in table is invalid.
    pub fn with_palette(clock: Clock, palette: Palette) -> Result<Self, ConfigError> {
        Ok(Self::new(clock, ExerciseSettings::for_palette(palette)?))
    }

    #[must_use]
    pub fn settings(&self) -> Arc<ExerciseSettings> {
        Arc::clone(&self.settings)
    }

    /// Fresh session at the first step.
    #[must_use]
    pub fn start_session(&self) -> GroundingSession {
        tracing::debug!(palette = %self.settings.palette(), "grounding session started");
        GroundingSession::new(Arc::clone(&self.settings), self.clock)
    }
}
