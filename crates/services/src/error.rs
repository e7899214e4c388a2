//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use grounding_core::model::{StepError, TimingError, UnknownPalette};

/// Errors emitted while loading exercise configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Steps(#[from] StepError),
    #[error(transparent)]
    Timings(#[from] TimingError),
    #[error(transparent)]
    Palette(#[from] UnknownPalette),
}
