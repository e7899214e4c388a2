use std::path::{Path, PathBuf};

use serde::Deserialize;

use grounding_core::model::{
    AnimationTimings, ExerciseSettings, Palette, StepDraft, StepSequence, TimingsDraft,
};

use crate::error::ConfigError;

/// Contents of an exercise JSON file.
///
/// Accepts either a bare array of steps or an object with optional sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExerciseFile {
    #[serde(default)]
    pub palette: Option<String>,
    #[serde(default)]
    pub steps: Option<Vec<StepDraft>>,
    #[serde(default)]
    pub timings: Option<TimingsDraft>,
    #[serde(default)]
    pub reset_on_inactive: Option<bool>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FileShape {
    Steps(Vec<StepDraft>),
    Full(ExerciseFile),
}

impl ExerciseFile {
    /// # Errors
    ///
    /// Returns the JSON error when `raw` is neither a step array nor an exercise object.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        let shape: FileShape = serde_json::from_str(raw)?;
        Ok(match shape {
            FileShape::Steps(steps) => Self {
                steps: Some(steps),
                ..Self::default()
            },
            FileShape::Full(file) => file,
        })
    }

    /// # Errors
    ///
    /// Returns `ConfigError::Io` or `ConfigError::Parse` naming `path`.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Where settings come from. Explicit values here win over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSource {
    pub palette: Option<Palette>,
    pub steps_path: Option<PathBuf>,
    pub reset_on_inactive: Option<bool>,
}

impl ConfigSource {
    /// Read the optional file and merge it with the explicit values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for unreadable or invalid files and invalid values.
    pub fn load(&self) -> Result<ExerciseSettings, ConfigError> {
        let file = match self.steps_path.as_deref() {
            Some(path) => {
                let file = ExerciseFile::read(path)?;
                tracing::info!(path = %path.display(), "loaded exercise file");
                file
            }
            None => ExerciseFile::default(),
        };
        self.resolve(file)
    }

    /// Merge an already parsed file with the explicit values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unknown palette name, invalid steps or timings.
    pub fn resolve(&self, file: ExerciseFile) -> Result<ExerciseSettings, ConfigError> {
        let palette = match (self.palette, file.palette.as_deref()) {
            (Some(palette), _) => palette,
            (None, Some(name)) => Palette::from_name(name)?,
            (None, None) => Palette::default(),
        };
        let steps = match file.steps {
            Some(drafts) => StepSequence::from_drafts(drafts)?,
            None => palette.default_steps()?,
        };
        let timings = match file.timings {
            Some(draft) => draft.validate()?,
            None => AnimationTimings::standard(),
        };
        let reset_on_inactive = self
            .reset_on_inactive
            .or(file.reset_on_inactive)
            .unwrap_or(false);

        tracing::debug!(
            %palette,
            steps = steps.len(),
            reset_on_inactive,
            "exercise settings resolved"
        );
        Ok(ExerciseSettings::new(steps, timings, palette).with_reset_on_inactive(reset_on_inactive))
    }
}
