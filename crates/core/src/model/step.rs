use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::color::{ColorError, Rgb};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StepError {
    #[error("step sequence must contain at least one step")]
    Empty,

    #[error("step {index}: target count must be > 0")]
    ZeroCount { index: usize },

    #[error("step {index}: label cannot be empty")]
    EmptyLabel { index: usize },

    #[error("step {index}: {source}")]
    Color {
        index: usize,
        #[source]
        source: ColorError,
    },
}

//
// ─── STEP ──────────────────────────────────────────────────────────────────────
//

/// One sensory category of the exercise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    target_count: u32,
    label: String,
    color: Rgb,
    emoji: Option<String>,
}

impl Step {
    /// # Errors
    ///
    /// Returns `StepError::ZeroCount` or `StepError::EmptyLabel` (reported at index 0).
    pub fn new(
        target_count: u32,
        label: impl Into<String>,
        color: Rgb,
        emoji: Option<String>,
    ) -> Result<Self, StepError> {
        StepDraft {
            target_count,
            label: label.into(),
            color: color.to_hex(),
            emoji,
        }
        .validate(0)
    }

    #[must_use]
    pub fn target_count(&self) -> u32 {
        self.target_count
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn color(&self) -> Rgb {
        self.color
    }

    #[must_use]
    pub fn emoji(&self) -> Option<&str> {
        self.emoji.as_deref()
    }
}

/// Unvalidated step as it appears in configuration files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDraft {
    pub target_count: u32,
    pub label: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

impl StepDraft {
    /// Validate and normalize the draft. `index` is only used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns `StepError` for a zero count, a blank label, or an unparsable color.
    pub fn validate(self, index: usize) -> Result<Step, StepError> {
        if self.target_count == 0 {
            return Err(StepError::ZeroCount { index });
        }
        let label = self.label.trim().to_string();
        if label.is_empty() {
            return Err(StepError::EmptyLabel { index });
        }
        let color =
            Rgb::parse_hex(&self.color).map_err(|source| StepError::Color { index, source })?;
        let emoji = self
            .emoji
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        Ok(Step {
            target_count: self.target_count,
            label,
            color,
            emoji,
        })
    }
}

//
// ─── SEQUENCE ──────────────────────────────────────────────────────────────────
//

/// Counts and labels of the classic 5-4-3-2-1 exercise.
pub const DEFAULT_STEPS: [(u32, &str); 5] = [
    (5, "things you can see"),
    (4, "things you can touch"),
    (3, "things you can hear"),
    (2, "things you can smell"),
    (1, "thing you can taste"),
];

/// Ordered, non-empty list of steps. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSequence {
    steps: Vec<Step>,
}

impl StepSequence {
    /// # Errors
    ///
    /// Returns `StepError::Empty` when `steps` is empty.
    pub fn new(steps: Vec<Step>) -> Result<Self, StepError> {
        if steps.is_empty() {
            return Err(StepError::Empty);
        }
        Ok(Self { steps })
    }

    /// Validate every draft in order; the first failure wins.
    ///
    /// # Errors
    ///
    /// Returns `StepError` for an empty list or the first invalid draft.
    pub fn from_drafts(drafts: Vec<StepDraft>) -> Result<Self, StepError> {
        let steps = drafts
            .into_iter()
            .enumerate()
            .map(|(index, draft)| draft.validate(index))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(steps)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    #[must_use]
    pub fn first(&self) -> &Step {
        // Non-empty by construction.
        &self.steps[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }

    /// Sum of all target counts, i.e. the number of taps that completes the exercise.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.steps
            .iter()
            .map(|step| u64::from(step.target_count))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(count: u32, label: &str, color: &str) -> StepDraft {
        StepDraft {
            target_count: count,
            label: label.to_string(),
            color: color.to_string(),
            emoji: None,
        }
    }

    #[test]
    fn draft_validation_normalizes_fields() {
        let step = StepDraft {
            target_count: 3,
            label: "  things you can hear ".to_string(),
            color: "#336".to_string(),
            emoji: Some("   ".to_string()),
        }
        .validate(2)
        .unwrap();

        assert_eq!(step.target_count(), 3);
        assert_eq!(step.label(), "things you can hear");
        assert_eq!(step.color(), Rgb::new(0x33, 0x33, 0x66));
        assert_eq!(step.emoji(), None);
    }

    #[test]
    fn draft_validation_reports_index() {
        let err = StepSequence::from_drafts(vec![
            draft(5, "see", "#111111"),
            draft(0, "touch", "#222222"),
        ])
        .unwrap_err();
        assert_eq!(err, StepError::ZeroCount { index: 1 });

        let err = StepSequence::from_drafts(vec![draft(2, " ", "#111111")]).unwrap_err();
        assert_eq!(err, StepError::EmptyLabel { index: 0 });

        let err = StepSequence::from_drafts(vec![
            draft(2, "see", "#111111"),
            draft(2, "hear", "blue"),
        ])
        .unwrap_err();
        assert!(matches!(err, StepError::Color { index: 1, .. }));
    }

    #[test]
    fn empty_sequence_is_rejected() {
        assert_eq!(StepSequence::new(Vec::new()), Err(StepError::Empty));
    }

    #[test]
    fn non_monotonic_counts_are_allowed() {
        let steps = StepSequence::from_drafts(vec![
            draft(1, "one", "#000000"),
            draft(7, "seven", "#000000"),
            draft(2, "two", "#000000"),
        ])
        .unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps.total_count(), 10);
        assert_eq!(steps.get(2).map(Step::label), Some("two"));
    }

    #[test]
    fn drafts_deserialize_with_optional_emoji() {
        let json = r##"[{"target_count":5,"label":"see","color":"#101010","emoji":"👀"},
                       {"target_count":4,"label":"touch","color":"#202020"}]"##;
        let drafts: Vec<StepDraft> = serde_json::from_str(json).unwrap();
        let steps = StepSequence::from_drafts(drafts).unwrap();
        assert_eq!(steps.first().emoji(), Some("👀"));
        assert_eq!(steps.get(1).and_then(Step::emoji), None);
    }
}
