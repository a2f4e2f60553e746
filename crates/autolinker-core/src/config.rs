use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use thiserror::Error;

pub const MIN_QUERY_LENGTH_RANGE: RangeInclusive<usize> = 1..=5;
pub const MAX_SUGGESTIONS_RANGE: RangeInclusive<usize> = 5..=20;

/// Tuning knobs for suggestion sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestConfig {
    /// Minimum query length before the ranker returns anything,
    /// and before a plain word opens a session
    #[serde(default = "default_min_query_length")]
    pub min_query_length: usize,

    /// Upper bound on the number of candidates shown
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,

    /// Whether plain words (outside `[[`) open a session
    #[serde(default = "default_true")]
    pub word_trigger: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("{field} must be within {min}..={max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },
}

fn default_min_query_length() -> usize {
    2
}

fn default_max_suggestions() -> usize {
    10
}

fn default_true() -> bool {
    true
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            min_query_length: default_min_query_length(),
            max_suggestions: default_max_suggestions(),
            word_trigger: true,
        }
    }
}

impl SuggestConfig {
    /// Load config from YAML and validate it
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(
            "minQueryLength",
            self.min_query_length,
            &MIN_QUERY_LENGTH_RANGE,
        )?;
        check_range(
            "maxSuggestions",
            self.max_suggestions,
            &MAX_SUGGESTIONS_RANGE,
        )
    }

    /// Copy of this config with every value pulled into its allowed range
    pub fn clamped(&self) -> Self {
        Self {
            min_query_length: self.min_query_length.clamp(
                *MIN_QUERY_LENGTH_RANGE.start(),
                *MIN_QUERY_LENGTH_RANGE.end(),
            ),
            max_suggestions: self.max_suggestions.clamp(
                *MAX_SUGGESTIONS_RANGE.start(),
                *MAX_SUGGESTIONS_RANGE.end(),
            ),
            word_trigger: self.word_trigger,
        }
    }
}

fn check_range(
    field: &'static str,
    value: usize,
    range: &RangeInclusive<usize>,
) -> Result<(), ConfigError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}
