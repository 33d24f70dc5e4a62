use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::QuizError;
use crate::tags;
use quizzer_types::DEFAULT_TIMESTAMP_FORMAT;

/// Settings for one quiz session.
///
/// Every field has a default, so a JSON file only needs to list what it
/// changes. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Root tag the document must carry.
    pub expected_root_tag: String,
    /// Overrides the document's `RandomizePageGroups` root attribute.
    pub randomize_page_groups: Option<bool>,
    /// Seed for the page-group shuffle. `None` draws from the thread RNG.
    pub random_seed: Option<u64>,
    /// How many times a locked results file is written before giving up.
    pub max_save_attempts: usize,
    /// `chrono` format of `LoginTime`/`ResponseTime` values.
    pub timestamp_format: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            expected_root_tag: tags::SESSION.to_string(),
            randomize_page_groups: None,
            random_seed: None,
            max_save_attempts: 5,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl SessionConfig {
    pub fn from_json_str(json: &str) -> Result<Self, QuizError> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, QuizError> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    fn validate(&self) -> Result<(), QuizError> {
        if self.expected_root_tag.trim().is_empty() {
            return Err(QuizError::Config(
                "expected_root_tag must not be empty".to_string(),
            ));
        }
        if self.max_save_attempts == 0 {
            return Err(QuizError::Config(
                "max_save_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.expected_root_tag, "Session");
        assert_eq!(config.max_save_attempts, 5);
        assert_eq!(config.randomize_page_groups, None);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SessionConfig::from_json_str(r#"{ "random_seed": 42 }"#).unwrap();
        assert_eq!(config.random_seed, Some(42));
        assert_eq!(config.expected_root_tag, "Session");
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result = SessionConfig::from_json_str(r#"{ "randomise": true }"#);
        assert!(matches!(result, Err(QuizError::Json(_))));
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let result = SessionConfig::from_json_str(r#"{ "max_save_attempts": 0 }"#);
        assert!(matches!(result, Err(QuizError::Config(_))));
    }
}
