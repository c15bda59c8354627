//! Survey behavior configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Survey configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SurveyConfig {
    /// Length of generated access codes
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// How many times code generation retries after a uniqueness collision
    #[serde(default = "default_generation_retries")]
    pub max_generation_retries: u32,
}

impl SurveyConfig {
    /// Validate survey configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.code_length < 4 || self.code_length > 16 {
            return Err(ValidationError::InvalidCodeLength);
        }
        Ok(())
    }
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            code_length: default_code_length(),
            max_generation_retries: default_generation_retries(),
        }
    }
}

fn default_code_length() -> usize {
    8
}

fn default_generation_retries() -> u32 {
    16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn survey_config_defaults() {
        let config = SurveyConfig::default();
        assert_eq!(config.code_length, 8);
        assert_eq!(config.max_generation_retries, 16);
    }

    #[test]
    fn validation_rejects_short_codes() {
        let config = SurveyConfig {
            code_length: 2,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
