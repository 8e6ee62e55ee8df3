use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

use crate::{matching::SimilarityConfig, personality::PersonalityConfig};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("total_scorable_questions must be positive")]
    ZeroScorableQuestions,
    #[error("type margin must be a finite, non-negative number (got {0})")]
    InvalidTypeMargin(f64),
    #[error("similarity min_score must be within 0.0..=1.0 (got {0})")]
    InvalidMinScore(f64),
}

/// Configuration for all three scoring components.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoreConfig {
    pub similarity: SimilarityConfig,
    pub personality: PersonalityConfig,
}

impl CoreConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let min_score = self.similarity.min_score;
        if !(0.0..=1.0).contains(&min_score) {
            return Err(ConfigError::InvalidMinScore(min_score));
        }
        self.personality.validate()
    }
}

/// Read `key` from the environment and parse it, falling back to `default`
/// when unset. Unparseable values are logged and ignored.
pub fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                warn!(key, value = %raw, "ignoring unparseable environment override");
                default
            }
        },
        Err(_) => default,
    }
}

/// Load the core configuration from `CG_*` environment variables.
pub fn load_config_from_env() -> Result<CoreConfig, ConfigError> {
    let config = CoreConfig {
        similarity: SimilarityConfig::from_env(),
        personality: PersonalityConfig::from_env(),
    };
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(CoreConfig::default().validate(), Ok(()));
    }

    #[test]
    fn env_or_falls_back_on_missing_and_garbage() {
        assert_eq!(env_or("CG_TEST_UNSET_KEY_FOR_ENV_OR", 7usize), 7);

        std::env::set_var("CG_TEST_GARBAGE_KEY_FOR_ENV_OR", "not-a-number");
        assert_eq!(env_or("CG_TEST_GARBAGE_KEY_FOR_ENV_OR", 0.25f64), 0.25);

        std::env::set_var("CG_TEST_VALID_KEY_FOR_ENV_OR", " 12 ");
        assert_eq!(env_or("CG_TEST_VALID_KEY_FOR_ENV_OR", 5u32), 12);
    }

    #[test]
    fn rejects_zero_scorable_questions() {
        let mut config = CoreConfig::default();
        config.personality.total_scorable_questions = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroScorableQuestions));
    }

    #[test]
    fn rejects_out_of_range_min_score() {
        let mut config = CoreConfig::default();
        config.similarity.min_score = 1.5;
        assert_eq!(config.validate(), Err(ConfigError::InvalidMinScore(1.5)));
    }
}
