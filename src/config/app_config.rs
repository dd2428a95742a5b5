use crate::errors::ConfigError;
use serde::Deserialize;
use std::{collections::HashMap, fs, path::PathBuf};

use super::{
    ai_config::{AIConfig, PartialAIConfig},
    loader::ConfigLoader,
    review_config::{PartialReviewConfig, ReviewConfig},
};

// Configuration location constants
pub const USER_CONFIG_PATH: &str = "~/.config/gitreview";

// Configuration file names
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Built-in review prompt; `{changes}` and `{language}` are substituted.
pub const DEFAULT_REVIEW_PROMPT: &str = include_str!("../../assets/review-prompt.md");

/// Main Application Configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub ai: AIConfig,
    pub review: ReviewConfig,
    /// Review prompt template in effect
    pub review_prompt: Option<String>,
}

/// Partial Application Configuration for loading from files
#[derive(Deserialize, Debug, Default)]
pub struct PartialAppConfig {
    pub ai: Option<PartialAIConfig>,
    pub review: Option<PartialReviewConfig>,
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, ConfigError> {
        ConfigLoader::new().load_config()
    }

    /// Load configuration with custom base path (for testing)
    pub fn load_with_base_path(base_path: PathBuf) -> Result<Self, ConfigError> {
        ConfigLoader::with_base_path(base_path).load_config()
    }

    /// Create AppConfig from partial config and environment
    pub fn from_partial_and_env(
        partial: Option<PartialAppConfig>,
        env_map: HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let partial = partial.unwrap_or_default();

        let ai = AIConfig::from_env_or_file(partial.ai, &env_map);
        let review = ReviewConfig::from_partial(partial.review, &env_map);
        let review_prompt = match &review.prompt_file {
            Some(path) => Some(read_prompt_file(path)?),
            None => None,
        };

        let config = AppConfig {
            ai,
            review,
            review_prompt,
        };
        config.validate()?;
        Ok(config)
    }

    /// Prompt template to use, custom or built-in
    pub fn review_prompt(&self) -> &str {
        self.review_prompt.as_deref().unwrap_or(DEFAULT_REVIEW_PROMPT)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.ai.temperature) {
            return Err(ConfigError::Other(format!(
                "Temperature must be between 0.0 and 2.0, got {}",
                self.ai.temperature
            )));
        }
        if !self.review_prompt().contains("{changes}") {
            return Err(ConfigError::Other(
                "Review prompt template has no {changes} placeholder".to_string(),
            ));
        }
        if self.review.history_count == 0 {
            return Err(ConfigError::Other(
                "history_count must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn read_prompt_file(path: &str) -> Result<String, ConfigError> {
    let expanded = shellexpand::tilde(path);
    fs::read_to_string(expanded.as_ref()).map_err(|e| ConfigError::FileRead(path.to_string(), e))
}
