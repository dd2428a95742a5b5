use super::ai_config::env_value;
use serde::Deserialize;
use std::collections::HashMap;

/// Configuration for review runs and report output
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewConfig {
    /// Language the model is asked to answer in
    pub language: String,

    /// Directory receiving numbered HTML reports (supports ~ expansion)
    pub output_dir: String,

    /// Whether a written report is opened in the browser
    pub open_browser: bool,

    /// Number of commits shown by `log`
    pub history_count: usize,

    /// Custom prompt template replacing the built-in one
    pub prompt_file: Option<String>,
}

/// Partial Review Configuration for loading from files
#[derive(Deserialize, Debug, Default)]
pub struct PartialReviewConfig {
    pub language: Option<String>,
    pub output_dir: Option<String>,
    pub open_browser: Option<bool>,
    pub history_count: Option<usize>,
    pub prompt_file: Option<String>,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self::from_partial(None, &HashMap::new())
    }
}

impl ReviewConfig {
    /// Create ReviewConfig from partial config, environment and defaults
    pub fn from_partial(
        partial: Option<PartialReviewConfig>,
        env_map: &HashMap<String, String>,
    ) -> Self {
        let partial = partial.unwrap_or_default();

        Self {
            language: env_value(env_map, &["GITREVIEW_LANGUAGE"])
                .or(partial.language)
                .unwrap_or_else(default_language),
            output_dir: env_value(env_map, &["GITREVIEW_OUTPUT_DIR"])
                .or(partial.output_dir)
                .unwrap_or_else(default_output_dir),
            open_browser: partial.open_browser.unwrap_or(true),
            history_count: partial.history_count.unwrap_or_else(default_history_count),
            prompt_file: partial.prompt_file,
        }
    }

    /// Output directory with a leading `~` expanded
    pub fn expanded_output_dir(&self) -> String {
        shellexpand::tilde(&self.output_dir).into_owned()
    }
}

// Default functions
fn default_language() -> String {
    "English".to_string()
}

fn default_output_dir() -> String {
    "results".to_string()
}

fn default_history_count() -> usize {
    crate::git::DEFAULT_COMMIT_COUNT
}
