use serde::Deserialize;
use std::collections::HashMap;

/// AI Configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AIConfig {
    pub api_url: String,
    pub model_name: String,
    pub temperature: f32,
    pub api_key: Option<String>,
}

/// Partial AI Configuration for loading from files
#[derive(Deserialize, Debug, Default)]
pub struct PartialAIConfig {
    pub api_url: Option<String>,
    pub model_name: Option<String>,
    pub temperature: Option<f32>,
    pub api_key: Option<String>,
}

impl Default for AIConfig {
    fn default() -> Self {
        Self::from_env_or_file(None, &HashMap::new())
    }
}

impl AIConfig {
    /// Create AIConfig from environment variables and file config.
    ///
    /// `GITREVIEW_*` variables win over the file; `MODEL_NAME` and
    /// `OPENROUTER_API_KEY` are honoured when the prefixed ones are unset.
    pub fn from_env_or_file(
        file_ai_config: Option<PartialAIConfig>,
        env_map: &HashMap<String, String>,
    ) -> Self {
        let file = file_ai_config.unwrap_or_default();

        let api_url = env_value(env_map, &["GITREVIEW_AI_API_URL"])
            .or(file.api_url)
            .unwrap_or_else(default_ai_api_url);

        let model_name = env_value(env_map, &["GITREVIEW_AI_MODEL", "MODEL_NAME"])
            .or(file.model_name)
            .unwrap_or_else(default_ai_model_name);

        let temperature = env_value(env_map, &["GITREVIEW_AI_TEMPERATURE"])
            .and_then(|s| s.parse().ok())
            .or(file.temperature)
            .unwrap_or_else(default_ai_temperature);

        let api_key = env_value(env_map, &["GITREVIEW_AI_API_KEY", "OPENROUTER_API_KEY"])
            .or(file.api_key)
            .filter(|key| !key.is_empty());

        AIConfig {
            api_url,
            model_name,
            temperature,
            api_key,
        }
    }
}

/// First non-empty value among `keys`.
pub(crate) fn env_value(env_map: &HashMap<String, String>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| env_map.get(*key))
        .find(|value| !value.trim().is_empty())
        .cloned()
}

// Default functions
fn default_ai_api_url() -> String {
    "https://openrouter.ai/api/v1/chat/completions".to_string()
}

fn default_ai_model_name() -> String {
    "openai/gpt-4o-mini".to_string()
}

fn default_ai_temperature() -> f32 {
    0.3
}
