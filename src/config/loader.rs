use crate::errors::ConfigError;
use std::{collections::HashMap, env, fs, path::Path, path::PathBuf};

use super::app_config::{AppConfig, PartialAppConfig, CONFIG_FILE_NAME, USER_CONFIG_PATH};

/// Environment variables the configuration reads.
const ENV_KEYS: [&str; 8] = [
    "GITREVIEW_AI_API_URL",
    "GITREVIEW_AI_MODEL",
    "GITREVIEW_AI_TEMPERATURE",
    "GITREVIEW_AI_API_KEY",
    "MODEL_NAME",
    "OPENROUTER_API_KEY",
    "GITREVIEW_LANGUAGE",
    "GITREVIEW_OUTPUT_DIR",
];

/// Configuration loader responsible for loading config from files and environment
pub struct ConfigLoader {
    base_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new config loader with default paths
    pub fn new() -> Self {
        Self { base_path: None }
    }

    /// Create a config loader with custom base path (for testing)
    pub fn with_base_path(base_path: PathBuf) -> Self {
        Self {
            base_path: Some(base_path),
        }
    }

    /// Load complete application configuration. A missing file means defaults.
    pub fn load_config(&self) -> Result<AppConfig, ConfigError> {
        let config_path = self.config_file_path();
        let partial_config = self.load_partial_config(&config_path)?;
        let env_map = self.collect_env_vars();
        AppConfig::from_partial_and_env(partial_config, env_map)
    }

    /// Location of `config.toml`, honouring the test base path
    pub fn config_file_path(&self) -> PathBuf {
        self.extract_file_path(USER_CONFIG_PATH, CONFIG_FILE_NAME)
    }

    /// Extract file path with tilde expansion and base path override
    fn extract_file_path(&self, base_dir: &str, file_name: &str) -> PathBuf {
        let expanded_base = if let Some(base_path) = &self.base_path {
            base_path.join(base_dir.trim_start_matches("~/"))
        } else {
            let expanded = shellexpand::tilde(base_dir);
            PathBuf::from(expanded.as_ref())
        };

        expanded_base.join(file_name)
    }

    /// Load partial configuration from TOML file
    fn load_partial_config(&self, config_path: &Path) -> Result<Option<PartialAppConfig>, ConfigError> {
        if !config_path.exists() {
            tracing::debug!("Config file {:?} not found, using defaults", config_path);
            return Ok(None);
        }

        let display = config_path.to_string_lossy().to_string();
        let content =
            fs::read_to_string(config_path).map_err(|e| ConfigError::FileRead(display.clone(), e))?;

        let partial_config: PartialAppConfig =
            toml::from_str(&content).map_err(|e| ConfigError::TomlParse(display, e))?;

        tracing::debug!("Loaded config file {:?}", config_path);
        Ok(Some(partial_config))
    }

    /// Collect relevant environment variables
    fn collect_env_vars(&self) -> HashMap<String, String> {
        ENV_KEYS
            .iter()
            .filter_map(|key| env::var(key).ok().map(|value| (key.to_string(), value)))
            .collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_loader() -> (ConfigLoader, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let loader = ConfigLoader::with_base_path(temp_dir.path().to_path_buf());
        (loader, temp_dir)
    }

    fn write_config(temp_dir: &TempDir, content: &str) {
        let config_path = temp_dir.path().join(".config/gitreview/config.toml");
        fs::create_dir_all(config_path.parent().unwrap()).unwrap();
        fs::write(&config_path, content).unwrap();
    }

    #[test]
    fn test_config_file_path() {
        let (loader, temp_dir) = create_test_loader();
        assert_eq!(
            loader.config_file_path(),
            temp_dir.path().join(".config/gitreview/config.toml")
        );
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let (loader, _temp_dir) = create_test_loader();
        let partial = loader.load_partial_config(&loader.config_file_path()).unwrap();
        assert!(partial.is_none());
    }

    #[test]
    fn test_load_partial_config() {
        let (loader, temp_dir) = create_test_loader();
        write_config(
            &temp_dir,
            r#"
[ai]
model_name = "deepseek/deepseek-chat"
temperature = 0.5

[review]
language = "Russian"
open_browser = false
"#,
        );

        let partial = loader
            .load_partial_config(&loader.config_file_path())
            .unwrap()
            .unwrap();
        let ai = partial.ai.unwrap();
        assert_eq!(ai.model_name.as_deref(), Some("deepseek/deepseek-chat"));
        assert_eq!(ai.temperature, Some(0.5));
        let review = partial.review.unwrap();
        assert_eq!(review.language.as_deref(), Some("Russian"));
        assert_eq!(review.open_browser, Some(false));
    }

    #[test]
    fn test_invalid_toml() {
        let (loader, temp_dir) = create_test_loader();
        write_config(&temp_dir, "[ai\nmodel_name = ");

        let err = loader
            .load_partial_config(&loader.config_file_path())
            .unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(..)));
    }
}
