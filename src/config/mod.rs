pub mod ai_config;
pub mod app_config;
pub mod loader;
pub mod review_config;

// Re-export commonly used types
pub use ai_config::AIConfig;
pub use app_config::AppConfig;
pub use loader::ConfigLoader;
pub use review_config::ReviewConfig;

pub use app_config::{CONFIG_FILE_NAME, DEFAULT_REVIEW_PROMPT};
