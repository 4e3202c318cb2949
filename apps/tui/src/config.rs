use dotenv::dotenv;
use std::env;
use std::time::Duration;

use crate::source::mealdb::DEFAULT_BASE_URL;

/// The dataset bundled with the crate.
pub const DEFAULT_LOCAL_RECIPES: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/data/south_indian_recipes.json");
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Runtime settings, resolved from the environment (and `.env`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub local_recipes: String,
    pub request_timeout: Duration,
    pub log_file: Option<String>,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            local_recipes: DEFAULT_LOCAL_RECIPES.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_file: None,
            debug: false,
        }
    }
}

impl AppConfig {
    /// Builds the config from a variable lookup; unset or blank values take defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let request_timeout = value("REQUEST_TIMEOUT_SECS")
            .and_then(|secs| secs.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map_or(defaults.request_timeout, Duration::from_secs);

        Self {
            api_base_url: value("MEALDB_BASE_URL").unwrap_or(defaults.api_base_url),
            local_recipes: value("LOCAL_RECIPES").unwrap_or(defaults.local_recipes),
            request_timeout,
            log_file: value("LOG_FILE"),
            debug: value("DEBUG").is_some(),
        }
    }
}

/// Initializes the application configuration
pub fn init_app_config() -> AppConfig {
    // Load environment variables from .env file
    dotenv().ok();

    AppConfig::from_lookup(|key| env::var(key).ok())
}
