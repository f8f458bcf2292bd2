//! User settings for ServiceHub
//!
//! Manages preferences such as the backend base URL used by the smoke test,
//! the dependency install command used by the bootstrap, display formats and
//! which seeded user the dashboards act as.

use serde::{Deserialize, Serialize};

use super::paths::HubPaths;
use crate::error::HubError;

/// User settings for ServiceHub
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Base URL of the marketplace backend API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Currency symbol used when formatting prices
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Default log filter when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Program and arguments run by `bootstrap` to install backend dependencies
    #[serde(default = "default_install_command")]
    pub install_command: Vec<String>,

    /// E-mail of the account the user and provider dashboards act as
    #[serde(default = "default_current_user")]
    pub current_user_email: String,

    /// Whether `init` has been run
    #[serde(default)]
    pub setup_completed: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_api_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_install_command() -> Vec<String> {
    vec!["npm".to_string(), "install".to_string()]
}

fn default_current_user() -> String {
    "jordan@example.com".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            api_base_url: default_api_base_url(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            log_level: default_log_level(),
            install_command: default_install_command(),
            current_user_email: default_current_user(),
            setup_completed: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &HubPaths) -> Result<Self, HubError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| HubError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents)
                .map_err(|e| HubError::Config(format!("Failed to parse settings file: {}", e)))?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &HubPaths) -> Result<(), HubError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| HubError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| HubError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
