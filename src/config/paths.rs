//! Path management for ServiceHub
//!
//! Provides XDG-compliant path resolution for configuration, catalog data and logs.
//!
//! ## Path Resolution Order
//!
//! 1. `SERVICEHUB_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/servicehub` or `~/.config/servicehub`
//! 3. Windows: `%APPDATA%\servicehub`

use std::path::PathBuf;

use crate::error::HubError;

/// Manages all paths used by ServiceHub
#[derive(Debug, Clone)]
pub struct HubPaths {
    base_dir: PathBuf,
}

impl HubPaths {
    /// Resolve the base directory from the environment
    pub fn new() -> Result<Self, HubError> {
        let base_dir = if let Ok(custom) = std::env::var("SERVICEHUB_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Catalog data directory (~/.config/servicehub/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Log directory used when the TUI is running
    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Append-only marketplace activity log
    pub fn activity_log(&self) -> PathBuf {
        self.base_dir.join("activity.log")
    }

    pub fn categories_file(&self) -> PathBuf {
        self.data_dir().join("categories.json")
    }

    pub fn providers_file(&self) -> PathBuf {
        self.data_dir().join("providers.json")
    }

    pub fn bookings_file(&self) -> PathBuf {
        self.data_dir().join("bookings.json")
    }

    pub fn users_file(&self) -> PathBuf {
        self.data_dir().join("users.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), HubError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| HubError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| HubError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.logs_dir())
            .map_err(|e| HubError::Io(format!("Failed to create log directory: {}", e)))?;

        Ok(())
    }

    /// Check if ServiceHub has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, HubError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME")
                .map_err(|_| HubError::Config("HOME environment variable not set".into()))?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("servicehub"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, HubError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| HubError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("servicehub"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HubPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.logs_dir(), temp_dir.path().join("logs"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HubPaths::with_base_dir(temp_dir.path().to_path_buf());

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(paths.logs_dir().exists());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HubPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.providers_file(),
            temp_dir.path().join("data").join("providers.json")
        );
        assert_eq!(
            paths.bookings_file(),
            temp_dir.path().join("data").join("bookings.json")
        );
    }
}
