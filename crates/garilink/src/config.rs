//! Configuration management for garilink.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "garilink";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "garilink.db";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `GARILINK_`)
/// 2. TOML config file at `~/.config/garilink/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Current-user profile configuration.
    pub profile: ProfileConfig,
    /// Output/display configuration.
    pub display: DisplayConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/garilink/garilink.db`
    pub database_path: Option<PathBuf>,
    /// Warn when a single namespace grows past this many records.
    /// Every mutation rewrites the whole list, so large lists get slow.
    pub list_warn_threshold: usize,
}

/// Current-user profile configuration.
///
/// The remote identity backend is out of scope here; all the data core needs
/// from it is a stable current-user identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Stable identifier of the signed-in user.
    pub user_id: String,
    /// Display name shown in CLI output.
    pub display_name: String,
    /// Preferred distance units ("km" or "mi").
    pub units: String,
}

/// Output/display configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Default maximum number of entries shown by list commands.
    pub list_limit: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None, // Will be resolved to default at runtime
            list_warn_threshold: 10_000,
        }
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            user_id: "local".to_string(),
            display_name: String::new(),
            units: "km".to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { list_limit: 50 }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `GARILINK_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file).nested())
            .merge(Env::prefixed("GARILINK_").split("_"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.profile.user_id.is_empty() {
            return Err(Error::ConfigValidation {
                message: "profile.user_id must not be empty".to_string(),
            });
        }

        if self.profile.units != "km" && self.profile.units != "mi" {
            return Err(Error::ConfigValidation {
                message: format!(
                    "profile.units must be \"km\" or \"mi\", got \"{}\"",
                    self.profile.units
                ),
            });
        }

        if self.display.list_limit == 0 {
            return Err(Error::ConfigValidation {
                message: "display.list_limit must be greater than 0".to_string(),
            });
        }

        if self.storage.list_warn_threshold == 0 {
            return Err(Error::ConfigValidation {
                message: "storage.list_warn_threshold must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.profile.user_id, "local");
        assert_eq!(config.profile.units, "km");
        assert_eq!(config.display.list_limit, 50);
        assert!(config.storage.database_path.is_none());
    }

    #[test]
    fn test_default_storage_config() {
        let storage = StorageConfig::default();

        assert!(storage.database_path.is_none());
        assert_eq!(storage.list_warn_threshold, 10_000);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_user_id() {
        let mut config = Config::default();
        config.profile.user_id = String::new();

        let result = config.validate();
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("user_id"));
    }

    #[test]
    fn test_validate_invalid_units() {
        let mut config = Config::default();
        config.profile.units = "furlongs".to_string();

        let result = config.validate();
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("units"));
    }

    #[test]
    fn test_validate_zero_list_limit() {
        let mut config = Config::default();
        config.display.list_limit = 0;

        let result = config.validate();
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("list_limit"));
    }

    #[test]
    fn test_validate_zero_warn_threshold() {
        let mut config = Config::default();
        config.storage.list_warn_threshold = 0;

        let result = config.validate();
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("list_warn_threshold"));
    }

    #[test]
    fn test_database_path_default() {
        let config = Config::default();
        let path = config.database_path();

        assert!(path.to_string_lossy().contains("garilink.db"));
    }

    #[test]
    fn test_database_path_custom() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::from("/custom/path/db.sqlite"));

        assert_eq!(
            config.database_path(),
            PathBuf::from("/custom/path/db.sqlite")
        );
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("garilink"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_default_data_dir() {
        let path = Config::default_data_dir();
        assert!(path.to_string_lossy().contains("garilink"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        // Loading from a nonexistent path should work (uses defaults)
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());

        let config = result.unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_clone() {
        let config = Config::default();
        let cloned = config.clone();
        assert_eq!(config, cloned);
    }

    #[test]
    fn test_profile_config_serialize() {
        let profile = ProfileConfig::default();
        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("user_id"));
        assert!(json.contains("units"));
    }

    #[test]
    fn test_storage_config_deserialize() {
        let json = r#"{"list_warn_threshold": 500}"#;
        let storage: StorageConfig = serde_json::from_str(json).unwrap();
        assert_eq!(storage.list_warn_threshold, 500);
        assert!(storage.database_path.is_none());
    }
}
