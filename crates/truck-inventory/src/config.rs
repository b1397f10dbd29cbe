//! Configuration management for truck-inventory.
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
use crate::store::DEFAULT_SLOT_KEY;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "truck-inventory";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "inventory.db";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "TRUCKS_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `TRUCKS_`)
/// 2. TOML config file at `~/.config/truck-inventory/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Display configuration.
    pub display: DisplayConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/truck-inventory/inventory.db`
    pub database_path: Option<PathBuf>,
    /// Name of the slot holding the truck collection.
    pub slot_key: String,
}

/// Display-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Default output format for listings.
    pub format: OutputFormat,
}

/// Output format for listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One truck per line.
    Plain,
    /// Aligned table with a header.
    #[default]
    Table,
    /// The serialized collection.
    Json,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None, // Resolved at runtime
            slot_key: DEFAULT_SLOT_KEY.to_string(),
        }
    }
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// Sources, later ones winning: defaults, the TOML file, then
    /// `TRUCKS_` environment variables with `__` between nested keys
    /// (`TRUCKS_STORAGE__SLOT_KEY=fleet`).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

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
        if self.storage.slot_key.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "storage.slot_key must not be empty".to_string(),
            });
        }

        if let Some(path) = &self.storage.database_path {
            if path.as_os_str().is_empty() {
                return Err(Error::ConfigValidation {
                    message: "storage.database_path must not be empty when set".to_string(),
                });
            }
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

        assert!(config.storage.database_path.is_none());
        assert_eq!(config.storage.slot_key, "trucks");
        assert_eq!(config.display.format, OutputFormat::Table);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_slot_key() {
        let mut config = Config::default();
        config.storage.slot_key = "  ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("slot_key"));
    }

    #[test]
    fn test_validate_empty_database_path() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::new());

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("database_path"));
    }

    #[test]
    fn test_database_path_default() {
        let path = Config::default().database_path();
        assert!(path.to_string_lossy().contains("inventory.db"));
        assert!(path.to_string_lossy().contains("truck-inventory"));
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
        assert!(path.to_string_lossy().contains("truck-inventory"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    // Loading reads `TRUCKS_*` variables, so every load runs inside a jail.

    #[test]
    fn test_load_nonexistent_config() {
        figment::Jail::expect_with(|jail| {
            let config = Config::load_from(Some(jail.directory().join("missing.toml"))).unwrap();
            assert_eq!(config.storage, StorageConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_from_toml_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
[storage]
database_path = "/srv/fleet/inventory.db"
slot_key = "fleet"

[display]
format = "json"
"#,
            )?;
            let path = jail.directory().join("config.toml");

            let config = Config::load_from(Some(path)).unwrap();

            assert_eq!(
                config.storage.database_path,
                Some(PathBuf::from("/srv/fleet/inventory.db"))
            );
            assert_eq!(config.storage.slot_key, "fleet");
            assert_eq!(config.display.format, OutputFormat::Json);
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[storage]\nslot_key = \"\"")?;
            let path = jail.directory().join("config.toml");

            let err = Config::load_from(Some(path)).unwrap_err();
            assert!(matches!(err, Error::ConfigValidation { .. }));
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_unknown_format() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[display]\nformat = \"xml\"")?;
            let path = jail.directory().join("config.toml");

            let err = Config::load_from(Some(path)).unwrap_err();
            assert!(matches!(err, Error::ConfigLoad(_)));
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_nested_keys() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("TRUCKS_STORAGE__SLOT_KEY", "yard");
            jail.set_env("TRUCKS_DISPLAY__FORMAT", "plain");

            let config = Config::load_from(Some(jail.directory().join("missing.toml"))).unwrap();
            assert_eq!(config.storage.slot_key, "yard");
            assert_eq!(config.display.format, OutputFormat::Plain);
            Ok(())
        });
    }

    #[test]
    fn test_env_wins_over_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                "[storage]\nslot_key = \"fleet\"\n\n[display]\nformat = \"json\"\n",
            )?;
            let path = jail.directory().join("config.toml");
            jail.set_env("TRUCKS_STORAGE__SLOT_KEY", "yard");

            let config = Config::load_from(Some(path)).unwrap();
            assert_eq!(config.storage.slot_key, "yard");
            assert_eq!(config.display.format, OutputFormat::Json);
            Ok(())
        });
    }

    #[test]
    fn test_storage_config_deserialize() {
        let json = r#"{"slot_key": "yard"}"#;
        let storage: StorageConfig = serde_json::from_str(json).unwrap();
        assert_eq!(storage.slot_key, "yard");
        assert!(storage.database_path.is_none());
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("slot_key"));
        assert!(json.contains(r#""format":"table""#));
    }
}
