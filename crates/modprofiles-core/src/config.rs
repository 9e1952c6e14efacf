//! Configuration management for module profiles.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration.
///
/// This is loaded from `~/.config/modprofiles/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Settings namespace
    pub settings: SettingsConfig,
    /// Persistence settings
    pub storage: StorageConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, falling back to defaults if
    /// the file does not exist.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            let contents = fs::read_to_string(path)?;
            let config: Self = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `MODPROFILES_NAMESPACE`: Override the settings namespace
    /// - `MODPROFILES_DATABASE_PATH`: Override the settings database location
    /// - `MODPROFILES_LOG`: Override the default log filter
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides in place.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("MODPROFILES_NAMESPACE") {
            tracing::debug!("Override settings.namespace from env: {}", val);
            self.settings.namespace = val;
        }

        if let Ok(val) = std::env::var("MODPROFILES_DATABASE_PATH") {
            tracing::debug!("Override storage.database_path from env: {}", val);
            self.storage.database_path = Some(PathBuf::from(val));
        }

        if let Ok(val) = std::env::var("MODPROFILES_LOG") {
            tracing::debug!("Override logging.filter from env: {}", val);
            self.logging.filter = val;
        }
    }

    /// Check values that cannot be expressed through the type system.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.settings.namespace.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "settings.namespace".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        if self.storage.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                field: "storage.max_connections".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let config_dir = path.parent().ok_or_else(|| ConfigError::InvalidValue {
            field: "config_path".to_string(),
            reason: "no parent directory".to_string(),
        })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/modprofiles/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    /// Get the data directory path.
    ///
    /// Uses XDG base directories: `~/.local/share/modprofiles`
    pub fn data_dir() -> ConfigResult<PathBuf> {
        Ok(project_dirs()?.data_dir().to_path_buf())
    }
}

fn project_dirs() -> ConfigResult<ProjectDirs> {
    ProjectDirs::from("com", "modprofiles", "modprofiles").ok_or(ConfigError::NoConfigDir)
}

/// Settings namespace configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    /// Namespace under which the profile settings are registered
    pub namespace: String,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            namespace: "module-profiles".to_string(),
        }
    }
}

/// Persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Settings database file; `settings.db` in the data dir when unset
    pub database_path: Option<PathBuf>,
    /// Maximum number of pooled connections
    pub max_connections: u32,
}

impl StorageConfig {
    /// Resolve the database location, falling back to the data directory.
    pub fn resolve_database_path(&self) -> ConfigResult<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => Ok(AppConfig::data_dir()?.join("settings.db")),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            max_connections: 5,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,modprofiles=debug".to_string(),
        }
    }
}
