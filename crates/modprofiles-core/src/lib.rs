//! Module Profiles Core - Foundation crate for the module profile manager.
//!
//! This crate provides the shared data model, configuration management and
//! logging setup that the storage and manager crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Configuration error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Profiles, module configurations and setting descriptors
//! - [`logging`] - `tracing-subscriber` initialisation
//!
//! # Example
//!
//! ```rust
//! use modprofiles_core::{ModuleConfiguration, Profile, DEFAULT_PROFILE_NAME};
//!
//! let mut modules = ModuleConfiguration::new();
//! modules.insert("dnd5e".to_string(), true);
//!
//! let profile = Profile::default_from(modules);
//! assert_eq!(profile.name, DEFAULT_PROFILE_NAME);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, LoggingConfig, SettingsConfig, StorageConfig};
pub use error::{ConfigError, ConfigResult};
pub use logging::init_tracing;
pub use types::{
    MenuDescriptor, ModuleConfiguration, Profile, SettingDescriptor, SettingKey, SettingScope,
    SettingType, CORE_NAMESPACE, DEFAULT_PROFILE_NAME, MODULE_CONFIGURATION_KEY,
};
