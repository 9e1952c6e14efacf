//! Module Profiles - Named sets of enabled/disabled host modules
//!
//! This crate provides the [`ProfileManager`], which saves, switches between
//! and deletes module-enablement configurations on top of a key-value
//! settings store owned by the host application.
//!
//! ## Architecture
//!
//! The manager never touches global state. Its collaborators are injected:
//!
//! - **Settings Store** ([`SettingsStore`]): persisted, namespaced JSON values
//! - **Module Host** ([`ModuleHost`]): live module configuration and page reloads
//! - **Notifier** ([`Notifier`]): user-facing error messages
//!
//! Stock implementations cover `SQLite` persistence ([`SqliteSettingsStore`]),
//! in-memory use ([`MemorySettingsStore`]), a store-backed host
//! ([`StoreModuleHost`]) and a tracing notifier ([`TracingNotifier`]).
//!
//! ## Example
//!
//! ```rust,ignore
//! use modprofiles::ProfileManager;
//! use modprofiles_core::AppConfig;
//!
//! let config = AppConfig::load_with_env()?;
//! let (manager, host) = ProfileManager::open(&config).await?;
//! manager.register_settings().await?;
//!
//! manager.create_profile(Some("Raid Night"), Some(modules)).await?;
//! manager.activate_profile("Raid Night").await?;
//! assert_eq!(host.reload_count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

/// Error types for profile operations.
pub mod error;
/// Contracts with the host application.
pub mod host;
/// Profile lifecycle operations.
pub mod manager;
/// Store-backed module host.
pub mod module_host;
/// Settings store implementations.
pub mod store;

pub use error::{ProfileError, Result};
pub use host::{ModuleHost, Notifier, SettingsStore, TracingNotifier};
pub use manager::ProfileManager;
pub use module_host::StoreModuleHost;
pub use store::{MemorySettingsStore, SettingsRegistry, SqliteSettingsStore};

// Re-export the data model for convenience
pub use modprofiles_core::{ModuleConfiguration, Profile, DEFAULT_PROFILE_NAME};
