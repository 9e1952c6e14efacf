//! Contracts between the profile manager and the host application.
//!
//! The host owns persistence, the live module configuration and the page
//! lifecycle. The manager only talks to it through these traits, so every
//! collaborator can be swapped for a fake in tests.

use crate::error::Result;
use async_trait::async_trait;
use modprofiles_core::{MenuDescriptor, ModuleConfiguration, SettingDescriptor};
use serde_json::Value;

/// Persisted key-value settings owned by the host.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Read a setting.
    ///
    /// Returns the persisted value, else the registered default, else `None`.
    async fn get(&self, namespace: &str, key: &str) -> Result<Option<Value>>;

    /// Read only what has been persisted, ignoring registered defaults.
    async fn get_persisted(&self, namespace: &str, key: &str) -> Result<Option<Value>>;

    /// Persist a setting, resolving to the value that was stored.
    async fn set(&self, namespace: &str, key: &str, value: Value) -> Result<Value>;

    /// Register a stored setting. Re-registering replaces the descriptor.
    async fn register(
        &self,
        namespace: &str,
        key: &str,
        descriptor: SettingDescriptor,
    ) -> Result<()>;

    /// Register a settings-menu entry. Menus store no value.
    async fn register_menu(
        &self,
        namespace: &str,
        key: &str,
        descriptor: MenuDescriptor,
    ) -> Result<()>;
}

/// The host's live module enablement and page lifecycle.
#[async_trait]
pub trait ModuleHost: Send + Sync {
    /// Snapshot of which modules are currently enabled.
    async fn current_module_configuration(&self) -> Result<ModuleConfiguration>;

    /// Replace the live module configuration. Takes effect after a reload.
    async fn set_core_module_configuration(
        &self,
        modules: Option<ModuleConfiguration>,
    ) -> Result<()>;

    /// Reload the page so module changes are applied.
    async fn reload_window(&self) -> Result<()>;
}

/// User-facing notification channel.
pub trait Notifier: Send + Sync {
    /// Show an error message to the user.
    fn error(&self, message: &str);
}

/// Notifier that emits every message as a `tracing` error event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        tracing::error!(target: "modprofiles::notifications", "{}", message);
    }
}

/// Composite key under which a namespaced setting is persisted.
#[must_use]
pub fn storage_key(namespace: &str, key: &str) -> String {
    format!("{namespace}.{key}")
}
