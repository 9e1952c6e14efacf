//! [`ModuleHost`] backed by a settings store.
//!
//! The host keeps its live module configuration as the
//! `core.moduleConfiguration` setting. Reload requests are published on a
//! `watch` channel as an increasing counter for the embedding application
//! to act on.

use crate::error::Result;
use crate::host::{ModuleHost, SettingsStore};
use async_trait::async_trait;
use modprofiles_core::{ModuleConfiguration, CORE_NAMESPACE, MODULE_CONFIGURATION_KEY};
use std::sync::Arc;
use tokio::sync::watch;

/// Module host reading and writing `core.moduleConfiguration`.
pub struct StoreModuleHost {
    store: Arc<dyn SettingsStore>,
    reloads: watch::Sender<u64>,
}

impl StoreModuleHost {
    /// Create a host over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        let (reloads, _) = watch::channel(0);
        Self { store, reloads }
    }

    /// Subscribe to reload requests.
    #[must_use]
    pub fn subscribe_reloads(&self) -> watch::Receiver<u64> {
        self.reloads.subscribe()
    }

    /// Number of reloads requested so far.
    #[must_use]
    pub fn reload_count(&self) -> u64 {
        *self.reloads.borrow()
    }
}

#[async_trait]
impl ModuleHost for StoreModuleHost {
    async fn current_module_configuration(&self) -> Result<ModuleConfiguration> {
        let value = self
            .store
            .get(CORE_NAMESPACE, MODULE_CONFIGURATION_KEY)
            .await?;

        match value {
            Some(v) => Ok(serde_json::from_value::<Option<ModuleConfiguration>>(v)?
                .unwrap_or_default()),
            None => Ok(ModuleConfiguration::new()),
        }
    }

    async fn set_core_module_configuration(
        &self,
        modules: Option<ModuleConfiguration>,
    ) -> Result<()> {
        let modules = modules.unwrap_or_else(|| {
            tracing::warn!("Profile has no module configuration, applying an empty one");
            ModuleConfiguration::new()
        });

        self.store
            .set(
                CORE_NAMESPACE,
                MODULE_CONFIGURATION_KEY,
                serde_json::to_value(&modules)?,
            )
            .await?;
        tracing::info!("Applied configuration for {} modules", modules.len());
        Ok(())
    }

    async fn reload_window(&self) -> Result<()> {
        self.reloads.send_modify(|count| *count += 1);
        tracing::info!("Window reload requested");
        Ok(())
    }
}
