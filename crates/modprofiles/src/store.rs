//! Stock [`SettingsStore`] implementations.
//!
//! [`SqliteSettingsStore`] persists values through `modprofiles-db`;
//! [`MemorySettingsStore`] keeps them in a map. Both share the same
//! [`SettingsRegistry`] for descriptors and defaults, so `get` behaves the
//! same way regardless of backend.

use crate::error::Result;
use crate::host::{storage_key, SettingsStore};
use async_trait::async_trait;
use modprofiles_core::{MenuDescriptor, SettingDescriptor};
use modprofiles_db::Database;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Registered setting and menu descriptors, keyed by storage key.
#[derive(Debug, Default)]
pub struct SettingsRegistry {
    settings: RwLock<HashMap<String, SettingDescriptor>>,
    menus: RwLock<HashMap<String, MenuDescriptor>>,
}

impl SettingsRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a setting descriptor.
    pub async fn register_setting(
        &self,
        namespace: &str,
        key: &str,
        descriptor: SettingDescriptor,
    ) {
        let replaced = self
            .settings
            .write()
            .await
            .insert(storage_key(namespace, key), descriptor)
            .is_some();
        tracing::debug!(namespace, key, replaced, "Registered setting");
    }

    /// Register (or replace) a menu descriptor.
    pub async fn register_menu(&self, namespace: &str, key: &str, descriptor: MenuDescriptor) {
        let replaced = self
            .menus
            .write()
            .await
            .insert(storage_key(namespace, key), descriptor)
            .is_some();
        tracing::debug!(namespace, key, replaced, "Registered menu");
    }

    /// Descriptor of a registered setting.
    pub async fn setting(&self, namespace: &str, key: &str) -> Option<SettingDescriptor> {
        self.settings
            .read()
            .await
            .get(&storage_key(namespace, key))
            .cloned()
    }

    /// Descriptor of a registered menu.
    pub async fn menu(&self, namespace: &str, key: &str) -> Option<MenuDescriptor> {
        self.menus
            .read()
            .await
            .get(&storage_key(namespace, key))
            .cloned()
    }

    /// Default value of a registered setting.
    pub async fn default_value(&self, namespace: &str, key: &str) -> Option<Value> {
        self.settings
            .read()
            .await
            .get(&storage_key(namespace, key))
            .map(|descriptor| descriptor.default.clone())
    }
}

/// Settings store backed by the `SQLite` settings table.
#[derive(Debug)]
pub struct SqliteSettingsStore {
    db: Database,
    registry: SettingsRegistry,
}

impl SqliteSettingsStore {
    /// Create a store over an already migrated database.
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self {
            db,
            registry: SettingsRegistry::new(),
        }
    }

    /// Registered descriptors.
    #[must_use]
    pub fn registry(&self) -> &SettingsRegistry {
        &self.registry
    }

    /// Underlying database.
    #[must_use]
    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl SettingsStore for SqliteSettingsStore {
    async fn get(&self, namespace: &str, key: &str) -> Result<Option<Value>> {
        match self.get_persisted(namespace, key).await? {
            Some(value) => Ok(Some(value)),
            None => Ok(self.registry.default_value(namespace, key).await),
        }
    }

    async fn get_persisted(&self, namespace: &str, key: &str) -> Result<Option<Value>> {
        Ok(
            modprofiles_db::settings::get_setting(self.db.pool(), &storage_key(namespace, key))
                .await?,
        )
    }

    async fn set(&self, namespace: &str, key: &str, value: Value) -> Result<Value> {
        modprofiles_db::settings::set_setting(self.db.pool(), &storage_key(namespace, key), &value)
            .await?;
        Ok(value)
    }

    async fn register(
        &self,
        namespace: &str,
        key: &str,
        descriptor: SettingDescriptor,
    ) -> Result<()> {
        self.registry
            .register_setting(namespace, key, descriptor)
            .await;
        Ok(())
    }

    async fn register_menu(
        &self,
        namespace: &str,
        key: &str,
        descriptor: MenuDescriptor,
    ) -> Result<()> {
        self.registry.register_menu(namespace, key, descriptor).await;
        Ok(())
    }
}

/// Settings store that keeps every value in memory.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    values: RwLock<HashMap<String, Value>>,
    registry: SettingsRegistry,
}

impl MemorySettingsStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered descriptors.
    #[must_use]
    pub fn registry(&self) -> &SettingsRegistry {
        &self.registry
    }

    /// Persisted value, ignoring registered defaults.
    pub async fn stored(&self, namespace: &str, key: &str) -> Option<Value> {
        self.values
            .read()
            .await
            .get(&storage_key(namespace, key))
            .cloned()
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get(&self, namespace: &str, key: &str) -> Result<Option<Value>> {
        if let Some(value) = self.stored(namespace, key).await {
            return Ok(Some(value));
        }
        Ok(self.registry.default_value(namespace, key).await)
    }

    async fn get_persisted(&self, namespace: &str, key: &str) -> Result<Option<Value>> {
        Ok(self.stored(namespace, key).await)
    }

    async fn set(&self, namespace: &str, key: &str, value: Value) -> Result<Value> {
        self.values
            .write()
            .await
            .insert(storage_key(namespace, key), value.clone());
        Ok(value)
    }

    async fn register(
        &self,
        namespace: &str,
        key: &str,
        descriptor: SettingDescriptor,
    ) -> Result<()> {
        self.registry
            .register_setting(namespace, key, descriptor)
            .await;
        Ok(())
    }

    async fn register_menu(
        &self,
        namespace: &str,
        key: &str,
        descriptor: MenuDescriptor,
    ) -> Result<()> {
        self.registry.register_menu(namespace, key, descriptor).await;
        Ok(())
    }
}
