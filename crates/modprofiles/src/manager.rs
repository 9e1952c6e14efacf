use crate::error::{ProfileError, Result};
use crate::host::{ModuleHost, Notifier, SettingsStore, TracingNotifier};
use crate::module_host::StoreModuleHost;
use crate::store::SqliteSettingsStore;
use modprofiles_core::{
    AppConfig, MenuDescriptor, ModuleConfiguration, Profile, SettingDescriptor, SettingKey,
    SettingScope, SettingType, DEFAULT_PROFILE_NAME,
};
use modprofiles_db::Database;
use serde_json::{json, Value};
use std::sync::Arc;

const CREATE_FAILED: &str = "Unable to create module profile.";
const SAVE_FAILED: &str = "Unable to save module profile changes.";
const DELETE_FAILED: &str = "Unable to delete module profile.";
const ACTIVATE_FAILED: &str = "Unable to activate module profile.";

/// Manages the persisted list of module profiles and the active profile.
///
/// Every mutation reads the whole profile list, computes the new list and
/// writes it back in a single store write. Validation happens before any
/// write, and each rejection is reported through the [`Notifier`] before it
/// is returned.
///
/// Read-modify-write cycles are not serialised: two overlapping mutations
/// resolve as last-write-wins.
#[derive(Clone)]
pub struct ProfileManager {
    store: Arc<dyn SettingsStore>,
    host: Arc<dyn ModuleHost>,
    notifier: Arc<dyn Notifier>,
    namespace: String,
}

impl ProfileManager {
    /// Create a manager over the given collaborators using the default
    /// `module-profiles` namespace.
    #[must_use]
    pub fn new(
        store: Arc<dyn SettingsStore>,
        host: Arc<dyn ModuleHost>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            host,
            notifier,
            namespace: modprofiles_core::SettingsConfig::default().namespace,
        }
    }

    /// Use a different settings namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Open the configured settings database and wire a manager over it.
    ///
    /// The returned [`StoreModuleHost`] publishes the reload requests the
    /// embedding application must honour.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub async fn open(config: &AppConfig) -> Result<(Self, Arc<StoreModuleHost>)> {
        config.validate()?;
        let db = Database::open(&config.storage).await?;
        let store: Arc<dyn SettingsStore> = Arc::new(SqliteSettingsStore::new(db));
        let host = Arc::new(StoreModuleHost::new(store.clone()));

        let manager = Self::new(store, host.clone(), Arc::new(TracingNotifier))
            .with_namespace(config.settings.namespace.clone());
        Ok((manager, host))
    }

    /// Settings namespace this manager reads and writes.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Register the menu and settings with the store, then make sure at
    /// least one profile is persisted.
    ///
    /// Safe to run on every startup.
    ///
    /// # Errors
    /// Returns an error if the host or the store fails.
    pub async fn register_settings(&self) -> Result<()> {
        let default_profile = Profile::default_from(self.get_current_module_configuration().await?);

        self.store
            .register_menu(
                &self.namespace,
                SettingKey::ManageProfiles.as_str(),
                MenuDescriptor {
                    name: None,
                    label: "Manage Profiles".to_string(),
                    hint: None,
                    icon: "fas fa-cog".to_string(),
                    form: "ManageModuleProfilesSettingsForm".to_string(),
                    restricted: false,
                },
            )
            .await?;

        self.store
            .register(
                &self.namespace,
                SettingKey::Profiles.as_str(),
                SettingDescriptor {
                    name: Some("Module Profiles Settings".to_string()),
                    hint: Some("Settings definitions for the Module Profiles module".to_string()),
                    setting_type: SettingType::Array,
                    scope: SettingScope::World,
                    config: false,
                    default: serde_json::to_value(vec![default_profile])?,
                },
            )
            .await?;

        self.store
            .register(
                &self.namespace,
                SettingKey::ActiveProfileName.as_str(),
                SettingDescriptor {
                    name: Some("Active Profile Name".to_string()),
                    hint: None,
                    setting_type: SettingType::String,
                    scope: SettingScope::World,
                    config: false,
                    default: json!(DEFAULT_PROFILE_NAME),
                },
            )
            .await?;

        self.store
            .register(
                &self.namespace,
                SettingKey::RegisterApi.as_str(),
                SettingDescriptor {
                    name: Some("Register API".to_string()),
                    hint: Some(
                        "Make this module's API (ModuleProfiles.api.*function()*) available. \
                         If you don't write code, you probably don't need this."
                            .to_string(),
                    ),
                    setting_type: SettingType::Boolean,
                    scope: SettingScope::World,
                    config: true,
                    default: json!(false),
                },
            )
            .await?;

        tracing::info!(namespace = %self.namespace, "Registered module profile settings");

        let has_profiles = self
            .get_persisted_profiles()
            .await?
            .is_some_and(|profiles| !profiles.is_empty());
        if !has_profiles {
            tracing::info!("No module profiles found, resetting to the default profile");
            self.reset_profiles().await?;
        }

        Ok(())
    }

    /// Snapshot of the host's live module configuration.
    ///
    /// # Errors
    /// Returns an error if the host cannot provide it.
    pub async fn get_current_module_configuration(&self) -> Result<ModuleConfiguration> {
        self.host.current_module_configuration().await
    }

    /// Replace the host's live module configuration.
    ///
    /// # Errors
    /// Returns an error if the host rejects the change.
    pub async fn set_core_module_configuration(
        &self,
        modules: Option<ModuleConfiguration>,
    ) -> Result<()> {
        self.host.set_core_module_configuration(modules).await
    }

    /// The persisted profile list, exactly as stored.
    ///
    /// `None` when nothing was ever persisted or registered.
    ///
    /// # Errors
    /// Returns an error if the store fails or the stored value is not a
    /// profile list.
    pub async fn get_all_profiles(&self) -> Result<Option<Vec<Profile>>> {
        let value = self
            .store
            .get(&self.namespace, SettingKey::Profiles.as_str())
            .await?;

        match value {
            Some(v) => Ok(serde_json::from_value::<Option<Vec<Profile>>>(v)?),
            None => Ok(None),
        }
    }

    /// The profile list only if it has actually been written, ignoring the
    /// registered default.
    async fn get_persisted_profiles(&self) -> Result<Option<Vec<Profile>>> {
        let value = self
            .store
            .get_persisted(&self.namespace, SettingKey::Profiles.as_str())
            .await?;

        match value {
            Some(v) => Ok(serde_json::from_value::<Option<Vec<Profile>>>(v)?),
            None => Ok(None),
        }
    }

    /// First profile whose name matches exactly.
    ///
    /// # Errors
    /// Returns an error if the profile list cannot be read.
    pub async fn get_profile_by_name(&self, name: &str) -> Result<Option<Profile>> {
        let profiles = self.get_all_profiles().await?.unwrap_or_default();
        Ok(profiles.into_iter().find(|profile| profile.name == name))
    }

    /// Name stored as the active profile, [`DEFAULT_PROFILE_NAME`] when unset.
    ///
    /// # Errors
    /// Returns an error if the store fails or the value is not a string.
    pub async fn get_active_profile_name(&self) -> Result<String> {
        let value = self
            .store
            .get(&self.namespace, SettingKey::ActiveProfileName.as_str())
            .await?;

        let name = match value {
            Some(v) => serde_json::from_value::<Option<String>>(v)?,
            None => None,
        };
        Ok(name.unwrap_or_else(|| DEFAULT_PROFILE_NAME.to_string()))
    }

    /// The profile named by the active profile setting.
    ///
    /// `None` when that profile no longer exists.
    ///
    /// # Errors
    /// Returns an error if the settings cannot be read.
    pub async fn get_active_profile(&self) -> Result<Option<Profile>> {
        let name = self.get_active_profile_name().await?;
        self.get_profile_by_name(&name).await
    }

    /// Whether the scripting API should be exposed.
    ///
    /// # Errors
    /// Returns an error if the store fails or the value is not a boolean.
    pub async fn is_api_enabled(&self) -> Result<bool> {
        let value = self
            .store
            .get(&self.namespace, SettingKey::RegisterApi.as_str())
            .await?;

        match value {
            Some(v) => Ok(serde_json::from_value::<Option<bool>>(v)?.unwrap_or(false)),
            None => Ok(false),
        }
    }

    /// Append a new profile to the list.
    ///
    /// `None` arguments stand for values the caller never supplied.
    ///
    /// # Errors
    /// - `InvalidArgument` when the name is missing or empty, or the modules
    ///   are missing
    /// - `Conflict` when a profile with this name exists
    /// - Store failures, unchanged
    pub async fn create_profile(
        &self,
        name: Option<&str>,
        modules: Option<ModuleConfiguration>,
    ) -> Result<Vec<Profile>> {
        let Some(name) = name else {
            return Err(self.reject(ProfileError::InvalidArgument(format!(
                "{CREATE_FAILED} Profile name is undefined."
            ))));
        };
        if name.is_empty() {
            return Err(self.reject(ProfileError::InvalidArgument(format!(
                "{CREATE_FAILED} Profile name must not be empty."
            ))));
        }
        let Some(modules) = modules else {
            return Err(self.reject(ProfileError::InvalidArgument(format!(
                "{CREATE_FAILED} Please refresh the page and try again."
            ))));
        };
        if self.get_profile_by_name(name).await?.is_some() {
            return Err(self.reject(ProfileError::Conflict(format!(
                "{CREATE_FAILED} Profile \"{name}\" already exists!"
            ))));
        }

        let mut profiles = self.get_all_profiles().await?.unwrap_or_default();
        profiles.push(Profile::new(name, modules));

        let saved = self.save_profiles(&profiles).await?;
        tracing::info!(profile = name, "Created module profile");
        Ok(saved)
    }

    /// Replace the module flags of an existing profile, keeping its position.
    ///
    /// # Errors
    /// - `NotFound` when no profile has this name
    /// - Store failures, unchanged
    pub async fn save_changes_to_profile(
        &self,
        name: &str,
        modules: Option<ModuleConfiguration>,
    ) -> Result<Vec<Profile>> {
        let mut profiles = self.get_all_profiles().await?.unwrap_or_default();

        let Some(profile) = profiles.iter_mut().find(|profile| profile.name == name) else {
            return Err(self.reject(ProfileError::NotFound(format!(
                "{SAVE_FAILED} Profile \"{name}\" does not exist!"
            ))));
        };
        profile.modules = modules;

        let saved = self.save_profiles(&profiles).await?;
        tracing::info!(profile = name, "Saved module profile changes");
        Ok(saved)
    }

    /// Remove a profile from the list.
    ///
    /// Requests a window reload when the list becomes empty.
    ///
    /// # Errors
    /// - `NotFound` when no profile has this name
    /// - Store or host failures, unchanged
    pub async fn delete_profile(&self, name: &str) -> Result<Vec<Profile>> {
        if self.get_profile_by_name(name).await?.is_none() {
            return Err(self.reject(ProfileError::NotFound(format!(
                "{DELETE_FAILED} Profile \"{name}\" does not exist!"
            ))));
        }

        let mut profiles = self.get_all_profiles().await?.unwrap_or_default();
        if let Some(index) = profiles.iter().position(|profile| profile.name == name) {
            profiles.remove(index);
        }

        let saved = self.save_profiles(&profiles).await?;
        tracing::info!(profile = name, remaining = saved.len(), "Deleted module profile");

        if saved.is_empty() {
            self.host.reload_window().await?;
        }
        Ok(saved)
    }

    /// Make a profile the active one, apply its modules and reload.
    ///
    /// # Errors
    /// - `NotFound` when no profile has this name
    /// - Store or host failures, unchanged
    pub async fn activate_profile(&self, name: &str) -> Result<()> {
        let Some(profile) = self.get_profile_by_name(name).await? else {
            return Err(self.reject(ProfileError::NotFound(format!(
                "{ACTIVATE_FAILED} Profile \"{name}\" does not exist!"
            ))));
        };

        self.store
            .set(
                &self.namespace,
                SettingKey::ActiveProfileName.as_str(),
                json!(name),
            )
            .await?;
        self.set_core_module_configuration(profile.modules).await?;

        tracing::info!(profile = name, "Activated module profile");
        self.host.reload_window().await
    }

    /// Replace the whole list with a fresh default profile built from the
    /// live module configuration.
    ///
    /// # Errors
    /// Returns an error if the host or the store fails.
    pub async fn reset_profiles(&self) -> Result<Vec<Profile>> {
        let default_profile = Profile::default_from(self.get_current_module_configuration().await?);
        let saved = self.save_profiles(&[default_profile]).await?;
        tracing::info!("Reset module profiles to the default profile");
        Ok(saved)
    }

    async fn save_profiles(&self, profiles: &[Profile]) -> Result<Vec<Profile>> {
        let value = serde_json::to_value(profiles)?;
        let stored: Value = self
            .store
            .set(&self.namespace, SettingKey::Profiles.as_str(), value)
            .await?;
        Ok(serde_json::from_value(stored)?)
    }

    fn reject(&self, err: ProfileError) -> ProfileError {
        let message = err.to_string();
        tracing::warn!("{}", message);
        self.notifier.error(&message);
        err
    }
}
