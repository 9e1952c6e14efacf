//! Shared types for module profiles.
//!
//! A [`Profile`] is a named snapshot of which host modules are enabled. The
//! profile list, the active profile name and the API flag are persisted as
//! JSON setting values, described to the host with [`SettingDescriptor`]s.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Module id -> enabled flag.
pub type ModuleConfiguration = BTreeMap<String, bool>;

/// Name of the profile created on first run.
pub const DEFAULT_PROFILE_NAME: &str = "Default Profile";

/// Namespace owning the host's live module configuration.
pub const CORE_NAMESPACE: &str = "core";

/// Key of the host's live module configuration within [`CORE_NAMESPACE`].
pub const MODULE_CONFIGURATION_KEY: &str = "moduleConfiguration";

/// A named set of module enable/disable flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Unique, case-sensitive profile name
    pub name: String,
    /// Module flags; `None` only for legacy or malformed entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modules: Option<ModuleConfiguration>,
}

impl Profile {
    /// Create a profile with the given module flags.
    #[must_use]
    pub fn new(name: impl Into<String>, modules: ModuleConfiguration) -> Self {
        Self {
            name: name.into(),
            modules: Some(modules),
        }
    }

    /// Build the bootstrap profile from a snapshot of the live configuration.
    #[must_use]
    pub fn default_from(modules: ModuleConfiguration) -> Self {
        Self::new(DEFAULT_PROFILE_NAME, modules)
    }
}

/// Stable identifiers of the settings this crate family registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    /// The persisted profile list
    Profiles,
    /// Name of the currently active profile
    ActiveProfileName,
    /// "Manage Profiles" menu entry; stores no value
    ManageProfiles,
    /// Whether the scripting API should be exposed
    RegisterApi,
}

impl SettingKey {
    /// Identifier used as the setting key in the store.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Profiles => "profiles",
            Self::ActiveProfileName => "activeProfileName",
            Self::ManageProfiles => "manageProfiles",
            Self::RegisterApi => "registerApi",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who a setting applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingScope {
    /// Shared by every user of the world
    World,
}

/// Value type of a registered setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingType {
    /// JSON array
    Array,
    /// JSON string
    String,
    /// JSON boolean
    Boolean,
}

/// Registration data for a stored setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingDescriptor {
    /// Display name
    pub name: Option<String>,
    /// Help text
    pub hint: Option<String>,
    /// Value type
    #[serde(rename = "type")]
    pub setting_type: SettingType,
    /// Scope
    pub scope: SettingScope,
    /// Shown in the host's configuration UI
    pub config: bool,
    /// Value returned by the store while nothing is persisted
    pub default: Value,
}

/// Registration data for a settings-menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuDescriptor {
    /// Display name
    pub name: Option<String>,
    /// Button label
    pub label: String,
    /// Help text
    pub hint: Option<String>,
    /// Icon class
    pub icon: String,
    /// Identifier of the form the host opens
    #[serde(rename = "type")]
    pub form: String,
    /// Restricted to privileged users
    pub restricted: bool,
}
