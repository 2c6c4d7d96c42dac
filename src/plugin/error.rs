//! Errors raised while validating and loading plugins.

use netbox_plugin_interface::ContractViolation;
use thiserror::Error;

/// A plugin's descriptor is incompatible with the host or its configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("Plugin {plugin} declares an invalid version '{value}': {reason}")]
    InvalidVersion {
        plugin: String,
        value: String,
        reason: String,
    },

    #[error("Plugin {plugin} requires host minimum version {min_version}.")]
    BelowMinimumVersion { plugin: String, min_version: String },

    #[error("Plugin {plugin} requires host maximum version {max_version}.")]
    AboveMaximumVersion { plugin: String, max_version: String },

    #[error("Plugin {plugin} requires '{setting}' to be present in the plugins_config section of the configuration.")]
    MissingSetting { plugin: String, setting: String },
}

/// Kinds of plugin loading errors.
#[derive(Debug, Error)]
pub enum PluginErrorKind {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("contract violation: {0}")]
    Contract(#[from] ContractViolation),

    #[error("plugin is enabled but not installed")]
    NotInstalled,

    #[error("a plugin with this name is already registered")]
    Duplicate,

    #[error("invalid manifest: {0}")]
    Manifest(String),
}

/// Error when loading a plugin. Loading stops at the first one.
#[derive(Debug, Error)]
#[error("failed to load plugin '{plugin_name}': {kind}")]
pub struct PluginLoadError {
    /// Name of the plugin that failed.
    pub plugin_name: String,
    /// Category of the error.
    pub kind: PluginErrorKind,
}

impl PluginLoadError {
    pub fn new(plugin_name: impl Into<String>, kind: impl Into<PluginErrorKind>) -> Self {
        Self {
            plugin_name: plugin_name.into(),
            kind: kind.into(),
        }
    }
}
