//! Descriptor validation against the running host and the user's settings.

use netbox_plugin_interface::{parse_version, PluginConfig, Settings};
use semver::Version;

use crate::plugin::error::ConfigurationError;

/// Validate a plugin descriptor and complete its user settings.
///
/// Runs in a fixed order and stops at the first failure:
/// 1. The host version must lie within `min_version..=max_version`
/// 2. Every required setting must be present in `user_config`
/// 3. Defaults are inserted for every setting `user_config` lacks
///
/// Defaults are only applied once both checks passed, and never replace a
/// value the user supplied.
pub fn validate_plugin(
    config: &PluginConfig,
    user_config: &mut Settings,
    host_version: &str,
) -> Result<(), ConfigurationError> {
    check_version_bounds(config, host_version)?;
    check_required_settings(config, user_config)?;
    apply_default_settings(config, user_config);
    Ok(())
}

/// Enforce the descriptor's host version constraints.
///
/// The two bounds are checked independently; an inverted range is not
/// special-cased.
pub fn check_version_bounds(
    config: &PluginConfig,
    host_version: &str,
) -> Result<(), ConfigurationError> {
    let current = parse_bound(config, host_version)?;

    if let Some(ref min_version) = config.min_version
        && current < parse_bound(config, min_version)?
    {
        return Err(ConfigurationError::BelowMinimumVersion {
            plugin: config.name.clone(),
            min_version: min_version.clone(),
        });
    }

    if let Some(ref max_version) = config.max_version
        && current > parse_bound(config, max_version)?
    {
        return Err(ConfigurationError::AboveMaximumVersion {
            plugin: config.name.clone(),
            max_version: max_version.clone(),
        });
    }

    Ok(())
}

/// Verify every required setting is present.
pub fn check_required_settings(
    config: &PluginConfig,
    user_config: &Settings,
) -> Result<(), ConfigurationError> {
    match config
        .required_settings
        .iter()
        .find(|setting| !user_config.contains_key(setting.as_str()))
    {
        Some(missing) => Err(ConfigurationError::MissingSetting {
            plugin: config.name.clone(),
            setting: missing.clone(),
        }),
        None => Ok(()),
    }
}

/// Insert defaults for settings the user did not provide.
pub fn apply_default_settings(config: &PluginConfig, user_config: &mut Settings) {
    for (setting, value) in &config.default_settings {
        if !user_config.contains_key(setting) {
            user_config.insert(setting.clone(), value.clone());
        }
    }
}

fn parse_bound(config: &PluginConfig, value: &str) -> Result<Version, ConfigurationError> {
    parse_version(value).map_err(|e| ConfigurationError::InvalidVersion {
        plugin: config.name.clone(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}
