//! Settings templates for plugins.
//!
//! Generates the `plugins_config` snippet a user pastes into the host
//! configuration to enable a plugin.

use netbox_plugin_interface::PluginConfig;

/// Generate a commented TOML template for a plugin's settings.
///
/// Required settings are emitted uncommented with an empty placeholder;
/// defaulted settings are commented out with their default value.
pub fn generate_settings_template(config: &PluginConfig) -> String {
    let mut lines = Vec::new();

    lines.push(format!("# Settings for plugin '{}'", config.name));
    if let Some(ref min_version) = config.min_version {
        lines.push(format!("# Requires host version >= {}", min_version));
    }
    if let Some(ref max_version) = config.max_version {
        lines.push(format!("# Requires host version <= {}", max_version));
    }
    lines.push(String::new());
    lines.push(format!("[plugins_config.{}]", toml_key(&config.name)));

    for setting in &config.required_settings {
        lines.push("# Required".to_string());
        let example = match config.default_settings.get(setting) {
            Some(default) => default.to_string(),
            None => "\"\"".to_string(),
        };
        lines.push(format!("{} = {}", toml_key(setting), example));
    }

    for (setting, default) in &config.default_settings {
        if config.required_settings.contains(setting) {
            continue;
        }
        lines.push(format!("# Optional, default: {}", default));
        lines.push(format!("# {} = {}", toml_key(setting), default));
    }

    lines.push(String::new());
    lines.join("\n")
}

/// Quote a key unless it is a valid bare TOML key.
fn toml_key(key: &str) -> String {
    let bare = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if bare {
        key.to_string()
    } else {
        format!("\"{}\"", key.replace('\\', "\\\\").replace('"', "\\\""))
    }
}
