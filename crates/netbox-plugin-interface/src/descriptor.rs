//! Static plugin descriptor.
//!
//! Defines [`PluginConfig`], the per-plugin metadata the host reads before it
//! lets a plugin register anything. The same struct is the `[plugin]` table of
//! a `plugin.toml` manifest.

use serde::{Deserialize, Serialize};

/// Plugin settings as supplied by the host configuration.
pub type Settings = toml::Table;

/// Per-plugin static metadata, compatibility bounds and settings contract.
///
/// Constructed once when the plugin is loaded and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Dotted package name, e.g. `acme.netbox_acme`. The last segment is the
    /// plugin's short name.
    pub name: String,

    /// Human-readable name, used as the navigation section title
    #[serde(default)]
    pub verbose_name: Option<String>,

    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub author_email: String,

    #[serde(default)]
    pub description: String,

    /// Plugin version (informational)
    #[serde(default)]
    pub version: String,

    /// Root URL path under `/plugins`. Defaults to the label.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Minimum compatible host version
    #[serde(default)]
    pub min_version: Option<String>,

    /// Maximum compatible host version
    #[serde(default)]
    pub max_version: Option<String>,

    /// Settings applied when the user configuration does not provide them
    #[serde(default)]
    pub default_settings: Settings,

    /// Settings the user configuration must provide
    #[serde(default)]
    pub required_settings: Vec<String>,

    /// Middleware provided by the plugin
    #[serde(default)]
    pub middleware: Vec<String>,

    /// Task queues dedicated to the plugin
    #[serde(default)]
    pub queues: Vec<String>,

    /// Additional applications that must be installed alongside the plugin
    #[serde(default)]
    pub dependent_apps: Vec<String>,
}

impl PluginConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Last segment of the dotted package name.
    pub fn short_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Application label; identical to the short name.
    pub fn label(&self) -> &str {
        self.short_name()
    }

    /// Name shown to users; falls back to the package name.
    pub fn display_name(&self) -> &str {
        match self.verbose_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.name,
        }
    }

    /// URL path segment under `/plugins`.
    pub fn base_url(&self) -> &str {
        match self.base_url.as_deref() {
            Some(url) if !url.trim().is_empty() => url,
            _ => self.label(),
        }
    }

    pub fn with_verbose_name(mut self, verbose_name: impl Into<String>) -> Self {
        self.verbose_name = Some(verbose_name.into());
        self
    }

    pub fn with_version_bounds(
        mut self,
        min_version: Option<&str>,
        max_version: Option<&str>,
    ) -> Self {
        self.min_version = min_version.map(str::to_string);
        self.max_version = max_version.map(str::to_string);
        self
    }

    pub fn with_required_setting(mut self, setting: impl Into<String>) -> Self {
        self.required_settings.push(setting.into());
        self
    }

    pub fn with_default_setting(
        mut self,
        setting: impl Into<String>,
        value: impl Into<toml::Value>,
    ) -> Self {
        self.default_settings.insert(setting.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name_uses_last_segment() {
        let config = PluginConfig::new("acme.netbox_acme");
        assert_eq!(config.short_name(), "netbox_acme");
        assert_eq!(config.label(), "netbox_acme");

        let flat = PluginConfig::new("acme");
        assert_eq!(flat.short_name(), "acme");
    }

    #[test]
    fn test_display_name_falls_back_to_name() {
        let config = PluginConfig::new("acme");
        assert_eq!(config.display_name(), "acme");

        let named = PluginConfig::new("acme").with_verbose_name("ACME Integration");
        assert_eq!(named.display_name(), "ACME Integration");

        let blank = PluginConfig::new("acme").with_verbose_name("  ");
        assert_eq!(blank.display_name(), "acme");
    }

    #[test]
    fn test_base_url_defaults_to_label() {
        let mut config = PluginConfig::new("vendor.acme");
        assert_eq!(config.base_url(), "acme");

        config.base_url = Some("acme-tools".to_string());
        assert_eq!(config.base_url(), "acme-tools");
    }

    #[test]
    fn test_parse_from_toml_with_defaults() {
        let toml = r#"
name = "acme"
version = "1.2.0"
min_version = "3.5"
required_settings = ["api_key"]

[default_settings]
timeout = 30
"#;
        let config: PluginConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.name, "acme");
        assert_eq!(config.min_version.as_deref(), Some("3.5"));
        assert!(config.max_version.is_none());
        assert_eq!(config.required_settings, vec!["api_key".to_string()]);
        assert_eq!(
            config.default_settings.get("timeout"),
            Some(&toml::Value::Integer(30))
        );
        assert!(config.middleware.is_empty());
        assert!(config.dependent_apps.is_empty());
    }

    #[test]
    fn test_builder_helpers() {
        let config = PluginConfig::new("acme")
            .with_version_bounds(Some("3.5"), Some("4.0"))
            .with_required_setting("api_key")
            .with_default_setting("timeout", 30);
        assert_eq!(config.min_version.as_deref(), Some("3.5"));
        assert_eq!(config.max_version.as_deref(), Some("4.0"));
        assert_eq!(config.required_settings, vec!["api_key".to_string()]);
        assert_eq!(
            config.default_settings.get("timeout"),
            Some(&toml::Value::Integer(30))
        );
    }
}
