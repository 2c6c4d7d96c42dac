//! Plugin loader.
//!
//! This module provides the `PluginLoader` struct which turns the host's list
//! of enabled plugins into an immutable [`Registry`]. It handles:
//! - Validating every enabled plugin's descriptor against the host version
//!   and its `plugins_config` settings
//! - Collecting installed apps, middleware and task queues
//! - Running each plugin's `ready` exactly once against a scoped registrar
//!
//! Loading is all-or-nothing: the first error aborts start-up and no partial
//! registry is returned.

use netbox_plugin_interface::{Plugin, Settings};
use std::collections::{BTreeMap, HashSet};

use crate::plugin::error::{PluginErrorKind, PluginLoadError};
use crate::plugin::registrar::PluginScope;
use crate::plugin::registry::{Registry, RegistryBuilder};
use crate::plugin::validate::validate_plugin;

/// Summary of one plugin that made it through loading.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedPlugin {
    /// Dotted package name.
    pub name: String,
    pub display_name: String,
    pub version: String,
    pub base_url: String,
    /// User settings with defaults applied.
    pub settings: Settings,
}

/// Result of a successful load.
#[derive(Debug)]
pub struct LoadedPlugins {
    pub registry: Registry,
    /// Loaded plugins in load order.
    pub plugins: Vec<LoadedPlugin>,
    /// Applications to install, dependencies ahead of the plugins needing them.
    pub installed_apps: Vec<String>,
    pub middleware: Vec<String>,
    /// Queue names prefixed with their plugin's name.
    pub queues: Vec<String>,
}

/// Holds the plugins compiled into (or discovered by) the host.
pub struct PluginLoader {
    host_version: String,
    plugins: Vec<Box<dyn Plugin>>,
}

impl PluginLoader {
    pub fn new(host_version: impl Into<String>) -> Self {
        Self {
            host_version: host_version.into(),
            plugins: Vec::new(),
        }
    }

    pub fn host_version(&self) -> &str {
        &self.host_version
    }

    /// Make a plugin available for loading.
    ///
    /// Names are unique; registering a second plugin with the same name fails.
    pub fn register(&mut self, plugin: Box<dyn Plugin>) -> Result<(), PluginLoadError> {
        let name = plugin.config().name.clone();
        if self.get(&name).is_some() {
            return Err(PluginLoadError::new(name, PluginErrorKind::Duplicate));
        }
        tracing::debug!("Plugin '{}' is available", name);
        self.plugins.push(plugin);
        Ok(())
    }

    /// Names of every available plugin, in registration order.
    pub fn available(&self) -> Vec<&str> {
        self.plugins
            .iter()
            .map(|plugin| plugin.config().name.as_str())
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&dyn Plugin> {
        self.plugins
            .iter()
            .find(|plugin| plugin.config().name == name)
            .map(|plugin| plugin.as_ref())
    }

    /// Validate and initialize the `enabled` plugins, in order.
    ///
    /// A name listed twice is rejected before any plugin initializes.
    /// Each plugin's entry in `plugins_config` is created when missing and
    /// completed with the plugin's default settings.
    pub fn load(
        &self,
        enabled: &[String],
        plugins_config: &mut BTreeMap<String, Settings>,
    ) -> Result<LoadedPlugins, PluginLoadError> {
        let mut selected = Vec::with_capacity(enabled.len());
        for (position, name) in enabled.iter().enumerate() {
            if enabled[..position].contains(name) {
                return Err(PluginLoadError::new(name.as_str(), PluginErrorKind::Duplicate));
            }
            let plugin = self
                .get(name)
                .ok_or_else(|| PluginLoadError::new(name.as_str(), PluginErrorKind::NotInstalled))?;
            let user_config = plugins_config.entry(name.clone()).or_default();
            validate_plugin(plugin.config(), user_config, &self.host_version)
                .map_err(|e| PluginLoadError::new(name.as_str(), e))?;
            selected.push(plugin);
        }

        let mut installed_apps = Vec::new();
        let mut seen = HashSet::new();
        let mut middleware = Vec::new();
        let mut queues = Vec::new();
        for plugin in &selected {
            let config = plugin.config();
            for app in config.dependent_apps.iter().chain(std::iter::once(&config.name)) {
                if seen.insert(app.as_str()) {
                    installed_apps.push(app.clone());
                }
            }
            middleware.extend(config.middleware.iter().cloned());
            queues.extend(
                config
                    .queues
                    .iter()
                    .map(|queue| format!("{}.{}", config.name, queue)),
            );
        }

        let mut builder = RegistryBuilder::new();
        for plugin in &selected {
            let config = plugin.config();
            plugin
                .ready(&mut PluginScope::new(&mut builder, config))
                .map_err(|e| PluginLoadError::new(config.name.as_str(), e))?;
        }

        let plugins: Vec<LoadedPlugin> = selected
            .iter()
            .map(|plugin| {
                let config = plugin.config();
                LoadedPlugin {
                    name: config.name.clone(),
                    display_name: config.display_name().to_string(),
                    version: config.version.clone(),
                    base_url: config.base_url().to_string(),
                    settings: plugins_config.get(&config.name).cloned().unwrap_or_default(),
                }
            })
            .collect();

        for plugin in &plugins {
            tracing::info!("Loaded plugin: {} v{}", plugin.name, plugin.version);
        }

        Ok(LoadedPlugins {
            registry: builder.build(),
            plugins,
            installed_apps,
            middleware,
            queues,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netbox_plugin_interface::{
        ContractViolation, ExtensionRegistrar, PluginConfig, PluginMenuItem, TemplateContext,
        TemplateExtension, TemplateExtensionClass,
    };
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use toml::Value;

    struct TestPlugin {
        config: PluginConfig,
        ready_calls: Arc<AtomicUsize>,
        unbound_extension: bool,
    }

    impl TestPlugin {
        fn new(config: PluginConfig) -> Self {
            Self {
                config,
                ready_calls: Arc::new(AtomicUsize::new(0)),
                unbound_extension: false,
            }
        }
    }

    struct Blank {
        context: TemplateContext,
    }

    impl TemplateExtension for Blank {
        fn context(&self) -> &TemplateContext {
            &self.context
        }
    }

    impl Plugin for TestPlugin {
        fn config(&self) -> &PluginConfig {
            &self.config
        }

        fn ready(&self, registrar: &mut dyn ExtensionRegistrar) -> Result<(), ContractViolation> {
            self.ready_calls.fetch_add(1, Ordering::SeqCst);
            registrar.register_menu_items(vec![PluginMenuItem::new(
                format!("plugins:{}:list", self.config.short_name()),
                "List",
            )])?;
            if self.unbound_extension {
                registrar.register_template_extensions(vec![TemplateExtensionClass::new(
                    "Unbound",
                    None,
                    |context| Box::new(Blank { context }) as Box<dyn TemplateExtension>,
                )])?;
            }
            Ok(())
        }
    }

    fn acme() -> PluginConfig {
        PluginConfig::new("acme")
            .with_verbose_name("ACME")
            .with_version_bounds(Some("3.5"), Some("4.0"))
            .with_required_setting("api_key")
            .with_default_setting("timeout", 30)
    }

    fn config_with_key() -> BTreeMap<String, Settings> {
        let mut settings = Settings::new();
        settings.insert("api_key".to_string(), Value::String("xyz".to_string()));
        BTreeMap::from([("acme".to_string(), settings)])
    }

    #[test]
    fn test_load_validates_and_registers() {
        let plugin = TestPlugin::new(acme());
        let calls = plugin.ready_calls.clone();
        let mut loader = PluginLoader::new("3.7.0");
        loader.register(Box::new(plugin)).unwrap();

        let mut plugins_config = config_with_key();
        let loaded = loader.load(&["acme".to_string()], &mut plugins_config).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(loaded.registry.menu_items_for("ACME").unwrap().len(), 1);
        assert_eq!(
            plugins_config["acme"].get("timeout"),
            Some(&Value::Integer(30))
        );
        assert_eq!(loaded.plugins[0].settings, plugins_config["acme"]);
        assert_eq!(loaded.plugins[0].base_url, "acme");
    }

    #[test]
    fn test_unknown_plugin_is_not_installed() {
        let loader = PluginLoader::new("3.7.0");
        let err = loader
            .load(&["ghost".to_string()], &mut BTreeMap::new())
            .unwrap_err();
        assert_eq!(err.plugin_name, "ghost");
        assert!(matches!(err.kind, PluginErrorKind::NotInstalled));
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut loader = PluginLoader::new("3.7.0");
        loader.register(Box::new(TestPlugin::new(acme()))).unwrap();
        let err = loader
            .register(Box::new(TestPlugin::new(acme())))
            .unwrap_err();
        assert!(matches!(err.kind, PluginErrorKind::Duplicate));
        assert_eq!(loader.available(), vec!["acme"]);
    }

    #[test]
    fn test_validation_failure_prevents_every_ready_call() {
        let first = TestPlugin::new(PluginConfig::new("first"));
        let first_calls = first.ready_calls.clone();
        let mut loader = PluginLoader::new("3.7.0");
        loader.register(Box::new(first)).unwrap();
        loader.register(Box::new(TestPlugin::new(acme()))).unwrap();

        let err = loader
            .load(
                &["first".to_string(), "acme".to_string()],
                &mut BTreeMap::new(),
            )
            .unwrap_err();

        assert_eq!(err.plugin_name, "acme");
        assert!(err.to_string().contains("'api_key'"));
        assert_eq!(first_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_plugin_enabled_twice_is_rejected_before_ready() {
        let plugin = TestPlugin::new(PluginConfig::new("idle"));
        let calls = plugin.ready_calls.clone();
        let mut loader = PluginLoader::new("3.7.0");
        loader.register(Box::new(plugin)).unwrap();

        let err = loader
            .load(
                &["idle".to_string(), "idle".to_string()],
                &mut BTreeMap::new(),
            )
            .unwrap_err();

        assert_eq!(err.plugin_name, "idle");
        assert!(matches!(err.kind, PluginErrorKind::Duplicate));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_incompatible_host_version() {
        let mut loader = PluginLoader::new("4.1.0");
        loader.register(Box::new(TestPlugin::new(acme()))).unwrap();
        let err = loader
            .load(&["acme".to_string()], &mut config_with_key())
            .unwrap_err();
        assert!(err.to_string().contains("maximum version 4.0"));
    }

    #[test]
    fn test_contract_violation_aborts_load() {
        let mut plugin = TestPlugin::new(PluginConfig::new("broken"));
        plugin.unbound_extension = true;
        let mut loader = PluginLoader::new("3.7.0");
        loader.register(Box::new(plugin)).unwrap();

        let err = loader
            .load(&["broken".to_string()], &mut BTreeMap::new())
            .unwrap_err();
        assert!(matches!(
            err.kind,
            PluginErrorKind::Contract(ContractViolation::MissingModel { .. })
        ));
    }

    #[test]
    fn test_installed_apps_middleware_and_queues() {
        let mut first = PluginConfig::new("vendor.alpha");
        first.dependent_apps = vec!["taggit".to_string()];
        first.middleware = vec!["alpha.middleware.Audit".to_string()];
        first.queues = vec!["jobs".to_string()];
        let mut second = PluginConfig::new("beta");
        second.dependent_apps = vec!["taggit".to_string(), "vendor.alpha".to_string()];
        second.queues = vec!["sync".to_string(), "reports".to_string()];

        let mut loader = PluginLoader::new("3.7.0");
        loader.register(Box::new(TestPlugin::new(first))).unwrap();
        loader.register(Box::new(TestPlugin::new(second))).unwrap();

        let loaded = loader
            .load(
                &["vendor.alpha".to_string(), "beta".to_string()],
                &mut BTreeMap::new(),
            )
            .unwrap();

        assert_eq!(
            loaded.installed_apps,
            vec!["taggit", "vendor.alpha", "beta"]
        );
        assert_eq!(loaded.middleware, vec!["alpha.middleware.Audit"]);
        assert_eq!(
            loaded.queues,
            vec!["vendor.alpha.jobs", "beta.sync", "beta.reports"]
        );
    }

    #[test]
    fn test_disabled_plugins_are_not_initialized() {
        let plugin = TestPlugin::new(PluginConfig::new("idle"));
        let calls = plugin.ready_calls.clone();
        let mut loader = PluginLoader::new("3.7.0");
        loader.register(Box::new(plugin)).unwrap();

        let mut plugins_config = BTreeMap::new();
        let loaded = loader.load(&[], &mut plugins_config).unwrap();

        assert!(loaded.registry.is_empty());
        assert!(loaded.plugins.is_empty());
        assert!(plugins_config.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
