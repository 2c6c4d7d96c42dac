//! Plugin manager for discovering manifest-declared plugins.
//!
//! The PluginManager scans the plugins directory for sub-directories holding
//! a plugin.toml manifest and turns each into a [`ManifestPlugin`].

use std::fs;
use std::path::Path;

use crate::plugin::error::{PluginErrorKind, PluginLoadError};
use crate::plugin::loader::PluginLoader;
use crate::plugin::manifest::{ManifestPlugin, PluginManifest};

/// File name of a plugin manifest inside its directory.
pub const MANIFEST_FILE: &str = "plugin.toml";

/// Plugins discovered on disk, sorted by directory name.
#[derive(Debug, Default)]
pub struct PluginManager {
    plugins: Vec<ManifestPlugin>,
}

impl PluginManager {
    /// Discover plugins in `plugins_dir`.
    ///
    /// Returns an empty manager if the directory does not exist. Directories
    /// without a manifest are skipped. A manifest that cannot be read, parsed
    /// or validated fails the whole discovery.
    pub fn discover(plugins_dir: &Path) -> Result<Self, PluginLoadError> {
        let mut manager = Self::default();

        if !plugins_dir.exists() {
            tracing::debug!("Plugins directory does not exist: {:?}", plugins_dir);
            return Ok(manager);
        }

        let entries = fs::read_dir(plugins_dir).map_err(|e| {
            PluginLoadError::new(
                plugins_dir.display().to_string(),
                PluginErrorKind::Manifest(format!("failed to read plugins directory: {}", e)),
            )
        })?;

        let mut plugin_dirs: Vec<_> = entries
            .filter_map(|entry| match entry {
                Ok(e) => Some(e.path()),
                Err(e) => {
                    tracing::warn!("Failed to read directory entry: {}", e);
                    None
                }
            })
            .filter(|path| path.is_dir())
            .collect();
        plugin_dirs.sort();

        for plugin_dir in plugin_dirs {
            if !plugin_dir.join(MANIFEST_FILE).exists() {
                tracing::warn!("Skipping {:?}: missing {}", plugin_dir, MANIFEST_FILE);
                continue;
            }

            let plugin = Self::load_plugin(&plugin_dir)?;
            tracing::debug!(
                "Discovered plugin '{}' in {:?}",
                plugin.manifest().plugin.name,
                plugin_dir
            );
            manager.plugins.push(plugin);
        }

        Ok(manager)
    }

    /// Load and validate the manifest in `plugin_dir`.
    pub fn load_plugin(plugin_dir: &Path) -> Result<ManifestPlugin, PluginLoadError> {
        let manifest_error = |message: String| {
            PluginLoadError::new(
                plugin_dir.display().to_string(),
                PluginErrorKind::Manifest(message),
            )
        };

        let content = fs::read_to_string(plugin_dir.join(MANIFEST_FILE))
            .map_err(|e| manifest_error(format!("failed to read {}: {}", MANIFEST_FILE, e)))?;
        let manifest = PluginManifest::parse(&content)
            .map_err(|e| manifest_error(format!("failed to parse {}: {}", MANIFEST_FILE, e)))?;
        manifest.validate().map_err(manifest_error)?;

        Ok(ManifestPlugin::new(manifest, plugin_dir))
    }

    pub fn plugins(&self) -> &[ManifestPlugin] {
        &self.plugins
    }

    /// Hand every discovered plugin to `loader`.
    pub fn register_all(self, loader: &mut PluginLoader) -> Result<(), PluginLoadError> {
        for plugin in self.plugins {
            loader.register(Box::new(plugin))?;
        }
        Ok(())
    }
}
