use anyhow::{Context, Result};
use netbox_plugin_interface::Settings;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::paths::{get_config_path, get_plugins_dir};

/// Host configuration.
///
/// ```toml
/// host_version = "4.1.0"
/// plugins = ["acme"]
///
/// [plugins_config.acme]
/// api_key = "xyz"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Version plugins are checked against
    #[serde(default = "default_host_version")]
    pub host_version: String,

    /// Enabled plugins, in load order
    #[serde(default)]
    pub plugins: Vec<String>,

    /// Directory scanned for manifest-declared plugins
    #[serde(default)]
    pub plugins_dir: Option<PathBuf>,

    /// Write logs to daily files in this directory instead of stderr
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Per-plugin settings keyed by plugin name
    #[serde(default)]
    pub plugins_config: BTreeMap<String, Settings>,
}

fn default_host_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host_version: default_host_version(),
            plugins: Vec::new(),
            plugins_dir: None,
            log_dir: None,
            plugins_config: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing file yields the default configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => get_config_path()?,
        };

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid TOML in {}", config_path.display()))?;

        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;

        Ok(())
    }

    /// Configured plugins directory, or the default one.
    pub fn plugins_dir(&self) -> Result<PathBuf> {
        match self.plugins_dir {
            Some(ref dir) => Ok(dir.clone()),
            None => get_plugins_dir(),
        }
    }
}
