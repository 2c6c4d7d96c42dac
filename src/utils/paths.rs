use anyhow::{anyhow, Result};
use std::path::PathBuf;

pub fn get_netbox_plugins_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
    Ok(home.join(".netbox-plugins"))
}

pub fn get_config_path() -> Result<PathBuf> {
    let base_dir = get_netbox_plugins_dir()?;
    Ok(base_dir.join("config.toml"))
}

/// Default directory scanned for manifest-declared plugins.
pub fn get_plugins_dir() -> Result<PathBuf> {
    let base_dir = get_netbox_plugins_dir()?;
    Ok(base_dir.join("plugins"))
}
