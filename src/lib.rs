//! Plugin host for a network source-of-truth application.
//!
//! Plugins implement [`netbox_plugin_interface::Plugin`] or are declared by a
//! `plugin.toml` manifest. [`plugin::PluginLoader`] validates the enabled ones
//! and collects their extensions into an immutable [`plugin::Registry`].

pub mod config;
pub mod logging;
pub mod plugin;
pub mod utils;

pub use netbox_plugin_interface;
