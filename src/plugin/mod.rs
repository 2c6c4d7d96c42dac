pub mod config;
pub mod error;
pub mod loader;
pub mod manager;
pub mod manifest;
pub mod registrar;
pub mod registry;
pub mod validate;

pub use error::{ConfigurationError, PluginErrorKind, PluginLoadError};
pub use loader::{LoadedPlugin, LoadedPlugins, PluginLoader};
pub use manager::PluginManager;
pub use manifest::{ManifestPlugin, PluginManifest};
pub use registrar::PluginScope;
pub use registry::{Registry, RegistryBuilder, RegistrySummary};
pub use validate::validate_plugin;
