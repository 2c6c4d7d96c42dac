//! Contracts shared between the plugin host and the plugins it loads.
//!
//! A plugin links against this crate only. It describes itself with a
//! [`PluginConfig`], implements [`Plugin`], and registers its extensions
//! through the [`ExtensionRegistrar`] handed to it by the host at start-up.

pub mod descriptor;
pub mod error;
pub mod graphql;
pub mod navigation;
pub mod plugin;
pub mod preferences;
pub mod search;
pub mod template;
pub mod version;

pub use descriptor::{PluginConfig, Settings};
pub use error::{ContractViolation, RenderError};
pub use graphql::GraphQlSchema;
pub use navigation::{ButtonColor, MenuGroup, PluginMenu, PluginMenuButton, PluginMenuItem};
pub use plugin::{ExtensionRegistrar, Plugin};
pub use preferences::{PreferenceChoice, PreferenceSet, UserPreference};
pub use search::SearchIndex;
pub use template::{
    SlotContent, TemplateContext, TemplateExtension, TemplateExtensionClass, TemplateExtensionType,
    TemplateRenderer, TemplateSlot,
};
pub use version::{parse_version, INTERFACE_VERSION};
