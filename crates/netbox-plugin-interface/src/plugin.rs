//! Plugin trait and the registration API the host exposes to plugins.

use crate::descriptor::PluginConfig;
use crate::error::ContractViolation;
use crate::graphql::GraphQlSchema;
use crate::navigation::{PluginMenu, PluginMenuItem};
use crate::preferences::PreferenceSet;
use crate::search::SearchIndex;
use crate::template::TemplateExtensionClass;

/// Registration API handed to [`Plugin::ready`].
///
/// The host binds each registrar to the plugin being initialized, so menu
/// items land under the plugin's display name and preferences under its
/// short name without the plugin having to pass either.
pub trait ExtensionRegistrar {
    fn register_search_indexes(
        &mut self,
        indexes: Vec<SearchIndex>,
    ) -> Result<(), ContractViolation>;

    fn register_template_extensions(
        &mut self,
        classes: Vec<TemplateExtensionClass>,
    ) -> Result<(), ContractViolation>;

    fn register_menu(&mut self, menu: PluginMenu) -> Result<(), ContractViolation>;

    fn register_menu_items(&mut self, items: Vec<PluginMenuItem>) -> Result<(), ContractViolation>;

    fn register_graphql_schema(&mut self, schema: GraphQlSchema) -> Result<(), ContractViolation>;

    fn register_user_preferences(
        &mut self,
        preferences: PreferenceSet,
    ) -> Result<(), ContractViolation>;
}

/// A plugin loaded into the host at start-up.
///
/// # Example (for plugin implementors)
///
/// ```
/// use netbox_plugin_interface::{
///     ContractViolation, ExtensionRegistrar, Plugin, PluginConfig, PluginMenuItem,
/// };
///
/// struct Acme {
///     config: PluginConfig,
/// }
///
/// impl Plugin for Acme {
///     fn config(&self) -> &PluginConfig {
///         &self.config
///     }
///
///     fn ready(&self, registrar: &mut dyn ExtensionRegistrar) -> Result<(), ContractViolation> {
///         registrar.register_menu_items(vec![PluginMenuItem::new(
///             "plugins:acme:widget_list",
///             "Widgets",
///         )])
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    /// Static descriptor, validated by the host before `ready` runs.
    fn config(&self) -> &PluginConfig;

    /// Register the plugin's extensions.
    ///
    /// Called exactly once, after every enabled plugin passed validation.
    /// Extension kinds the plugin does not call a registrar for are simply
    /// absent. Any error aborts the host's start-up.
    fn ready(&self, _registrar: &mut dyn ExtensionRegistrar) -> Result<(), ContractViolation> {
        Ok(())
    }
}
