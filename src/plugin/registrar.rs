//! Registrar handed to a plugin while it initializes.

use netbox_plugin_interface::{
    ContractViolation, ExtensionRegistrar, GraphQlSchema, PluginConfig, PluginMenu,
    PluginMenuItem, PreferenceSet, SearchIndex, TemplateExtensionClass,
};

use crate::plugin::registry::RegistryBuilder;

/// [`ExtensionRegistrar`] bound to one plugin.
///
/// Menu items are filed under the plugin's display name and preferences under
/// its short name.
pub struct PluginScope<'a> {
    builder: &'a mut RegistryBuilder,
    config: &'a PluginConfig,
}

impl<'a> PluginScope<'a> {
    pub fn new(builder: &'a mut RegistryBuilder, config: &'a PluginConfig) -> Self {
        Self { builder, config }
    }

    fn plugin(&self) -> &str {
        &self.config.name
    }
}

impl ExtensionRegistrar for PluginScope<'_> {
    fn register_search_indexes(
        &mut self,
        indexes: Vec<SearchIndex>,
    ) -> Result<(), ContractViolation> {
        let count = indexes.len();
        self.builder.register_search_indexes(indexes)?;
        tracing::debug!("Plugin '{}' registered {} search index(es)", self.plugin(), count);
        Ok(())
    }

    fn register_template_extensions(
        &mut self,
        classes: Vec<TemplateExtensionClass>,
    ) -> Result<(), ContractViolation> {
        let names: Vec<String> = classes.iter().map(|c| c.name().to_string()).collect();
        self.builder.register_template_extensions(classes)?;
        tracing::debug!(
            "Plugin '{}' registered template extensions: {:?}",
            self.plugin(),
            names
        );
        Ok(())
    }

    fn register_menu(&mut self, menu: PluginMenu) -> Result<(), ContractViolation> {
        let label = menu.label.clone();
        self.builder.register_menu(menu);
        tracing::debug!("Plugin '{}' registered menu '{}'", self.plugin(), label);
        Ok(())
    }

    fn register_menu_items(&mut self, items: Vec<PluginMenuItem>) -> Result<(), ContractViolation> {
        let count = items.len();
        let section = self.config.display_name();
        self.builder.register_menu_items(section, items);
        tracing::debug!(
            "Plugin '{}' registered {} menu item(s) under '{}'",
            self.plugin(),
            count,
            section
        );
        Ok(())
    }

    fn register_graphql_schema(&mut self, schema: GraphQlSchema) -> Result<(), ContractViolation> {
        let name = schema.name.clone();
        self.builder.register_graphql_schema(schema);
        tracing::debug!("Plugin '{}' registered GraphQL schema '{}'", self.plugin(), name);
        Ok(())
    }

    fn register_user_preferences(
        &mut self,
        preferences: PreferenceSet,
    ) -> Result<(), ContractViolation> {
        let count = preferences.len();
        self.builder
            .register_user_preferences(self.config.short_name(), preferences);
        tracing::debug!(
            "Plugin '{}' registered {} user preference(s)",
            self.plugin(),
            count
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netbox_plugin_interface::UserPreference;

    #[test]
    fn test_menu_items_filed_under_display_name() {
        let config = PluginConfig::new("vendor.acme").with_verbose_name("ACME Integration");
        let mut builder = RegistryBuilder::new();
        PluginScope::new(&mut builder, &config)
            .register_menu_items(vec![PluginMenuItem::new("plugins:acme:list", "Widgets")])
            .unwrap();

        let registry = builder.build();
        assert_eq!(registry.menu_items_for("ACME Integration").unwrap().len(), 1);
        assert!(registry.menu_items_for("vendor.acme").is_none());
    }

    #[test]
    fn test_menu_items_fall_back_to_package_name() {
        let config = PluginConfig::new("vendor.acme");
        let mut builder = RegistryBuilder::new();
        PluginScope::new(&mut builder, &config)
            .register_menu_items(vec![])
            .unwrap();

        let registry = builder.build();
        assert_eq!(registry.menu_items_for("vendor.acme"), Some(&[][..]));
    }

    #[test]
    fn test_preferences_keyed_by_short_name() {
        let config = PluginConfig::new("vendor.acme");
        let mut preferences = PreferenceSet::new();
        preferences.insert("acme.theme".to_string(), UserPreference::new("Theme"));

        let mut builder = RegistryBuilder::new();
        PluginScope::new(&mut builder, &config)
            .register_user_preferences(preferences)
            .unwrap();

        let registry = builder.build();
        assert!(registry.preferences_for("acme").is_some());
        assert!(registry.preferences_for("vendor.acme").is_none());
    }
}
