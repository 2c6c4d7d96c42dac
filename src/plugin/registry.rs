//! Plugin extension registry.
//!
//! [`RegistryBuilder`] collects extensions while plugins initialize at
//! start-up. Once every plugin ran, [`RegistryBuilder::build`] freezes it
//! into a [`Registry`], which has no mutating methods and is what the
//! rendering and API layers read from.

use netbox_plugin_interface::{
    ContractViolation, GraphQlSchema, PluginMenu, PluginMenuItem, PreferenceSet, RenderError,
    SearchIndex, TemplateContext, TemplateExtensionClass, TemplateRenderer, TemplateSlot,
};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct Extensions {
    graphql_schemas: Vec<GraphQlSchema>,
    menus: Vec<PluginMenu>,
    menu_items: BTreeMap<String, Vec<PluginMenuItem>>,
    preferences: BTreeMap<String, PreferenceSet>,
    template_extensions: BTreeMap<String, Vec<TemplateExtensionClass>>,
    search: BTreeMap<String, SearchIndex>,
}

/// Mutable registry used during start-up only.
///
/// Every `register_*` method validates its whole input before touching any
/// state, so a rejected call leaves the builder unchanged.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    extensions: Extensions,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register template extension classes.
    ///
    /// Each class is appended to the list for its model, after any classes
    /// other plugins registered for the same model.
    pub fn register_template_extensions(
        &mut self,
        classes: Vec<TemplateExtensionClass>,
    ) -> Result<(), ContractViolation> {
        let mut targets = Vec::with_capacity(classes.len());
        for class in &classes {
            match class.model().map(str::trim) {
                Some(model) if !model.is_empty() => targets.push(model.to_string()),
                _ => {
                    return Err(ContractViolation::MissingModel {
                        extension: class.name().to_string(),
                    });
                }
            }
        }

        for (model, class) in targets.into_iter().zip(classes) {
            self.extensions
                .template_extensions
                .entry(model)
                .or_default()
                .push(class);
        }
        Ok(())
    }

    pub fn register_menu(&mut self, menu: PluginMenu) {
        self.extensions.menus.push(menu);
    }

    /// Register menu items under `section`, replacing any earlier
    /// registration for that section.
    pub fn register_menu_items(&mut self, section: &str, items: Vec<PluginMenuItem>) {
        if self
            .extensions
            .menu_items
            .insert(section.to_string(), items)
            .is_some()
        {
            tracing::warn!("Menu items for section '{}' were replaced", section);
        }
    }

    pub fn register_graphql_schema(&mut self, schema: GraphQlSchema) {
        self.extensions.graphql_schemas.push(schema);
    }

    /// Register a plugin's preferences, replacing any earlier set.
    pub fn register_user_preferences(&mut self, plugin_name: &str, preferences: PreferenceSet) {
        self.extensions
            .preferences
            .insert(plugin_name.to_string(), preferences);
    }

    /// Register search indexes keyed by their lowercased model label.
    pub fn register_search_indexes(
        &mut self,
        indexes: Vec<SearchIndex>,
    ) -> Result<(), ContractViolation> {
        if let Some(index) = indexes.iter().find(|index| index.label().is_empty()) {
            return Err(ContractViolation::SearchIndexWithoutModel {
                index: format!("{:?}", index.fields),
            });
        }

        for index in indexes {
            self.extensions.search.insert(index.label(), index);
        }
        Ok(())
    }

    /// Freeze the collected extensions.
    pub fn build(self) -> Registry {
        Registry {
            extensions: self.extensions,
        }
    }
}

/// Read-only catalog of every registered extension.
#[derive(Debug, Default)]
pub struct Registry {
    extensions: Extensions,
}

impl Registry {
    pub fn graphql_schemas(&self) -> &[GraphQlSchema] {
        &self.extensions.graphql_schemas
    }

    pub fn menus(&self) -> &[PluginMenu] {
        &self.extensions.menus
    }

    pub fn menu_items(&self) -> &BTreeMap<String, Vec<PluginMenuItem>> {
        &self.extensions.menu_items
    }

    pub fn menu_items_for(&self, section: &str) -> Option<&[PluginMenuItem]> {
        self.extensions.menu_items.get(section).map(Vec::as_slice)
    }

    pub fn preferences(&self) -> &BTreeMap<String, PreferenceSet> {
        &self.extensions.preferences
    }

    pub fn preferences_for(&self, plugin_name: &str) -> Option<&PreferenceSet> {
        self.extensions.preferences.get(plugin_name)
    }

    pub fn template_extensions(&self) -> &BTreeMap<String, Vec<TemplateExtensionClass>> {
        &self.extensions.template_extensions
    }

    /// Extension classes registered for `model`, in registration order.
    ///
    /// `model` is trimmed the same way it is on registration.
    pub fn template_extensions_for(&self, model: &str) -> &[TemplateExtensionClass] {
        self.extensions
            .template_extensions
            .get(model.trim())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn search_index(&self, model: &str) -> Option<&SearchIndex> {
        self.extensions.search.get(&model.trim().to_lowercase())
    }

    pub fn search_indexes(&self) -> &BTreeMap<String, SearchIndex> {
        &self.extensions.search
    }

    pub fn is_empty(&self) -> bool {
        let e = &self.extensions;
        e.graphql_schemas.is_empty()
            && e.menus.is_empty()
            && e.menu_items.is_empty()
            && e.preferences.is_empty()
            && e.template_extensions.is_empty()
            && e.search.is_empty()
    }

    /// Render one page slot for an object of `model`.
    ///
    /// Instantiates every extension registered for the model with a copy of
    /// `context`, in registration order, and concatenates the content of the
    /// ones that fill the slot.
    pub fn render_slot(
        &self,
        model: &str,
        slot: TemplateSlot,
        context: &TemplateContext,
        renderer: &dyn TemplateRenderer,
    ) -> Result<String, RenderError> {
        let mut html = String::new();
        for class in self.template_extensions_for(model) {
            let extension = class.instantiate(context.clone());
            if let Some(content) = extension.render_slot(slot, renderer)? {
                html.push_str(&content);
            }
        }
        Ok(html)
    }

    /// Serializable view of the registry, mirroring its nested layout.
    pub fn summary(&self) -> RegistrySummary<'_> {
        let e = &self.extensions;
        RegistrySummary {
            plugins: PluginExtensionsSummary {
                graphql_schemas: e.graphql_schemas.iter().map(|s| s.name.as_str()).collect(),
                menus: &e.menus,
                menu_items: &e.menu_items,
                preferences: &e.preferences,
                template_extensions: e
                    .template_extensions
                    .iter()
                    .map(|(model, classes)| {
                        (
                            model.as_str(),
                            classes.iter().map(TemplateExtensionClass::name).collect(),
                        )
                    })
                    .collect(),
            },
            search: &e.search,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegistrySummary<'a> {
    pub plugins: PluginExtensionsSummary<'a>,
    pub search: &'a BTreeMap<String, SearchIndex>,
}

#[derive(Debug, Serialize)]
pub struct PluginExtensionsSummary<'a> {
    pub graphql_schemas: Vec<&'a str>,
    pub menus: &'a [PluginMenu],
    pub menu_items: &'a BTreeMap<String, Vec<PluginMenuItem>>,
    pub preferences: &'a BTreeMap<String, PreferenceSet>,
    pub template_extensions: BTreeMap<&'a str, Vec<&'a str>>,
}
