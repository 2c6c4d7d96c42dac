//! Plugin manifest parsing and validation.
//!
//! A `plugin.toml` declares a plugin without any code:
//!
//! ```toml
//! [plugin]
//! name = "acme"
//! verbose_name = "ACME"
//! min_version = "3.5"
//!
//! [[menu_items]]
//! link = "plugins:acme:widget_list"
//! link_text = "Widgets"
//!
//! [[template_extensions]]
//! name = "SiteBanner"
//! model = "dcim.site"
//! left_page = "<div class=\"banner\">ACME</div>"
//! right_page = { template = "acme/site_panel.html" }
//! ```
//!
//! Every extension table is optional. Menu permissions and buttons are kept
//! as raw TOML and checked when the plugin registers them, the same way a
//! misbuilt menu from code would be rejected.

use netbox_plugin_interface::{
    parse_version, ContractViolation, ExtensionRegistrar, GraphQlSchema, Plugin, PluginConfig,
    PluginMenu, PluginMenuButton, PluginMenuItem, PreferenceSet, SearchIndex,
    SlotContent, TemplateContext, TemplateExtension, TemplateExtensionClass, TemplateRenderer,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use toml::Value;

/// Plugin manifest from plugin.toml file.
///
/// Only `[plugin]` is required. Unknown tables and keys are ignored for
/// forward compatibility.
#[derive(Debug, Clone, Deserialize)]
pub struct PluginManifest {
    /// Static descriptor
    pub plugin: PluginConfig,

    #[serde(default)]
    pub menu: Option<MenuDefinition>,

    /// Items filed under the plugin's own navigation section
    #[serde(default)]
    pub menu_items: Option<Value>,

    #[serde(default)]
    pub template_extensions: Option<Vec<TemplateExtensionDefinition>>,

    #[serde(default)]
    pub graphql_schema: Option<GraphQlSchema>,

    #[serde(default)]
    pub user_preferences: Option<PreferenceSet>,

    #[serde(default)]
    pub search_indexes: Option<Vec<SearchIndex>>,
}

/// `[menu]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct MenuDefinition {
    pub label: String,

    #[serde(default)]
    pub icon_class: Option<String>,

    #[serde(default)]
    pub groups: Vec<MenuGroupDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MenuGroupDefinition {
    pub label: String,

    #[serde(default = "empty_array")]
    pub items: Value,
}

fn empty_array() -> Value {
    Value::Array(Vec::new())
}

/// Content of one page slot: inline HTML or a template to render.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SlotSource {
    Html(String),
    Template { template: String },
}

/// `[[template_extensions]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateExtensionDefinition {
    pub name: String,

    /// Target model, e.g. `dcim.site`
    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub left_page: Option<SlotSource>,

    #[serde(default)]
    pub right_page: Option<SlotSource>,

    #[serde(default)]
    pub full_width_page: Option<SlotSource>,

    #[serde(default)]
    pub buttons: Option<SlotSource>,
}

impl TemplateExtensionDefinition {
    fn into_class(self) -> TemplateExtensionClass {
        let definition = Arc::new(self);
        let name = definition.name.clone();
        let model = definition.model.clone();
        TemplateExtensionClass::new(name, model.as_deref(), move |context| {
            Box::new(StaticTemplateExtension {
                definition: Arc::clone(&definition),
                context,
            }) as Box<dyn TemplateExtension>
        })
    }
}

/// Template extension whose slots come from a manifest.
struct StaticTemplateExtension {
    definition: Arc<TemplateExtensionDefinition>,
    context: TemplateContext,
}

impl StaticTemplateExtension {
    fn fill(&self, source: Option<&SlotSource>, renderer: &dyn TemplateRenderer) -> SlotContent {
        match source {
            None => Ok(None),
            Some(SlotSource::Html(html)) => Ok(Some(html.clone())),
            Some(SlotSource::Template { template }) => {
                self.render(renderer, template, None).map(Some)
            }
        }
    }
}

impl TemplateExtension for StaticTemplateExtension {
    fn context(&self) -> &TemplateContext {
        &self.context
    }

    fn left_page(&self, renderer: &dyn TemplateRenderer) -> SlotContent {
        self.fill(self.definition.left_page.as_ref(), renderer)
    }

    fn right_page(&self, renderer: &dyn TemplateRenderer) -> SlotContent {
        self.fill(self.definition.right_page.as_ref(), renderer)
    }

    fn full_width_page(&self, renderer: &dyn TemplateRenderer) -> SlotContent {
        self.fill(self.definition.full_width_page.as_ref(), renderer)
    }

    fn buttons(&self, renderer: &dyn TemplateRenderer) -> SlotContent {
        self.fill(self.definition.buttons.as_ref(), renderer)
    }
}

impl PluginManifest {
    /// Parse a manifest from TOML text.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Validate the manifest fields.
    ///
    /// Checks:
    /// - plugin name is not empty
    /// - version parses if present
    /// - min_version and max_version parse if present
    pub fn validate(&self) -> Result<(), String> {
        let config = &self.plugin;

        if config.name.trim().is_empty() {
            return Err("Plugin name cannot be empty".to_string());
        }

        if !config.version.is_empty() && parse_version(&config.version).is_err() {
            return Err(format!(
                "Invalid version '{}': must be a version number",
                config.version
            ));
        }

        for (field, bound) in [
            ("min_version", &config.min_version),
            ("max_version", &config.max_version),
        ] {
            if let Some(value) = bound
                && parse_version(value).is_err()
            {
                return Err(format!("Invalid {} '{}'", field, value));
            }
        }

        Ok(())
    }
}

/// A plugin declared entirely by its manifest.
#[derive(Debug, Clone)]
pub struct ManifestPlugin {
    manifest: PluginManifest,
    path: PathBuf,
}

impl ManifestPlugin {
    pub fn new(manifest: PluginManifest, path: impl Into<PathBuf>) -> Self {
        Self {
            manifest,
            path: path.into(),
        }
    }

    pub fn manifest(&self) -> &PluginManifest {
        &self.manifest
    }

    /// Directory the manifest was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Plugin for ManifestPlugin {
    fn config(&self) -> &PluginConfig {
        &self.manifest.plugin
    }

    fn ready(&self, registrar: &mut dyn ExtensionRegistrar) -> Result<(), ContractViolation> {
        let manifest = &self.manifest;

        if let Some(indexes) = &manifest.search_indexes {
            registrar.register_search_indexes(indexes.clone())?;
        }

        if let Some(definitions) = &manifest.template_extensions {
            let classes = definitions
                .iter()
                .cloned()
                .map(TemplateExtensionDefinition::into_class)
                .collect();
            registrar.register_template_extensions(classes)?;
        }

        if let Some(menu) = &manifest.menu {
            registrar.register_menu(menu_from_definition(menu)?)?;
        }

        // An empty list means the plugin contributes no section.
        if let Some(items) = &manifest.menu_items {
            let items = menu_items_from_value(items, "menu_items")?;
            if !items.is_empty() {
                registrar.register_menu_items(items)?;
            }
        }

        if let Some(schema) = &manifest.graphql_schema {
            registrar.register_graphql_schema(schema.clone())?;
        }

        if let Some(preferences) = &manifest.user_preferences {
            registrar.register_user_preferences(preferences.clone())?;
        }

        Ok(())
    }
}

fn menu_from_definition(definition: &MenuDefinition) -> Result<PluginMenu, ContractViolation> {
    let groups = definition
        .groups
        .iter()
        .map(|group| -> Result<_, ContractViolation> {
            Ok((group.label.clone(), menu_items_from_value(&group.items, "items")?))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let menu = PluginMenu::new(definition.label.clone(), groups);
    Ok(match &definition.icon_class {
        Some(icon_class) => menu.with_icon_class(icon_class.clone()),
        None => menu,
    })
}

fn menu_items_from_value(
    value: &Value,
    field: &'static str,
) -> Result<Vec<PluginMenuItem>, ContractViolation> {
    value
        .as_array()
        .ok_or(ContractViolation::NotAList { field })?
        .iter()
        .map(menu_item_from_value)
        .collect()
}

fn menu_item_from_value(value: &Value) -> Result<PluginMenuItem, ContractViolation> {
    let not_an_item = || ContractViolation::NotAMenuItem(value.to_string());
    let table = value.as_table().ok_or_else(not_an_item)?;
    let link = string_field(table, "link").ok_or_else(not_an_item)?;
    let link_text = string_field(table, "link_text").ok_or_else(not_an_item)?;

    let mut item = PluginMenuItem::new(link, link_text)
        .with_permissions(permissions_from_value(table.get("permissions"))?);

    if let Some(buttons) = table.get("buttons") {
        let buttons = buttons
            .as_array()
            .ok_or(ContractViolation::NotAList { field: "buttons" })?
            .iter()
            .map(menu_button_from_value)
            .collect::<Result<Vec<_>, _>>()?;
        item = item.with_buttons(buttons);
    }

    Ok(item)
}

fn menu_button_from_value(value: &Value) -> Result<PluginMenuButton, ContractViolation> {
    let not_a_button = || ContractViolation::NotAMenuButton(value.to_string());
    let table = value.as_table().ok_or_else(not_a_button)?;
    let link = string_field(table, "link").ok_or_else(not_a_button)?;
    let title = string_field(table, "title").ok_or_else(not_a_button)?;
    let icon_class = string_field(table, "icon_class").ok_or_else(not_a_button)?;
    let color = match table.get("color") {
        Some(color) => Some(color.as_str().ok_or_else(not_a_button)?),
        None => None,
    };

    Ok(PluginMenuButton::new(link, title, icon_class, color)?
        .with_permissions(permissions_from_value(table.get("permissions"))?))
}

fn permissions_from_value(value: Option<&Value>) -> Result<Vec<String>, ContractViolation> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };
    let not_a_list = ContractViolation::NotAList {
        field: "permissions",
    };
    value
        .as_array()
        .ok_or_else(|| not_a_list.clone())?
        .iter()
        .map(|permission| {
            permission
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| not_a_list.clone())
        })
        .collect()
}

fn string_field<'a>(table: &'a toml::Table, key: &str) -> Option<&'a str> {
    table.get(key).and_then(Value::as_str)
}
