//! Navigation menu contributions.
//!
//! A plugin either contributes a whole top-level [`PluginMenu`] or a flat
//! list of [`PluginMenuItem`]s that the host files under a section named
//! after the plugin.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ContractViolation;

/// Icon used for plugin menus that do not choose one.
pub const DEFAULT_MENU_ICON: &str = "mdi mdi-puzzle";

/// Closed palette of colors a menu button may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ButtonColor {
    #[default]
    Default,
    Blue,
    Indigo,
    Purple,
    Pink,
    Red,
    Orange,
    Yellow,
    Green,
    Cyan,
    Teal,
    Gray,
    Black,
    White,
}

impl ButtonColor {
    pub const ALL: [ButtonColor; 14] = [
        ButtonColor::Default,
        ButtonColor::Blue,
        ButtonColor::Indigo,
        ButtonColor::Purple,
        ButtonColor::Pink,
        ButtonColor::Red,
        ButtonColor::Orange,
        ButtonColor::Yellow,
        ButtonColor::Green,
        ButtonColor::Cyan,
        ButtonColor::Teal,
        ButtonColor::Gray,
        ButtonColor::Black,
        ButtonColor::White,
    ];

    /// CSS class value of the color.
    pub fn as_str(self) -> &'static str {
        match self {
            ButtonColor::Default => "outline-dark",
            ButtonColor::Blue => "blue",
            ButtonColor::Indigo => "indigo",
            ButtonColor::Purple => "purple",
            ButtonColor::Pink => "pink",
            ButtonColor::Red => "red",
            ButtonColor::Orange => "orange",
            ButtonColor::Yellow => "yellow",
            ButtonColor::Green => "green",
            ButtonColor::Cyan => "cyan",
            ButtonColor::Teal => "teal",
            ButtonColor::Gray => "gray",
            ButtonColor::Black => "black",
            ButtonColor::White => "white",
        }
    }
}

impl fmt::Display for ButtonColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ButtonColor {
    type Err = ContractViolation;

    // Values are matched exactly; `Red` is not `red`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ButtonColor::ALL
            .into_iter()
            .find(|color| color.as_str() == s)
            .ok_or_else(|| ContractViolation::InvalidButtonColor(s.to_string()))
    }
}

impl TryFrom<String> for ButtonColor {
    type Error = ContractViolation;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ButtonColor> for String {
    fn from(color: ButtonColor) -> Self {
        color.as_str().to_string()
    }
}

/// A button rendered to the right of a menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginMenuButton {
    pub link: String,
    pub title: String,
    pub icon_class: String,
    pub color: ButtonColor,
    pub permissions: Vec<String>,
}

impl PluginMenuButton {
    /// Build a button, checking `color` against the palette.
    ///
    /// `None` selects [`ButtonColor::Default`].
    pub fn new(
        link: impl Into<String>,
        title: impl Into<String>,
        icon_class: impl Into<String>,
        color: Option<&str>,
    ) -> Result<Self, ContractViolation> {
        let color = match color {
            Some(value) => value.parse()?,
            None => ButtonColor::default(),
        };
        Ok(Self {
            link: link.into(),
            title: title.into(),
            icon_class: icon_class.into(),
            color,
            permissions: Vec::new(),
        })
    }

    pub fn with_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions = permissions.into_iter().map(Into::into).collect();
        self
    }
}

/// A navigation link with optional permission gate and buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginMenuItem {
    pub link: String,
    pub link_text: String,
    pub permissions: Vec<String>,
    pub buttons: Vec<PluginMenuButton>,
}

impl PluginMenuItem {
    pub fn new(link: impl Into<String>, link_text: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            link_text: link_text.into(),
            permissions: Vec::new(),
            buttons: Vec::new(),
        }
    }

    pub fn with_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions = permissions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_buttons(mut self, buttons: Vec<PluginMenuButton>) -> Self {
        self.buttons = buttons;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuGroup {
    pub label: String,
    pub items: Vec<PluginMenuItem>,
}

impl MenuGroup {
    pub fn new(label: impl Into<String>, items: Vec<PluginMenuItem>) -> Self {
        Self {
            label: label.into(),
            items,
        }
    }
}

/// A top-level navigation menu owned by one plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginMenu {
    pub label: String,
    pub groups: Vec<MenuGroup>,
    pub icon_class: String,
}

impl PluginMenu {
    /// Build a menu from `(group label, items)` pairs.
    pub fn new<S>(label: impl Into<String>, groups: Vec<(S, Vec<PluginMenuItem>)>) -> Self
    where
        S: Into<String>,
    {
        Self {
            label: label.into(),
            groups: groups
                .into_iter()
                .map(|(group_label, items)| MenuGroup::new(group_label, items))
                .collect(),
            icon_class: DEFAULT_MENU_ICON.to_string(),
        }
    }

    pub fn with_icon_class(mut self, icon_class: impl Into<String>) -> Self {
        self.icon_class = icon_class.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_button_default_color() {
        let button = PluginMenuButton::new("plugins:acme:add", "Add", "mdi mdi-plus", None).unwrap();
        assert_eq!(button.color, ButtonColor::Default);
        assert_eq!(button.color.as_str(), "outline-dark");
        assert!(button.permissions.is_empty());
    }

    #[test]
    fn test_button_accepts_palette_color() {
        let button =
            PluginMenuButton::new("plugins:acme:add", "Add", "mdi mdi-plus", Some("green")).unwrap();
        assert_eq!(button.color, ButtonColor::Green);
    }

    #[test]
    fn test_button_rejects_color_outside_palette() {
        let err = PluginMenuButton::new("plugins:acme:add", "Add", "mdi mdi-plus", Some("magenta"))
            .unwrap_err();
        assert_eq!(
            err,
            ContractViolation::InvalidButtonColor("magenta".to_string())
        );
    }

    #[test]
    fn test_color_match_is_case_sensitive() {
        assert!("Red".parse::<ButtonColor>().is_err());
        assert_eq!("red".parse::<ButtonColor>().unwrap(), ButtonColor::Red);
    }

    #[test]
    fn test_every_palette_color_round_trips_through_str() {
        for color in ButtonColor::ALL {
            assert_eq!(color.as_str().parse::<ButtonColor>().unwrap(), color);
        }
    }

    #[test]
    fn test_menu_builds_groups_with_default_icon() {
        let item = PluginMenuItem::new("plugins:acme:widget_list", "Widgets")
            .with_permissions(["acme.view_widget"]);
        let menu = PluginMenu::new("ACME", vec![("Inventory", vec![item.clone()])]);

        assert_eq!(menu.icon_class, DEFAULT_MENU_ICON);
        assert_eq!(menu.groups, vec![MenuGroup::new("Inventory", vec![item])]);

        let menu = menu.with_icon_class("mdi mdi-rocket");
        assert_eq!(menu.icon_class, "mdi mdi-rocket");
    }

    #[test]
    fn test_menu_item_keeps_buttons_in_order() {
        let add = PluginMenuButton::new("plugins:acme:add", "Add", "mdi mdi-plus", Some("green"))
            .unwrap()
            .with_permissions(["acme.add_widget"]);
        let import = PluginMenuButton::new("plugins:acme:import", "Import", "mdi mdi-upload", None)
            .unwrap();
        let item = PluginMenuItem::new("plugins:acme:widget_list", "Widgets")
            .with_buttons(vec![add.clone(), import.clone()]);

        assert_eq!(item.buttons, vec![add, import]);
    }

    #[test]
    fn test_color_serializes_as_css_value() {
        let json = serde_json::to_string(&ButtonColor::Default).unwrap();
        assert_eq!(json, "\"outline-dark\"");
    }
}
