//! User preference definitions contributed by plugins.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Preferences keyed by preference name, e.g. `pagination.per_page`.
pub type PreferenceSet = BTreeMap<String, UserPreference>;

/// One selectable value of a preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceChoice {
    pub value: String,
    pub label: String,
}

/// Definition of a single user-configurable preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreference {
    pub label: String,

    #[serde(default)]
    pub choices: Vec<PreferenceChoice>,

    #[serde(default)]
    pub default: Option<String>,

    #[serde(default)]
    pub description: String,
}

impl UserPreference {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            choices: Vec::new(),
            default: None,
            description: String::new(),
        }
    }

    pub fn with_choice(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.choices.push(PreferenceChoice {
            value: value.into(),
            label: label.into(),
        });
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
