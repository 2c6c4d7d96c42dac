//! Global search index contributions.

use serde::{Deserialize, Serialize};

/// Describes how objects of one model are indexed for global search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchIndex {
    /// Namespaced model label, e.g. `acme.widget`
    pub model: String,

    /// Indexed fields with their weight; lower weights rank higher
    #[serde(default)]
    pub fields: Vec<(String, u32)>,

    /// Attributes shown next to a search hit
    #[serde(default)]
    pub display_attrs: Vec<String>,
}

impl SearchIndex {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            fields: Vec::new(),
            display_attrs: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: impl Into<String>, weight: u32) -> Self {
        self.fields.push((field.into(), weight));
        self
    }

    pub fn with_display_attr(mut self, attr: impl Into<String>) -> Self {
        self.display_attrs.push(attr.into());
        self
    }

    /// Lowercased model label used as the registry key.
    pub fn label(&self) -> String {
        self.model.trim().to_lowercase()
    }
}
