//! GraphQL schema contributions.

use serde::{Deserialize, Serialize};

/// A schema fragment merged into the host's GraphQL API.
///
/// The registry treats it as opaque and never inspects `sdl`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphQlSchema {
    pub name: String,
    #[serde(default)]
    pub sdl: String,
}

impl GraphQlSchema {
    pub fn new(name: impl Into<String>, sdl: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sdl: sdl.into(),
        }
    }
}
