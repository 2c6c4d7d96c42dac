//! Errors raised while building or rendering plugin extensions.

use thiserror::Error;

/// An extension candidate does not satisfy its capability contract.
///
/// Raised synchronously at registration (or construction) time; the
/// candidate never reaches the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    #[error("template extension '{extension}' does not define a valid model")]
    MissingModel { extension: String },

    #[error("button color '{0}' is not a choice within the button color palette")]
    InvalidButtonColor(String),

    #[error("{field} must be passed as a list")]
    NotAList { field: &'static str },

    #[error("{0} must be a plugin menu item")]
    NotAMenuItem(String),

    #[error("{0} must be a plugin menu button")]
    NotAMenuButton(String),

    #[error("search index for '{index}' does not define a model")]
    SearchIndexWithoutModel { index: String },
}

/// Failure while producing template content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("failed to render template '{template}': {message}")]
    Template { template: String, message: String },
}
