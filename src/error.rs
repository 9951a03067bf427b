//! Error taxonomy for project operations.

use thiserror::Error;

use crate::github::transport::TransportError;

/// Errors returned by every project query and mutation.
///
/// Messages are meant to be shown to a human as-is: transport failures carry
/// the name of the sub-operation that failed, because GitHub's own error
/// payloads are free text.
#[derive(Debug, Error)]
pub enum ProjectsError {
    /// A required input was missing. Raised before any network call.
    #[error("{0}")]
    Validation(String),

    /// The login resolved to neither an organization nor a user.
    #[error("owner not found: {login}")]
    OwnerNotFound { login: String },

    /// A project, item, or other entity could not be resolved.
    #[error("{0}")]
    NotFound(String),

    /// Network failure or unrecognized remote error during `operation`.
    #[error("{operation} failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: TransportError,
    },

    /// Owner resolution failed while preparing a mutation.
    #[error("owner lookup failed: {0}")]
    OwnerLookup(#[source] Box<ProjectsError>),

    /// Missing credential or unusable client configuration.
    #[error("{0}")]
    Configuration(String),
}

impl ProjectsError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn transport(operation: &'static str, source: TransportError) -> Self {
        Self::Transport { operation, source }
    }

    /// Whether this error means "the thing asked for does not exist".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::OwnerNotFound { .. } | Self::NotFound(_))
    }
}
