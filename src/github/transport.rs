//! The seam between project operations and the GraphQL endpoint.
//!
//! Operations only ever talk to a [`GraphQLTransport`]. The production
//! implementation is [`GitHubClient`](crate::github::client::GitHubClient);
//! tests and demos use [`StubTransport`](crate::github::stub::StubTransport).

use std::future::Future;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::github::not_found::{Classification, classify_message};

// ---------------------------------------------------------------------------
// Transport trait
// ---------------------------------------------------------------------------

/// Executes a GraphQL document (query or mutation) against the remote API.
///
/// Implementations must be safe to share between concurrent in-flight
/// operations; nothing in this crate serializes access to them.
pub trait GraphQLTransport: Send + Sync {
    fn execute<V, D>(
        &self,
        request: &GraphQLRequest<V>,
    ) -> impl Future<Output = Result<GraphQLResponse<D>, TransportError>> + Send
    where
        V: Serialize + Send + Sync,
        D: DeserializeOwned + Send;
}

// ---------------------------------------------------------------------------
// Request payload
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct GraphQLRequest<V> {
    pub query: &'static str,
    #[serde(rename = "operationName")]
    pub operation_name: &'static str,
    pub variables: V,
}

impl<V> GraphQLRequest<V> {
    pub fn new(query: &'static str, operation_name: &'static str, variables: V) -> Self {
        Self {
            query,
            operation_name,
            variables,
        }
    }
}

// ---------------------------------------------------------------------------
// Response envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<D> {
    pub data: Option<D>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl GraphQLError {
    /// GitHub tags lookup misses with `type: NOT_FOUND`; untagged errors
    /// fall back to the message text.
    pub fn classification(&self) -> Classification {
        if self.kind.as_deref() == Some("NOT_FOUND") {
            Classification::NotFound
        } else {
            classify_message(&self.message)
        }
    }
}

impl<D> GraphQLResponse<D> {
    fn error_list(&self) -> &[GraphQLError] {
        self.errors.as_deref().unwrap_or_default()
    }

    /// Join every GraphQL error message into one transport error.
    ///
    /// The result is classified per error: it is NotFound only when every
    /// error is, so one fatal error among lookup misses stays fatal.
    fn joined_error(&self) -> Option<TransportError> {
        let errors = self.error_list();
        if errors.is_empty() {
            return None;
        }
        let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
        let classification = if errors
            .iter()
            .all(|e| e.classification() == Classification::NotFound)
        {
            Classification::NotFound
        } else {
            Classification::Fatal
        };
        Some(TransportError::classified(
            messages.join("; "),
            classification,
        ))
    }

    /// Strict unwrap: any GraphQL error fails the call.
    pub fn into_data(self) -> Result<D, TransportError> {
        if let Some(err) = self.joined_error() {
            return Err(err);
        }
        self.data
            .ok_or_else(|| TransportError::new("GraphQL response missing data field"))
    }

    /// Unwrap while tolerating errors that all read as "not found".
    ///
    /// GitHub answers a query spanning several roots with partial data plus
    /// one `NOT_FOUND` error per unresolved root. Any other error still fails.
    pub fn into_data_tolerating_not_found(self) -> Result<D, TransportError> {
        let Some(err) = self.joined_error() else {
            return self
                .data
                .ok_or_else(|| TransportError::new("GraphQL response missing data field"));
        };

        if err.classification() != Some(Classification::NotFound) {
            return Err(err);
        }

        match self.data {
            Some(data) => {
                tracing::warn!("tolerating partial GraphQL errors: {err}");
                Ok(data)
            }
            None => Err(err),
        }
    }
}

// ---------------------------------------------------------------------------
// Transport error
// ---------------------------------------------------------------------------

/// A failed round trip, carrying the remote service's raw message text.
///
/// Errors built from GraphQL error lists already know whether they mean
/// "not found"; other failures are classified from their text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    classification: Option<Classification>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            classification: None,
        }
    }

    pub(crate) fn classified(message: impl Into<String>, classification: Classification) -> Self {
        Self {
            message: message.into(),
            classification: Some(classification),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Classification fixed when the error was built, if any.
    pub fn classification(&self) -> Option<Classification> {
        self.classification
    }
}
