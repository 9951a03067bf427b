use std::sync::Arc;
use std::time::Duration;

use octocrab::Octocrab;
use octocrab::service::middleware::retry::RetryConfig;
use serde::{Serialize, de::DeserializeOwned};

use crate::config::types::GitHubConfig;
use crate::error::ProjectsError;
use crate::github::auth;
use crate::github::transport::{GraphQLRequest, GraphQLResponse, GraphQLTransport, TransportError};

/// Octocrab-backed GraphQL transport.
///
/// Built once at process start and then shared; cloning is cheap and every
/// clone talks through the same underlying HTTP client.
#[derive(Clone)]
pub struct GitHubClient {
    octocrab: Arc<Octocrab>,
    timeout: Option<Duration>,
}

impl GitHubClient {
    /// Build a client from configuration, reading the token from the
    /// environment. Fails before any network call when no token is set.
    pub fn from_config(config: &GitHubConfig) -> Result<Self, ProjectsError> {
        let token = auth::resolve_token(&config.token_env)?;
        Self::new(&config.api_url, token, config.timeout())
    }

    /// Build a client for an explicit base URI and token.
    pub fn new(
        api_url: &str,
        token: String,
        timeout: Option<Duration>,
    ) -> Result<Self, ProjectsError> {
        install_crypto_provider();

        // Failures surface immediately; octocrab would otherwise retry 5xx.
        let octocrab = Octocrab::builder()
            .personal_token(token)
            .add_retry_config(RetryConfig::None)
            .base_uri(api_url)
            .map_err(|e| ProjectsError::Configuration(format!("invalid API URL {api_url}: {e}")))?
            .build()
            .map_err(|e| ProjectsError::Configuration(format!("building octocrab instance: {e}")))?;

        Ok(Self {
            octocrab: Arc::new(octocrab),
            timeout,
        })
    }
}

impl GitHubClient {
    /// One POST to `/graphql`. The status is checked here rather than by
    /// octocrab so that it survives an error body that is not JSON.
    async fn post_graphql<V, D>(
        &self,
        request: &GraphQLRequest<V>,
    ) -> Result<GraphQLResponse<D>, TransportError>
    where
        V: Serialize + Send + Sync,
        D: DeserializeOwned + Send,
    {
        let response = self
            .octocrab
            ._post("/graphql", Some(request))
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;
        let status = response.status();
        let body = self
            .octocrab
            .body_to_string(response)
            .await
            .map_err(|e| TransportError::new(format!("reading response body: {e}")))?;

        if !status.is_success() {
            return Err(status_error(status.as_u16(), &body));
        }
        serde_json::from_str(&body)
            .map_err(|e| TransportError::new(format!("decoding GraphQL response: {e}")))
    }
}

impl GraphQLTransport for GitHubClient {
    async fn execute<V, D>(
        &self,
        request: &GraphQLRequest<V>,
    ) -> Result<GraphQLResponse<D>, TransportError>
    where
        V: Serialize + Send + Sync,
        D: DeserializeOwned + Send,
    {
        tracing::debug!("graphql: sending {}", request.operation_name);

        let call = self.post_graphql(request);
        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.unwrap_or_else(|_| {
                Err(TransportError::new(format!(
                    "deadline exceeded after {}ms",
                    limit.as_millis()
                )))
            }),
            None => call.await,
        };

        result.inspect_err(|err| {
            tracing::debug!("graphql: {} failed: {err}", request.operation_name);
        })
    }
}

/// Render a non-2xx response so that the status code stays visible to the
/// not-found classifier. GitHub's JSON error bodies are reduced to their
/// `message`; anything else is kept verbatim.
fn status_error(status: u16, body: &str) -> TransportError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_owned))
        .unwrap_or_else(|| body.trim().to_owned());
    TransportError::new(format!("non-200 OK status code: {status} body: {message:?}"))
}

/// Install the rustls CryptoProvider before the first TLS client is built.
/// rustls 0.23 no longer installs one on its own; a second install is a no-op.
fn install_crypto_provider() {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
}
