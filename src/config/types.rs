use std::time::Duration;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub github: GitHubConfig,
}

// ---------------------------------------------------------------------------
// GitHub connection
// ---------------------------------------------------------------------------

/// Largest page size GitHub accepts for a connection.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page size used when neither the caller nor the config asks for one.
pub const DEFAULT_PAGE_SIZE: u32 = 30;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Base URI of the API. The GraphQL endpoint is `{api_url}/graphql`.
    pub api_url: String,
    /// Environment variable holding the bearer token.
    pub token_env: String,
    /// Deadline for a single round trip, in seconds. `0` disables it.
    pub timeout_secs: u64,
    /// Page size used when a list call does not ask for one.
    pub default_page_size: u32,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_owned(),
            token_env: "GITHUB_PERSONAL_ACCESS_TOKEN".to_owned(),
            timeout_secs: 30,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl GitHubConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}
