use crate::error::ProjectsError;

/// Fallbacks tried, in order, after the configured variable.
const FALLBACK_TOKEN_VARS: &[&str] = &["GH_TOKEN", "GITHUB_TOKEN"];

/// Resolve the bearer token from the environment.
///
/// Priority:
/// 1. the configured variable (`GITHUB_PERSONAL_ACCESS_TOKEN` by default)
/// 2. `GH_TOKEN`
/// 3. `GITHUB_TOKEN`
///
/// Empty values are skipped.
pub fn resolve_token(token_env: &str) -> Result<String, ProjectsError> {
    resolve_token_with(token_env, |name| std::env::var(name).ok())
}

pub(crate) fn resolve_token_with(
    token_env: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, ProjectsError> {
    std::iter::once(token_env)
        .chain(FALLBACK_TOKEN_VARS.iter().copied())
        .find_map(|name| lookup(name).filter(|token| !token.trim().is_empty()))
        .map(|token| token.trim().to_owned())
        .ok_or_else(|| ProjectsError::Configuration(format!("{token_env} not set")))
}
