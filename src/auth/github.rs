//! GitHub authentication

use crate::auth::AuthSource;
use secrecy::SecretString;
use std::env;
use tokio::process::Command;

/// Environment variables checked for a token, in order
const TOKEN_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// GitHub authentication configuration
#[derive(Debug, Clone)]
pub struct GitHubAuthConfig {
    /// Authentication token
    pub token: SecretString,
    /// Where the token was obtained from
    pub source: AuthSource,
}

/// Get GitHub authentication
///
/// Priority:
/// 1. explicit `--token` value
/// 2. `GITHUB_TOKEN` environment variable
/// 3. `GH_TOKEN` environment variable
/// 4. gh CLI (`gh auth token`)
pub async fn get_github_auth(explicit: Option<String>) -> Option<GitHubAuthConfig> {
    if let Some(config) = token_from_sources(explicit, |name| env::var(name).ok()) {
        return Some(config);
    }

    get_gh_cli_token().await.map(|token| GitHubAuthConfig {
        token: SecretString::from(token),
        source: AuthSource::Cli,
    })
}

/// Pick a token from an explicit value or the given variable lookup
///
/// Empty values count as unset.
pub fn token_from_sources(
    explicit: Option<String>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<GitHubAuthConfig> {
    let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

    if let Some(token) = non_empty(explicit) {
        return Some(GitHubAuthConfig {
            token: SecretString::from(token),
            source: AuthSource::Flag,
        });
    }

    TOKEN_VARS
        .iter()
        .find_map(|name| non_empty(lookup(name)))
        .map(|token| GitHubAuthConfig {
            token: SecretString::from(token),
            source: AuthSource::EnvVar,
        })
}

async fn get_gh_cli_token() -> Option<String> {
    // Check authenticated
    let status = Command::new("gh")
        .args(["auth", "status"])
        .output()
        .await
        .ok()?;

    if !status.status.success() {
        return None;
    }

    // Get token
    let output = Command::new("gh")
        .args(["auth", "token"])
        .output()
        .await
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
