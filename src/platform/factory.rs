//! Platform service factory
//!
//! Creates the backend selected at the CLI boundary.

use crate::error::Result;
use crate::platform::{GhCliService, GitHubService, PlatformService};
use crate::types::Backend;
use secrecy::SecretString;
use url::Url;

/// Create a platform service for the chosen backend
///
/// `api_url` is the REST root for the HTTP backend; for the `gh` backend its
/// host is passed as `--hostname` unless it is the public API.
pub fn create_platform_service(
    backend: Backend,
    token: Option<SecretString>,
    api_url: Option<String>,
) -> Result<Box<dyn PlatformService>> {
    match backend {
        Backend::Api => Ok(Box::new(GitHubService::new(token, api_url)?)),
        Backend::GhCli => Ok(Box::new(GhCliService::new(
            token,
            gh_hostname(api_url.as_deref()),
        ))),
    }
}

/// Host to pass to `gh --hostname`, `None` for the public API
fn gh_hostname(api_url: Option<&str>) -> Option<String> {
    api_url
        .and_then(|u| Url::parse(u).ok())
        .and_then(|u| u.host_str().map(ToString::to_string))
        .filter(|h| h != "api.github.com")
}
