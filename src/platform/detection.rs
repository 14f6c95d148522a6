//! Repository identifier parsing
//!
//! Operators pass repositories as `owner/name`, `github.com/owner/name`, or a
//! full URL (HTTPS or SSH, with or without `.git`). Everything normalizes to a
//! [`RepoSlug`].

use crate::error::{Error, Result};
use crate::types::RepoSlug;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

/// Host used when an identifier carries none
pub const DEFAULT_HOST: &str = "github.com";

/// Parse an `(owner, name)` pair out of a repository identifier
pub fn parse_repo_slug(repo: &str) -> Result<RepoSlug> {
    let (_, path) = split_host(repo)?;
    let path = path.trim_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);

    let mut parts = path.split('/').filter(|p| !p.is_empty());
    match (parts.next(), parts.next()) {
        (Some(owner), Some(name)) => Ok(RepoSlug::new(owner, name)),
        _ => Err(Error::Config(format!(
            "cannot parse repository identifier: {repo}"
        ))),
    }
}

/// Build the HTTPS clone URL for a repository identifier
///
/// When a token is given it is embedded as URL credentials, unless the
/// identifier already carries credentials or is an SSH remote.
pub fn clone_url(repo: &str, token: Option<&SecretString>) -> Result<String> {
    let trimmed = repo.trim();
    if trimmed.starts_with("git@") {
        return Ok(trimmed.to_string());
    }

    let (host, _) = split_host(trimmed)?;
    let slug = parse_repo_slug(trimmed)?;
    let mut url = Url::parse(&format!("https://{host}/{}/{}.git", slug.owner, slug.name))
        .map_err(|e| Error::Config(format!("invalid repository URL {repo}: {e}")))?;

    if let Ok(original) = Url::parse(trimmed) {
        if !original.username().is_empty() {
            return Ok(trimmed.to_string());
        }
        if original.scheme() == "http" {
            let _ = url.set_scheme("http");
        }
    }

    if let Some(token) = token {
        url.set_username("x-access-token")
            .and_then(|()| url.set_password(Some(token.expose_secret())))
            .map_err(|()| Error::Config(format!("cannot embed credentials in {repo}")))?;
    }

    Ok(url.to_string())
}

/// Split an identifier into host and path
fn split_host(repo: &str) -> Result<(String, String)> {
    let repo = repo.trim();

    // SSH format: git@host:owner/repo.git
    if let Some(rest) = repo.strip_prefix("git@") {
        return rest
            .split_once(':')
            .map(|(host, path)| (host.to_string(), path.to_string()))
            .ok_or_else(|| Error::Config(format!("cannot parse repository identifier: {repo}")));
    }

    if repo.contains("://") {
        let url = Url::parse(repo)
            .map_err(|e| Error::Config(format!("invalid repository URL {repo}: {e}")))?;
        let host = url
            .host_str()
            .ok_or_else(|| Error::Config(format!("repository URL has no host: {repo}")))?;
        return Ok((host.to_string(), url.path().to_string()));
    }

    // Scheme-less: a leading segment that looks like a hostname is the host
    match repo.split_once('/') {
        Some((first, rest)) if first.contains('.') || first.contains(':') => {
            Ok((first.to_string(), rest.to_string()))
        }
        _ => Ok((DEFAULT_HOST.to_string(), repo.to_string())),
    }
}
