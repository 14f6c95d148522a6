//! REST endpoints and response decoding shared by every backend

use crate::error::{Error, Result};
use crate::types::{PullRequest, ReleaseInfo, RepoSlug};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Status and raw body of an API response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body, undecoded
    pub body: String,
}

impl ApiResponse {
    /// Whether the status is 2xx
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

#[derive(Deserialize)]
struct ReleasePayload {
    #[serde(default)]
    tag_name: Option<String>,
    #[serde(default)]
    body: Option<String>,
}

#[derive(Deserialize)]
struct RepoPayload {
    default_branch: String,
}

#[derive(Deserialize)]
struct BranchRef {
    #[serde(rename = "ref")]
    ref_field: String,
}

#[derive(Deserialize)]
struct PullPayload {
    number: u64,
    #[serde(default)]
    html_url: Option<String>,
    #[serde(default)]
    title: Option<String>,
    head: BranchRef,
    base: BranchRef,
}

pub fn release_by_tag_path(repo: &RepoSlug, tag: &str) -> String {
    format!(
        "/repos/{}/{}/releases/tags/{}",
        repo.owner,
        repo.name,
        urlencoding::encode(tag)
    )
}

pub fn latest_release_path(repo: &RepoSlug) -> String {
    format!("/repos/{}/{}/releases/latest", repo.owner, repo.name)
}

pub fn repo_path(repo: &RepoSlug) -> String {
    format!("/repos/{}/{}", repo.owner, repo.name)
}

pub fn pulls_path(repo: &RepoSlug) -> String {
    format!("/repos/{}/{}/pulls", repo.owner, repo.name)
}

/// Decode the notes of a tagged release
pub fn decode_release_notes(repo: &RepoSlug, tag: &str, response: ApiResponse) -> Result<String> {
    if response.status == 404 {
        return Err(Error::ReleaseNotFound {
            repo: repo.to_string(),
            tag: tag.to_string(),
        });
    }
    let payload: ReleasePayload = decode(&format!("fetch release {tag}"), response, upstream)?;
    Ok(payload.body.unwrap_or_default().trim().to_string())
}

/// Decode the tag and notes of the latest release
pub fn decode_latest_release(response: ApiResponse) -> Result<ReleaseInfo> {
    let payload: ReleasePayload = decode("fetch latest release", response, upstream)?;
    let tag = payload.tag_name.unwrap_or_default().trim().to_string();
    if tag.is_empty() {
        return Err(Error::Upstream {
            operation: "fetch latest release".to_string(),
            status: 200,
            body: "latest release has no tag_name".to_string(),
        });
    }
    Ok(ReleaseInfo {
        tag,
        notes: payload.body.unwrap_or_default().trim().to_string(),
    })
}

/// Decode the default branch from repository metadata
pub fn decode_default_branch(response: ApiResponse) -> Result<String> {
    let payload: RepoPayload = decode("fetch repository info", response, submission)?;
    Ok(payload.default_branch)
}

/// Decode a created pull request
pub fn decode_pull_request(response: ApiResponse) -> Result<PullRequest> {
    let pr: PullPayload = decode("create pull request", response, submission)?;
    Ok(PullRequest {
        number: pr.number,
        html_url: pr.html_url.unwrap_or_default(),
        base_ref: pr.base.ref_field,
        head_ref: pr.head.ref_field,
        title: pr.title.unwrap_or_default(),
    })
}

type Failure = fn(&str, ApiResponse) -> Error;

fn upstream(operation: &str, response: ApiResponse) -> Error {
    Error::Upstream {
        operation: operation.to_string(),
        status: response.status,
        body: response.body,
    }
}

fn submission(operation: &str, response: ApiResponse) -> Error {
    Error::Submission {
        operation: operation.to_string(),
        status: response.status,
        body: response.body,
    }
}

fn decode<T: DeserializeOwned>(
    operation: &str,
    response: ApiResponse,
    failure: Failure,
) -> Result<T> {
    if !response.is_success() {
        return Err(failure(operation, response));
    }
    Ok(serde_json::from_str(&response.body)?)
}
