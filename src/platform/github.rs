//! GitHub REST API backend

use crate::error::{Error, Result};
use crate::platform::rest::{self, ApiResponse};
use crate::platform::{ProposalPublisher, ReleaseSource};
use crate::types::{NewProposal, PullRequest, ReleaseInfo, RepoSlug};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::debug;

/// Public GitHub API root
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// GitHub service using reqwest
pub struct GitHubService {
    client: Client,
    token: Option<SecretString>,
    api_url: String,
}

impl GitHubService {
    /// Create a new GitHub service
    ///
    /// `api_url` overrides the API root (GitHub Enterprise, test servers).
    /// Without a token, release lookups run unauthenticated and proposal
    /// submission fails with a configuration error.
    pub fn new(token: Option<SecretString>, api_url: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            token,
            api_url: api_url
                .unwrap_or_else(|| DEFAULT_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("Accept", "application/vnd.github+json");
        match &self.token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    async fn send(request: RequestBuilder) -> Result<ApiResponse> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, "GitHub API response");
        Ok(ApiResponse { status, body })
    }

    async fn get(&self, path: &str) -> Result<ApiResponse> {
        debug!(path, "GET");
        Self::send(self.authorize(self.client.get(self.api_url(path)))).await
    }
}

#[async_trait]
impl ReleaseSource for GitHubService {
    async fn release_notes(&self, repo: &RepoSlug, tag: &str) -> Result<String> {
        let response = self.get(&rest::release_by_tag_path(repo, tag)).await?;
        rest::decode_release_notes(repo, tag, response)
    }

    async fn latest_release(&self, repo: &RepoSlug) -> Result<ReleaseInfo> {
        let response = self.get(&rest::latest_release_path(repo)).await?;
        rest::decode_latest_release(response)
    }
}

#[async_trait]
impl ProposalPublisher for GitHubService {
    async fn default_branch(&self, repo: &RepoSlug) -> Result<String> {
        let response = self.get(&rest::repo_path(repo)).await?;
        rest::decode_default_branch(response)
    }

    async fn create_proposal(
        &self,
        repo: &RepoSlug,
        proposal: &NewProposal,
    ) -> Result<PullRequest> {
        if self.token.is_none() {
            return Err(Error::Config(
                "a GitHub token is required to open pull requests".to_string(),
            ));
        }

        let path = rest::pulls_path(repo);
        debug!(path = %path, head = %proposal.head, base = %proposal.base, "POST");
        let request = self
            .authorize(self.client.post(self.api_url(&path)))
            .json(proposal);
        rest::decode_pull_request(Self::send(request).await?)
    }
}
