//! Release registry and pull request services
//!
//! Two capabilities sit behind traits so the pipeline never knows which
//! backend answers them: [`ReleaseSource`] reads releases, and
//! [`ProposalPublisher`] reads repository metadata and opens pull requests.
//! Both are implemented by the REST client ([`GitHubService`]) and by the
//! `gh` CLI wrapper ([`GhCliService`]).

mod detection;
mod factory;
mod gh_cli;
mod github;
mod rest;

pub use detection::{clone_url, parse_repo_slug, DEFAULT_HOST};
pub use factory::create_platform_service;
pub use gh_cli::GhCliService;
pub use github::{GitHubService, DEFAULT_API_URL};
pub use rest::ApiResponse;

use crate::error::Result;
use crate::types::{NewProposal, PullRequest, ReleaseInfo, RepoSlug};
use async_trait::async_trait;

/// Read access to an upstream release registry
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Fetch the notes of the release tagged `tag`
    ///
    /// Fails with `ReleaseNotFound` when no such release exists.
    async fn release_notes(&self, repo: &RepoSlug, tag: &str) -> Result<String>;

    /// Fetch the release the registry considers latest
    async fn latest_release(&self, repo: &RepoSlug) -> Result<ReleaseInfo>;
}

/// Write access to the chart repository's pull requests
#[async_trait]
pub trait ProposalPublisher: Send + Sync {
    /// Look up the repository's default branch
    async fn default_branch(&self, repo: &RepoSlug) -> Result<String>;

    /// Open a pull request
    async fn create_proposal(&self, repo: &RepoSlug, proposal: &NewProposal)
    -> Result<PullRequest>;
}

/// A backend providing both capabilities
pub trait PlatformService: ReleaseSource + ProposalPublisher {}

impl<T: ReleaseSource + ProposalPublisher> PlatformService for T {}
