//! Core types for chart-sync

use serde::{Deserialize, Serialize};
use std::fmt;

/// An upstream release: tag plus free-text notes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseInfo {
    /// Release tag as published upstream (e.g. `v1.2.3`)
    pub tag: String,
    /// Release notes, trimmed
    pub notes: String,
}

impl ReleaseInfo {
    /// Tag with any leading `v` removed
    pub fn bare_version(&self) -> &str {
        strip_v(&self.tag)
    }
}

/// Strip a single leading `v` from a tag
pub fn strip_v(tag: &str) -> &str {
    tag.strip_prefix('v').unwrap_or(tag)
}

/// Normalized repository identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoSlug {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepoSlug {
    /// Create a slug from owner and name
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A pull request opened against the chart repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// Web URL for the PR
    pub html_url: String,
    /// Base branch name
    pub base_ref: String,
    /// Head branch name
    pub head_ref: String,
    /// PR title
    pub title: String,
}

/// Payload for opening a pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProposal {
    /// PR title
    pub title: String,
    /// Branch carrying the change
    pub head: String,
    /// Branch to merge into
    pub base: String,
    /// PR description
    pub body: String,
}

/// Backend used for release lookups and proposal submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Backend {
    /// Direct calls to the GitHub REST API
    Api,
    /// The pre-authenticated `gh` CLI
    GhCli,
}

/// How the sync branch is named
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchNaming {
    /// `<prefix>-<UTC timestamp>-<version>`, unique per run
    Timestamped,
    /// A caller-chosen name; reruns collide on the remote
    Fixed(String),
}

/// Settings for one sync run, read-only once built
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Upstream repository identifier as given by the operator
    pub source_repo: String,
    /// Chart repository identifier as given by the operator
    pub target_repo: String,
    /// Explicit release tag
    pub tag: Option<String>,
    /// Explicit release notes (requires `tag`)
    pub notes: Option<String>,
    /// Stop before push and PR creation
    pub dry_run: bool,
    /// Label commit and PR as a test run
    pub test_mode: bool,
    /// Chart directory name under `charts/`
    pub chart: String,
    /// Component name used in commit and PR titles
    pub component: String,
    /// Branch naming strategy
    pub branch: BranchNaming,
    /// Handles to mention in the PR body
    pub cc: Vec<String>,
}

/// Progress of the proposal workflow on the working copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowState {
    /// Branch created for this run
    pub branch_name: String,
    /// Whether the chart changes have been committed
    pub committed: bool,
}
