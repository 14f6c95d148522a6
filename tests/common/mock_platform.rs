//! Mock platform service for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use chart_sync::error::{Error, Result};
use chart_sync::platform::{ProposalPublisher, ReleaseSource};
use chart_sync::types::{NewProposal, PullRequest, ReleaseInfo, RepoSlug};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Call record for `create_proposal`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProposalCall {
    pub repo: String,
    pub head: String,
    pub base: String,
    pub title: String,
    pub body: String,
}

/// Simple mock platform service for testing
///
/// Implements both capabilities by hand so tests can inspect every call.
///
/// Features:
/// - Releases registered per `owner/name@tag`
/// - Auto-incrementing PR numbers
/// - Call tracking for verification
/// - Error injection for failure path testing
pub struct MockPlatformService {
    default_branch: String,
    next_pr_number: AtomicU64,
    releases: Mutex<HashMap<String, String>>,
    latest: Mutex<Option<ReleaseInfo>>,
    // Call tracking
    release_notes_calls: Mutex<Vec<String>>,
    latest_calls: Mutex<Vec<String>>,
    default_branch_calls: Mutex<Vec<String>>,
    create_proposal_calls: Mutex<Vec<CreateProposalCall>>,
    // Error injection
    error_on_create_proposal: Mutex<Option<String>>,
}

impl MockPlatformService {
    /// Create a mock whose repositories use `default_branch`
    pub fn with_default_branch(default_branch: &str) -> Self {
        Self {
            default_branch: default_branch.to_string(),
            next_pr_number: AtomicU64::new(1),
            releases: Mutex::new(HashMap::new()),
            latest: Mutex::new(None),
            release_notes_calls: Mutex::new(Vec::new()),
            latest_calls: Mutex::new(Vec::new()),
            default_branch_calls: Mutex::new(Vec::new()),
            create_proposal_calls: Mutex::new(Vec::new()),
            error_on_create_proposal: Mutex::new(None),
        }
    }

    /// Register a release with notes
    pub fn add_release(&self, repo: &str, tag: &str, notes: &str) {
        self.releases
            .lock()
            .unwrap()
            .insert(format!("{repo}@{tag}"), notes.to_string());
    }

    /// Set the release `latest_release` returns
    pub fn set_latest(&self, tag: &str, notes: &str) {
        *self.latest.lock().unwrap() = Some(ReleaseInfo {
            tag: tag.to_string(),
            notes: notes.to_string(),
        });
    }

    // === Error injection methods ===

    /// Make `create_proposal` fail with a 422
    pub fn fail_create_proposal(&self, body: &str) {
        *self.error_on_create_proposal.lock().unwrap() = Some(body.to_string());
    }

    // === Call verification methods ===

    /// `owner/name@tag` for every `release_notes` call
    pub fn get_release_notes_calls(&self) -> Vec<String> {
        self.release_notes_calls.lock().unwrap().clone()
    }

    /// Repositories `latest_release` was called with
    pub fn get_latest_calls(&self) -> Vec<String> {
        self.latest_calls.lock().unwrap().clone()
    }

    /// Repositories `default_branch` was called with
    pub fn get_default_branch_calls(&self) -> Vec<String> {
        self.default_branch_calls.lock().unwrap().clone()
    }

    /// All `create_proposal` calls
    pub fn get_create_proposal_calls(&self) -> Vec<CreateProposalCall> {
        self.create_proposal_calls.lock().unwrap().clone()
    }

    /// Whether any remote call was made
    pub fn untouched(&self) -> bool {
        self.get_release_notes_calls().is_empty()
            && self.get_latest_calls().is_empty()
            && self.get_default_branch_calls().is_empty()
            && self.get_create_proposal_calls().is_empty()
    }
}

#[async_trait]
impl ReleaseSource for MockPlatformService {
    async fn release_notes(&self, repo: &RepoSlug, tag: &str) -> Result<String> {
        let key = format!("{repo}@{tag}");
        self.release_notes_calls.lock().unwrap().push(key.clone());
        self.releases
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .ok_or_else(|| Error::ReleaseNotFound {
                repo: repo.to_string(),
                tag: tag.to_string(),
            })
    }

    async fn latest_release(&self, repo: &RepoSlug) -> Result<ReleaseInfo> {
        self.latest_calls.lock().unwrap().push(repo.to_string());
        self.latest.lock().unwrap().clone().ok_or_else(|| Error::Upstream {
            operation: "fetch latest release".to_string(),
            status: 404,
            body: r#"{"message":"Not Found"}"#.to_string(),
        })
    }
}

#[async_trait]
impl ProposalPublisher for MockPlatformService {
    async fn default_branch(&self, repo: &RepoSlug) -> Result<String> {
        self.default_branch_calls
            .lock()
            .unwrap()
            .push(repo.to_string());
        Ok(self.default_branch.clone())
    }

    async fn create_proposal(
        &self,
        repo: &RepoSlug,
        proposal: &NewProposal,
    ) -> Result<PullRequest> {
        self.create_proposal_calls
            .lock()
            .unwrap()
            .push(CreateProposalCall {
                repo: repo.to_string(),
                head: proposal.head.clone(),
                base: proposal.base.clone(),
                title: proposal.title.clone(),
                body: proposal.body.clone(),
            });

        if let Some(body) = self.error_on_create_proposal.lock().unwrap().clone() {
            return Err(Error::Submission {
                operation: "create pull request".to_string(),
                status: 422,
                body,
            });
        }

        let number = self.next_pr_number.fetch_add(1, Ordering::SeqCst);
        Ok(PullRequest {
            number,
            html_url: format!("https://github.com/{repo}/pull/{number}"),
            base_ref: proposal.base.clone(),
            head_ref: proposal.head.clone(),
            title: proposal.title.clone(),
        })
    }
}
