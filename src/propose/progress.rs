//! Progress callback trait for interface-agnostic updates
//!
//! This trait allows different interfaces (CLI, test harnesses) to receive
//! progress updates during a sync run.

use crate::propose::DryRunReport;
use crate::types::PullRequest;
use async_trait::async_trait;
use std::fmt;

/// Pipeline phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Resolving the release tag and notes
    Resolving,
    /// Acquiring the working copy
    CheckingOut,
    /// Rewriting chart artifacts
    UpdatingChart,
    /// Creating the sync branch
    Branching,
    /// Staging and committing the chart
    Committing,
    /// Pushing the branch
    Pushing,
    /// Opening the pull request
    CreatingPr,
    /// Run complete
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Resolving => "Resolving release",
            Self::CheckingOut => "Checking out chart repository",
            Self::UpdatingChart => "Updating chart",
            Self::Branching => "Creating branch",
            Self::Committing => "Committing",
            Self::Pushing => "Pushing",
            Self::CreatingPr => "Creating pull request",
            Self::Complete => "Done",
        };
        f.write_str(s)
    }
}

/// Push operation status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushStatus {
    /// Push started
    Started,
    /// Push succeeded
    Success,
}

/// Progress callback trait
///
/// Implement this trait to receive progress updates during a run.
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called when entering a new phase
    async fn on_phase(&self, phase: Phase);

    /// Called when the branch is being pushed
    async fn on_push(&self, branch: &str, status: PushStatus);

    /// Called when the PR is created
    async fn on_pr_created(&self, pr: &PullRequest);

    /// Called instead of push and PR creation in dry-run mode
    async fn on_dry_run(&self, report: &DryRunReport);

    /// Called for problems that do not abort the run
    async fn on_warning(&self, message: &str);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_phase(&self, _phase: Phase) {}
    async fn on_push(&self, _branch: &str, _status: PushStatus) {}
    async fn on_pr_created(&self, _pr: &PullRequest) {}
    async fn on_dry_run(&self, _report: &DryRunReport) {}
    async fn on_warning(&self, _message: &str) {}
    async fn on_message(&self, _message: &str) {}
}
