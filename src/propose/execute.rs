//! Proposal execution
//!
//! Branch, stage and commit always run; they only touch the working copy.
//! Push and PR creation run only outside dry-run mode.

use crate::error::Result;
use crate::platform::ProposalPublisher;
use crate::propose::{Phase, ProgressCallback, ProposalPlan, PushStatus};
use crate::repo::Workspace;
use crate::types::{NewProposal, PullRequest, WorkflowState};
use serde::Serialize;
use tracing::info;

/// Push that would run outside dry-run mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushOperation {
    /// Remote name
    pub remote: String,
    /// Branch to push
    pub branch: String,
    /// Repository behind the remote (`owner/name`)
    pub repository: String,
}

/// PR submission that would run outside dry-run mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProposalOperation {
    /// Repository the PR targets (`owner/name`)
    pub repository: String,
    /// Head branch
    pub head: String,
    /// Base branch; `None` means the repository default, looked up at
    /// submission time
    pub base: Option<String>,
    /// PR title
    pub title: String,
    /// PR body
    pub body: String,
}

/// What a dry run committed locally and would have published
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DryRunReport {
    /// Local branch holding the commit
    pub branch: String,
    /// Commit message used
    pub commit_message: String,
    /// Push that was skipped
    pub push: PushOperation,
    /// PR submission that was skipped
    pub proposal: ProposalOperation,
    /// Commands that undo the local changes
    pub cleanup: Vec<String>,
}

/// How a run ended
#[derive(Debug, Clone)]
pub enum SyncOutcome {
    /// Dry run: nothing left the working copy
    Simulated(DryRunReport),
    /// Branch pushed and PR opened
    Proposed(PullRequest),
}

/// Result of proposal execution
#[derive(Debug, Clone)]
pub struct SubmissionResult {
    /// Final workflow state
    pub state: WorkflowState,
    /// Terminal outcome
    pub outcome: SyncOutcome,
    /// Commands an operator can use to remove the proposal and branch
    pub cleanup: Vec<String>,
}

/// Execute a proposal plan against a working copy
///
/// Every failure aborts immediately; nothing is retried.
pub async fn execute_proposal<P: ProposalPublisher + ?Sized>(
    plan: &ProposalPlan,
    workspace: &Workspace<'_>,
    publisher: &P,
    progress: &dyn ProgressCallback,
    dry_run: bool,
) -> Result<SubmissionResult> {
    progress.on_phase(Phase::Branching).await;
    workspace.create_branch(&plan.branch)?;
    let mut state = WorkflowState {
        branch_name: plan.branch.clone(),
        committed: false,
    };

    progress.on_phase(Phase::Committing).await;
    workspace.stage(&plan.stage_path)?;
    workspace.commit(&plan.commit_message)?;
    state.committed = true;
    info!(branch = %plan.branch, "committed chart update");

    if dry_run {
        progress
            .on_message("Dry run - skipping push and pull request creation")
            .await;
        let report = dry_run_report(plan, workspace);
        progress.on_dry_run(&report).await;
        return Ok(SubmissionResult {
            state,
            cleanup: report.cleanup.clone(),
            outcome: SyncOutcome::Simulated(report),
        });
    }

    progress.on_phase(Phase::Pushing).await;
    progress.on_push(&plan.branch, PushStatus::Started).await;
    workspace.push(&plan.remote, &plan.branch)?;
    progress.on_push(&plan.branch, PushStatus::Success).await;

    progress.on_phase(Phase::CreatingPr).await;
    let base = publisher.default_branch(&plan.target).await?;
    progress
        .on_message(&format!("Creating PR {} → {base}", plan.branch))
        .await;

    let proposal = NewProposal {
        title: plan.title.clone(),
        head: plan.branch.clone(),
        base,
        body: plan.body.clone(),
    };
    let pr = publisher.create_proposal(&plan.target, &proposal).await?;
    info!(number = pr.number, url = %pr.html_url, "pull request created");
    progress.on_pr_created(&pr).await;

    let cleanup = vec![
        format!("gh pr close {} --repo {}", pr.number, plan.target),
        format!("git push {} --delete {}", plan.remote, plan.branch),
    ];

    progress.on_phase(Phase::Complete).await;

    Ok(SubmissionResult {
        state,
        outcome: SyncOutcome::Proposed(pr),
        cleanup,
    })
}

fn dry_run_report(plan: &ProposalPlan, workspace: &Workspace<'_>) -> DryRunReport {
    let repository = plan.target.to_string();
    DryRunReport {
        branch: plan.branch.clone(),
        commit_message: plan.commit_message.clone(),
        push: PushOperation {
            remote: plan.remote.clone(),
            branch: plan.branch.clone(),
            repository: repository.clone(),
        },
        proposal: ProposalOperation {
            repository,
            head: plan.branch.clone(),
            base: None,
            title: plan.title.clone(),
            body: plan.body.clone(),
        },
        cleanup: vec![format!(
            "git -C {} branch -D {}",
            workspace.root().display(),
            plan.branch
        )],
    }
}
