//! Proposal workflow
//!
//! Turns an updated working copy into a pull request:
//! 1. Planning - branch name, commit message, PR title and body
//! 2. Execution - branch, stage, commit, then push and open the PR, or
//!    report what would have happened in dry-run mode

mod execute;
mod plan;
mod progress;

pub use execute::{
    execute_proposal, DryRunReport, ProposalOperation, PushOperation, SubmissionResult,
    SyncOutcome,
};
pub use plan::{
    branch_name, create_proposal_plan, proposal_body, proposal_title, ProposalPlan,
    BRANCH_PREFIX, TEST_BRANCH_PREFIX, TEST_PREFIX,
};
pub use progress::{NoopProgress, Phase, ProgressCallback, PushStatus};
