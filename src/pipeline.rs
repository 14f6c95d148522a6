//! End-to-end sync pipeline
//!
//! Runs resolve → checkout → chart update → proposal, in that order, with no
//! stage calling back into an earlier one.

use crate::chart::{update_chart, ChartUpdate, TargetPaths};
use crate::error::Result;
use crate::platform::{parse_repo_slug, PlatformService};
use crate::propose::{
    create_proposal_plan, execute_proposal, Phase, ProgressCallback, SubmissionResult,
};
use crate::release::resolve_release;
use crate::repo::{CheckoutProvider, GitRunner, Workspace};
use crate::types::{ReleaseInfo, RunConfig};
use chrono::Utc;
use std::path::PathBuf;
use tracing::info;

/// Outcome of a full run
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Release that was synced
    pub release: ReleaseInfo,
    /// Working copy the run used
    pub checkout: PathBuf,
    /// Chart changes applied
    pub chart: ChartUpdate,
    /// Branch, commit and proposal outcome
    pub submission: SubmissionResult,
}

/// Run one sync
///
/// The target repository is validated before anything else, and the release
/// is resolved before the working copy is acquired, so input and lookup
/// errors leave no trace on disk.
pub async fn run_pipeline<P: PlatformService + ?Sized>(
    config: &RunConfig,
    platform: &P,
    checkout: &dyn CheckoutProvider,
    git: &dyn GitRunner,
    progress: &dyn ProgressCallback,
) -> Result<PipelineResult> {
    let target = parse_repo_slug(&config.target_repo)?;

    progress.on_phase(Phase::Resolving).await;
    let release = resolve_release(
        platform,
        &config.source_repo,
        config.tag.as_deref(),
        config.notes.as_deref(),
    )
    .await?;
    progress
        .on_message(&format!("Using release {}", release.tag))
        .await;

    progress.on_phase(Phase::CheckingOut).await;
    let root = checkout.acquire()?;
    info!(root = %root.display(), "working copy ready");

    progress.on_phase(Phase::UpdatingChart).await;
    let paths = TargetPaths::new(&root, &config.chart);
    let chart = update_chart(&paths, &release)?;
    if !chart.deployment_updated {
        progress
            .on_warning(&format!(
                "{} was not updated",
                paths.deployment.display()
            ))
            .await;
    }

    let plan = create_proposal_plan(config, target, &paths, &release, Utc::now());
    let workspace = Workspace::new(&root, git);
    let submission =
        execute_proposal(&plan, &workspace, platform, progress, config.dry_run).await?;

    Ok(PipelineResult {
        release,
        checkout: root,
        chart,
        submission,
    })
}
