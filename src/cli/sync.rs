//! Sync command - update the chart and propose the change

use crate::cli::progress::CliProgress;
use crate::cli::style::Stylize;
use anstream::println;
use chart_sync::auth::get_github_auth;
use chart_sync::error::{Error, Result};
use chart_sync::pipeline::run_pipeline;
use chart_sync::platform::{clone_url, create_platform_service, parse_repo_slug};
use chart_sync::propose::SyncOutcome;
use chart_sync::repo::{CheckoutProvider, ExistingCheckout, GitClone, SystemGit};
use chart_sync::types::{Backend, BranchNaming, RunConfig};
use std::path::PathBuf;
use tracing::debug;

/// Parsed command-line options for a sync run
pub struct SyncArgs {
    pub source_repo: String,
    pub target_repo: String,
    pub token: Option<String>,
    pub tag: Option<String>,
    pub release_notes: Option<String>,
    pub dry_run: bool,
    pub test_mode: bool,
    pub backend: Backend,
    pub api_url: Option<String>,
    pub checkout: Option<PathBuf>,
    pub clone_dir: PathBuf,
    pub chart: Option<String>,
    pub component: Option<String>,
    pub branch: Option<String>,
    pub cc: Vec<String>,
    pub json: bool,
}

/// Run the sync command
pub async fn run_sync(mut args: SyncArgs) -> Result<()> {
    args.tag = non_blank(args.tag);
    args.release_notes = non_blank(args.release_notes);

    if args.release_notes.is_some() && args.tag.is_none() {
        return Err(Error::Config(
            "--release-notes requires --tag".to_string(),
        ));
    }

    let source = parse_repo_slug(&args.source_repo)?;
    parse_repo_slug(&args.target_repo)?;

    let token = if needs_credential(&args) {
        let auth = get_github_auth(args.token.take()).await;
        if let Some(auth) = &auth {
            debug!(source = ?auth.source, "using GitHub token");
        }
        auth.map(|a| a.token)
    } else {
        debug!("offline dry run, skipping token discovery");
        None
    };

    if !args.dry_run && token.is_none() && args.backend == Backend::Api {
        return Err(Error::Config(
            "GitHub token required via --token, GITHUB_TOKEN or `gh auth login`".to_string(),
        ));
    }

    let chart = args.chart.unwrap_or_else(|| source.name.clone());
    let component = args.component.unwrap_or_else(|| chart.clone());

    let config = RunConfig {
        source_repo: args.source_repo,
        target_repo: args.target_repo,
        tag: args.tag,
        notes: args.release_notes,
        dry_run: args.dry_run,
        test_mode: args.test_mode,
        chart,
        component,
        branch: args.branch.map_or(BranchNaming::Timestamped, BranchNaming::Fixed),
        cc: args.cc,
    };

    let platform = create_platform_service(args.backend, token.clone(), args.api_url)?;
    let git = SystemGit::default();
    let checkout: Box<dyn CheckoutProvider + '_> = match args.checkout {
        Some(root) => Box::new(ExistingCheckout::new(root)),
        None => Box::new(GitClone::new(
            &git,
            clone_url(&config.target_repo, token.as_ref())?,
            args.clone_dir,
        )),
    };

    let progress = if args.json {
        CliProgress::json()
    } else {
        CliProgress::human()
    };

    let result = run_pipeline(
        &config,
        platform.as_ref(),
        checkout.as_ref(),
        &git,
        &progress,
    )
    .await?;

    if let SyncOutcome::Proposed(pr) = &result.submission.outcome {
        println!();
        println!(
            "{} {} into {} (PR #{})",
            "Synced".success(),
            result.release.tag.accent(),
            config.target_repo.accent(),
            pr.number
        );
        println!("To close the PR and delete the branch after testing, run:");
        for cmd in &result.submission.cleanup {
            println!("  {}", cmd.muted());
        }
    }

    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Whether the run can touch the network
///
/// A dry run on an existing checkout with tag and notes given never does.
fn needs_credential(args: &SyncArgs) -> bool {
    let offline = args.dry_run
        && args.checkout.is_some()
        && args.tag.is_some()
        && args.release_notes.is_some();
    !offline || args.token.is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> SyncArgs {
        SyncArgs {
            source_repo: "org/app".to_string(),
            target_repo: "org/charts".to_string(),
            token: None,
            tag: Some("v1.2.3".to_string()),
            release_notes: Some("notes".to_string()),
            dry_run: true,
            test_mode: false,
            backend: Backend::Api,
            api_url: None,
            checkout: Some(PathBuf::from("charts-checkout")),
            clone_dir: PathBuf::from("chart-repo"),
            chart: None,
            component: None,
            branch: None,
            cc: vec![],
            json: false,
        }
    }

    #[test]
    fn test_offline_dry_run_skips_credential() {
        assert!(!needs_credential(&args()));
    }

    #[test]
    fn test_explicit_token_is_always_used() {
        let args = SyncArgs {
            token: Some("t".to_string()),
            ..args()
        };
        assert!(needs_credential(&args));
    }

    #[test]
    fn test_network_runs_need_credential() {
        assert!(needs_credential(&SyncArgs {
            dry_run: false,
            ..args()
        }));
        assert!(needs_credential(&SyncArgs {
            checkout: None,
            ..args()
        }));
        assert!(needs_credential(&SyncArgs {
            release_notes: None,
            ..args()
        }));
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(Some(String::new())), None);
        assert_eq!(non_blank(Some("v1".to_string())), Some("v1".to_string()));
    }
}
