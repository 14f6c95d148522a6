//! Proposal planning
//!
//! Computes every name and text the workflow needs before anything touches
//! git: branch name, commit message, PR title and body.

use crate::chart::TargetPaths;
use crate::repo::DEFAULT_REMOTE;
use crate::types::{strip_v, BranchNaming, ReleaseInfo, RepoSlug, RunConfig};
use chrono::{DateTime, Utc};
use std::fmt::Write;
use std::path::PathBuf;

/// Marker prepended to commit message, PR title and body in test mode
pub const TEST_PREFIX: &str = "[TEST] ";

/// Branch prefix for regular runs
pub const BRANCH_PREFIX: &str = "chart-sync";

/// Branch prefix for test runs
pub const TEST_BRANCH_PREFIX: &str = "test/chart-sync";

/// Everything needed to branch, commit and propose
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalPlan {
    /// Branch to create and push
    pub branch: String,
    /// Path to stage, relative to the working copy root
    pub stage_path: PathBuf,
    /// Commit message
    pub commit_message: String,
    /// PR title (same text as the commit message)
    pub title: String,
    /// PR body
    pub body: String,
    /// Remote to push to
    pub remote: String,
    /// Repository the PR is opened against
    pub target: RepoSlug,
}

/// Build the proposal plan for a run
pub fn create_proposal_plan(
    config: &RunConfig,
    target: RepoSlug,
    paths: &TargetPaths,
    release: &ReleaseInfo,
    now: DateTime<Utc>,
) -> ProposalPlan {
    let title = proposal_title(&config.component, &release.tag, config.test_mode);

    ProposalPlan {
        branch: branch_name(&config.branch, &config.chart, &release.tag, config.test_mode, now),
        stage_path: paths.chart_dir.clone(),
        commit_message: title.clone(),
        title,
        body: proposal_body(
            &config.component,
            &config.source_repo,
            release,
            config.test_mode,
            &config.cc,
        ),
        remote: DEFAULT_REMOTE.to_string(),
        target,
    }
}

/// Name the sync branch
///
/// Timestamped names look like
/// `chart-sync/<chart>-20251209-150405-1.2.3`, so reruns for the same release
/// never collide on the remote.
pub fn branch_name(
    naming: &BranchNaming,
    chart: &str,
    tag: &str,
    test_mode: bool,
    now: DateTime<Utc>,
) -> String {
    match naming {
        BranchNaming::Fixed(name) => name.clone(),
        BranchNaming::Timestamped => {
            let prefix = if test_mode {
                TEST_BRANCH_PREFIX
            } else {
                BRANCH_PREFIX
            };
            format!(
                "{prefix}/{chart}-{}-{}",
                now.format("%Y%m%d-%H%M%S"),
                strip_v(tag)
            )
        }
    }
}

/// Commit message and PR title
pub fn proposal_title(component: &str, tag: &str, test_mode: bool) -> String {
    let prefix = if test_mode { TEST_PREFIX } else { "" };
    format!("{prefix}{component}: update chart for release {tag}")
}

/// PR body: provenance plus the release notes verbatim
pub fn proposal_body(
    component: &str,
    source_repo: &str,
    release: &ReleaseInfo,
    test_mode: bool,
    cc: &[String],
) -> String {
    let prefix = if test_mode { TEST_PREFIX } else { "" };
    let mut body = format!(
        "{prefix}Automated update of the {component} Helm chart and changelog.\n\n\
         Source repo: {source_repo}\n\
         Release tag: {}\n\n\
         Release notes:\n{}",
        release.tag, release.notes
    );

    if !cc.is_empty() {
        let mentions: Vec<String> = cc
            .iter()
            .map(|h| {
                if h.starts_with('@') {
                    h.clone()
                } else {
                    format!("@{h}")
                }
            })
            .collect();
        let _ = write!(body, "\n\n/cc {}", mentions.join(" "));
    }

    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::path::Path;

    fn config(test_mode: bool) -> RunConfig {
        RunConfig {
            source_repo: "org/cloud-provider".to_string(),
            target_repo: "org/helm".to_string(),
            tag: None,
            notes: None,
            dry_run: true,
            test_mode,
            chart: "cloud-provider".to_string(),
            component: "cloud-provider".to_string(),
            branch: BranchNaming::Timestamped,
            cc: vec![],
        }
    }

    fn release() -> ReleaseInfo {
        ReleaseInfo {
            tag: "v0.6.0".to_string(),
            notes: "- fix A\n- fix B".to_string(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 9, 15, 4, 5).unwrap()
    }

    #[test]
    fn test_timestamped_branch() {
        let name = branch_name(&BranchNaming::Timestamped, "ccm", "v0.6.0", false, now());
        assert_eq!(name, "chart-sync/ccm-20251209-150405-0.6.0");
    }

    #[test]
    fn test_test_mode_branch_prefix() {
        let name = branch_name(&BranchNaming::Timestamped, "ccm", "0.6.0", true, now());
        assert_eq!(name, "test/chart-sync/ccm-20251209-150405-0.6.0");
    }

    #[test]
    fn test_fixed_branch() {
        let naming = BranchNaming::Fixed("sync-fixed".to_string());
        assert_eq!(branch_name(&naming, "ccm", "v1", true, now()), "sync-fixed");
    }

    #[test]
    fn test_title() {
        assert_eq!(
            proposal_title("ccm", "v0.6.0", false),
            "ccm: update chart for release v0.6.0"
        );
        assert_eq!(
            proposal_title("ccm", "v0.6.0", true),
            "[TEST] ccm: update chart for release v0.6.0"
        );
    }

    #[test]
    fn test_body_contains_provenance_and_notes() {
        let body = proposal_body("ccm", "org/ccm", &release(), false, &[]);
        assert!(body.starts_with("Automated update"));
        assert!(body.contains("Source repo: org/ccm\n"));
        assert!(body.contains("Release tag: v0.6.0\n"));
        assert!(body.ends_with("Release notes:\n- fix A\n- fix B"));
    }

    #[test]
    fn test_body_test_prefix_and_cc() {
        let cc = vec!["org/maintainers".to_string(), "@alice".to_string()];
        let body = proposal_body("ccm", "org/ccm", &release(), true, &cc);
        assert!(body.starts_with(TEST_PREFIX));
        assert!(body.ends_with("\n\n/cc @org/maintainers @alice"));
    }

    #[test]
    fn test_plan_commit_matches_title() {
        let paths = TargetPaths::new(Path::new("/work"), "cloud-provider");
        let plan = create_proposal_plan(
            &config(true),
            RepoSlug::new("org", "helm"),
            &paths,
            &release(),
            now(),
        );

        assert_eq!(plan.commit_message, plan.title);
        assert!(plan.title.starts_with(TEST_PREFIX));
        assert!(plan.body.starts_with(TEST_PREFIX));
        assert_eq!(plan.stage_path, Path::new("charts/cloud-provider"));
        assert_eq!(plan.remote, "origin");
        assert_eq!(
            plan.branch,
            "test/chart-sync/cloud-provider-20251209-150405-0.6.0"
        );
    }
}
