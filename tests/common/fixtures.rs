//! Test fixtures: chart working copies, recording git and progress
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use chart_sync::error::{Error, Result};
use chart_sync::propose::{DryRunReport, Phase, ProgressCallback, PushStatus};
use chart_sync::repo::{CheckoutProvider, GitRunner};
use chart_sync::types::{BranchNaming, PullRequest, RunConfig};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

pub const CHART_YAML: &str = "apiVersion: v2\nname: app\nversion: 0.9.0\nappVersion: 0.9.0\n";
pub const VALUES_YAML: &str = "replicaCount: 1\nimage: ghcr.io/org/app:v0.9.0\n";
pub const DEPLOYMENT_YAML: &str =
    "spec:\n  containers:\n    - name: app\n      image: ghcr.io/org/app:0.9.0\n";
pub const CHANGELOG_MD: &str = "## v0.9.0\n\nInitial release\n\n";

/// A temporary working copy holding `charts/<chart>`
pub struct ChartRepo {
    pub dir: TempDir,
    pub chart: String,
}

impl ChartRepo {
    /// Working copy with every chart artifact present
    pub fn new(chart: &str) -> Self {
        let repo = Self::without_deployment(chart);
        let templates = repo.chart_dir().join("templates");
        fs::create_dir_all(&templates).unwrap();
        fs::write(templates.join("deployment.yaml"), DEPLOYMENT_YAML).unwrap();
        repo
    }

    /// Working copy whose chart has no deployment template
    pub fn without_deployment(chart: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let chart_dir = dir.path().join("charts").join(chart);
        fs::create_dir_all(&chart_dir).unwrap();
        fs::write(chart_dir.join("Chart.yaml"), CHART_YAML).unwrap();
        fs::write(chart_dir.join("values.yaml"), VALUES_YAML).unwrap();
        fs::write(chart_dir.join("CHANGELOG.md"), CHANGELOG_MD).unwrap();
        Self {
            dir,
            chart: chart.to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn chart_dir(&self) -> PathBuf {
        self.root().join("charts").join(&self.chart)
    }

    pub fn read(&self, file: &str) -> String {
        fs::read_to_string(self.chart_dir().join(file)).unwrap()
    }
}

/// Checkout provider over a fixed directory that counts acquisitions
pub struct FakeCheckout {
    root: PathBuf,
    acquired: AtomicUsize,
}

impl FakeCheckout {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            acquired: AtomicUsize::new(0),
        }
    }

    pub fn acquire_count(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }
}

impl CheckoutProvider for FakeCheckout {
    fn acquire(&self) -> Result<PathBuf> {
        self.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(self.root.clone())
    }
}

/// Git runner that records commands instead of running them
#[derive(Default)]
pub struct RecordingGit {
    calls: Mutex<Vec<String>>,
    fail_on: Mutex<Option<String>>,
}

impl RecordingGit {
    /// Make the given subcommand (`push`, `commit`, ...) fail
    pub fn fail_on(&self, subcommand: &str) {
        *self.fail_on.lock().unwrap() = Some(subcommand.to_string());
    }

    /// Every command as `args.join(" ")`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Subcommands only, in order
    pub fn subcommands(&self) -> Vec<String> {
        self.calls()
            .iter()
            .filter_map(|c| c.split_whitespace().next().map(ToString::to_string))
            .collect()
    }
}

impl GitRunner for RecordingGit {
    fn run(&self, _dir: &Path, args: &[&str]) -> Result<()> {
        let line = args.join(" ");
        self.calls.lock().unwrap().push(line.clone());
        let failing = self.fail_on.lock().unwrap().clone();
        if failing.is_some_and(|cmd| args.first() == Some(&cmd.as_str())) {
            return Err(Error::LocalExecution {
                command: format!("git {line}"),
                message: "exit status: 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Progress callback that records every event
#[derive(Default)]
pub struct RecordingProgress {
    pub phases: Mutex<Vec<Phase>>,
    pub pushes: Mutex<Vec<(String, PushStatus)>>,
    pub prs: Mutex<Vec<PullRequest>>,
    pub reports: Mutex<Vec<DryRunReport>>,
    pub warnings: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub fn phases(&self) -> Vec<Phase> {
        self.phases.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }

    pub fn reports(&self) -> Vec<DryRunReport> {
        self.reports.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProgressCallback for RecordingProgress {
    async fn on_phase(&self, phase: Phase) {
        self.phases.lock().unwrap().push(phase);
    }

    async fn on_push(&self, branch: &str, status: PushStatus) {
        self.pushes.lock().unwrap().push((branch.to_string(), status));
    }

    async fn on_pr_created(&self, pr: &PullRequest) {
        self.prs.lock().unwrap().push(pr.clone());
    }

    async fn on_dry_run(&self, report: &DryRunReport) {
        self.reports.lock().unwrap().push(report.clone());
    }

    async fn on_warning(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }

    async fn on_message(&self, _message: &str) {}
}

/// Run configuration with the given tag and notes
pub fn make_config(tag: Option<&str>, notes: Option<&str>) -> RunConfig {
    RunConfig {
        source_repo: "org/app".to_string(),
        target_repo: "org/charts".to_string(),
        tag: tag.map(ToString::to_string),
        notes: notes.map(ToString::to_string),
        dry_run: true,
        test_mode: false,
        chart: "app".to_string(),
        component: "app".to_string(),
        branch: BranchNaming::Timestamped,
        cc: vec![],
    }
}
