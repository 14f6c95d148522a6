//! CLI progress callback with styled output

use crate::cli::style::{arrow, check, hyperlink_url, Stylize};
use anstream::{eprintln, println};
use async_trait::async_trait;
use chart_sync::propose::{DryRunReport, Phase, ProgressCallback, PushStatus};
use chart_sync::types::PullRequest;
use std::fmt::Display;

/// Prints progress to the terminal
///
/// In JSON mode the dry-run report is the only thing written to stdout;
/// progress moves to stderr so the output stays parseable.
pub struct CliProgress {
    json: bool,
}

impl CliProgress {
    /// Human-readable output
    pub const fn human() -> Self {
        Self { json: false }
    }

    /// JSON report on stdout, progress on stderr
    pub const fn json() -> Self {
        Self { json: true }
    }

    fn line(&self, text: impl Display) {
        if self.json {
            eprintln!("{text}");
        } else {
            println!("{text}");
        }
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_phase(&self, phase: Phase) {
        self.line(format!("{}...", phase.to_string().emphasis()));
    }

    async fn on_push(&self, branch: &str, status: PushStatus) {
        match status {
            PushStatus::Started => self.line(format!("  Pushing {}...", branch.accent())),
            PushStatus::Success => self.line(format!("  {} Pushed {}", check(), branch.emphasis())),
        }
    }

    async fn on_pr_created(&self, pr: &PullRequest) {
        self.line(format!(
            "  {} Created PR {} ({} → {})",
            check(),
            format!("#{}", pr.number).accent(),
            pr.head_ref,
            pr.base_ref
        ));
        self.line(format!("    {}", hyperlink_url(&pr.html_url)));
    }

    async fn on_dry_run(&self, report: &DryRunReport) {
        if self.json {
            match serde_json::to_string_pretty(report) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("{}: {e}", "error".error()),
            }
            return;
        }

        println!("Would run:");
        println!(
            "  {} push {} to {} ({})",
            arrow(),
            report.push.branch.accent(),
            report.push.remote,
            report.push.repository
        );
        let base = report
            .proposal
            .base
            .as_deref()
            .unwrap_or("<default branch>");
        println!(
            "  {} open PR on {}: {} → {}",
            arrow(),
            report.proposal.repository.accent(),
            report.proposal.head,
            base
        );
        println!("    title: {}", report.proposal.title.emphasis());
        println!("    body:");
        for body_line in report.proposal.body.lines() {
            println!("      {}", body_line.muted());
        }
        println!();
        println!("To remove the local branch run:");
        for cmd in &report.cleanup {
            println!("  {}", cmd.muted());
        }
    }

    async fn on_warning(&self, message: &str) {
        eprintln!("{}: {message}", "warning".warn());
    }

    async fn on_message(&self, message: &str) {
        self.line(format!("  {message}"));
    }
}
