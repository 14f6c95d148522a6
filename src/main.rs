//! chart-sync - sync upstream releases into Helm chart repositories
//!
//! CLI binary that turns a release into a chart pull request.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "chart-sync")]
#[command(about = "Update a Helm chart for an upstream release and open a pull request")]
#[command(version)]
struct Cli {
    /// Upstream repository (owner/name or URL)
    #[arg(long)]
    source_repo: String,

    /// Chart repository (owner/name or URL)
    #[arg(long)]
    target_repo: String,

    /// GitHub token (defaults to GITHUB_TOKEN, GH_TOKEN, then `gh auth token`)
    #[arg(long)]
    token: Option<String>,

    /// Release tag to sync (defaults to the latest release)
    #[arg(long)]
    tag: Option<String>,

    /// Release notes to use instead of fetching them (requires --tag)
    #[arg(long)]
    release_notes: Option<String>,

    /// Dry run - commit locally, show what would be pushed and proposed
    #[arg(long)]
    dry_run: bool,

    /// Mark commit and pull request as a test run
    #[arg(long)]
    test: bool,

    /// Backend for release lookups and pull requests
    #[arg(long, value_enum, default_value_t = BackendArg::Api)]
    backend: BackendArg,

    /// GitHub API root (GitHub Enterprise)
    #[arg(long)]
    api_url: Option<String>,

    /// Use an existing checkout of the chart repository instead of cloning
    #[arg(long, conflicts_with = "clone_dir")]
    checkout: Option<PathBuf>,

    /// Directory to clone the chart repository into
    #[arg(long, default_value = "chart-repo")]
    clone_dir: PathBuf,

    /// Chart directory name under charts/ (defaults to the source repo name)
    #[arg(long)]
    chart: Option<String>,

    /// Component name used in commit and PR titles (defaults to the chart name)
    #[arg(long)]
    component: Option<String>,

    /// Use this branch name instead of a timestamped one
    #[arg(long)]
    branch: Option<String>,

    /// Users or teams to mention in the PR body
    #[arg(long, value_delimiter = ',')]
    cc: Vec<String>,

    /// Print the dry-run report as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum BackendArg {
    /// GitHub REST API over HTTPS
    Api,
    /// The `gh` CLI
    Gh,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::SyncArgs {
        source_repo: cli.source_repo,
        target_repo: cli.target_repo,
        token: cli.token,
        tag: cli.tag,
        release_notes: cli.release_notes,
        dry_run: cli.dry_run,
        test_mode: cli.test,
        backend: match cli.backend {
            BackendArg::Api => chart_sync::types::Backend::Api,
            BackendArg::Gh => chart_sync::types::Backend::GhCli,
        },
        api_url: cli.api_url,
        checkout: cli.checkout,
        clone_dir: cli.clone_dir,
        chart: cli.chart,
        component: cli.component,
        branch: cli.branch,
        cc: cli.cc,
        json: cli.json,
    };

    cli::run_sync(args).await?;

    Ok(())
}
