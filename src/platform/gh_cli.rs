//! `gh` CLI backend
//!
//! Drives the REST API through `gh api --include`, relying on the CLI's own
//! authentication. The `--include` output carries the status line, so errors
//! surface with the same status and body as the HTTP backend.

use crate::error::{Error, Result};
use crate::platform::rest::{self, ApiResponse};
use crate::platform::{ProposalPublisher, ReleaseSource};
use crate::types::{NewProposal, PullRequest, ReleaseInfo, RepoSlug};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// GitHub service backed by the `gh` CLI
pub struct GhCliService {
    program: String,
    token: Option<SecretString>,
    hostname: Option<String>,
}

impl GhCliService {
    /// Create a new `gh` CLI service
    ///
    /// A token, when given, is passed to `gh` as `GH_TOKEN`; otherwise the
    /// CLI's stored login is used.
    pub fn new(token: Option<SecretString>, hostname: Option<String>) -> Self {
        Self {
            program: "gh".to_string(),
            token,
            hostname,
        }
    }

    /// Use a different executable in place of `gh`
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    async fn api(&self, method: &str, path: &str, input: Option<Vec<u8>>) -> Result<ApiResponse> {
        let endpoint = path.trim_start_matches('/');
        let mut args = vec!["api", "--include", "--method", method];
        if let Some(host) = &self.hostname {
            args.extend(["--hostname", host.as_str()]);
        }
        if input.is_some() {
            args.extend(["--input", "-"]);
        }
        args.push(endpoint);

        let command_line = format!("{} {}", self.program, args.join(" "));
        debug!(command = %command_line, "running");

        let mut command = Command::new(&self.program);
        command
            .args(&args)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(token) = &self.token {
            command.env("GH_TOKEN", token.expose_secret());
            if self.hostname.is_some() {
                command.env("GH_ENTERPRISE_TOKEN", token.expose_secret());
            }
        }

        let mut child = command.spawn().map_err(|e| Error::LocalExecution {
            command: command_line.clone(),
            message: e.to_string(),
        })?;

        if let (Some(bytes), Some(mut stdin)) = (input, child.stdin.take()) {
            stdin.write_all(&bytes).await?;
        }

        let output = child.wait_with_output().await?;
        let stdout = String::from_utf8_lossy(&output.stdout);

        // gh exits non-zero on 4xx/5xx but still prints the response
        parse_included_response(&stdout).ok_or_else(|| Error::LocalExecution {
            command: command_line,
            message: format!(
                "{}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        })
    }
}

/// Split `gh api --include` output into status and body
fn parse_included_response(output: &str) -> Option<ApiResponse> {
    if !output.starts_with("HTTP/") {
        return None;
    }
    let status = output
        .lines()
        .next()?
        .split_whitespace()
        .nth(1)?
        .parse()
        .ok()?;

    let body = output
        .split_once("\r\n\r\n")
        .or_else(|| output.split_once("\n\n"))
        .map_or("", |(_, body)| body);

    Some(ApiResponse {
        status,
        body: body.to_string(),
    })
}

#[async_trait]
impl ReleaseSource for GhCliService {
    async fn release_notes(&self, repo: &RepoSlug, tag: &str) -> Result<String> {
        let response = self
            .api("GET", &rest::release_by_tag_path(repo, tag), None)
            .await?;
        rest::decode_release_notes(repo, tag, response)
    }

    async fn latest_release(&self, repo: &RepoSlug) -> Result<ReleaseInfo> {
        let response = self
            .api("GET", &rest::latest_release_path(repo), None)
            .await?;
        rest::decode_latest_release(response)
    }
}

#[async_trait]
impl ProposalPublisher for GhCliService {
    async fn default_branch(&self, repo: &RepoSlug) -> Result<String> {
        let response = self.api("GET", &rest::repo_path(repo), None).await?;
        rest::decode_default_branch(response)
    }

    async fn create_proposal(
        &self,
        repo: &RepoSlug,
        proposal: &NewProposal,
    ) -> Result<PullRequest> {
        let payload = serde_json::to_vec(proposal)?;
        let response = self
            .api("POST", &rest::pulls_path(repo), Some(payload))
            .await?;
        rest::decode_pull_request(response)
    }
}
