//! GitHub credential discovery
//!
//! Runs at the CLI boundary only; the library takes the resulting token as an
//! explicit value.

mod github;

pub use github::{get_github_auth, token_from_sources, GitHubAuthConfig};

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token passed on the command line
    Flag,
    /// Token from environment variable
    EnvVar,
    /// Token from the `gh` CLI
    Cli,
}
