//! Git working copy operations
//!
//! Everything goes through the system `git` binary. Only the exit status is
//! inspected; stdout is logged and stderr is carried in errors.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;
use url::Url;

/// Remote that branches are pushed to
pub const DEFAULT_REMOTE: &str = "origin";

/// Runs git commands in a directory
pub trait GitRunner: Send + Sync {
    /// Run `git <args>` with `dir` as working directory
    fn run(&self, dir: &Path, args: &[&str]) -> Result<()>;
}

/// [`GitRunner`] backed by the `git` executable
#[derive(Debug, Clone)]
pub struct SystemGit {
    program: String,
}

impl Default for SystemGit {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
        }
    }
}

impl SystemGit {
    /// Use a different executable in place of `git`
    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl GitRunner for SystemGit {
    fn run(&self, dir: &Path, args: &[&str]) -> Result<()> {
        let command_line = display_command(&self.program, args);
        debug!(dir = %dir.display(), command = %command_line, "running");

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(|e| Error::LocalExecution {
                command: command_line.clone(),
                message: e.to_string(),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            debug!("{}", stdout.trim_end());
        }

        if output.status.success() {
            Ok(())
        } else {
            Err(Error::LocalExecution {
                command: command_line,
                message: format!(
                    "{}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            })
        }
    }
}

/// Render a command line with URL credentials masked
fn display_command(program: &str, args: &[&str]) -> String {
    let mut parts = vec![program.to_string()];
    parts.extend(args.iter().map(|arg| redact_credentials(arg)));
    parts.join(" ")
}

fn redact_credentials(arg: &str) -> String {
    match Url::parse(arg) {
        Ok(mut url) if url.password().is_some() => {
            let _ = url.set_password(Some("***"));
            url.to_string()
        }
        _ => arg.to_string(),
    }
}

/// A checked-out chart repository
pub struct Workspace<'a> {
    root: PathBuf,
    git: &'a dyn GitRunner,
}

impl<'a> Workspace<'a> {
    /// Wrap a working copy rooted at `root`
    pub fn new(root: impl Into<PathBuf>, git: &'a dyn GitRunner) -> Self {
        Self {
            root: root.into(),
            git,
        }
    }

    /// Working copy root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create and switch to a new branch
    pub fn create_branch(&self, name: &str) -> Result<()> {
        self.git.run(&self.root, &["checkout", "-b", name])
    }

    /// Stage a path relative to the root
    pub fn stage(&self, path: &Path) -> Result<()> {
        let path = path.to_string_lossy();
        self.git.run(&self.root, &["add", "--", &*path])
    }

    /// Commit staged changes
    pub fn commit(&self, message: &str) -> Result<()> {
        self.git.run(&self.root, &["commit", "-m", message])
    }

    /// Push a branch to a remote
    pub fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.git.run(&self.root, &["push", remote, branch])
    }
}

/// Produces the working copy a run operates on
pub trait CheckoutProvider: Send + Sync {
    /// Return the root of a ready working copy
    fn acquire(&self) -> Result<PathBuf>;
}

/// A working copy that already exists on disk
#[derive(Debug, Clone)]
pub struct ExistingCheckout {
    root: PathBuf,
}

impl ExistingCheckout {
    /// Use the directory at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl CheckoutProvider for ExistingCheckout {
    fn acquire(&self) -> Result<PathBuf> {
        if self.root.is_dir() {
            Ok(self.root.clone())
        } else {
            Err(Error::Config(format!(
                "checkout directory does not exist: {}",
                self.root.display()
            )))
        }
    }
}

/// Clone the chart repository into a fresh directory
pub struct GitClone<'a> {
    git: &'a dyn GitRunner,
    url: String,
    dest: PathBuf,
}

impl<'a> GitClone<'a> {
    /// Clone `url` into `dest`, which must not exist or be empty
    pub fn new(git: &'a dyn GitRunner, url: impl Into<String>, dest: impl Into<PathBuf>) -> Self {
        Self {
            git,
            url: url.into(),
            dest: dest.into(),
        }
    }
}

impl CheckoutProvider for GitClone<'_> {
    fn acquire(&self) -> Result<PathBuf> {
        let occupied = fs::read_dir(&self.dest).is_ok_and(|mut entries| entries.next().is_some());
        if occupied {
            return Err(Error::Config(format!(
                "clone destination is not empty: {}",
                self.dest.display()
            )));
        }

        let name = self
            .dest
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                Error::Config(format!("invalid clone destination: {}", self.dest.display()))
            })?;
        let parent = self
            .dest
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        self.git.run(parent, &["clone", &self.url, &name])?;
        Ok(self.dest.clone())
    }
}
