//! The seam between git-recover and the `git` executable.
//!
//! Everything above this module treats git as an opaque command runner that
//! returns trimmed UTF-8 text. Swapping the executor (e.g. for a scripted one in
//! tests) only requires implementing [`GitBackend`].

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::trace;

use crate::error::BackendError;

/// Runs one git subcommand and returns its trimmed standard output.
///
/// Implementations must be shareable across the worker threads that issue
/// preview and recovery calls.
pub trait GitBackend: Send + Sync {
    /// Runs `git <args...>`.
    ///
    /// # Errors
    ///
    /// [`BackendError::Unavailable`] if the process cannot be spawned,
    /// [`BackendError::Failed`] if it exits with a non-zero status.
    fn run(&self, args: &[&str]) -> Result<String, BackendError>;
}

/// [`GitBackend`] that shells out to the `git` found on `PATH`.
#[derive(Debug, Clone)]
pub struct CliGit {
    workdir: PathBuf,
}

impl CliGit {
    /// Creates a runner whose commands execute with `workdir` as current directory.
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self { workdir: workdir.into() }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }
}

impl GitBackend for CliGit {
    fn run(&self, args: &[&str]) -> Result<String, BackendError> {
        let command = args.join(" ");
        trace!(%command, "running git");

        // Messages are matched on literally ("dangling commit"), so pin the locale.
        // A credential prompt would block forever behind the raw-mode terminal.
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .env("LC_ALL", "C")
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .output()
            .map_err(|source| BackendError::Unavailable { command: command.clone(), source })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
            let output_text = if stderr.is_empty() {
                String::from_utf8_lossy(&output.stdout).trim().to_owned()
            } else {
                stderr
            };
            return Err(BackendError::Failed {
                command,
                status: output.status.to_string(),
                output: output_text,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_owned())
    }
}
