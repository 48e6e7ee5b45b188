//! Error taxonomy shared by discovery, recovery, and repository detection.

use std::path::PathBuf;

use thiserror::Error;

/// The git executable could not be run, or ran and reported failure.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The process could not be spawned at all (git missing, cwd gone, ...).
    #[error("failed to run `git {command}`: {source}")]
    Unavailable {
        command: String,
        #[source]
        source: std::io::Error,
    },
    /// The process ran but exited with a non-zero status.
    #[error("`git {command}` exited with {status}: {output}")]
    Failed {
        command: String,
        status: String,
        /// Trimmed stderr, or stdout when stderr was empty.
        output: String,
    },
}

impl BackendError {
    /// Human-facing reason for the failure, without the command prefix.
    ///
    /// For a failed command this is git's own message (e.g. `fatal: a branch
    /// named 'x' already exists`).
    pub fn reason(&self) -> String {
        match self {
            BackendError::Unavailable { source, .. } => source.to_string(),
            BackendError::Failed { output, status, .. } if output.is_empty() => {
                format!("git exited with {status}")
            }
            BackendError::Failed { output, .. } => output.clone(),
        }
    }
}

/// A discovery source could not be queried.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("backend unavailable: {0}")]
    BackendUnavailable(#[from] BackendError),
}

/// One line of git output did not have the expected `hash|date|author|subject` shape.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("malformed commit line (expected {expected} fields, found {found}): {line:?}")]
pub struct ParseError {
    pub line: String,
    pub expected: usize,
    pub found: usize,
}

/// A recovery action failed. `Display` is the reason verbatim.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecoveryError {
    #[error("{reason}")]
    BranchCreationFailed { reason: String },
    #[error("{reason}")]
    PublishFailed { reason: String },
}

impl RecoveryError {
    pub fn reason(&self) -> &str {
        match self {
            RecoveryError::BranchCreationFailed { reason }
            | RecoveryError::PublishFailed { reason } => reason,
        }
    }
}

/// Startup precondition failures.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("not a git repository: {}", path.display())]
    NotARepository {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },
}
