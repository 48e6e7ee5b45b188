//! Discovery, deduplication, and recovery of unreachable git commits.
//!
//! The interactive front end lives in the `git-recover` binary; this crate holds
//! everything that talks to git and can be tested without a terminal.

pub mod backend;
pub mod dedup;
pub mod discovery;
pub mod error;
pub mod recovery;
pub mod repo;
pub mod types;

#[cfg(test)]
mod testing;

pub use backend::{CliGit, GitBackend};
pub use error::{BackendError, DiscoveryError, ParseError, RecoveryError, RepoError};
pub use types::{CommitRecord, CommitSource};
