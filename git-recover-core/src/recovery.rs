//! Side-effecting recovery actions: create a branch, optionally publish it.

use tracing::{info, warn};

use crate::backend::GitBackend;
use crate::error::RecoveryError;

/// Creates branch `name` pointing at `hash`.
///
/// Only an empty name is rejected here; ref-name syntax and the existence of
/// `hash` are left to git. The name follows `--`, so a leading `-` is never read
/// as an option. Never overwrites: creating an existing branch fails.
///
/// # Errors
///
/// [`RecoveryError::BranchCreationFailed`] carrying git's message verbatim.
pub fn create_branch<B: GitBackend + ?Sized>(
    backend: &B,
    hash: &str,
    name: &str,
) -> Result<(), RecoveryError> {
    if name.trim().is_empty() {
        return Err(RecoveryError::BranchCreationFailed {
            reason: "branch name must not be empty".to_owned(),
        });
    }

    match backend.run(&["branch", "--", name, hash]) {
        Ok(_) => {
            info!(branch = %name, %hash, "branch created");
            Ok(())
        }
        Err(e) => {
            warn!(branch = %name, %hash, error = %e, "branch creation failed");
            Err(RecoveryError::BranchCreationFailed { reason: e.reason() })
        }
    }
}

/// Pushes `name` to `origin` and sets it as the upstream.
///
/// A failure leaves the local branch in place.
///
/// # Errors
///
/// [`RecoveryError::PublishFailed`] carrying git's message verbatim.
pub fn publish_branch<B: GitBackend + ?Sized>(backend: &B, name: &str) -> Result<(), RecoveryError> {
    backend
        .run(&["push", "-u", "origin", "--", name])
        .map(|_| info!(branch = %name, "branch published"))
        .map_err(|e| {
            warn!(branch = %name, error = %e, "publish failed");
            RecoveryError::PublishFailed { reason: e.reason() }
        })
}
