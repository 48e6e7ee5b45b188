//! Messages exchanged with the git worker threads.
//!
//! Every type is fully owned and `Send` so requests can cross into the worker
//! pool and results can travel back inside `AppEvent::GitResult`.

use git_recover_core::RecoveryError;
use ratatui::text::Line;

/// Commands sent from the event loop to the git worker pool.
///
/// Sent over a `crossbeam_channel::Sender<GitRequest>` held by the session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitRequest {
    /// Render `git show` for `hash`. `id` identifies the request so stale results
    /// can be recognised when they come back.
    LoadPreview { id: u64, hash: String },
    /// Create branch `name` at `hash`.
    CreateBranch { hash: String, name: String },
}

/// Result payload sent from a worker back to the event loop.
///
/// Carried inside `AppEvent::GitResult(Box<GitResult>)`; boxing keeps the event
/// enum small since a preview can be thousands of styled lines.
#[derive(Debug)]
pub enum GitResult {
    Preview {
        id: u64,
        hash: String,
        /// Styled preview lines, or the error text to show in place of them.
        lines: Result<Vec<Line<'static>>, String>,
    },
    BranchCreated {
        name: String,
        result: Result<(), RecoveryError>,
    },
}
