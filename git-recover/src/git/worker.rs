//! Worker threads that run blocking git commands off the event loop.
//!
//! All communication is via channels: `GitRequest` in over a shared crossbeam
//! receiver, `AppEvent::GitResult` out over the tokio event channel. Workers
//! never touch session state. Because several workers pull from the same queue,
//! results can arrive out of request order; the session discards stale previews.

use std::sync::Arc;

use crossbeam_channel::Receiver;
use git_recover_core::recovery::create_branch;
use git_recover_core::GitBackend;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::event::AppEvent;
use crate::git::highlight;
use crate::git::types::{GitRequest, GitResult};
use crate::theme::Theme;

/// Spawns `workers` threads serving requests from `rx` until every sender is dropped.
///
/// # Errors
///
/// Returns `Err` if the OS refuses to spawn a thread.
pub fn spawn_worker_pool(
    backend: Arc<dyn GitBackend>,
    workers: usize,
    rx: Receiver<GitRequest>,
    event_tx: UnboundedSender<AppEvent>,
    theme: &Theme,
) -> std::io::Result<()> {
    for index in 0..workers.max(1) {
        let backend = Arc::clone(&backend);
        let rx = rx.clone();
        let event_tx = event_tx.clone();
        let theme = theme.clone();
        std::thread::Builder::new()
            .name(format!("git-worker-{index}"))
            .spawn(move || git_worker_loop(backend, rx, event_tx, theme))?;
    }
    Ok(())
}

/// Body of one worker thread.
///
/// Exits when the request channel closes or the event loop has gone away.
pub fn git_worker_loop(
    backend: Arc<dyn GitBackend>,
    rx: Receiver<GitRequest>,
    event_tx: UnboundedSender<AppEvent>,
    theme: Theme,
) {
    highlight::warm_up();

    for request in rx {
        let result = handle_request(backend.as_ref(), &theme, request);
        if event_tx.send(AppEvent::GitResult(Box::new(result))).is_err() {
            break;
        }
    }
}

/// Runs one request to completion. Failures become part of the result.
pub fn handle_request(backend: &dyn GitBackend, theme: &Theme, request: GitRequest) -> GitResult {
    match request {
        GitRequest::LoadPreview { id, hash } => {
            debug!(id, %hash, "loading preview");
            let lines = backend
                .run(&["show", "--no-color", "--stat", "--patch", &hash])
                .map(|text| highlight::highlight_show(&text, theme))
                .map_err(|e| e.reason());
            GitResult::Preview { id, hash, lines }
        }
        GitRequest::CreateBranch { hash, name } => {
            let result = create_branch(backend, &hash, &name);
            GitResult::BranchCreated { name, result }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git_recover_core::{BackendError, RecoveryError};

    /// Answers `show` with a tiny commit and fails every branch creation.
    struct FakeGit;

    impl GitBackend for FakeGit {
        fn run(&self, args: &[&str]) -> Result<String, BackendError> {
            match args.first().copied() {
                Some("show") if args.last() == Some(&"good") => {
                    Ok("commit good\nAuthor: A\n\n    message".to_owned())
                }
                _ => Err(BackendError::Failed {
                    command: args.join(" "),
                    status: "exit status: 128".to_owned(),
                    output: "fatal: nope".to_owned(),
                }),
            }
        }
    }

    #[test]
    fn preview_success_is_highlighted() {
        let request = GitRequest::LoadPreview { id: 3, hash: "good".to_owned() };
        match handle_request(&FakeGit, &Theme::dark(), request) {
            GitResult::Preview { id, hash, lines } => {
                assert_eq!(id, 3);
                assert_eq!(hash, "good");
                assert_eq!(lines.expect("preview lines").len(), 4);
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn preview_failure_carries_git_message() {
        let request = GitRequest::LoadPreview { id: 1, hash: "bad".to_owned() };
        match handle_request(&FakeGit, &Theme::dark(), request) {
            GitResult::Preview { lines, .. } => assert_eq!(lines.unwrap_err(), "fatal: nope"),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn branch_failure_is_reported_not_panicked() {
        let request = GitRequest::CreateBranch { hash: "abc".to_owned(), name: "x".to_owned() };
        match handle_request(&FakeGit, &Theme::dark(), request) {
            GitResult::BranchCreated { name, result } => {
                assert_eq!(name, "x");
                assert_eq!(
                    result,
                    Err(RecoveryError::BranchCreationFailed { reason: "fatal: nope".to_owned() })
                );
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn pool_posts_results_back_to_event_channel() {
        let (req_tx, req_rx) = crossbeam_channel::unbounded();
        let (event_tx, mut event_rx) = tokio::sync::mpsc::unbounded_channel();
        spawn_worker_pool(Arc::new(FakeGit), 2, req_rx, event_tx, &Theme::dark()).unwrap();

        req_tx
            .send(GitRequest::LoadPreview { id: 9, hash: "good".to_owned() })
            .unwrap();
        drop(req_tx);

        match event_rx.blocking_recv() {
            Some(AppEvent::GitResult(result)) => {
                assert!(matches!(*result, GitResult::Preview { id: 9, .. }))
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
}
