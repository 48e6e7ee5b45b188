//! Session state for git-recover.
//!
//! `SessionState` is owned by the event loop and mutated only there: by the key
//! dispatcher (`ui::keybindings`) and by `apply_git_result` when a worker reports
//! back. Blocking work is never done here; it is requested by sending a
//! `GitRequest` to the worker pool. No rendering lives here either: `ui::render`
//! reads the state by shared reference.

use crossbeam_channel::Sender;
use git_recover_core::{CommitRecord, RecoveryError};
use ratatui::text::Line;
use tracing::{debug, info, warn};

use crate::git::types::{GitRequest, GitResult};
use crate::input::{TextInput, BRANCH_NAME_LIMIT};

/// Prefix of the branch name suggested when recovery starts.
pub const DEFAULT_BRANCH_PREFIX: &str = "recovered-";

/// Message shown once the branch has been created.
pub const SUCCESS_MESSAGE: &str = "Branch recovered successfully!";

/// Where the session is in the browse → name → recover workflow.
///
/// Phase-specific data lives inside the variant, so e.g. the name buffer only
/// exists while naming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Moving through the commit list. Initial phase.
    Browsing,
    /// Editing the name of the branch to create at the selected commit.
    NamingBranch { input: TextInput },
    /// `CreateBranch` has been sent; waiting for the worker. Input is ignored.
    Recovering { branch: String },
    /// Terminal: the branch exists.
    Succeeded { message: String, branch: String },
    /// Terminal: branch creation failed.
    Failed { error: RecoveryError },
}

/// Last known terminal size in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

/// What the preview pane shows for one commit.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewContent {
    Lines(Vec<Line<'static>>),
    /// The preview could not be loaded; shown inline instead of the diff.
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub hash: String,
    pub content: PreviewContent,
}

/// All mutable session state passed through every render cycle.
pub struct SessionState {
    /// Merged commits, never empty, order fixed for the session.
    commits: Vec<CommitRecord>,
    /// Index of the selected commit, always `< commits.len()`.
    cursor: usize,
    pub phase: Phase,

    /// Preview currently on screen. Kept while a newer one loads.
    pub preview: Option<Preview>,
    /// Vertical scroll offset of the preview pane.
    pub preview_scroll: u16,
    /// Id of the most recently issued preview request, until its result arrives.
    pending_preview: Option<u64>,
    next_preview_id: u64,

    pub viewport: Option<Viewport>,
    /// Advanced on every logic tick; drives the `Recovering` spinner.
    pub tick: usize,

    git_tx: Sender<GitRequest>,
}

impl SessionState {
    /// Builds the session and requests the preview of the first commit.
    ///
    /// Returns `None` for an empty list: there is nothing to browse, and no
    /// request of any kind is sent.
    pub fn new(commits: Vec<CommitRecord>, git_tx: Sender<GitRequest>) -> Option<Self> {
        if commits.is_empty() {
            return None;
        }
        let mut state = Self {
            commits,
            cursor: 0,
            phase: Phase::Browsing,
            preview: None,
            preview_scroll: 0,
            pending_preview: None,
            next_preview_id: 0,
            viewport: None,
            tick: 0,
            git_tx,
        };
        state.request_preview();
        Some(state)
    }

    pub fn commits(&self) -> &[CommitRecord] {
        &self.commits
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> &CommitRecord {
        &self.commits[self.cursor]
    }

    /// True while a preview request for the current selection is outstanding.
    pub fn preview_loading(&self) -> bool {
        self.pending_preview.is_some()
    }

    /// Moves the cursor up one row, clamped at the top. Requests a preview if it moved.
    pub fn move_up(&mut self) {
        if self.phase != Phase::Browsing || self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        self.request_preview();
    }

    /// Moves the cursor down one row, clamped at the bottom. Requests a preview if it moved.
    pub fn move_down(&mut self) {
        if self.phase != Phase::Browsing || self.cursor + 1 >= self.commits.len() {
            return;
        }
        self.cursor += 1;
        self.request_preview();
    }

    /// Scrolls the preview pane by half the viewport height, stopping at its last line.
    pub fn scroll_preview_down(&mut self) {
        self.preview_scroll = self
            .preview_scroll
            .saturating_add(self.half_page())
            .min(self.max_preview_scroll());
    }

    pub fn scroll_preview_up(&mut self) {
        self.preview_scroll = self.preview_scroll.saturating_sub(self.half_page());
    }

    fn max_preview_scroll(&self) -> u16 {
        match self.preview.as_ref().map(|p| &p.content) {
            Some(PreviewContent::Lines(lines)) => {
                u16::try_from(lines.len().saturating_sub(1)).unwrap_or(u16::MAX)
            }
            _ => 0,
        }
    }

    /// Whether a termination signal should end the session now.
    ///
    /// A branch creation in flight always runs to completion, so the signal is
    /// held until its result has been applied.
    pub fn should_exit_on_signal(&self, signalled: bool) -> bool {
        signalled && !matches!(self.phase, Phase::Recovering { .. })
    }

    fn half_page(&self) -> u16 {
        self.viewport.map(|v| v.height / 2).unwrap_or(0).max(1)
    }

    /// `Browsing` → `NamingBranch` with `recovered-<short hash>` in the buffer.
    pub fn begin_naming(&mut self) {
        if self.phase != Phase::Browsing {
            return;
        }
        let default_name = format!("{DEFAULT_BRANCH_PREFIX}{}", self.selected().short_hash());
        self.phase = Phase::NamingBranch {
            input: TextInput::with_value(&default_name, BRANCH_NAME_LIMIT),
        };
    }

    /// `NamingBranch` → `Browsing`, discarding the buffer.
    pub fn cancel_naming(&mut self) {
        if matches!(self.phase, Phase::NamingBranch { .. }) {
            self.phase = Phase::Browsing;
        }
    }

    /// The name buffer, while naming.
    pub fn name_input_mut(&mut self) -> Option<&mut TextInput> {
        match &mut self.phase {
            Phase::NamingBranch { input } => Some(input),
            _ => None,
        }
    }

    /// `NamingBranch` → `Recovering`, sending exactly one `CreateBranch` request.
    pub fn confirm_branch(&mut self) {
        let Phase::NamingBranch { input } = &self.phase else {
            return;
        };
        let branch = input.value().to_owned();
        let hash = self.selected().hash.clone();
        info!(%branch, %hash, "recovering commit");

        let request = GitRequest::CreateBranch { hash, name: branch.clone() };
        match self.git_tx.send(request) {
            Ok(()) => self.phase = Phase::Recovering { branch },
            Err(_) => {
                self.phase = Phase::Failed {
                    error: RecoveryError::BranchCreationFailed {
                        reason: "git worker is not running".to_owned(),
                    },
                }
            }
        }
    }

    /// Applies a worker result. Stale previews are dropped here.
    pub fn apply_git_result(&mut self, result: GitResult) {
        match result {
            GitResult::Preview { id, hash, lines } => {
                if self.pending_preview != Some(id) {
                    debug!(id, %hash, "discarding stale preview");
                    return;
                }
                self.pending_preview = None;
                self.preview_scroll = 0;
                let content = match lines {
                    Ok(lines) => PreviewContent::Lines(lines),
                    Err(reason) => {
                        warn!(%hash, %reason, "preview failed");
                        PreviewContent::Unavailable(reason)
                    }
                };
                self.preview = Some(Preview { hash, content });
            }
            GitResult::BranchCreated { name, result } => {
                let Phase::Recovering { branch } = &self.phase else {
                    warn!(%name, "branch result outside of recovery, ignoring");
                    return;
                };
                self.phase = match result {
                    Ok(()) => Phase::Succeeded {
                        message: SUCCESS_MESSAGE.to_owned(),
                        branch: branch.clone(),
                    },
                    Err(error) => Phase::Failed { error },
                };
            }
        }
    }

    fn request_preview(&mut self) {
        self.next_preview_id += 1;
        let id = self.next_preview_id;
        let hash = self.selected().hash.clone();
        if self.git_tx.send(GitRequest::LoadPreview { id, hash }).is_ok() {
            self.pending_preview = Some(id);
        }
    }
}
