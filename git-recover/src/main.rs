//! git-recover: find lost commits and put a branch back on one.
//!
//! Entry point for the `git-recover` binary. Wires together repository discovery
//! (`git-recover-core`), the terminal lifecycle (`tui`), the event bus (`event`),
//! the git worker pool (`git`), session state (`app`) and rendering (`ui`).
//!
//! # Startup sequence
//!
//! 1. Load config and start file logging. Both are soft failures.
//! 2. Locate the repository and scan it for recoverable commits. Nothing touches
//!    the terminal yet, so results and errors go to stdout/stderr as plain text.
//! 3. Spawn the worker pool and build the session (it requests the first preview).
//! 4. `install_panic_hook()`, `register_signals()`, then `init_tui()`.
//!
//! The event loop exits only via `break`, so `restore_tui()` is always reached.

mod app;
mod config;
mod event;
mod git;
mod input;
mod logging;
mod theme;
mod tui;
mod ui;

use std::process::ExitCode;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use git_recover_core::discovery::discover_all;
use git_recover_core::{repo, CliGit, GitBackend};
use tracing::{error, info};

use crate::app::{Phase, SessionState, Viewport};
use crate::event::{AppEvent, EventHandler};
use crate::ui::keybindings::{handle_key, KeyAction};

const NOT_A_REPO: &str =
    "Error: Not a git repository. Please run this command from inside a git repository.";
const BACKEND_BROKEN: &str = "Error: could not query the repository for recoverable commits.";
const NOTHING_FOUND: &str = "No recoverable commits found.";

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let config = config::Config::load();
    if let Some(path) = logging::init(&config.log_level) {
        info!(log = %path.display(), "git-recover starting");
    }
    let theme = theme::Theme::from_name(&config.theme);

    let cwd = std::env::current_dir().context("reading current directory")?;
    let root = match repo::locate(&cwd) {
        Ok(root) => root,
        Err(e) => {
            error!(error = %e, "repository lookup failed");
            println!("{NOT_A_REPO}");
            return Ok(ExitCode::FAILURE);
        }
    };
    info!(repo = %root.display(), "repository located");

    println!("Scanning for recoverable commits...");
    let backend: Arc<dyn GitBackend> = Arc::new(CliGit::new(root));
    let scan = Arc::clone(&backend);
    let report = tokio::task::spawn_blocking(move || discover_all(scan.as_ref()))
        .await
        .context("commit scan task failed")?;

    for e in [&report.dangling_error, &report.history_error].into_iter().flatten() {
        println!("Warning: {e}");
    }
    if report.backend_broken() {
        println!("{BACKEND_BROKEN}");
        return Ok(ExitCode::FAILURE);
    }

    let (git_tx, git_rx) = crossbeam_channel::unbounded();
    let Some(mut state) = SessionState::new(report.commits, git_tx) else {
        println!("{NOTHING_FOUND}");
        return Ok(ExitCode::SUCCESS);
    };
    info!(commits = state.commits().len(), "starting session");

    let handler = EventHandler::new();
    git::worker::spawn_worker_pool(backend, config.workers, git_rx, handler.tx.clone(), &theme)
        .context("spawning git workers")?;

    tui::install_panic_hook();
    let term_flag = tui::register_signals().context("registering signal handlers")?;
    let mut terminal = tui::init_tui().context("initialising terminal")?;

    if let Ok(size) = terminal.size() {
        state.viewport = Some(Viewport { width: size.width, height: size.height });
    }

    event::spawn_event_task(handler.tx.clone());
    let mut rx = handler.rx;
    let mut draw_error = None;

    'event_loop: loop {
        tokio::select! {
            // Heartbeat: SIGTERM is checked at least every 50 ms even when idle.
            // While a branch is being created the signal is held until the result lands.
            _ = tokio::time::sleep(Duration::from_millis(50)) => {
                if state.should_exit_on_signal(term_flag.load(Ordering::Relaxed)) {
                    break 'event_loop;
                }
            }
            maybe_event = rx.recv() => {
                match maybe_event {
                    Some(AppEvent::Render) => {
                        if let Err(e) = terminal.draw(|frame| ui::render(frame, &state, &theme)) {
                            draw_error = Some(e);
                            break 'event_loop;
                        }
                    }
                    Some(AppEvent::Key(key)) => {
                        if handle_key(key, &mut state) == KeyAction::Quit {
                            break 'event_loop;
                        }
                    }
                    Some(AppEvent::Resize(width, height)) => {
                        state.viewport = Some(Viewport { width, height });
                    }
                    Some(AppEvent::Tick) => {
                        state.tick = state.tick.wrapping_add(1);
                    }
                    Some(AppEvent::GitResult(result)) => state.apply_git_result(*result),
                    None => break 'event_loop,
                }
                if state.should_exit_on_signal(term_flag.load(Ordering::Relaxed)) {
                    break 'event_loop;
                }
            }
        }
    }

    tui::restore_tui().context("restoring terminal")?;
    if let Some(e) = draw_error {
        return Err(e).context("drawing frame");
    }

    match &state.phase {
        Phase::Succeeded { message, branch } => {
            info!(%branch, "recovered");
            println!("{message} ({branch})");
            Ok(ExitCode::SUCCESS)
        }
        Phase::Failed { error } => {
            error!(reason = %error, "recovery failed");
            eprintln!("Error: {error}");
            Ok(ExitCode::FAILURE)
        }
        _ => Ok(ExitCode::SUCCESS),
    }
}
