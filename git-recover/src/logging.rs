//! File-backed tracing for git-recover.
//!
//! The terminal belongs to the TUI, so log output goes to
//! `$XDG_STATE_HOME/git-recover/git-recover.log` (or
//! `~/.local/state/git-recover/git-recover.log`). When the file cannot be opened
//! logging is simply disabled.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::xdg_dir;

/// Returns the log file path.
pub fn log_path() -> PathBuf {
    xdg_dir("XDG_STATE_HOME", ".local/state")
        .join("git-recover")
        .join("git-recover.log")
}

/// Installs the global subscriber filtered by `level` (an `EnvFilter` directive).
///
/// Returns the log file path when file logging is active. An invalid directive
/// falls back to `info`.
pub fn init(level: &str) -> Option<PathBuf> {
    let path = log_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok()?;
    }
    let file = File::options().create(true).append(true).open(&path).ok()?;

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .ok()?;
    Some(path)
}
