//! User configuration loaded from `~/.config/git-recover/config.toml`.
//!
//! Every key is optional; a missing file means all defaults. Config problems are
//! soft failures: the message goes to stderr (the TUI has not started yet) and the
//! defaults are used.

use std::path::PathBuf;

use serde::Deserialize;

/// Parsed configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Theme name, resolved by `Theme::from_name`.
    pub theme: String,
    /// `tracing_subscriber::EnvFilter` directive for the log file.
    pub log_level: String,
    /// Number of git worker threads serving previews and recovery.
    pub workers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "catppuccin-mocha".to_owned(),
            log_level: "info".to_owned(),
            workers: 2,
        }
    }
}

impl Config {
    /// Parses a config document. Values out of range are clamped.
    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        let mut config: Config = toml::from_str(raw)?;
        config.workers = config.workers.max(1);
        Ok(config)
    }

    /// Loads the config file, falling back to defaults on any problem.
    pub fn load() -> Self {
        let path = config_path();
        let raw = match std::fs::read_to_string(&path) {
            Ok(s) => s,
            Err(_) => return Self::default(),
        };
        match Self::from_toml(&raw) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("git-recover: config parse error in {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}

/// Returns the path to the config file.
///
/// Prefers `$XDG_CONFIG_HOME/git-recover/config.toml`; falls back to
/// `~/.config/git-recover/config.toml`.
pub fn config_path() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", ".config")
        .join("git-recover")
        .join("config.toml")
}

/// Resolves an XDG base directory: `$var`, else `$HOME/<fallback>`, else `<fallback>`.
pub fn xdg_dir(var: &str, fallback: &str) -> PathBuf {
    std::env::var(var)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(fallback))
        })
        .unwrap_or_else(|| PathBuf::from(fallback))
}
