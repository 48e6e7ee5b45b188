//! Commit discovery from the two lossy sources git offers.
//!
//! - `git fsck` reports commit objects nothing references any more.
//! - The HEAD reflog lists commits recently checked out, bounded to
//!   [`HISTORY_LIMIT`] entries.
//!
//! Both are best-effort: a record whose details cannot be read or whose line does
//! not parse is skipped, never fatal. Only a failure to run the query itself is an
//! error, and each source fails independently (see [`discover_all`]).

use tracing::{debug, info, warn};

use crate::backend::GitBackend;
use crate::dedup;
use crate::error::{DiscoveryError, ParseError};
use crate::types::{CommitRecord, CommitSource};

/// Number of reflog entries scanned.
pub const HISTORY_LIMIT: usize = 50;

/// `--format` string producing `hash|date|author|subject`.
pub const COMMIT_FORMAT: &str = "--format=%H|%cd|%an|%s";

const FIELD_DELIMITER: char = '|';
const FIELD_COUNT: usize = 4;
const DANGLING_MARKER: &str = "dangling commit";

// `--no-reflogs` counts reflog-only commits as dangling, matching what
// `--lost-found` reports, but without writing into .git/lost-found.
const DANGLING_SCAN: [&str; 4] = ["fsck", "--no-progress", "--no-reflogs", "--dangling"];

/// Parses one `hash|date|author|subject` line into a record tagged with `source`.
///
/// The line is trimmed first. Exactly four fields are required and the hash must
/// be non-empty; a subject containing `|` therefore does not parse.
///
/// # Errors
///
/// [`ParseError`] describing the field count found.
pub fn parse_commit_line(line: &str, source: CommitSource) -> Result<CommitRecord, ParseError> {
    let line = line.trim();
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    if fields.len() != FIELD_COUNT || fields[0].is_empty() {
        return Err(ParseError {
            line: line.to_owned(),
            expected: FIELD_COUNT,
            found: fields.len(),
        });
    }
    Ok(CommitRecord {
        hash: fields[0].to_owned(),
        date: fields[1].to_owned(),
        author: fields[2].to_owned(),
        message: fields[3].to_owned(),
        source,
    })
}

/// Extracts commit hashes from `git fsck` output.
///
/// Lines without the `dangling commit` marker (dangling blobs, trees, progress
/// chatter) are ignored, as are marker lines with fewer than three tokens.
pub fn parse_dangling_hashes(fsck_output: &str) -> Vec<&str> {
    fsck_output
        .lines()
        .filter(|line| line.contains(DANGLING_MARKER))
        .filter_map(|line| line.split_whitespace().nth(2))
        .collect()
}

/// Finds unreferenced commits with `git fsck` and reads each one's details.
///
/// A detail query that fails or returns an unparseable line drops that candidate.
///
/// # Errors
///
/// [`DiscoveryError::BackendUnavailable`] if the fsck scan itself cannot run.
pub fn discover_dangling<B: GitBackend + ?Sized>(
    backend: &B,
) -> Result<Vec<CommitRecord>, DiscoveryError> {
    let output = backend.run(&DANGLING_SCAN)?;

    let mut commits = Vec::new();
    for hash in parse_dangling_hashes(&output) {
        let details = match backend.run(&["show", "-s", COMMIT_FORMAT, hash]) {
            Ok(details) => details,
            Err(e) => {
                debug!(%hash, error = %e, "skipping dangling commit without readable details");
                continue;
            }
        };
        match parse_commit_line(&details, CommitSource::Dangling) {
            Ok(record) => commits.push(record),
            Err(e) => debug!(%hash, error = %e, "skipping dangling commit"),
        }
    }
    Ok(commits)
}

/// Reads the most recent `limit` reflog entries as recoverable commits.
///
/// Blank and malformed lines are skipped.
///
/// # Errors
///
/// [`DiscoveryError::BackendUnavailable`] if `git reflog` cannot run (including a
/// repository without any commits yet).
pub fn discover_from_history<B: GitBackend + ?Sized>(
    backend: &B,
    limit: usize,
) -> Result<Vec<CommitRecord>, DiscoveryError> {
    let limit = limit.to_string();
    let output = backend.run(&["reflog", COMMIT_FORMAT, "-n", &limit])?;

    let commits = output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match parse_commit_line(line, CommitSource::Reflog) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!(error = %e, "skipping reflog line");
                None
            }
        })
        .collect();
    Ok(commits)
}

/// Outcome of querying both discovery sources.
#[derive(Debug, Default)]
pub struct DiscoveryReport {
    /// Merged, deduplicated commits: dangling first, then reflog.
    pub commits: Vec<CommitRecord>,
    pub dangling_error: Option<DiscoveryError>,
    pub history_error: Option<DiscoveryError>,
}

impl DiscoveryReport {
    /// True when neither source could be queried, as opposed to a clean repository.
    pub fn backend_broken(&self) -> bool {
        self.dangling_error.is_some() && self.history_error.is_some()
    }
}

/// Queries both sources concurrently and merges whatever succeeded.
///
/// A failing source is recorded in the report and logged; it never hides the
/// other source's results.
pub fn discover_all<B: GitBackend + ?Sized>(backend: &B) -> DiscoveryReport {
    let (dangling, history) = std::thread::scope(|s| {
        let dangling = s.spawn(|| discover_dangling(backend));
        let history = discover_from_history(backend, HISTORY_LIMIT);
        let dangling = dangling
            .join()
            .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
        (dangling, history)
    });

    let mut report = DiscoveryReport::default();
    let dangling = match dangling {
        Ok(commits) => commits,
        Err(e) => {
            warn!(error = %e, "dangling commit scan failed");
            report.dangling_error = Some(e);
            Vec::new()
        }
    };
    let history = match history {
        Ok(commits) => commits,
        Err(e) => {
            warn!(error = %e, "reflog scan failed");
            report.history_error = Some(e);
            Vec::new()
        }
    };

    info!(
        dangling = dangling.len(),
        reflog = history.len(),
        "discovery finished"
    );
    report.commits = dedup::merge(dangling, history);
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedGit;

    const FSCK: &str = "fsck --no-progress --no-reflogs --dangling";
    const REFLOG: &str = "reflog --format=%H|%cd|%an|%s -n 50";

    fn show(hash: &str) -> String {
        format!("show -s --format=%H|%cd|%an|%s {hash}")
    }

    #[test]
    fn parses_well_formed_line() {
        let record =
            parse_commit_line("  abc123|Mon Jan 1 2024|Ada|fix parser  \n", CommitSource::Reflog)
                .unwrap();
        assert_eq!(record.hash, "abc123");
        assert_eq!(record.date, "Mon Jan 1 2024");
        assert_eq!(record.author, "Ada");
        assert_eq!(record.message, "fix parser");
        assert_eq!(record.source, CommitSource::Reflog);
    }

    #[test]
    fn rejects_wrong_field_count() {
        let err = parse_commit_line("abc|date|author", CommitSource::Reflog).unwrap_err();
        assert_eq!(err.found, 3);
        let err = parse_commit_line("abc|date|author|a|b", CommitSource::Reflog).unwrap_err();
        assert_eq!(err.found, 5);
    }

    #[test]
    fn rejects_empty_hash() {
        assert!(parse_commit_line("|date|author|subject", CommitSource::Dangling).is_err());
    }

    #[test]
    fn dangling_hashes_ignore_other_objects() {
        let out = "Checking object directories\n\
                   dangling blob 1111111111\n\
                   dangling commit 2222222222\n\
                   dangling tree 3333333333\n\
                   dangling commit 4444444444\n\
                   dangling commit";
        assert_eq!(parse_dangling_hashes(out), vec!["2222222222", "4444444444"]);
    }

    #[test]
    fn dangling_scan_drops_candidates_without_details() {
        let git = ScriptedGit::new()
            .ok(FSCK, "dangling commit aaa1111\ndangling commit bbb2222\ndangling commit ccc3333")
            .ok(&show("aaa1111"), "aaa1111|D1|A|fix")
            .fail(&show("bbb2222"), "fatal: bad object bbb2222")
            .ok(&show("ccc3333"), "ccc3333|D3|C|sub|ject");

        let commits = discover_dangling(&git).unwrap();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].hash, "aaa1111");
        assert_eq!(commits[0].source, CommitSource::Dangling);
    }

    #[test]
    fn dangling_scan_failure_is_backend_unavailable() {
        let git = ScriptedGit::new().fail(FSCK, "fatal: not a git repository");
        let err = discover_dangling(&git).unwrap_err();
        assert!(matches!(err, DiscoveryError::BackendUnavailable(_)));
    }

    #[test]
    fn empty_scan_is_not_an_error() {
        let git = ScriptedGit::new().ok(FSCK, "").ok(REFLOG, "");
        assert!(discover_dangling(&git).unwrap().is_empty());
        assert!(discover_from_history(&git, HISTORY_LIMIT).unwrap().is_empty());
    }

    #[test]
    fn history_skips_malformed_lines() {
        let git = ScriptedGit::new().ok(
            REFLOG,
            "aaa1111|D1|A|fix\n\nnot a commit line\nbbb2222|D2|B|wip\n",
        );
        let commits = discover_from_history(&git, HISTORY_LIMIT).unwrap();
        let hashes: Vec<&str> = commits.iter().map(|c| c.hash.as_str()).collect();
        assert_eq!(hashes, vec!["aaa1111", "bbb2222"]);
        assert!(commits.iter().all(|c| c.source == CommitSource::Reflog));
    }

    #[test]
    fn history_passes_limit_to_git() {
        let git = ScriptedGit::new().ok("reflog --format=%H|%cd|%an|%s -n 7", "");
        discover_from_history(&git, 7).unwrap();
        assert_eq!(git.calls(), vec!["reflog --format=%H|%cd|%an|%s -n 7".to_owned()]);
    }

    #[test]
    fn discover_all_prefers_dangling_classification() {
        let git = ScriptedGit::new()
            .ok(FSCK, "dangling commit aaa1111")
            .ok(&show("aaa1111"), "aaa1111|D1|A|fix")
            .ok(REFLOG, "aaa1111|D1|A|fix\nbbb2222|D2|B|wip");

        let report = discover_all(&git);
        assert!(report.dangling_error.is_none());
        assert!(report.history_error.is_none());
        assert_eq!(report.commits.len(), 2);
        assert_eq!(report.commits[0].hash, "aaa1111");
        assert_eq!(report.commits[0].source, CommitSource::Dangling);
        assert_eq!(report.commits[1].source, CommitSource::Reflog);
    }

    #[test]
    fn discover_all_keeps_surviving_source() {
        let git = ScriptedGit::new()
            .fail(FSCK, "fatal: fsck broke")
            .ok(REFLOG, "bbb2222|D2|B|wip");

        let report = discover_all(&git);
        assert!(report.dangling_error.is_some());
        assert!(!report.backend_broken());
        assert_eq!(report.commits.len(), 1);
    }

    #[test]
    fn both_sources_failing_is_reported_as_broken() {
        let git = ScriptedGit::new();
        let report = discover_all(&git);
        assert!(report.backend_broken());
        assert!(report.commits.is_empty());
    }

    #[test]
    fn clean_repository_is_empty_but_not_broken() {
        let git = ScriptedGit::new().ok(FSCK, "").ok(REFLOG, "");
        let report = discover_all(&git);
        assert!(report.commits.is_empty());
        assert!(!report.backend_broken());
        assert!(!git.calls().iter().any(|c| c.starts_with("branch")));
    }
}
