use std::fmt;

/// Where a recoverable commit was discovered.
///
/// When both sources report the same hash the merged list keeps `Dangling`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitSource {
    /// Reported by `git fsck` as an unreferenced commit object.
    Dangling,
    /// Visited recently according to the HEAD reflog.
    Reflog,
}

impl CommitSource {
    pub fn as_str(self) -> &'static str {
        match self {
            CommitSource::Dangling => "dangling",
            CommitSource::Reflog => "reflog",
        }
    }
}

impl fmt::Display for CommitSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A commit that can be materialized as a new branch.
///
/// `hash` is an exact token (full object name); `date` is kept as git formatted it.
/// Records are built once during discovery and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub hash: String,
    pub message: String,
    pub author: String,
    pub date: String,
    pub source: CommitSource,
}

impl CommitRecord {
    /// Length of the abbreviated hash used for display and default branch names.
    pub const SHORT_HASH_LEN: usize = 7;

    /// Returns the first seven characters of the hash (fewer if the hash is shorter).
    pub fn short_hash(&self) -> &str {
        match self.hash.char_indices().nth(Self::SHORT_HASH_LEN) {
            Some((idx, _)) => &self.hash[..idx],
            None => &self.hash,
        }
    }
}
