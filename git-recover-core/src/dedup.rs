use std::collections::HashSet;

use crate::types::CommitRecord;

/// Merges the two discovery results into one list keyed by hash.
///
/// Order: every dangling record in discovery order, then every reflog record
/// whose hash has not been seen yet. The first occurrence of a hash wins, so a
/// commit reported by both sources keeps its `Dangling` classification and a
/// commit visited several times in the reflog appears once.
pub fn merge(dangling: Vec<CommitRecord>, reflog: Vec<CommitRecord>) -> Vec<CommitRecord> {
    let mut seen: HashSet<String> = HashSet::with_capacity(dangling.len() + reflog.len());
    dangling
        .into_iter()
        .chain(reflog)
        .filter(|record| seen.insert(record.hash.clone()))
        .collect()
}
