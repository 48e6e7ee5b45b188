use std::path::{Path, PathBuf};

use git2::Repository;

use crate::error::RepoError;

/// Locates the repository containing `start` and returns the directory git
/// commands should run in: the work tree, or the git directory for a bare repo.
///
/// # Errors
///
/// [`RepoError::NotARepository`] if no repository encloses `start`.
pub fn locate(start: &Path) -> Result<PathBuf, RepoError> {
    let repo = Repository::discover(start).map_err(|source| RepoError::NotARepository {
        path: start.to_path_buf(),
        source,
    })?;
    let dir = repo.workdir().unwrap_or_else(|| repo.path());
    Ok(dir.to_path_buf())
}
