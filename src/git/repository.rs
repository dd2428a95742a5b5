use super::runner::GitBackend;
use crate::errors::GitError;
use std::path::Path;

/// Whether `path` is inside a git working tree or git directory.
pub fn is_repository(git: &dyn GitBackend, path: &Path) -> bool {
    git.succeeds(&["rev-parse", "--git-dir"], path)
}

/// Whether the current head has a second parent.
///
/// A head that cannot be resolved (no commits, root commit) is not a merge.
pub fn is_merge_commit(git: &dyn GitBackend, path: &Path) -> bool {
    git.succeeds(&["rev-parse", "HEAD^2"], path)
}

/// Guard used by every operation that reads from the repository.
pub fn ensure_repository(git: &dyn GitBackend, path: &Path) -> Result<(), GitError> {
    if is_repository(git, path) {
        Ok(())
    } else {
        Err(GitError::NotARepository(path.to_path_buf()))
    }
}
