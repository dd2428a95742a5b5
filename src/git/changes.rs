use super::diff::{changed_files_summary, parse_file_status};
use super::runner::GitBackend;
use crate::errors::GitError;
use std::path::Path;

/// Paths touched by the head commit, in the order git lists them.
pub fn list_changed_files(git: &dyn GitBackend, path: &Path) -> Result<Vec<String>, GitError> {
    let summary = changed_files_summary(git, path)?;
    Ok(paths_from_summary(&summary))
}

/// Last tab-separated field of every line that has at least two fields.
pub fn paths_from_summary(summary: &str) -> Vec<String> {
    parse_file_status(summary)
        .into_iter()
        .map(|file| file.path)
        .collect()
}
