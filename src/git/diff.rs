use super::repository::{ensure_repository, is_merge_commit};
use super::runner::GitBackend;
use crate::errors::GitError;
use crate::types::git::{ChangedFile, DiffRange, FileStatus};
use std::path::Path;

/// Patch options shared by every review diff.
const PATCH_FLAGS: [&str; 4] = ["--patch", "--unified=3", "--color=always", "--no-prefix"];

const LAST_COMMIT_FORMAT: &str =
    "--format=%C(yellow)commit %H%n%C(auto)%d%nAuthor: %an <%ae>%nDate: %ad%n%n    %s%n";

const STATUS_HEADER: &str = "Changed files:";
const NO_CHANGED_FILES: &str = "No changed files";

/// Raw `--name-status` listing of the files touched by head.
///
/// Merge heads are compared with their first parent; for other commits the
/// listing comes from `git show`, whose first line is the one-line summary.
pub fn changed_files_summary(git: &dyn GitBackend, path: &Path) -> Result<String, GitError> {
    ensure_repository(git, path)?;

    if is_merge_commit(git, path) {
        git.output(
            &["diff-tree", "--name-status", "-r", "--no-commit-id", "HEAD^1..HEAD"],
            path,
        )
    } else {
        git.output(&["show", "--name-status", "--oneline", "HEAD"], path)
    }
}

/// Colorized patch of the head commit against its first parent.
pub fn commit_patch(git: &dyn GitBackend, path: &Path) -> Result<String, GitError> {
    ensure_repository(git, path)?;

    let range = if is_merge_commit(git, path) {
        "HEAD^1..HEAD"
    } else {
        "HEAD^..HEAD"
    };
    patch_for(git, path, range)
}

/// Colorized patch for an arbitrary range.
pub fn range_patch(git: &dyn GitBackend, path: &Path, range: &DiffRange) -> Result<String, GitError> {
    match range {
        DiffRange::LastCommit => commit_patch(git, path),
        DiffRange::Between { from, to } => {
            ensure_repository(git, path)?;
            patch_for(git, path, &format!("{}..{}", from, to))
        }
    }
}

fn patch_for(git: &dyn GitBackend, path: &Path, range: &str) -> Result<String, GitError> {
    let mut args = vec!["diff", range];
    args.extend(PATCH_FLAGS);
    git.output(&args, path)
}

/// Header block describing the head commit: hash, refs, author, date, subject.
pub fn last_commit_info(git: &dyn GitBackend, path: &Path) -> Result<String, GitError> {
    ensure_repository(git, path)?;
    git.output(&["log", "-1", LAST_COMMIT_FORMAT], path)
}

/// Parses `status<TAB>...<TAB>path` lines.
///
/// The path is the last field, so renames and copies resolve to their
/// destination. Lines with fewer than two fields are skipped.
pub fn parse_file_status(raw: &str) -> Vec<ChangedFile> {
    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let parts: Vec<&str> = line.split('\t').collect();
            if parts.len() < 2 {
                return None;
            }
            Some(ChangedFile {
                status: FileStatus::from_code(parts[0]),
                path: parts[parts.len() - 1].to_string(),
            })
        })
        .collect()
}

/// Human-readable report of a `--name-status` listing.
pub fn format_file_status(raw: &str) -> String {
    let mut result = vec![
        String::new(),
        STATUS_HEADER.to_string(),
        "-".repeat(40),
    ];

    if raw.lines().all(|line| line.trim().is_empty()) {
        result.push(NO_CHANGED_FILES.to_string());
        return result.join("\n");
    }

    for file in parse_file_status(raw) {
        result.push(format!("{}: {}", file.status, file.path));
    }
    result.join("\n")
}
