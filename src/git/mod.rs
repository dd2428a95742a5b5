//! Git plumbing for commit review: command execution, repository checks,
//! history, patches and changed-file listings.

pub mod branch;
pub mod changes;
pub mod diff;
pub mod history;
pub mod repository;
pub mod runner;

pub use branch::{checkout_branch, pull_branch};
pub use changes::list_changed_files;
pub use diff::{
    changed_files_summary, commit_patch, format_file_status, last_commit_info,
    parse_file_status, range_patch,
};
pub use history::{list_recent_commits, DEFAULT_COMMIT_COUNT};
pub use repository::{ensure_repository, is_merge_commit, is_repository};
pub use runner::{GitBackend, SystemGit};
