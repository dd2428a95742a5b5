use super::runner::GitBackend;
use crate::logging::Reporter;
use std::path::Path;

/// Checks out `branch_name`; failures are reported and mapped to `false`.
pub fn checkout_branch(
    git: &dyn GitBackend,
    repo_path: &Path,
    branch_name: &str,
    reporter: &Reporter,
) -> bool {
    match git.output(&["checkout", branch_name], repo_path) {
        Ok(_) => true,
        Err(e) => {
            reporter.report(format!("Error checking out branch {}: {}", branch_name, e));
            false
        }
    }
}

/// Pulls the current branch; failures are reported and mapped to `false`.
pub fn pull_branch(git: &dyn GitBackend, repo_path: &Path, reporter: &Reporter) -> bool {
    match git.output(&["pull"], repo_path) {
        Ok(_) => true,
        Err(e) => {
            reporter.report(format!("Error pulling latest changes: {}", e));
            false
        }
    }
}
