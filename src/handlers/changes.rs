use crate::{
    errors::AppError,
    git::{changed_files_summary, commit_patch, format_file_status, last_commit_info, GitBackend},
};
use colored::Colorize;
use std::path::Path;

/// Shows the head commit: header, changed files and the colorized patch.
pub fn handle_changes(git: &dyn GitBackend, repo: &Path) -> Result<(), AppError> {
    let info = last_commit_info(git, repo)?;
    println!("{}", info.trim_end());

    let summary = changed_files_summary(git, repo)?;
    println!("{}", format_file_status(&summary));

    let patch = commit_patch(git, repo)?;
    if patch.trim().is_empty() {
        println!("\n{}", "No changes found in the last commit".yellow());
    } else {
        println!("\n{}", patch);
    }
    Ok(())
}
