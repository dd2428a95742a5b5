use crate::{
    config::AppConfig,
    errors::AppError,
    git::{list_recent_commits, GitBackend},
    types::git::CommitRecord,
};
use colored::Colorize;
use std::path::Path;

/// Prints the most recent commits, newest first.
pub fn handle_log(
    config: &AppConfig,
    git: &dyn GitBackend,
    repo: &Path,
    count: Option<usize>,
) -> Result<(), AppError> {
    let count = count.unwrap_or(config.review.history_count);
    let commits = list_recent_commits(git, repo, count)?;

    if commits.is_empty() {
        println!("{}", "No commits yet".yellow());
        return Ok(());
    }

    for commit in &commits {
        println!("{}", format_commit_line(commit));
    }
    Ok(())
}

fn format_commit_line(commit: &CommitRecord) -> String {
    format!(
        "{} {} {} {}",
        commit.identifier.yellow(),
        commit.timestamp.dimmed(),
        commit.author.cyan(),
        commit.message
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_commit_line_keeps_fields() {
        colored::control::set_override(false);
        let commit = CommitRecord {
            timestamp: "2024-05-01 10:00:00 +0200".to_string(),
            author: "Ann".to_string(),
            message: "Fix a|b parsing".to_string(),
            identifier: "abc1234".to_string(),
        };
        assert_eq!(
            format_commit_line(&commit),
            "abc1234 2024-05-01 10:00:00 +0200 Ann Fix a|b parsing"
        );
    }
}
