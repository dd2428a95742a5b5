use super::repository::ensure_repository;
use super::runner::GitBackend;
use crate::errors::GitError;
use crate::types::git::CommitRecord;
use std::path::Path;

pub const DEFAULT_COMMIT_COUNT: usize = 10;

const LOG_FORMAT: &str = "--format=%ad|%an|%s|%h";

/// Lists the `count` most recent commits reachable from head, newest first.
///
/// A repository without commits yields an empty list.
pub fn list_recent_commits(
    git: &dyn GitBackend,
    path: &Path,
    count: usize,
) -> Result<Vec<CommitRecord>, GitError> {
    ensure_repository(git, path)?;
    if count == 0 {
        return Ok(Vec::new());
    }

    let limit = format!("-{}", count);
    let output = match git.output(&["log", &limit, LOG_FORMAT, "--date=iso-local"], path) {
        Ok(output) => output,
        Err(GitError::CommandFailed { ref stderr, .. }) if is_unborn_head(stderr) => {
            tracing::debug!("{} has no commits yet", path.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };

    Ok(output.lines().filter_map(parse_log_line).collect())
}

/// Parses one `date|author|subject|hash` line.
///
/// Date and author are the first two fields and the short hash is the last;
/// everything between is the subject, which may itself contain `|`.
pub fn parse_log_line(line: &str) -> Option<CommitRecord> {
    if line.trim().is_empty() {
        return None;
    }
    let mut head = line.splitn(3, '|');
    let timestamp = head.next()?;
    let author = head.next()?;
    let rest = head.next()?;
    let (message, identifier) = rest.rsplit_once('|')?;

    Some(CommitRecord {
        timestamp: timestamp.to_string(),
        author: author.to_string(),
        message: message.to_string(),
        identifier: identifier.trim().to_string(),
    })
}

fn is_unborn_head(stderr: &str) -> bool {
    stderr.contains("does not have any commits") || stderr.contains("bad default revision 'HEAD'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_line() {
        let record = parse_log_line("2024-05-01 10:00:00 +0300|Dima|Fix parser|a1b2c3d").unwrap();
        assert_eq!(record.timestamp, "2024-05-01 10:00:00 +0300");
        assert_eq!(record.author, "Dima");
        assert_eq!(record.message, "Fix parser");
        assert_eq!(record.identifier, "a1b2c3d");
    }

    #[test]
    fn test_parse_log_line_keeps_pipes_in_subject() {
        let record =
            parse_log_line("2024-05-01 10:00:00 +0300|Dima|feat: a | b || c|a1b2c3d").unwrap();
        assert_eq!(record.message, "feat: a | b || c");
        assert_eq!(record.identifier, "a1b2c3d");
    }

    #[test]
    fn test_parse_log_line_empty_subject() {
        let record = parse_log_line("2024-05-01 10:00:00 +0300|Dima||a1b2c3d").unwrap();
        assert_eq!(record.message, "");
    }

    #[test]
    fn test_parse_log_line_rejects_short_lines() {
        assert!(parse_log_line("").is_none());
        assert!(parse_log_line("   ").is_none());
        assert!(parse_log_line("2024-05-01|Dima").is_none());
        assert!(parse_log_line("2024-05-01|Dima|no-hash").is_none());
    }

    #[test]
    fn test_unborn_head_detection() {
        assert!(is_unborn_head(
            "fatal: your current branch 'main' does not have any commits yet"
        ));
        assert!(!is_unborn_head("fatal: not a git repository"));
    }
}
