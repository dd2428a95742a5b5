use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// gitreview - AI code review of the last commit of a git repository
#[derive(Parser, Debug)]
#[command(name = "gitreview", version)]
#[command(about = "AI code review of the last commit of a git repository")]
pub struct Args {
    /// Subcommand
    #[command(subcommand)]
    pub command: Command,

    /// Debug-level diagnostics on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Review the last commit (or a range) and write an HTML report
    Review {
        /// Repository to review
        #[arg(long, env = "REPO_PATH", default_value = ".")]
        repo: PathBuf,
        /// Pull, checkout and pull this branch before reviewing
        #[arg(long, env = "GIT_BRANCH")]
        branch: Option<String>,
        /// Directory for numbered HTML reports
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Do not open the report in a browser
        #[arg(long)]
        no_open: bool,
        /// Review FROM..TO instead of the last commit
        #[arg(long, value_parser = parse_range)]
        range: Option<crate::types::git::DiffRange>,
        /// Response language
        #[arg(long)]
        language: Option<String>,
    },
    /// List recent commits
    Log {
        #[arg(long, env = "REPO_PATH", default_value = ".")]
        repo: PathBuf,
        /// Number of commits (defaults to review.history_count)
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
    /// Show the last commit, its changed files and its patch
    Changes {
        #[arg(long, env = "REPO_PATH", default_value = ".")]
        repo: PathBuf,
    },
}

fn parse_range(value: &str) -> Result<crate::types::git::DiffRange, String> {
    crate::types::git::DiffRange::parse(value)
        .ok_or_else(|| format!("expected FROM..TO, got '{}'", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::git::DiffRange;

    #[test]
    fn test_review_defaults() {
        let args = Args::try_parse_from(["gitreview", "review", "--repo", "/tmp/r"]).unwrap();
        match args.command {
            Command::Review {
                repo,
                no_open,
                range,
                ..
            } => {
                assert_eq!(repo, PathBuf::from("/tmp/r"));
                assert!(!no_open);
                assert!(range.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_review_range_and_flags() {
        let args = Args::try_parse_from([
            "gitreview", "-v", "review", "--repo", "/r", "--range", "v1..v2", "--no-open",
            "--language", "German",
        ])
        .unwrap();
        assert!(args.verbose);
        match args.command {
            Command::Review {
                range,
                no_open,
                language,
                ..
            } => {
                assert_eq!(
                    range,
                    Some(DiffRange::Between {
                        from: "v1".to_string(),
                        to: "v2".to_string()
                    })
                );
                assert!(no_open);
                assert_eq!(language.as_deref(), Some("German"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_range_is_rejected() {
        assert!(Args::try_parse_from(["gitreview", "review", "--repo", "/r", "--range", "v1...v2"]).is_err());
    }

    #[test]
    fn test_log_count() {
        let args = Args::try_parse_from(["gitreview", "log", "--repo", "/r", "-n", "5"]).unwrap();
        match args.command {
            Command::Log { count, .. } => assert_eq!(count, Some(5)),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
