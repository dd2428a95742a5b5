use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Git command error: {0}")]
    Git(#[from] GitError),
    #[error("AI interaction error: {0}")]
    AI(#[from] AIError),
    #[error("I/O error while {0}: {1}")]
    IO(String, #[source] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read file '{0}': {1}")]
    FileRead(String, #[source] std::io::Error),
    #[error("Failed to parse TOML from file '{0}': {1}")]
    TomlParse(String, #[source] toml::de::Error),
    #[error("Other Config Error: {0}")]
    Other(String),
}

#[derive(Debug)]
pub enum GitError {
    CommandFailed {
        command: String,
        status_code: Option<i32>,
        stdout: String,
        stderr: String,
    },
    /// The git binary could not be started at all.
    Spawn {
        command: String,
        source: std::io::Error,
    },
    NotARepository(PathBuf),
    /// Output was neither valid UTF-8 nor valid in the locale encoding.
    Decode {
        command: String,
        encoding: String,
    },
}

#[derive(Debug, Error)]
pub enum AIError {
    #[error("AI API request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Failed to parse AI API JSON response: {0}")]
    ResponseParseFailed(#[source] reqwest::Error),
    #[error("AI API responded with error {0}: {1}")]
    ApiResponseError(reqwest::StatusCode, String),
    #[error("AI API response contained no choices.")]
    NoChoiceInResponse,
    #[error("AI returned an empty message.")]
    EmptyMessage,
    #[error("Failed to read supporting file '{0}': {1}")]
    SupportingFile(String, #[source] std::io::Error),
}

impl std::fmt::Display for GitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GitError::CommandFailed {
                command,
                status_code,
                stdout,
                stderr,
            } => {
                write!(f, "Git command '{}' failed", command)?;
                if let Some(c) = status_code {
                    write!(f, " with exit code {}", c)?;
                }
                if !stdout.is_empty() {
                    write!(f, "\nStdout:\n{}", stdout)?;
                }
                if !stderr.is_empty() {
                    write!(f, "\nStderr:\n{}", stderr)?;
                }
                Ok(())
            }
            GitError::Spawn { command, source } => {
                write!(f, "Failed to execute git command '{}': {}", command, source)
            }
            GitError::NotARepository(path) => {
                write!(f, "{} is not a git repository", path.display())
            }
            GitError::Decode { command, encoding } if encoding == "UTF-8" => write!(
                f,
                "Output of '{}' is not valid UTF-8 and the locale names no other encoding",
                command
            ),
            GitError::Decode { command, encoding } => write!(
                f,
                "Output of '{}' could not be decoded as UTF-8 or as {}",
                command, encoding
            ),
        }
    }
}

impl std::error::Error for GitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GitError::Spawn { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AppError {
    /// Converts a `std::io::Error` into an `AppError::IO` with a default context message.
    fn from(err: std::io::Error) -> Self {
        AppError::IO("I/O operation failed".to_string(), err)
    }
}

/// Converts process output into a `GitError::CommandFailed`.
///
/// `status_code` is `None` when the process was terminated by a signal.
pub fn map_command_error(cmd_str: &str, output: &std::process::Output) -> GitError {
    GitError::CommandFailed {
        command: cmd_str.to_string(),
        status_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
