use crate::errors::{map_command_error, GitError};
use encoding_rs::{Encoding, UTF_8};
use std::path::Path;
use std::process::{Command, Output};

/// Locale variables consulted for the fallback encoding, highest priority first.
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_CTYPE", "LANG"];

/// Executes git commands against a working directory.
///
/// Everything the review pipeline learns about a repository goes through
/// this trait, so tests can substitute a scripted backend.
pub trait GitBackend {
    /// Runs `git <args>` in `repo` and returns its standard output.
    ///
    /// A non-zero exit is returned as [`GitError::CommandFailed`].
    fn output(&self, args: &[&str], repo: &Path) -> Result<String, GitError>;

    /// Runs `git <args>` in `repo` and reports whether it exited with status 0.
    /// Never fails: a command that cannot be started counts as unsuccessful.
    fn succeeds(&self, args: &[&str], repo: &Path) -> bool;

    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Runs the system `git` binary.
#[derive(Debug, Clone)]
pub struct SystemGit {
    locale_encoding: Option<&'static Encoding>,
}

impl SystemGit {
    /// Uses the encoding named by the process locale as decode fallback.
    pub fn new() -> Self {
        Self {
            locale_encoding: locale_encoding(),
        }
    }

    pub fn with_locale_encoding(encoding: Option<&'static Encoding>) -> Self {
        Self {
            locale_encoding: encoding,
        }
    }

    fn spawn(&self, args: &[&str], repo: &Path) -> Result<Output, GitError> {
        Command::new("git")
            .env("GIT_PAGER", "cat")
            .current_dir(repo)
            .args(args)
            .output()
            .map_err(|source| GitError::Spawn {
                command: command_line(args),
                source,
            })
    }

    /// Reruns the command once and decodes it with the locale encoding.
    fn output_with_locale(&self, args: &[&str], repo: &Path) -> Result<String, GitError> {
        let command = command_line(args);
        let encoding = match self.locale_encoding {
            Some(encoding) if encoding != UTF_8 => encoding,
            _ => {
                return Err(GitError::Decode {
                    command,
                    encoding: UTF_8.name().to_string(),
                })
            }
        };

        tracing::warn!(
            "Output of '{}' is not valid UTF-8, retrying with {}",
            command,
            encoding.name()
        );
        let output = self.spawn(args, repo)?;
        if !output.status.success() {
            return Err(map_command_error(&command, &output));
        }

        decode_with(encoding, &output.stdout).ok_or_else(|| GitError::Decode {
            command,
            encoding: encoding.name().to_string(),
        })
    }
}

impl Default for SystemGit {
    fn default() -> Self {
        Self::new()
    }
}

impl GitBackend for SystemGit {
    fn output(&self, args: &[&str], repo: &Path) -> Result<String, GitError> {
        let command = command_line(args);
        tracing::debug!("Running '{}' in {}", command, repo.display());

        let output = self.spawn(args, repo)?;
        // Callers decide whether a failure is an error; some expect it.
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::debug!("'{}' failed: {}", command, stderr.trim_end());
            return Err(map_command_error(&command, &output));
        }

        match String::from_utf8(output.stdout) {
            Ok(stdout) => Ok(stdout),
            Err(_) => self.output_with_locale(args, repo),
        }
    }

    fn succeeds(&self, args: &[&str], repo: &Path) -> bool {
        match self.spawn(args, repo) {
            Ok(output) => output.status.success(),
            Err(e) => {
                tracing::debug!("{}", e);
                false
            }
        }
    }
}

pub(crate) fn command_line(args: &[&str]) -> String {
    format!("git {}", args.join(" "))
}

/// Encoding named by the first non-empty locale variable, if it has a codeset.
pub fn locale_encoding() -> Option<&'static Encoding> {
    LOCALE_VARS
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .find(|value| !value.is_empty())
        .and_then(|value| encoding_from_locale(&value))
}

/// Extracts the codeset of a POSIX locale name, e.g. `ru_RU.CP1251@euro`.
pub fn encoding_from_locale(locale: &str) -> Option<&'static Encoding> {
    let (_, codeset) = locale.split_once('.')?;
    let codeset = codeset.split('@').next()?;
    Encoding::for_label(codeset.as_bytes())
}

/// Strict decode: `None` on any malformed sequence.
fn decode_with(encoding: &'static Encoding, bytes: &[u8]) -> Option<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
}
