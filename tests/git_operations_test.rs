//! Git plumbing against throwaway repositories built with the real `git` binary.

use encoding_rs::Encoding;
use gitreview::errors::GitError;
use gitreview::git::{
    self, changed_files_summary, commit_patch, format_file_status, is_merge_commit,
    is_repository, list_changed_files, list_recent_commits, SystemGit,
};
use gitreview::types::git::DiffRange;
use std::fs;
use std::io;
use std::path::Path;
use std::process::Command;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tracing::Level;

// Helper to run a git command and return its stdout.
fn run_git(args: &[&str], cwd: &Path) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .unwrap_or_else(|e| panic!("Failed to execute git {:?}: {}", args, e));

    if !output.status.success() {
        panic!(
            "git {:?} failed with exit code {:?}:\nSTDOUT: {}\nSTDERR: {}",
            args,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    }

    String::from_utf8(output.stdout).unwrap()
}

fn init_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let repo = temp_dir.path();
    run_git(&["init", "-q"], repo);
    run_git(&["config", "user.name", "Test User"], repo);
    run_git(&["config", "user.email", "test@example.com"], repo);
    run_git(&["config", "commit.gpgsign", "false"], repo);
    temp_dir
}

fn commit_file(repo: &Path, name: &str, content: &str, message: &str) {
    fs::write(repo.join(name), content).unwrap();
    run_git(&["add", name], repo);
    run_git(&["commit", "-q", "-m", message], repo);
}

#[test]
fn test_repository_detection() {
    let git = SystemGit::new();
    let repo = init_repo();
    let plain = TempDir::new().unwrap();

    assert!(is_repository(&git, repo.path()));
    assert!(!is_repository(&git, plain.path()));
}

#[test]
fn test_operations_on_plain_directory_fail() {
    let git = SystemGit::new();
    let plain = TempDir::new().unwrap();

    assert!(matches!(
        list_changed_files(&git, plain.path()),
        Err(GitError::NotARepository(_))
    ));
    assert!(matches!(
        list_recent_commits(&git, plain.path(), 5),
        Err(GitError::NotARepository(_))
    ));
}

#[test]
fn test_history_order_count_and_pipes() {
    let git = SystemGit::new();
    let repo = init_repo();
    commit_file(repo.path(), "a.txt", "1", "First");
    commit_file(repo.path(), "a.txt", "2", "Second");
    commit_file(repo.path(), "a.txt", "3", "Fix a|b parsing");

    let commits = list_recent_commits(&git, repo.path(), 2).unwrap();
    assert_eq!(commits.len(), 2);
    assert_eq!(commits[0].message, "Fix a|b parsing");
    assert_eq!(commits[1].message, "Second");
    assert_eq!(commits[0].author, "Test User");
    assert!(!commits[0].identifier.is_empty());
    assert!(!commits[0].identifier.contains('|'));

    let all = list_recent_commits(&git, repo.path(), 10).unwrap();
    assert_eq!(all.len(), 3);
    assert!(list_recent_commits(&git, repo.path(), 0).unwrap().is_empty());
}

#[test]
fn test_history_of_repository_without_commits() {
    let git = SystemGit::new();
    let repo = init_repo();
    assert!(list_recent_commits(&git, repo.path(), 10).unwrap().is_empty());
}

#[test]
fn test_changed_files_of_regular_commit() {
    let git = SystemGit::new();
    let repo = init_repo();
    commit_file(repo.path(), "app.py", "x = 1\n", "Initial");
    fs::write(repo.path().join("app.py"), "x = 2\n").unwrap();
    fs::write(repo.path().join("util.py"), "y = 1\n").unwrap();
    run_git(&["add", "."], repo.path());
    run_git(&["commit", "-q", "-m", "Update"], repo.path());

    assert!(!is_merge_commit(&git, repo.path()));
    assert_eq!(
        list_changed_files(&git, repo.path()).unwrap(),
        vec!["app.py", "util.py"]
    );

    let summary = changed_files_summary(&git, repo.path()).unwrap();
    let formatted = format_file_status(&summary);
    assert!(formatted.contains("Modified: app.py"));
    assert!(formatted.contains("Added: util.py"));

    let patch = commit_patch(&git, repo.path()).unwrap();
    assert!(patch.contains("x = 2"));
    assert!(patch.contains("app.py"));
}

#[test]
fn test_rename_lists_destination() {
    let git = SystemGit::new();
    let repo = init_repo();
    commit_file(repo.path(), "old.py", "print('same')\n", "Initial");
    run_git(&["mv", "old.py", "new.py"], repo.path());
    run_git(&["commit", "-q", "-m", "Rename"], repo.path());

    assert_eq!(list_changed_files(&git, repo.path()).unwrap(), vec!["new.py"]);
}

#[test]
fn test_merge_commit_compares_with_first_parent() {
    let git = SystemGit::new();
    let repo = init_repo();
    let path = repo.path();
    commit_file(path, "base.txt", "base\n", "Initial");

    run_git(&["checkout", "-q", "-b", "feature"], path);
    commit_file(path, "feature.txt", "feature\n", "Add feature");
    run_git(&["checkout", "-q", "-"], path);
    commit_file(path, "main.txt", "main\n", "Main work");
    run_git(&["merge", "-q", "--no-ff", "-m", "Merge feature", "feature"], path);

    assert!(is_merge_commit(&git, path));
    assert_eq!(list_changed_files(&git, path).unwrap(), vec!["feature.txt"]);

    let patch = commit_patch(&git, path).unwrap();
    assert!(patch.contains("feature"));
    assert!(!patch.contains("main.txt"));
}

#[test]
fn test_empty_commit_has_no_patch_or_files() {
    let git = SystemGit::new();
    let repo = init_repo();
    commit_file(repo.path(), "a.txt", "a\n", "Initial");
    run_git(&["commit", "-q", "--allow-empty", "-m", "Nothing"], repo.path());

    assert!(commit_patch(&git, repo.path()).unwrap().trim().is_empty());
    assert!(list_changed_files(&git, repo.path()).unwrap().is_empty());
}

#[test]
fn test_range_patch() {
    let git = SystemGit::new();
    let repo = init_repo();
    commit_file(repo.path(), "a.txt", "one\n", "First");
    run_git(&["tag", "v1"], repo.path());
    commit_file(repo.path(), "a.txt", "two\n", "Second");
    commit_file(repo.path(), "b.txt", "three\n", "Third");

    let range = DiffRange::parse("v1..HEAD").unwrap();
    let patch = git::range_patch(&git, repo.path(), &range).unwrap();
    assert!(patch.contains("two"));
    assert!(patch.contains("three"));
}

/// "Привет" encoded as windows-1251.
const CP1251_GREETING: [u8; 6] = [0xCF, 0xF0, 0xE8, 0xE2, 0xE5, 0xF2];

fn repo_with_cp1251_change() -> TempDir {
    let repo = init_repo();
    commit_file(repo.path(), "greeting.txt", "hello\n", "Initial");

    let mut content = CP1251_GREETING.to_vec();
    content.push(b'\n');
    fs::write(repo.path().join("greeting.txt"), content).unwrap();
    run_git(&["commit", "-q", "-am", "Translate greeting"], repo.path());
    repo
}

#[test]
fn test_non_utf8_patch_is_decoded_with_locale_encoding() {
    let repo = repo_with_cp1251_change();
    let git = SystemGit::with_locale_encoding(Encoding::for_label(b"cp1251"));

    let patch = commit_patch(&git, repo.path()).unwrap();
    assert!(patch.contains("Привет"));
    assert!(patch.contains("hello"));
}

#[test]
fn test_non_utf8_patch_without_locale_encoding_is_a_decode_error() {
    let repo = repo_with_cp1251_change();

    for encoding in [None, Some(encoding_rs::UTF_8)] {
        let git = SystemGit::with_locale_encoding(encoding);
        match commit_patch(&git, repo.path()) {
            Err(GitError::Decode { command, encoding }) => {
                assert!(command.starts_with("git diff HEAD^..HEAD"));
                assert_eq!(encoding, "UTF-8");
            }
            other => panic!("expected a decode error, got {:?}", other),
        }
    }
}

/// Collects formatted log output in memory.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_history_of_empty_repository_logs_no_warnings() {
    let git = SystemGit::new();
    let repo = init_repo();
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let commits = tracing::subscriber::with_default(subscriber, || {
        list_recent_commits(&git, repo.path(), 10)
    })
    .unwrap();

    assert!(commits.is_empty());
    let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert!(output.is_empty(), "unexpected log output: {}", output);
}
