use std::fmt;

/// One entry of the recent-commit listing.
///
/// Produced only by [`crate::git::history::list_recent_commits`]; the
/// timestamp is kept exactly as git printed it (`--date=iso-local`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub timestamp: String,
    pub author: String,
    pub message: String,
    pub identifier: String,
}

/// Change type of a file touched by a commit, from `--name-status` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Modified,
    Added,
    Deleted,
    Renamed,
    Copied,
    /// Unrecognized status; keeps the raw status field as its label.
    Unknown(String),
}

impl FileStatus {
    /// Classifies a raw status field such as `M` or `R100` by its first character.
    pub fn from_code(code: &str) -> Self {
        match code.chars().next() {
            Some('M') => FileStatus::Modified,
            Some('A') => FileStatus::Added,
            Some('D') => FileStatus::Deleted,
            Some('R') => FileStatus::Renamed,
            Some('C') => FileStatus::Copied,
            _ => FileStatus::Unknown(code.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            FileStatus::Modified => "Modified",
            FileStatus::Added => "Added",
            FileStatus::Deleted => "Deleted",
            FileStatus::Renamed => "Renamed",
            FileStatus::Copied => "Copied",
            FileStatus::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    pub status: FileStatus,
    /// Destination path for renames and copies.
    pub path: String,
}

/// Which commits a patch is taken from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DiffRange {
    /// Head against its first parent, merge-aware.
    #[default]
    LastCommit,
    /// An explicit `from..to` range.
    Between { from: String, to: String },
}

impl DiffRange {
    /// Parses `FROM..TO`. Both ends must be non-empty.
    pub fn parse(spec: &str) -> Option<Self> {
        let (from, to) = spec.split_once("..")?;
        let (from, to) = (from.trim(), to.trim());
        if from.is_empty() || to.is_empty() || to.starts_with('.') {
            return None;
        }
        Some(DiffRange::Between {
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}
