//! Git error types.

use std::path::PathBuf;

use thiserror::Error;

/// Git-related errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not a git repository.
    #[error("not a git repository: {0}")]
    NotARepo(PathBuf),

    /// A revision could not be resolved to a commit.
    #[error("revision not found: {0}")]
    RevisionNotFound(String),

    /// A file does not exist at the given revision.
    #[error("file not found: {rev}:{path}")]
    FileNotFound { rev: String, path: String },

    /// An external command exited unsuccessfully.
    #[error("`{command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    /// `git log` produced a record that could not be parsed.
    #[error("malformed log entry: {0}")]
    MalformedLog(String),

    /// Git2 error.
    #[error("git error: {0}")]
    Git2(#[from] git2::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for git operations.
pub type GitResult<T> = Result<T, GitError>;
