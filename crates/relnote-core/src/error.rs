//! Core error types.

use thiserror::Error;

/// Core-related errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Git error.
    #[error("git error: {0}")]
    Git(#[from] relnote_git::GitError),

    /// GitHub error.
    #[error("GitHub error: {0}")]
    Github(#[from] relnote_github::GithubError),

    /// Malformed commit data.
    #[error("commit error: {0}")]
    Commit(#[from] relnote_commit::CommitError),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
