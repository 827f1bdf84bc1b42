//! Commit model error types.

use thiserror::Error;

/// Errors raised while building commit records.
#[derive(Debug, Error)]
pub enum CommitError {
    /// A pull request reference is missing its owner, repository or number.
    #[error("malformed pull request reference: {owner}/{repo}#{number}")]
    MalformedPullRequest {
        owner: String,
        repo: String,
        number: u64,
    },

    /// A repository identity is not in `owner/repo` form.
    #[error("invalid repository identity: {0}")]
    InvalidRepoId(String),
}

/// Result type for commit model operations.
pub type CommitResult<T> = Result<T, CommitError>;
