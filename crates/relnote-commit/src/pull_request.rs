//! Pull request references.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{CommitError, CommitResult, RepoId};

/// A pull request a commit is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestRef {
    /// The repository the pull request belongs to.
    pub repo: RepoId,

    /// The pull request number.
    pub number: u64,

    /// The head branch, when known from a merge commit.
    pub branch: Option<String>,
}

impl PullRequestRef {
    /// Creates a pull request reference.
    ///
    /// # Errors
    ///
    /// Returns [`CommitError::MalformedPullRequest`] if the owner or repository
    /// is empty or the number is zero.
    pub fn new(repo: &RepoId, number: u64) -> CommitResult<Self> {
        if repo.owner.is_empty() || repo.repo.is_empty() || number == 0 {
            return Err(CommitError::MalformedPullRequest {
                owner: repo.owner.clone(),
                repo: repo.repo.clone(),
                number,
            });
        }

        Ok(Self {
            repo: repo.clone(),
            number,
            branch: None,
        })
    }

    /// Sets the head branch.
    #[must_use]
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Returns true if both references name the same pull request.
    ///
    /// The branch is ignored.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        self.repo == other.repo && self.number == other.number
    }

    /// Returns the GitHub web URL of the pull request.
    #[must_use]
    pub fn url(&self) -> String {
        format!("{}/pull/{}", self.repo.url(), self.number)
    }
}

impl fmt::Display for PullRequestRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.repo, self.number)
    }
}
