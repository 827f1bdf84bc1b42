//! Repository identity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CommitError, CommitResult};

/// An `owner/repo` pair identifying a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RepoId {
    /// The repository owner (user or organization).
    pub owner: String,

    /// The repository name.
    pub repo: String,
}

impl RepoId {
    /// Creates a new repository identity.
    #[must_use]
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Returns true if this identity names the given owner and repository.
    #[must_use]
    pub fn is(&self, owner: &str, repo: &str) -> bool {
        self.owner == owner && self.repo == repo
    }

    /// Returns the GitHub web URL of the repository.
    #[must_use]
    pub fn url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.repo)
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl FromStr for RepoId {
    type Err = CommitError;

    fn from_str(s: &str) -> CommitResult<Self> {
        match s.trim().split_once('/') {
            Some((owner, repo))
                if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') =>
            {
                Ok(Self::new(owner, repo))
            }
            _ => Err(CommitError::InvalidRepoId(s.to_string())),
        }
    }
}
