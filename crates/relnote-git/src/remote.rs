//! GitHub identity of a checkout.

use std::path::Path;

use git2::{ErrorCode, Repository};
use relnote_commit::RepoId;

use crate::{GitError, GitResult};

/// Returns the GitHub repository the `origin` remote points to.
///
/// Returns `None` when there is no `origin` remote or it is not hosted on
/// GitHub.
///
/// # Errors
///
/// Returns an error if `dir` is not a repository.
pub fn origin_repo(dir: &Path) -> GitResult<Option<RepoId>> {
    let repo = Repository::discover(dir).map_err(|_| GitError::NotARepo(dir.to_path_buf()))?;

    let remote = match repo.find_remote("origin") {
        Ok(remote) => remote,
        Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    Ok(remote.url().and_then(github_repo_from_url))
}

/// Parses the owner and repository out of a GitHub remote URL.
///
/// Accepts `git@github.com:owner/repo.git`, `ssh://git@github.com/owner/repo`
/// and `https://github.com/owner/repo.git` forms.
#[must_use]
pub fn github_repo_from_url(url: &str) -> Option<RepoId> {
    let path = url
        .strip_prefix("git@github.com:")
        .or_else(|| url.split_once("github.com/").map(|(_, path)| path))?;

    let path = path.trim_end_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);

    path.parse().ok()
}
