//! Read-through caching of pull request lookups.

use relnote_commit::PullRequestRef;
use tracing::debug;

use crate::{GithubError, GithubResult, PullRequest, PullRequestSource, ResponseCache};

/// Returns the cache key of a pull request (`{owner}-{repo}-pull-{number}`).
#[must_use]
pub fn cache_key(pr: &PullRequestRef) -> String {
    format!("{}-{}-pull-{}", pr.repo.owner, pr.repo.repo, pr.number)
}

/// A pull request source that consults a cache before fetching.
///
/// Successful fetches are written back; missing pull requests are not
/// cached.
#[derive(Debug)]
pub struct CachedPullRequests<S, C> {
    source: S,
    cache: C,
}

impl<S, C> CachedPullRequests<S, C> {
    /// Wraps `source` with `cache`.
    #[must_use]
    pub fn new(source: S, cache: C) -> Self {
        Self { source, cache }
    }

    /// Returns the cache.
    #[must_use]
    pub fn cache(&self) -> &C {
        &self.cache
    }
}

impl<S: PullRequestSource, C: ResponseCache> PullRequestSource for CachedPullRequests<S, C> {
    async fn pull_request(&self, pr: &PullRequestRef) -> GithubResult<Option<PullRequest>> {
        let key = cache_key(pr);

        if let Some(json) = self.cache.read(&key)? {
            debug!(%key, "using cached pull request");
            let cached = serde_json::from_str(&json)
                .map_err(|source| GithubError::CacheParse { key, source })?;
            return Ok(Some(cached));
        }

        let fetched = self.source.pull_request(pr).await?;

        if let Some(pull_request) = &fetched {
            let json = serde_json::to_string(pull_request).map_err(GithubError::Serialize)?;
            self.cache.write(&key, &json)?;
        }

        Ok(fetched)
    }
}
