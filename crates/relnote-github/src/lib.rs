//! GitHub access for relnote.
//!
//! This crate handles:
//! - Fetching pull request titles and bodies from the GitHub REST API
//! - Caching responses on disk between runs
//!
//! The pipeline only sees [`PullRequestSource`], so the client, the cache and
//! an offline mode can be combined freely.

pub mod cache;
pub mod cached;
pub mod client;
pub mod error;

pub use cache::{FileCache, MemoryCache, ResponseCache};
pub use cached::{CachedPullRequests, cache_key};
pub use client::{DEFAULT_API_URL, GitHubClient, PullRequest, PullRequestSource};
pub use error::{GithubError, GithubResult};
