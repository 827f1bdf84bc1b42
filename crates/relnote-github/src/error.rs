//! Error types for GitHub access.

use std::path::PathBuf;

/// Result type for GitHub operations.
pub type GithubResult<T> = Result<T, GithubError>;

/// GitHub error types.
#[derive(Debug, thiserror::Error)]
pub enum GithubError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    /// The request could not be sent.
    #[error("failed to fetch {url}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status.
    #[error("GitHub returned {status} for {url}")]
    Status { url: String, status: u16 },

    /// The response body is not a pull request.
    #[error("invalid pull request payload from {url}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Failed to create the cache directory.
    #[error("failed to create cache directory: {path}")]
    CacheCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a cache entry.
    #[error("failed to read cache entry {path}")]
    CacheRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a cache entry.
    #[error("failed to write cache entry {path}")]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A cache entry is not valid JSON.
    #[error("corrupt cache entry {key}")]
    CacheParse {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to serialize a response for caching.
    #[error("failed to serialize cache entry")]
    Serialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = GithubError::Status {
            url: "https://api.github.com/repos/a/b/pulls/1".to_string(),
            status: 500,
        };
        assert_eq!(
            err.to_string(),
            "GitHub returned 500 for https://api.github.com/repos/a/b/pulls/1"
        );
    }

    #[test]
    fn test_cache_creation_display() {
        let err = GithubError::CacheCreation {
            path: PathBuf::from("/tmp/cache"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "failed to create cache directory: /tmp/cache");
        assert!(std::error::Error::source(&err).is_some());
    }
}
