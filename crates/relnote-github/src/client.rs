//! GitHub REST client for pull request metadata.

use relnote_commit::PullRequestRef;
use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{GithubError, GithubResult};

/// Public GitHub API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// The parts of a pull request the notes are built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// The pull request title.
    pub title: String,

    /// The pull request description, `None` when left empty.
    #[serde(default)]
    pub body: Option<String>,
}

impl PullRequest {
    /// Returns the title and body as a commit-style message.
    #[must_use]
    pub fn message(&self) -> String {
        format!("{}\n\n{}", self.title, self.body.as_deref().unwrap_or_default())
    }
}

/// A source of pull request metadata.
#[allow(async_fn_in_trait)]
pub trait PullRequestSource {
    /// Fetches a pull request.
    ///
    /// Returns `Ok(None)` if the pull request does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the metadata cannot be retrieved.
    async fn pull_request(&self, pr: &PullRequestRef) -> GithubResult<Option<PullRequest>>;
}

/// A disabled source never finds anything.
impl<S: PullRequestSource> PullRequestSource for Option<S> {
    async fn pull_request(&self, pr: &PullRequestRef) -> GithubResult<Option<PullRequest>> {
        match self {
            Some(source) => source.pull_request(pr).await,
            None => Ok(None),
        }
    }
}

/// GitHub REST API client.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Creates a client for the given API endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_url: impl Into<String>, token: Option<String>) -> GithubResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(GithubError::ClientBuild)?;

        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|token| !token.is_empty()),
        })
    }

    /// Returns the API URL of a pull request.
    #[must_use]
    pub fn pull_request_url(&self, pr: &PullRequestRef) -> String {
        format!(
            "{}/repos/{}/{}/pulls/{}",
            self.api_url, pr.repo.owner, pr.repo.repo, pr.number
        )
    }
}

impl PullRequestSource for GitHubClient {
    async fn pull_request(&self, pr: &PullRequestRef) -> GithubResult<Option<PullRequest>> {
        let url = self.pull_request_url(pr);
        debug!(%url, "fetching pull request");

        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|source| GithubError::Request {
                url: url.clone(),
                source,
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(%url, "pull request not found");
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(GithubError::Status {
                url,
                status: response.status().as_u16(),
            });
        }

        let pull_request = response
            .json()
            .await
            .map_err(|source| GithubError::Decode { url, source })?;

        Ok(Some(pull_request))
    }
}
