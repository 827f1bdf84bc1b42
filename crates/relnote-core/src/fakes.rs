//! In-memory collaborators for unit tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use relnote_commit::PullRequestRef;
use relnote_git::{GitError, GitResult, LogEntry, ManifestLookup, VersionControl};
use relnote_github::{GithubResult, PullRequest, PullRequestSource, cache_key};

#[derive(Debug, Default)]
pub(crate) struct FakeRepo {
    pub reachable: HashMap<String, Vec<String>>,
    pub ranges: HashMap<(String, String), Vec<LogEntry>>,
    pub submodules: HashMap<(String, String), String>,
    pub files: HashMap<(String, String), String>,
}

/// Repositories keyed by checkout directory. The merge base of two revisions
/// is always the first one.
#[derive(Debug, Default)]
pub(crate) struct FakeVcs {
    pub repos: HashMap<PathBuf, FakeRepo>,
}

impl FakeVcs {
    pub fn repo(&mut self, dir: &str) -> &mut FakeRepo {
        self.repos.entry(PathBuf::from(dir)).or_default()
    }

    fn get(&self, dir: &Path) -> GitResult<&FakeRepo> {
        self.repos
            .get(dir)
            .ok_or_else(|| GitError::NotARepo(dir.to_path_buf()))
    }
}

impl VersionControl for FakeVcs {
    fn merge_base(&self, dir: &Path, a: &str, _b: &str) -> GitResult<String> {
        self.get(dir)?;
        Ok(a.to_string())
    }

    fn commit_hashes(&self, dir: &Path, rev: &str) -> GitResult<Vec<String>> {
        Ok(self.get(dir)?.reachable.get(rev).cloned().unwrap_or_default())
    }

    fn range_commits(&self, dir: &Path, from: &str, to: &str) -> GitResult<Vec<LogEntry>> {
        self.get(dir)?
            .ranges
            .get(&(from.to_string(), to.to_string()))
            .cloned()
            .ok_or_else(|| GitError::RevisionNotFound(format!("{from}..{to}")))
    }

    fn submodule_ref(&self, dir: &Path, rev: &str, path: &str) -> GitResult<Option<String>> {
        Ok(self
            .get(dir)?
            .submodules
            .get(&(rev.to_string(), path.to_string()))
            .cloned())
    }

    fn show_file(&self, dir: &Path, rev: &str, path: &str) -> GitResult<String> {
        self.get(dir)?
            .files
            .get(&(rev.to_string(), path.to_string()))
            .cloned()
            .ok_or_else(|| GitError::FileNotFound {
                rev: rev.to_string(),
                path: path.to_string(),
            })
    }
}

pub(crate) fn entry(hash: &str, message: &str) -> LogEntry {
    LogEntry {
        hash: hash.to_string(),
        parents: Vec::new(),
        email: "dev@example.com".to_string(),
        message: message.to_string(),
    }
}

/// Reads `key=value` lines.
pub(crate) struct FakeLookup;

impl ManifestLookup for FakeLookup {
    fn variable(&self, manifest: &str, key: &str) -> GitResult<String> {
        manifest
            .lines()
            .find_map(|line| line.strip_prefix(key)?.strip_prefix('='))
            .map(str::to_string)
            .ok_or_else(|| GitError::CommandFailed {
                command: format!("lookup {key}"),
                stderr: "missing".to_string(),
            })
    }
}

/// Pull requests keyed by cache key; records every lookup.
#[derive(Debug, Default)]
pub(crate) struct FakeSource {
    pub pulls: HashMap<String, PullRequest>,
    pub requests: RefCell<Vec<String>>,
}

impl FakeSource {
    pub fn with(mut self, key: &str, title: &str, body: &str) -> Self {
        self.pulls.insert(
            key.to_string(),
            PullRequest {
                title: title.to_string(),
                body: Some(body.to_string()),
            },
        );
        self
    }
}

impl PullRequestSource for FakeSource {
    async fn pull_request(&self, pr: &PullRequestRef) -> GithubResult<Option<PullRequest>> {
        let key = cache_key(pr);
        self.requests.borrow_mut().push(key.clone());
        Ok(self.pulls.get(&key).cloned())
    }
}
