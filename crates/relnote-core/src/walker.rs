//! Merges the commits of a repository range into the pool.

use std::path::PathBuf;

use relnote_commit::{CommitRecord, RepoId};
use relnote_git::VersionControl;
use relnote_parser::MessageParser;
use tracing::{debug, info};

use crate::{CommitPool, CoreResult};

/// A repository checkout and its GitHub identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSource {
    /// The GitHub identity.
    pub id: RepoId,

    /// The local checkout.
    pub dir: PathBuf,
}

impl RepoSource {
    /// Creates a repository source.
    #[must_use]
    pub fn new(id: RepoId, dir: impl Into<PathBuf>) -> Self {
        Self {
            id,
            dir: dir.into(),
        }
    }
}

/// Walks commit ranges and feeds them through the message parser.
pub struct RepositoryWalker<'a> {
    vcs: &'a dyn VersionControl,
    parser: &'a MessageParser,
}

impl<'a> RepositoryWalker<'a> {
    /// Creates a walker.
    #[must_use]
    pub fn new(vcs: &'a dyn VersionControl, parser: &'a MessageParser) -> Self {
        Self { vcs, parser }
    }

    /// Returns the version-control backend.
    #[must_use]
    pub fn vcs(&self) -> &'a dyn VersionControl {
        self.vcs
    }

    /// Adds the commits of `from..to` in `source` to the pool.
    ///
    /// Everything reachable from `from` is marked processed first, so commits
    /// that were already released are dropped later even when they reappear
    /// through another repository. Returns the number of commits added.
    ///
    /// # Errors
    ///
    /// Returns an error if git fails or a message references a malformed pull
    /// request.
    pub fn merge_repository(
        &self,
        pool: &mut CommitPool,
        source: &RepoSource,
        from: &str,
        to: &str,
    ) -> CoreResult<usize> {
        let dir = source.dir.as_path();

        let ancestor = self.vcs.merge_base(dir, from, to)?;
        pool.mark_processed(self.vcs.commit_hashes(dir, from)?);

        let entries = self.vcs.range_commits(dir, &ancestor, to)?;
        let mut commits = Vec::with_capacity(entries.len());

        for entry in entries {
            let mut record = CommitRecord::builder(entry.hash, source.id.clone())
                .parents(entry.parents)
                .email(entry.email)
                .build();
            self.parser.apply(&entry.message, &source.id, &mut record)?;
            debug!(hash = %record.short_hash(), subject = %record.subject, "parsed commit");
            commits.push(record);
        }

        info!(repo = %source.id, %from, %to, count = commits.len(), "merged repository");

        let count = commits.len();
        pool.extend(commits);
        Ok(count)
    }
}
