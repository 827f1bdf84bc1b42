//! Commit pool shared by every repository of a run.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use relnote_commit::{CommitRecord, Note};
use tracing::debug;

static VERSION_BUMP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[Bb]ump v\d+\.\d+\.\d+").expect("invalid regex"));

/// Commits collected from the primary repository and its dependencies.
///
/// `processed` holds every hash that was already released (or cancelled);
/// records with such a hash are dropped by [`CommitPool::drop_processed`].
#[derive(Debug, Default)]
pub struct CommitPool {
    /// The collected records.
    pub commits: Vec<CommitRecord>,

    /// Hashes that must not appear in the notes.
    pub processed: HashSet<String>,
}

impl CommitPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks hashes as processed.
    pub fn mark_processed<I>(&mut self, hashes: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.processed.extend(hashes);
    }

    /// Appends records.
    pub fn extend<I>(&mut self, commits: I)
    where
        I: IntoIterator<Item = CommitRecord>,
    {
        self.commits.extend(commits);
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commits.len()
    }

    /// Returns true if the pool holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Drops records whose hash was already processed.
    ///
    /// Returns the number of dropped records.
    pub fn drop_processed(&mut self) -> usize {
        let before = self.commits.len();
        let processed = &self.processed;
        self.commits.retain(|commit| !processed.contains(&commit.hash));
        before - self.commits.len()
    }

    /// Cancels commits against the commits they revert.
    ///
    /// Both sides of every pair found in the pool get [`Note::NoNotes`] and
    /// their hashes are marked processed. The records stay in the pool.
    /// Returns the number of cancelled pairs.
    pub fn cancel_reverts(&mut self) -> usize {
        let index: HashMap<String, usize> = self
            .commits
            .iter()
            .enumerate()
            .map(|(i, commit)| (commit.hash.clone(), i))
            .collect();

        let pairs: Vec<(usize, usize)> = self
            .commits
            .iter()
            .enumerate()
            .filter_map(|(i, commit)| {
                let reverted = index.get(commit.revert_hash.as_deref()?)?;
                (*reverted != i).then_some((i, *reverted))
            })
            .collect();

        for &(revert, reverted) in &pairs {
            for i in [revert, reverted] {
                let commit = &mut self.commits[i];
                debug!(hash = %commit.short_hash(), "cancelled by revert");
                commit.note = Some(Note::NoNotes);
                self.processed.insert(commit.hash.clone());
            }
        }

        pairs.len()
    }

    /// Returns the records that belong in the notes.
    ///
    /// Drops records marked as having no notes and version bumps.
    #[must_use]
    pub fn finalize(self) -> Vec<CommitRecord> {
        self.commits
            .into_iter()
            .filter(|commit| !commit.has_no_notes())
            .filter(|commit| !VERSION_BUMP_RE.is_match(commit.effective_text()))
            .collect()
    }
}
