//! Commit record enriched through the pipeline.

use serde::{Deserialize, Serialize};

use crate::{CommitType, Note, PullRequestRef, RepoId};

/// One logical change.
///
/// Records are created by the repository walker, enriched in place by the
/// message parser (possibly several times), and read by the classifier and
/// renderer. `original_subject` and `original_pr` are write-once: they can
/// only be set through [`CommitRecord::record_original_subject`] and
/// [`CommitRecord::set_pull_request`], which never replace an existing value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// The commit hash (SHA).
    pub hash: String,

    /// The parent commit hashes, in order.
    pub parent_hashes: Vec<String>,

    /// The repository the commit was found in.
    pub repo: RepoId,

    /// The commit author email.
    pub email: String,

    /// The release-note type, if one was detected.
    pub commit_type: Option<CommitType>,

    /// The cleaned one-line summary.
    pub subject: String,

    /// The pull request the commit is currently attributed to.
    pub pr: Option<PullRequestRef>,

    /// The issue the commit closes.
    pub issue_number: Option<u64>,

    /// The hash of the commit this one reverts.
    pub revert_hash: Option<String>,

    /// The raw commit body, if non-empty.
    pub body: Option<String>,

    /// The explicit release note, if determined.
    pub note: Option<Note>,

    original_subject: Option<String>,
    original_pr: Option<PullRequestRef>,
}

impl CommitRecord {
    /// Creates a new record builder.
    #[must_use]
    pub fn builder(hash: impl Into<String>, repo: RepoId) -> CommitRecordBuilder {
        CommitRecordBuilder::new(hash, repo)
    }

    /// Returns the subject as first parsed, before any pull request title
    /// replaced it.
    #[must_use]
    pub fn original_subject(&self) -> Option<&str> {
        self.original_subject.as_deref()
    }

    /// Returns the first pull request ever assigned to this record.
    #[must_use]
    pub fn original_pr(&self) -> Option<&PullRequestRef> {
        self.original_pr.as_ref()
    }

    /// Records the original subject unless one is already set.
    pub fn record_original_subject(&mut self, subject: &str) {
        if self.original_subject.is_none() {
            self.original_subject = Some(subject.to_string());
        }
    }

    /// Attributes the record to a pull request.
    ///
    /// The first pull request ever assigned is kept as the original.
    pub fn set_pull_request(&mut self, pr: PullRequestRef) {
        if self.original_pr.is_none() {
            self.original_pr = Some(pr.clone());
        }
        self.pr = Some(pr);
    }

    /// Retracts a pull request that was really an issue number.
    ///
    /// Clears `pr` and `original_pr` when they carry `number`.
    pub fn forget_pull_request(&mut self, number: u64) {
        if self.pr.as_ref().is_some_and(|pr| pr.number == number) {
            self.pr = None;
        }
        if self.original_pr.as_ref().is_some_and(|pr| pr.number == number) {
            self.original_pr = None;
        }
    }

    /// Sets the type unless one is already set.
    pub fn default_type(&mut self, commit_type: CommitType) {
        if self.commit_type.is_none() {
            self.commit_type = Some(commit_type);
        }
    }

    /// Returns true if the record is explicitly marked as having no notes.
    #[must_use]
    pub fn has_no_notes(&self) -> bool {
        self.note.as_ref().is_some_and(Note::is_no_notes)
    }

    /// Returns the note text, falling back to the subject.
    #[must_use]
    pub fn effective_text(&self) -> &str {
        self.note
            .as_ref()
            .and_then(Note::text)
            .unwrap_or(&self.subject)
    }

    /// Returns the short hash (first 8 characters).
    #[must_use]
    pub fn short_hash(&self) -> &str {
        &self.hash[..8.min(self.hash.len())]
    }

    /// Returns the GitHub web URL of the commit.
    #[must_use]
    pub fn url(&self) -> String {
        format!("{}/commit/{}", self.repo.url(), self.hash)
    }
}

/// Builder for [`CommitRecord`].
#[derive(Debug)]
pub struct CommitRecordBuilder {
    record: CommitRecord,
}

impl CommitRecordBuilder {
    /// Creates a new builder with required fields.
    fn new(hash: impl Into<String>, repo: RepoId) -> Self {
        Self {
            record: CommitRecord {
                hash: hash.into(),
                parent_hashes: Vec::new(),
                repo,
                email: String::new(),
                commit_type: None,
                subject: String::new(),
                pr: None,
                issue_number: None,
                revert_hash: None,
                body: None,
                note: None,
                original_subject: None,
                original_pr: None,
            },
        }
    }

    /// Sets the parent hashes.
    #[must_use]
    pub fn parents<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.record.parent_hashes = parents.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the author email.
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.record.email = email.into();
        self
    }

    /// Sets the subject.
    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.record.subject = subject.into();
        self
    }

    /// Sets the type.
    #[must_use]
    pub fn commit_type(mut self, commit_type: CommitType) -> Self {
        self.record.commit_type = Some(commit_type);
        self
    }

    /// Sets the note.
    #[must_use]
    pub fn note(mut self, note: Note) -> Self {
        self.record.note = Some(note);
        self
    }

    /// Sets the reverted hash.
    #[must_use]
    pub fn revert_hash(mut self, hash: impl Into<String>) -> Self {
        self.record.revert_hash = Some(hash.into());
        self
    }

    /// Attributes the record to a pull request.
    #[must_use]
    pub fn pull_request(mut self, pr: PullRequestRef) -> Self {
        self.record.set_pull_request(pr);
        self
    }

    /// Builds the [`CommitRecord`].
    #[must_use]
    pub fn build(self) -> CommitRecord {
        self.record
    }
}
