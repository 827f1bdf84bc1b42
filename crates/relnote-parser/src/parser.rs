//! Heuristic commit message parser.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use relnote_commit::{CommitRecord, CommitResult, CommitType, PullRequestRef, RepoId};
use tracing::debug;

use crate::note::{PARAGRAPH_RE, extract_note};

static PR_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*)\s\(#(\d+)\)$").expect("invalid regex"));

static TYPE_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+):\s(.*)$").expect("invalid regex"));

static MERGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Merge pull request #(\d+) from (.*)$").expect("invalid regex")
});

static BACKPORT_OF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bBackport of #(\d+)\b").expect("invalid regex"));

static CLOSES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:close|closes|closed|fix|fixes|fixed|resolve|resolves|resolved|for)\s#(\d+)\b",
    )
    .expect("invalid regex")
});

static FIXES_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Fixes \[#(\d+)\]\(https://github\.com/[\w.-]+/[\w.-]+/issues/\d+\)")
        .expect("invalid regex")
});

static REVERT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"This reverts commit ([a-f0-9]{40})\.").expect("invalid regex")
});

static BACKPORT_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)backport").expect("invalid regex"));

static BACKPORT_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([\w.-]+)/([\w.-]+)#(\d+)\b").expect("invalid regex"));

static PULL_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https://github\.com/([\w.-]+)/([\w.-]+)/pull/(\d+)").expect("invalid regex")
});

static CHORE_SCOPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bchore\((\w+)\):").expect("invalid regex"));

static FIX_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bfix").expect("invalid regex"));

static DOCS_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[(?:docs|doc)\]").expect("invalid regex"));

const BREAKING_PREFIX: &str = "BREAKING CHANGE";

/// Parses commit messages into [`CommitRecord`] fields.
///
/// The rules are applied in a fixed order and are cumulative: later rules may
/// overwrite the type or the pull request set by earlier ones. Parsing the
/// same message twice leaves the record unchanged.
#[derive(Debug, Clone, Default)]
pub struct MessageParser {
    tracked: Vec<RepoId>,
}

impl MessageParser {
    /// Creates a parser following backports into the given repositories.
    #[must_use]
    pub fn new(tracked: Vec<RepoId>) -> Self {
        Self { tracked }
    }

    /// Returns true if backport references into this repository are followed.
    #[must_use]
    pub fn is_tracked(&self, owner: &str, repo: &str) -> bool {
        self.tracked.iter().any(|id| id.is(owner, repo))
    }

    /// Parses `message` into a copy of `record`.
    ///
    /// # Errors
    ///
    /// Returns an error if the message references a malformed pull request.
    pub fn parse(
        &self,
        message: &str,
        repo: &RepoId,
        record: &CommitRecord,
    ) -> CommitResult<CommitRecord> {
        let mut record = record.clone();
        self.apply(message, repo, &mut record)?;
        Ok(record)
    }

    /// Enriches `record` in place from `message`.
    ///
    /// `repo` is the repository the message belongs to; bare `#N` references
    /// resolve against it.
    ///
    /// # Errors
    ///
    /// Returns an error if the message references a malformed pull request.
    pub fn apply(&self, message: &str, repo: &RepoId, record: &mut CommitRecord) -> CommitResult<()> {
        let (first_line, rest) = message.split_once('\n').unwrap_or((message, ""));
        let mut subject = first_line.trim().to_string();
        let body = rest.trim();

        record.record_original_subject(&subject);

        if !body.is_empty() {
            record.body = Some(body.to_string());
            if let Some(note) = extract_note(Some(body)) {
                debug!(hash = %record.hash, "found release note in message");
                record.note = Some(note);
            }
        }

        if let Some(caps) = PR_SUFFIX_RE.captures(&subject) {
            let number = number(&caps, 2);
            let stripped = caps[1].to_string();
            record.set_pull_request(PullRequestRef::new(repo, number)?);
            subject = stripped;
        }

        if let Some(caps) = TYPE_PREFIX_RE.captures(&subject) {
            let commit_type = CommitType::from_tag(&caps[1]);
            let stripped = caps[2].to_string();
            record.commit_type = Some(commit_type);
            subject = stripped;
        }

        if let Some(caps) = MERGE_RE.captures(&subject) {
            let pr = PullRequestRef::new(repo, number(&caps, 1))?.with_branch(caps[2].trim());
            record.set_pull_request(pr);
        }

        if let Some(caps) = BACKPORT_OF_RE.captures(message) {
            record.set_pull_request(PullRequestRef::new(repo, number(&caps, 1))?);
        }

        if let Some(caps) = CLOSES_RE.captures(&subject) {
            record.issue_number = Some(number(&caps, 1));
            record.default_type(CommitType::Fix);
        }

        if record.issue_number.is_none()
            && let Some(caps) = FIXES_LINK_RE.captures(message)
        {
            let issue = number(&caps, 1);
            record.issue_number = Some(issue);
            record.forget_pull_request(issue);
            record.default_type(CommitType::Fix);
        }

        if PARAGRAPH_RE
            .split(message)
            .any(|paragraph| paragraph.trim().starts_with(BREAKING_PREFIX))
        {
            record.commit_type = Some(CommitType::BreakingChange);
        }

        if let Some(caps) = REVERT_RE.captures(body) {
            record.revert_hash = Some(caps[1].to_string());
        }

        self.apply_backport(message, record)?;

        if record.commit_type.as_ref().is_none_or(CommitType::is_chore) {
            if let Some(caps) = CHORE_SCOPE_RE.captures(message) {
                let scope = CommitType::from_tag(&caps[1]);
                record.commit_type = Some(if scope.is_known() {
                    scope
                } else {
                    CommitType::from_tag("chore")
                });
            } else if FIX_WORD_RE.is_match(message) {
                record.commit_type = Some(CommitType::Fix);
            } else if DOCS_TAG_RE.is_match(message) {
                record.commit_type = Some(CommitType::from_tag("doc"));
            }
        }

        record.subject = subject.trim().to_string();
        Ok(())
    }

    fn apply_backport(&self, message: &str, record: &mut CommitRecord) -> CommitResult<()> {
        if BACKPORT_WORD_RE.is_match(message)
            && let Some(caps) = BACKPORT_REF_RE.captures(message)
        {
            self.follow_backport(&caps, record)?;
        }

        if message.contains("ackport")
            && let Some(caps) = PULL_URL_RE.captures(message)
        {
            self.follow_backport(&caps, record)?;
        }

        Ok(())
    }

    fn follow_backport(&self, caps: &Captures<'_>, record: &mut CommitRecord) -> CommitResult<()> {
        let (owner, repo) = (&caps[1], &caps[2]);
        if !self.is_tracked(owner, repo) {
            debug!(%owner, %repo, "ignoring backport into untracked repository");
            return Ok(());
        }

        let pr = PullRequestRef::new(&RepoId::new(owner, repo), number(caps, 3))?;
        record.set_pull_request(pr);
        Ok(())
    }
}

/// Reads a numeric capture; out-of-range values become zero and are rejected
/// as malformed pull requests.
fn number(caps: &Captures<'_>, group: usize) -> u64 {
    caps[group].parse().unwrap_or(0)
}
