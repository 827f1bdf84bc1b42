//! Follows pull requests until an authoritative release note is found.

use relnote_commit::{CommitRecord, PullRequestRef};
use relnote_github::PullRequestSource;
use relnote_parser::{MessageParser, extract_note};
use tracing::debug;

use crate::CoreResult;

/// Resolves missing notes through pull request metadata.
pub struct NoteResolver<'a, S> {
    source: &'a S,
    parser: &'a MessageParser,
}

impl<'a, S: PullRequestSource> NoteResolver<'a, S> {
    /// Creates a resolver.
    #[must_use]
    pub fn new(source: &'a S, parser: &'a MessageParser) -> Self {
        Self { source, parser }
    }

    /// Looks up the note of a single record.
    ///
    /// While the record has a pull request and no note, the pull request is
    /// fetched. A `Notes:` paragraph in its body ends the search; otherwise
    /// its title and body are parsed into the record, and the search goes on
    /// only if that pointed the record at a pull request not visited yet.
    ///
    /// # Errors
    ///
    /// Returns an error if a lookup fails or a pull request body references a
    /// malformed pull request.
    pub async fn resolve(&self, record: &mut CommitRecord) -> CoreResult<()> {
        let mut visited: Vec<PullRequestRef> = Vec::new();

        while record.note.is_none() {
            let Some(pr) = record.pr.clone() else {
                break;
            };
            visited.push(pr.clone());

            let Some(pull_request) = self.source.pull_request(&pr).await? else {
                debug!(%pr, "pull request not found");
                break;
            };

            if let Some(note) = extract_note(pull_request.body.as_deref()) {
                debug!(%pr, hash = %record.short_hash(), "note found in pull request");
                record.note = Some(note);
                break;
            }

            self.parser.apply(&pull_request.message(), &pr.repo, record)?;

            let revisits = |next: &PullRequestRef| visited.iter().any(|seen| seen.same_as(next));
            if record.pr.as_ref().is_none_or(revisits) {
                break;
            }
            debug!(from = %pr, "following pull request reference");
        }

        Ok(())
    }

    /// Resolves every record lacking a note, one at a time.
    ///
    /// # Errors
    ///
    /// Returns the first lookup error.
    pub async fn resolve_all(&self, records: &mut [CommitRecord]) -> CoreResult<()> {
        for record in records.iter_mut().filter(|record| record.note.is_none()) {
            self.resolve(record).await?;
        }
        Ok(())
    }
}
