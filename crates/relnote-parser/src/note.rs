//! Release note extraction.

use std::sync::LazyLock;

use regex::Regex;
use relnote_commit::Note;

/// Prefix of the paragraph carrying the release note.
pub const NOTES_PREFIX: &str = "Notes: ";

pub(crate) static PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n\r?\n").expect("invalid regex"));

static HTML_COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("invalid regex"));

static NEWLINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\r?\n\s*").expect("invalid regex"));

static NO_NOTES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:no[ _-]notes|none)\.?$").expect("invalid regex"));

/// Extracts the release note from a message body.
///
/// The body is split into blank-line separated paragraphs and the first one
/// starting with [`NOTES_PREFIX`] is used. HTML comment placeholders are
/// removed and newlines collapsed. Returns `None` when no such paragraph
/// exists or its text is empty, and [`Note::NoNotes`] for `no-notes`,
/// `no notes`, `none` and their variants.
#[must_use]
pub fn extract_note(body: Option<&str>) -> Option<Note> {
    let body = body?;

    let paragraph = PARAGRAPH_RE
        .split(body)
        .map(str::trim)
        .find(|paragraph| paragraph.starts_with(NOTES_PREFIX))?;

    let text = &paragraph[NOTES_PREFIX.len()..];
    let text = HTML_COMMENT_RE.replace_all(text, "");
    let text = NEWLINE_RE.replace_all(text.trim(), " ");
    let text = text.trim();

    if text.is_empty() {
        return None;
    }

    if NO_NOTES_RE.is_match(text) {
        return Some(Note::NoNotes);
    }

    Some(Note::Text(text.to_string()))
}
