//! Release note values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An explicit release note attached to a commit.
///
/// `Option<Note>::None` means the note has not been determined yet, while
/// [`Note::NoNotes`] records that the change explicitly has no user-visible
/// note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Note {
    /// The release note text.
    Text(String),

    /// The change has no user-visible release note.
    NoNotes,
}

impl Note {
    /// Text used when rendering the sentinel.
    pub const NO_NOTES: &'static str = "No notes";

    /// Returns the note text, or `None` for the sentinel.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::NoNotes => None,
        }
    }

    /// Returns true for the "no notes" sentinel.
    #[must_use]
    pub fn is_no_notes(&self) -> bool {
        matches!(self, Self::NoNotes)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::NoNotes => f.write_str(Self::NO_NOTES),
        }
    }
}
