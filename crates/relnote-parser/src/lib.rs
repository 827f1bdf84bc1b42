//! Commit message parsing for relnote.
//!
//! - [`MessageParser`]: Turns a commit message (or a pull request title and
//!   body) into type, subject, pull request, issue and revert linkage
//! - [`extract_note`]: Finds the `Notes: ` paragraph of a message body

mod note;
mod parser;

pub use note::{NOTES_PREFIX, extract_note};
pub use parser::MessageParser;
