//! Markdown rendering of release notes.

mod markdown;

pub use markdown::{MarkdownRenderer, describe};
