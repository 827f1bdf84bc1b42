//! Commit types for relnote.
//!
//! This crate provides the data model shared by every stage of the pipeline:
//! - [`CommitRecord`]: One logical change, enriched in place by the parser
//! - [`PullRequestRef`]: A pull request a record is attributed to
//! - [`CommitType`] and [`Category`]: Release-note classification
//! - [`Note`]: An explicit release note or the "no notes" sentinel

mod error;
mod kind;
mod note;
mod pull_request;
mod record;
mod repo;

pub use error::{CommitError, CommitResult};
pub use kind::{Category, CommitType};
pub use note::Note;
pub use pull_request::PullRequestRef;
pub use record::{CommitRecord, CommitRecordBuilder};
pub use repo::RepoId;
