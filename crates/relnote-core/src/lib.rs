//! Core library for relnote.
//!
//! This crate provides the orchestration logic turning commit ranges of a
//! primary repository and its dependencies into classified release notes.

mod classify;
mod deps;
mod error;
mod pipeline;
mod pool;
mod resolve;
mod walker;

#[cfg(test)]
mod fakes;

pub use classify::{NotesBucket, classify};
pub use deps::{
    DependencyStrategy, ManifestStrategy, SubmoduleStrategy, include_dependencies, select_strategy,
};
pub use error::{CoreError, CoreResult};
pub use pipeline::Pipeline;
pub use pool::CommitPool;
pub use resolve::NoteResolver;
pub use walker::{RepoSource, RepositoryWalker};
