//! Git abstraction layer for relnote.
//!
//! This crate provides the version-control collaborators of the pipeline:
//! - [`VersionControl`]: Merge bases, reachable commits, commit ranges,
//!   submodule pins and file contents at a revision
//! - [`GitRepository`]: The `git2` backed implementation
//! - [`ManifestLookup`]: Reads a pinned variable out of a dependency manifest
//! - [`origin_repo`]: Infers the GitHub identity of a checkout

mod error;
mod manifest;
mod remote;
mod repository;

pub use error::{GitError, GitResult};
pub use manifest::{CommandManifestLookup, ManifestLookup};
pub use remote::{github_repo_from_url, origin_repo};
pub use repository::{GitRepository, LogEntry, VersionControl};
