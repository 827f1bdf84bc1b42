//! Release note pipeline.

use relnote_git::VersionControl;
use relnote_github::PullRequestSource;
use relnote_parser::MessageParser;
use tracing::info;

use crate::{
    CommitPool, CoreResult, DependencyStrategy, NoteResolver, NotesBucket, RepoSource,
    RepositoryWalker, classify, include_dependencies,
};

/// Orchestrates a release note run.
///
/// Dependencies are merged before the primary repository, so that a commit
/// released through the primary repository's history is dropped from the
/// dependency commits as well.
pub struct Pipeline<'a, S> {
    vcs: &'a dyn VersionControl,
    parser: MessageParser,
    source: S,
    primary: RepoSource,
    dependencies: Option<Box<dyn DependencyStrategy>>,
}

impl<'a, S: PullRequestSource> Pipeline<'a, S> {
    /// Creates a pipeline for the primary repository.
    #[must_use]
    pub fn new(
        vcs: &'a dyn VersionControl,
        parser: MessageParser,
        source: S,
        primary: RepoSource,
    ) -> Self {
        Self {
            vcs,
            parser,
            source,
            primary,
            dependencies: None,
        }
    }

    /// Folds dependency changes in through the given strategy.
    #[must_use]
    pub fn with_dependencies(mut self, strategy: Box<dyn DependencyStrategy>) -> Self {
        self.dependencies = Some(strategy);
        self
    }

    /// Returns the pull request source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Collects and classifies the notes for `from..to`.
    ///
    /// # Errors
    ///
    /// Returns the first git, GitHub or malformed reference error; no partial
    /// result is produced.
    pub async fn run(&self, from: &str, to: &str, name: &str) -> CoreResult<NotesBucket> {
        let walker = RepositoryWalker::new(self.vcs, &self.parser);
        let mut pool = CommitPool::new();

        if let Some(strategy) = &self.dependencies {
            if include_dependencies(from, to) {
                strategy.merge_dependencies(&walker, &mut pool, from, to)?;
            } else {
                info!(%from, %to, "not a same-major version range, skipping dependencies");
            }
        }

        walker.merge_repository(&mut pool, &self.primary, from, to)?;

        let dropped = pool.drop_processed();
        let cancelled = pool.cancel_reverts();
        info!(commits = pool.len(), dropped, cancelled, "collected commits");

        NoteResolver::new(&self.source, &self.parser)
            .resolve_all(&mut pool.commits)
            .await?;

        let commits = pool.finalize();
        info!(notes = commits.len(), "classifying release notes");

        Ok(classify(name, commits))
    }
}
