//! Dependency repositories folded into the notes.

use std::path::PathBuf;

use relnote_config::{DependenciesConfig, ManifestDependency, SubmoduleDependency};
use relnote_git::ManifestLookup;
use semver::Version;
use tracing::{info, warn};

use crate::{CommitPool, CoreResult, RepoSource, RepositoryWalker};

/// Returns true if dependency changes belong in the notes for `from..to`.
///
/// Both references must be semantic versions (a leading `v` is accepted)
/// with the same major version; across majors the dependency churn is too
/// large to be useful.
#[must_use]
pub fn include_dependencies(from: &str, to: &str) -> bool {
    match (parse_version(from), parse_version(to)) {
        (Some(from), Some(to)) => from.major == to.major,
        _ => false,
    }
}

fn parse_version(reference: &str) -> Option<Version> {
    let reference = reference.strip_prefix('v').unwrap_or(reference);
    Version::parse(reference).ok()
}

/// A way of finding which dependency revisions a primary revision pins.
pub trait DependencyStrategy {
    /// Returns the strategy name.
    fn name(&self) -> &'static str;

    /// Merges the dependency commits between the revisions pinned at `from`
    /// and `to` of the primary repository.
    ///
    /// # Errors
    ///
    /// Returns an error if a pinned revision cannot be read or merged.
    fn merge_dependencies(
        &self,
        walker: &RepositoryWalker<'_>,
        pool: &mut CommitPool,
        from: &str,
        to: &str,
    ) -> CoreResult<()>;
}

/// Reads dependency pins from gitlinks in the primary repository.
#[derive(Debug, Clone)]
pub struct SubmoduleStrategy {
    primary_dir: PathBuf,
    submodules: Vec<SubmoduleDependency>,
}

impl SubmoduleStrategy {
    /// Creates the strategy for a primary checkout.
    #[must_use]
    pub fn new(primary_dir: impl Into<PathBuf>, submodules: Vec<SubmoduleDependency>) -> Self {
        Self {
            primary_dir: primary_dir.into(),
            submodules,
        }
    }
}

impl DependencyStrategy for SubmoduleStrategy {
    fn name(&self) -> &'static str {
        "submodule"
    }

    fn merge_dependencies(
        &self,
        walker: &RepositoryWalker<'_>,
        pool: &mut CommitPool,
        from: &str,
        to: &str,
    ) -> CoreResult<()> {
        let vcs = walker.vcs();

        for dependency in &self.submodules {
            let pinned_from = vcs.submodule_ref(&self.primary_dir, from, &dependency.path)?;
            let pinned_to = vcs.submodule_ref(&self.primary_dir, to, &dependency.path)?;

            let (Some(pinned_from), Some(pinned_to)) = (pinned_from, pinned_to) else {
                warn!(path = %dependency.path, "submodule not pinned at both revisions, skipping");
                continue;
            };

            let source = RepoSource::new(dependency.id(), self.primary_dir.join(&dependency.path));
            walker.merge_repository(pool, &source, &pinned_from, &pinned_to)?;
        }

        Ok(())
    }
}

/// Reads dependency pins from variables of a manifest file.
pub struct ManifestStrategy {
    primary_dir: PathBuf,
    manifest: String,
    dependencies: Vec<ManifestDependency>,
    lookup: Box<dyn ManifestLookup>,
}

impl ManifestStrategy {
    /// Creates the strategy for a primary checkout.
    #[must_use]
    pub fn new(
        primary_dir: impl Into<PathBuf>,
        manifest: impl Into<String>,
        dependencies: Vec<ManifestDependency>,
        lookup: Box<dyn ManifestLookup>,
    ) -> Self {
        Self {
            primary_dir: primary_dir.into(),
            manifest: manifest.into(),
            dependencies,
            lookup,
        }
    }
}

impl DependencyStrategy for ManifestStrategy {
    fn name(&self) -> &'static str {
        "manifest"
    }

    fn merge_dependencies(
        &self,
        walker: &RepositoryWalker<'_>,
        pool: &mut CommitPool,
        from: &str,
        to: &str,
    ) -> CoreResult<()> {
        if self.dependencies.is_empty() {
            return Ok(());
        }

        let vcs = walker.vcs();
        let manifest_from = vcs.show_file(&self.primary_dir, from, &self.manifest)?;
        let manifest_to = vcs.show_file(&self.primary_dir, to, &self.manifest)?;

        for dependency in &self.dependencies {
            let pinned_from = self.lookup.variable(&manifest_from, &dependency.variable)?;
            let pinned_to = self.lookup.variable(&manifest_to, &dependency.variable)?;

            let source = RepoSource::new(dependency.id(), &dependency.dir);
            walker.merge_repository(pool, &source, &pinned_from, &pinned_to)?;
        }

        Ok(())
    }
}

/// Chooses the dependency strategy for a primary checkout.
///
/// The submodule strategy is used when the configured sentinel path exists in
/// the checkout, the manifest strategy otherwise.
#[must_use]
pub fn select_strategy(
    primary_dir: impl Into<PathBuf>,
    config: &DependenciesConfig,
    lookup: Box<dyn ManifestLookup>,
) -> Box<dyn DependencyStrategy> {
    let primary_dir = primary_dir.into();

    let use_submodules = config
        .sentinel
        .as_ref()
        .is_some_and(|sentinel| primary_dir.join(sentinel).exists());

    let strategy: Box<dyn DependencyStrategy> = if use_submodules {
        Box::new(SubmoduleStrategy::new(
            primary_dir,
            config.submodules.clone(),
        ))
    } else {
        Box::new(ManifestStrategy::new(
            primary_dir,
            config.lookup.manifest.clone(),
            config.manifests.clone(),
            lookup,
        ))
    };

    info!(strategy = strategy.name(), "selected dependency strategy");
    strategy
}
