//! Configuration schema.

use std::path::{Path, PathBuf};

use relnote_commit::RepoId;
use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Primary repository configuration.
    #[serde(default)]
    pub repository: RepositoryConfig,

    /// GitHub API configuration.
    #[serde(default)]
    pub github: GithubConfig,

    /// Pull request cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Dependency repositories.
    #[serde(default)]
    pub dependencies: DependenciesConfig,

    /// Markdown output configuration.
    #[serde(default)]
    pub render: RenderConfig,
}

impl Config {
    /// Resolves relative paths against the directory holding the config file.
    pub fn resolve_paths(&mut self, base: &Path) {
        if let Some(dir) = &self.cache.dir {
            self.cache.dir = Some(base.join(dir));
        }
        for manifest in &mut self.dependencies.manifests {
            manifest.dir = base.join(&manifest.dir);
        }
    }
}

/// Primary repository configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Repository owner; inferred from the `origin` remote when unset.
    pub owner: Option<String>,

    /// Repository name; inferred from the `origin` remote when unset.
    pub repo: Option<String>,

    /// Repositories whose backport references are followed, as `owner/repo`.
    #[serde(default)]
    pub tracked: Vec<String>,
}

impl RepositoryConfig {
    /// Returns the configured primary identity, if both parts are set.
    #[must_use]
    pub fn identity(&self) -> Option<RepoId> {
        match (&self.owner, &self.repo) {
            (Some(owner), Some(repo)) => Some(RepoId::new(owner, repo)),
            _ => None,
        }
    }

    /// Returns the tracked repositories, always including `primary`.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry is not in `owner/repo` form.
    pub fn tracked_repos(&self, primary: &RepoId) -> ConfigResult<Vec<RepoId>> {
        let mut repos = vec![primary.clone()];
        for entry in &self.tracked {
            let id: RepoId = entry
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("tracked repository `{entry}`")))?;
            if !repos.contains(&id) {
                repos.push(id);
            }
        }
        Ok(repos)
    }
}

/// GitHub API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// API endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Environment variable holding the API token.
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token_env: default_token_env(),
        }
    }
}

impl GithubConfig {
    /// Reads the API token from the configured environment variable.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .filter(|token| !token.is_empty())
    }
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_token_env() -> String {
    "GITHUB_TOKEN".to_string()
}

/// Pull request cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether responses are cached on disk.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Cache directory; defaults to the user cache directory.
    pub dir: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Dependency repositories whose changes are folded into the notes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependenciesConfig {
    /// Path whose presence in the primary checkout selects the submodule
    /// strategy.
    pub sentinel: Option<String>,

    /// Dependencies vendored as git submodules.
    #[serde(default)]
    pub submodules: Vec<SubmoduleDependency>,

    /// Dependencies pinned by a variable in a manifest file.
    #[serde(default)]
    pub manifests: Vec<ManifestDependency>,

    /// How manifest variables are read.
    #[serde(default)]
    pub lookup: LookupConfig,
}

/// A dependency vendored as a git submodule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmoduleDependency {
    /// Repository owner.
    pub owner: String,

    /// Repository name.
    pub repo: String,

    /// Submodule path inside the primary checkout.
    pub path: String,
}

impl SubmoduleDependency {
    /// Returns the dependency's identity.
    #[must_use]
    pub fn id(&self) -> RepoId {
        RepoId::new(&self.owner, &self.repo)
    }
}

/// A dependency pinned by a manifest variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestDependency {
    /// Repository owner.
    pub owner: String,

    /// Repository name.
    pub repo: String,

    /// Local checkout of the dependency.
    pub dir: PathBuf,

    /// Manifest variable holding the pinned revision.
    pub variable: String,
}

impl ManifestDependency {
    /// Returns the dependency's identity.
    #[must_use]
    pub fn id(&self) -> RepoId {
        RepoId::new(&self.owner, &self.repo)
    }
}

/// Manifest variable lookup configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Manifest file, relative to the primary checkout root.
    #[serde(default = "default_manifest")]
    pub manifest: String,

    /// Lookup program.
    #[serde(default = "default_program")]
    pub program: String,

    /// Program arguments; `{file}` and `{key}` are substituted.
    #[serde(default = "default_args")]
    pub args: Vec<String>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            manifest: default_manifest(),
            program: default_program(),
            args: default_args(),
        }
    }
}

fn default_manifest() -> String {
    "DEPS".to_string()
}

fn default_program() -> String {
    "gclient".to_string()
}

fn default_args() -> Vec<String> {
    ["getdep", "--deps-file", "{file}", "--var", "{key}"]
        .map(String::from)
        .to_vec()
}

/// Markdown output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Render primary repository pull requests as full links instead of
    /// GitHub's `#N` shorthand.
    #[serde(default)]
    pub explicit_links: bool,
}
