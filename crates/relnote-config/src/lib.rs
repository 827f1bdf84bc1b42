//! Configuration management for relnote.
//!
//! This crate handles loading the `relnote.toml` configuration file.

mod error;
mod loader;
mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{CONFIG_FILE_NAME, DEFAULT_CONFIG, find_config_file, load_config};
pub use schema::{
    CacheConfig, Config, DependenciesConfig, GithubConfig, LookupConfig, ManifestDependency,
    RenderConfig, RepositoryConfig, SubmoduleDependency,
};
