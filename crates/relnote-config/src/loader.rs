//! Configuration loader.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Config, ConfigError, ConfigResult};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "relnote.toml";

/// Configuration file written by `relnote init`.
pub const DEFAULT_CONFIG: &str = r#"# relnote configuration

[repository]
# Primary repository. Inferred from the `origin` remote when unset.
# owner = "electron"
# repo = "electron"

# Repositories whose backport references (`owner/repo#N`) are followed.
# The primary repository is always tracked.
tracked = []

[github]
api_url = "https://api.github.com"
# Environment variable holding an API token.
token_env = "GITHUB_TOKEN"

[cache]
enabled = true
# Relative to this file. Defaults to the user cache directory.
# dir = ".cache"

[dependencies]
# When this path exists in the checkout, dependencies are read from
# submodules; otherwise from manifest variables.
# sentinel = "vendor/libchromiumcontent"

# [[dependencies.submodules]]
# owner = "electron"
# repo = "libchromiumcontent"
# path = "vendor/libchromiumcontent"

# [[dependencies.manifests]]
# owner = "electron"
# repo = "node"
# dir = "../third_party/electron_node"
# variable = "node_version"

[dependencies.lookup]
manifest = "DEPS"
program = "gclient"
args = ["getdep", "--deps-file", "{file}", "--var", "{key}"]

[render]
# Link primary repository pull requests explicitly instead of `#N`.
explicit_links = false
"#;

/// Loads configuration from the given path.
///
/// Relative paths in the file are resolved against its directory.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<Config> {
    let path = path.as_ref();
    debug!(?path, "loading configuration");

    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let mut config: Config = toml::from_str(&content)?;

    if let Some(base) = path.parent() {
        config.resolve_paths(base);
    }

    Ok(config)
}

/// Finds the configuration file in `start_dir` or its parents.
#[must_use]
pub fn find_config_file(start_dir: impl AsRef<Path>) -> Option<PathBuf> {
    start_dir
        .as_ref()
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|path| path.exists())
}
