//! Dependency manifest variable lookup.

use std::io::Write;
use std::process::Command;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::{GitError, GitResult};

/// Placeholder replaced by the manifest file path.
const FILE_PLACEHOLDER: &str = "{file}";

/// Placeholder replaced by the variable name.
const KEY_PLACEHOLDER: &str = "{key}";

/// Reads a pinned variable out of a dependency manifest.
pub trait ManifestLookup {
    /// Returns the value of `key` in a manifest with the given contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn variable(&self, manifest: &str, key: &str) -> GitResult<String>;
}

/// Looks variables up by running an external tool on a temporary copy of the
/// manifest.
///
/// Arguments may contain `{file}` and `{key}` placeholders.
#[derive(Debug, Clone)]
pub struct CommandManifestLookup {
    program: String,
    args: Vec<String>,
}

impl CommandManifestLookup {
    /// Creates a lookup running `program` with `args`.
    #[must_use]
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Creates a lookup using `gclient getdep`.
    #[must_use]
    pub fn gclient() -> Self {
        Self::new(
            "gclient",
            ["getdep", "--deps-file", FILE_PLACEHOLDER, "--var", KEY_PLACEHOLDER]
                .map(String::from)
                .to_vec(),
        )
    }
}

impl Default for CommandManifestLookup {
    fn default() -> Self {
        Self::gclient()
    }
}

impl ManifestLookup for CommandManifestLookup {
    fn variable(&self, manifest: &str, key: &str) -> GitResult<String> {
        let mut file = NamedTempFile::new()?;
        file.write_all(manifest.as_bytes())?;
        file.flush()?;

        let path = file.path().to_string_lossy().into_owned();
        let args: Vec<String> = self
            .args
            .iter()
            .map(|arg| {
                arg.replace(FILE_PLACEHOLDER, &path)
                    .replace(KEY_PLACEHOLDER, key)
            })
            .collect();

        debug!(program = %self.program, ?args, "looking up manifest variable");

        let output = Command::new(&self.program).args(&args).output()?;
        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: format!("{} {}", self.program, args.join(" ")),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
