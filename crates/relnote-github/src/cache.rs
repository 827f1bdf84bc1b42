//! Response caches.
//!
//! Entries are JSON strings stored under a key. [`FileCache`] keeps one file
//! per key:
//! ```text
//! ~/.cache/relnote/
//! ├── electron-electron-pull-14390.json
//! ├── electron-node-pull-52.json
//! └── ...
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{GithubError, GithubResult};

/// A key/value store for serialized API responses.
pub trait ResponseCache {
    /// Returns the entry stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing entry cannot be read.
    fn read(&self, key: &str) -> GithubResult<Option<String>>;

    /// Stores `json` under `key`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be written.
    fn write(&self, key: &str, json: &str) -> GithubResult<()>;
}

/// A disabled cache stores nothing.
impl<C: ResponseCache> ResponseCache for Option<C> {
    fn read(&self, key: &str) -> GithubResult<Option<String>> {
        match self {
            Some(cache) => cache.read(key),
            None => Ok(None),
        }
    }

    fn write(&self, key: &str, json: &str) -> GithubResult<()> {
        match self {
            Some(cache) => cache.write(key, json),
            None => Ok(()),
        }
    }
}

/// A cache directory with one JSON file per entry.
///
/// The directory is created on the first write.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    /// Creates a cache rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the default cache directory (`<user cache dir>/relnote`).
    ///
    /// # Errors
    ///
    /// Returns an error if the user cache directory cannot be determined.
    pub fn default_dir() -> GithubResult<PathBuf> {
        let base = dirs::cache_dir().ok_or_else(|| GithubError::CacheCreation {
            path: PathBuf::from("~/.cache/relnote"),
            source: std::io::Error::new(
                ErrorKind::NotFound,
                "could not determine cache directory",
            ),
        })?;

        Ok(base.join("relnote"))
    }

    /// Returns the cache directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file an entry is stored in.
    #[must_use]
    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl ResponseCache for FileCache {
    fn read(&self, key: &str) -> GithubResult<Option<String>> {
        let path = self.entry_path(key);
        match std::fs::read_to_string(&path) {
            Ok(json) => {
                debug!(path = %path.display(), "cache hit");
                Ok(Some(json))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(GithubError::CacheRead { path, source }),
        }
    }

    fn write(&self, key: &str, json: &str) -> GithubResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|source| GithubError::CacheCreation {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.entry_path(key);
        std::fs::write(&path, json).map_err(|source| GithubError::CacheWrite { path, source })
    }
}

/// An in-memory cache, mostly useful in tests.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns true if the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl ResponseCache for MemoryCache {
    fn read(&self, key: &str) -> GithubResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, json: &str) -> GithubResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), json.to_string());
        Ok(())
    }
}
