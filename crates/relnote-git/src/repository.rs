//! Git repository access.

use std::path::Path;
use std::process::Command;

use git2::{Commit, ErrorCode, ObjectType, Repository};
use tracing::debug;

use crate::{GitError, GitResult};

/// File mode of a gitlink (submodule) tree entry.
const GITLINK_MODE: i32 = 0o160_000;

/// Separator between the fields of a log record.
const FIELD_SEPARATOR: &str = "||";

/// One commit of a commit range, as reported by `git log`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// The commit hash.
    pub hash: String,

    /// The parent hashes.
    pub parents: Vec<String>,

    /// The author email.
    pub email: String,

    /// The full commit message.
    pub message: String,
}

impl LogEntry {
    /// Parses one `%H||%P||%aE||%B` record.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::MalformedLog`] if a field is missing.
    pub fn parse(record: &str) -> GitResult<Self> {
        let record = record.trim_start_matches('\n');
        let mut fields = record.splitn(4, FIELD_SEPARATOR);

        let (Some(hash), Some(parents), Some(email), Some(message)) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(GitError::MalformedLog(record.to_string()));
        };

        if hash.is_empty() {
            return Err(GitError::MalformedLog(record.to_string()));
        }

        Ok(Self {
            hash: hash.to_string(),
            parents: parents.split_whitespace().map(String::from).collect(),
            email: email.to_string(),
            message: message.trim_end().to_string(),
        })
    }
}

/// Version-control operations needed to assemble release notes.
///
/// Every operation takes the checkout it applies to, so a single
/// implementation serves the primary repository and its dependencies.
pub trait VersionControl {
    /// Returns the common ancestor of two revisions.
    ///
    /// # Errors
    ///
    /// Returns an error if either revision is unknown or they share no history.
    fn merge_base(&self, dir: &Path, a: &str, b: &str) -> GitResult<String>;

    /// Returns every commit hash reachable from `rev`.
    ///
    /// # Errors
    ///
    /// Returns an error if the revision is unknown.
    fn commit_hashes(&self, dir: &Path, rev: &str) -> GitResult<Vec<String>>;

    /// Returns the first-parent commits in `from..to`, skipping changes that
    /// were cherry-picked from the other side.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be produced.
    fn range_commits(&self, dir: &Path, from: &str, to: &str) -> GitResult<Vec<LogEntry>>;

    /// Returns the commit a submodule at `path` is pinned to at `rev`.
    ///
    /// Returns `None` if there is no gitlink at that path.
    ///
    /// # Errors
    ///
    /// Returns an error if the revision is unknown.
    fn submodule_ref(&self, dir: &Path, rev: &str, path: &str) -> GitResult<Option<String>>;

    /// Returns the contents of a file at `rev`.
    ///
    /// # Errors
    ///
    /// Returns an error if the revision or the file does not exist.
    fn show_file(&self, dir: &Path, rev: &str, path: &str) -> GitResult<String>;
}

/// Git access through `git2`, plus the `git` executable for logs.
///
/// libgit2 has no equivalent of `--cherry-pick`, so commit ranges are read
/// from `git log`.
#[derive(Debug, Clone)]
pub struct GitRepository {
    program: String,
}

impl GitRepository {
    /// Creates a repository accessor using `git` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            program: "git".to_string(),
        }
    }

    /// Uses a different `git` executable.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn open(dir: &Path) -> GitResult<Repository> {
        Repository::open(dir).map_err(|_| GitError::NotARepo(dir.to_path_buf()))
    }

    fn resolve<'r>(repo: &'r Repository, rev: &str) -> GitResult<Commit<'r>> {
        repo.revparse_single(rev)
            .and_then(|object| object.peel_to_commit())
            .map_err(|_| GitError::RevisionNotFound(rev.to_string()))
    }

    fn run(&self, dir: &Path, args: &[&str]) -> GitResult<String> {
        debug!(dir = %dir.display(), ?args, "running git");

        let output = Command::new(&self.program)
            .current_dir(dir)
            .args(args)
            .output()?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: format!("{} {}", self.program, args.join(" ")),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for GitRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionControl for GitRepository {
    fn merge_base(&self, dir: &Path, a: &str, b: &str) -> GitResult<String> {
        let repo = Self::open(dir)?;
        let a = Self::resolve(&repo, a)?.id();
        let b = Self::resolve(&repo, b)?.id();
        Ok(repo.merge_base(a, b)?.to_string())
    }

    fn commit_hashes(&self, dir: &Path, rev: &str) -> GitResult<Vec<String>> {
        let repo = Self::open(dir)?;
        let start = Self::resolve(&repo, rev)?.id();

        let mut revwalk = repo.revwalk()?;
        revwalk.push(start)?;

        let hashes = revwalk
            .map(|oid| oid.map(|oid| oid.to_string()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(hashes)
    }

    fn range_commits(&self, dir: &Path, from: &str, to: &str) -> GitResult<Vec<LogEntry>> {
        let range = format!("{from}..{to}");
        let output = self.run(
            dir,
            &[
                "log",
                "-z",
                "--cherry-pick",
                "--right-only",
                "--first-parent",
                "--format=%H||%P||%aE||%B",
                &range,
            ],
        )?;

        output
            .split('\0')
            .filter(|record| !record.trim().is_empty())
            .map(LogEntry::parse)
            .collect()
    }

    fn submodule_ref(&self, dir: &Path, rev: &str, path: &str) -> GitResult<Option<String>> {
        let repo = Self::open(dir)?;
        let tree = Self::resolve(&repo, rev)?.tree()?;

        let entry = match tree.get_path(Path::new(path)) {
            Ok(entry) => entry,
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if entry.filemode() == GITLINK_MODE {
            Ok(Some(entry.id().to_string()))
        } else {
            Ok(None)
        }
    }

    fn show_file(&self, dir: &Path, rev: &str, path: &str) -> GitResult<String> {
        let repo = Self::open(dir)?;
        let tree = Self::resolve(&repo, rev)?.tree()?;

        let not_found = || GitError::FileNotFound {
            rev: rev.to_string(),
            path: path.to_string(),
        };

        let entry = tree.get_path(Path::new(path)).map_err(|_| not_found())?;
        if entry.kind() != Some(ObjectType::Blob) {
            return Err(not_found());
        }

        let blob = entry.to_object(&repo)?.peel_to_blob()?;
        Ok(String::from_utf8_lossy(blob.content()).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Oid, Signature};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, Repository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = Repository::init(temp_dir.path()).unwrap();

        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();

        (temp_dir, repo)
    }

    fn commit_tree(repo: &Repository, tree: Oid, message: &str) -> Oid {
        let sig = Signature::now("Test User", "test@example.com").unwrap();
        let tree = repo.find_tree(tree).unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&Commit<'_>> = parent.iter().collect();

        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    fn create_commit(repo: &Repository, message: &str) -> Oid {
        let tree = repo.index().unwrap().write_tree().unwrap();
        commit_tree(repo, tree, message)
    }

    fn commit_file(repo: &Repository, path: &str, contents: &str, message: &str) -> Oid {
        let blob = repo.blob(contents.as_bytes()).unwrap();
        let mut builder = repo.treebuilder(None).unwrap();
        builder.insert(path, blob, 0o100_644).unwrap();
        let tree = builder.write().unwrap();
        commit_tree(repo, tree, message)
    }

    fn commit_gitlink(repo: &Repository, pinned: Oid, message: &str) -> Oid {
        let mut vendor = repo.treebuilder(None).unwrap();
        vendor.insert("dep", pinned, GITLINK_MODE).unwrap();
        let vendor = vendor.write().unwrap();

        let mut root = repo.treebuilder(None).unwrap();
        root.insert("vendor", vendor, 0o040_000).unwrap();
        let tree = root.write().unwrap();
        commit_tree(repo, tree, message)
    }

    fn tag(repo: &Repository, name: &str, oid: Oid) {
        let object = repo.find_object(oid, None).unwrap();
        repo.tag_lightweight(name, &object, false).unwrap();
    }

    #[test]
    fn test_parse_log_entry() {
        let entry = LogEntry::parse("abc||p1 p2||dev@example.com||feat: x\n\nbody\n").unwrap();
        assert_eq!(entry.hash, "abc");
        assert_eq!(entry.parents, vec!["p1", "p2"]);
        assert_eq!(entry.email, "dev@example.com");
        assert_eq!(entry.message, "feat: x\n\nbody");
    }

    #[test]
    fn test_parse_log_entry_root_commit() {
        let entry = LogEntry::parse("\nabc||||dev@example.com||init").unwrap();
        assert_eq!(entry.hash, "abc");
        assert!(entry.parents.is_empty());
    }

    #[test]
    fn test_parse_log_entry_keeps_separator_in_message() {
        let entry = LogEntry::parse("abc||p||e||a || b").unwrap();
        assert_eq!(entry.message, "a || b");
    }

    #[test]
    fn test_parse_log_entry_malformed() {
        assert!(matches!(
            LogEntry::parse("abc||p1"),
            Err(GitError::MalformedLog(_))
        ));
    }

    #[test]
    fn test_open_not_a_repo() {
        let temp_dir = TempDir::new().unwrap();
        let result = GitRepository::new().commit_hashes(temp_dir.path(), "HEAD");
        assert!(matches!(result, Err(GitError::NotARepo(_))));
    }

    #[test]
    fn test_unknown_revision() {
        let (temp_dir, repo) = create_test_repo();
        create_commit(&repo, "First commit");

        let result = GitRepository::new().commit_hashes(temp_dir.path(), "v9.9.9");
        assert!(matches!(result, Err(GitError::RevisionNotFound(_))));
    }

    #[test]
    fn test_commit_hashes() {
        let (temp_dir, repo) = create_test_repo();
        let first = create_commit(&repo, "First commit");
        let second = create_commit(&repo, "Second commit");
        create_commit(&repo, "Third commit");
        tag(&repo, "v1.0.0", second);

        let hashes = GitRepository::new()
            .commit_hashes(temp_dir.path(), "v1.0.0")
            .unwrap();
        assert_eq!(hashes.len(), 2);
        assert!(hashes.contains(&first.to_string()));
        assert!(hashes.contains(&second.to_string()));
    }

    #[test]
    fn test_merge_base() {
        let (temp_dir, repo) = create_test_repo();
        let first = create_commit(&repo, "First commit");
        let second = create_commit(&repo, "Second commit");
        tag(&repo, "v1.0.0", first);
        tag(&repo, "v1.1.0", second);

        let base = GitRepository::new()
            .merge_base(temp_dir.path(), "v1.0.0", "v1.1.0")
            .unwrap();
        assert_eq!(base, first.to_string());
    }

    #[test]
    fn test_range_commits() {
        let (temp_dir, repo) = create_test_repo();
        let first = create_commit(&repo, "First commit");
        create_commit(&repo, "feat: second (#2)");
        let third = create_commit(&repo, "fix: third\n\nNotes: Fixed it.");
        tag(&repo, "v1.0.0", first);

        let entries = GitRepository::new()
            .range_commits(temp_dir.path(), "v1.0.0", "HEAD")
            .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].hash, third.to_string());
        assert_eq!(entries[0].message, "fix: third\n\nNotes: Fixed it.");
        assert_eq!(entries[0].email, "test@example.com");
        assert_eq!(entries[1].message, "feat: second (#2)");
        assert_eq!(entries[1].parents, vec![first.to_string()]);
    }

    #[test]
    fn test_range_commits_bad_revision() {
        let (temp_dir, repo) = create_test_repo();
        create_commit(&repo, "First commit");

        let result = GitRepository::new().range_commits(temp_dir.path(), "nope", "HEAD");
        assert!(matches!(result, Err(GitError::CommandFailed { .. })));
    }

    #[test]
    fn test_submodule_ref() {
        let (temp_dir, repo) = create_test_repo();
        let pinned = Oid::from_str("0123456789abcdef0123456789abcdef01234567").unwrap();
        commit_gitlink(&repo, pinned, "pin dependency");

        let git = GitRepository::new();
        let found = git
            .submodule_ref(temp_dir.path(), "HEAD", "vendor/dep")
            .unwrap();
        assert_eq!(found, Some(pinned.to_string()));

        let missing = git
            .submodule_ref(temp_dir.path(), "HEAD", "vendor/other")
            .unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_submodule_ref_ignores_regular_files() {
        let (temp_dir, repo) = create_test_repo();
        commit_file(&repo, "DEPS", "vars = {}", "add deps");

        let found = GitRepository::new()
            .submodule_ref(temp_dir.path(), "HEAD", "DEPS")
            .unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_show_file() {
        let (temp_dir, repo) = create_test_repo();
        let first = commit_file(&repo, "DEPS", "vars = { 'node_version': 'v1' }", "one");
        commit_file(&repo, "DEPS", "vars = { 'node_version': 'v2' }", "two");
        tag(&repo, "v1.0.0", first);

        let git = GitRepository::new();
        let old = git.show_file(temp_dir.path(), "v1.0.0", "DEPS").unwrap();
        let new = git.show_file(temp_dir.path(), "HEAD", "DEPS").unwrap();
        assert!(old.contains("'v1'"));
        assert!(new.contains("'v2'"));
    }

    #[test]
    fn test_show_file_missing() {
        let (temp_dir, repo) = create_test_repo();
        commit_file(&repo, "DEPS", "", "one");

        let result = GitRepository::new().show_file(temp_dir.path(), "HEAD", "README");
        assert!(matches!(result, Err(GitError::FileNotFound { .. })));
    }
}
