//! End-to-end pipeline tests with in-memory collaborators.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use relnote_commit::{Category, Note, PullRequestRef, RepoId};
use relnote_config::{DependenciesConfig, ManifestDependency};
use relnote_core::{Pipeline, RepoSource, select_strategy};
use relnote_git::{GitError, GitResult, LogEntry, ManifestLookup, VersionControl};
use relnote_github::{
    CachedPullRequests, GithubResult, MemoryCache, PullRequest, PullRequestSource, ResponseCache,
    cache_key,
};
use relnote_parser::MessageParser;

const FEATURE: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

/// A fake git backend: `ranges` is keyed by `dir`, `from` and `to`.
#[derive(Default)]
struct Vcs {
    reachable: HashMap<String, Vec<String>>,
    ranges: HashMap<(PathBuf, String, String), Vec<LogEntry>>,
    files: HashMap<(String, String), String>,
}

impl VersionControl for Vcs {
    fn merge_base(&self, _dir: &Path, a: &str, _b: &str) -> GitResult<String> {
        Ok(a.to_string())
    }

    fn commit_hashes(&self, _dir: &Path, rev: &str) -> GitResult<Vec<String>> {
        Ok(self.reachable.get(rev).cloned().unwrap_or_default())
    }

    fn range_commits(&self, dir: &Path, from: &str, to: &str) -> GitResult<Vec<LogEntry>> {
        self.ranges
            .get(&(dir.to_path_buf(), from.to_string(), to.to_string()))
            .cloned()
            .ok_or_else(|| GitError::RevisionNotFound(format!("{from}..{to}")))
    }

    fn submodule_ref(&self, _dir: &Path, _rev: &str, _path: &str) -> GitResult<Option<String>> {
        Ok(None)
    }

    fn show_file(&self, _dir: &Path, rev: &str, path: &str) -> GitResult<String> {
        self.files
            .get(&(rev.to_string(), path.to_string()))
            .cloned()
            .ok_or_else(|| GitError::FileNotFound {
                rev: rev.to_string(),
                path: path.to_string(),
            })
    }
}

/// Treats the whole manifest as the pinned revision.
struct WholeFile;

impl ManifestLookup for WholeFile {
    fn variable(&self, manifest: &str, _key: &str) -> GitResult<String> {
        Ok(manifest.trim().to_string())
    }
}

#[derive(Default)]
struct Github {
    pulls: HashMap<String, PullRequest>,
}

impl Github {
    fn with(mut self, owner: &str, repo: &str, number: u64, title: &str, body: &str) -> Self {
        let pr = PullRequestRef::new(&RepoId::new(owner, repo), number).unwrap();
        self.pulls.insert(
            cache_key(&pr),
            PullRequest {
                title: title.to_string(),
                body: Some(body.to_string()),
            },
        );
        self
    }
}

impl PullRequestSource for Github {
    async fn pull_request(&self, pr: &PullRequestRef) -> GithubResult<Option<PullRequest>> {
        Ok(self.pulls.get(&cache_key(pr)).cloned())
    }
}

fn log(hash: &str, message: &str) -> LogEntry {
    LogEntry {
        hash: hash.to_string(),
        parents: Vec::new(),
        email: "dev@example.com".to_string(),
        message: message.to_string(),
    }
}

fn electron() -> RepoId {
    RepoId::new("electron", "electron")
}

fn node() -> RepoId {
    RepoId::new("electron", "node")
}

fn fixture() -> Vcs {
    let mut vcs = Vcs::default();

    vcs.files
        .insert(("v3.0.0".to_string(), "DEPS".to_string()), "n1".to_string());
    vcs.files
        .insert(("v3.1.0".to_string(), "DEPS".to_string()), "n2".to_string());
    vcs.files
        .insert(("v4.0.0".to_string(), "DEPS".to_string()), "n3".to_string());

    vcs.reachable
        .insert("v3.0.0".to_string(), vec!["released".to_string()]);

    vcs.ranges.insert(
        (PathBuf::from("/src/node"), "n1".to_string(), "n2".to_string()),
        vec![
            log("node1", "deps: update openssl\n\nNotes: Updated OpenSSL."),
            log("released", "fix: already shipped"),
        ],
    );

    let primary = vec![
        log(FEATURE, "feat: add app.focus() (#100)"),
        log(
            "b2",
            &format!("Revert \"feat: add app.focus()\"\n\nThis reverts commit {FEATURE}."),
        ),
        log("b3", "Menus fix backport (#201)"),
        log("b4", "chore: backport electron/node#7"),
        log("b5", "[docs] explain menus"),
        log("b6", "wip: experiment\n\nNotes: none"),
        log("b7", "Bump v3.1.0"),
    ];
    vcs.ranges.insert(
        (PathBuf::from("/src/electron"), "v3.0.0".to_string(), "v3.1.0".to_string()),
        primary.clone(),
    );
    vcs.ranges.insert(
        (PathBuf::from("/src/electron"), "v3.0.0".to_string(), "v4.0.0".to_string()),
        primary,
    );

    vcs
}

fn github() -> Github {
    Github::default()
        .with("electron", "electron", 201, "Backport of #200", "Backport of #200")
        .with(
            "electron",
            "electron",
            200,
            "fix: menus flicker",
            "Notes: Fixed flickering menus on Windows.",
        )
        .with("electron", "node", 7, "Upgrade libuv", "Notes: Upgrade libuv to 1.23.")
}

fn pipeline<'a>(
    vcs: &'a Vcs,
    source: CachedPullRequests<Github, MemoryCache>,
) -> Pipeline<'a, CachedPullRequests<Github, MemoryCache>> {
    let config = DependenciesConfig {
        manifests: vec![ManifestDependency {
            owner: "electron".to_string(),
            repo: "node".to_string(),
            dir: PathBuf::from("/src/node"),
            variable: "node_version".to_string(),
        }],
        ..DependenciesConfig::default()
    };

    Pipeline::new(
        vcs,
        MessageParser::new(vec![electron(), node()]),
        source,
        RepoSource::new(electron(), "/src/electron"),
    )
    .with_dependencies(select_strategy("/src/electron", &config, Box::new(WholeFile)))
}

#[tokio::test]
async fn builds_notes_for_minor_release() {
    let vcs = fixture();
    let pipeline = pipeline(&vcs, CachedPullRequests::new(github(), MemoryCache::new()));

    let bucket = pipeline.run("v3.0.0", "v3.1.0", "v3.1.0").await.unwrap();

    let texts = |category| -> Vec<String> {
        bucket
            .section(category)
            .iter()
            .map(|commit| commit.effective_text().to_string())
            .collect()
    };

    assert_eq!(texts(Category::Fix), vec!["Fixed flickering menus on Windows."]);
    assert_eq!(
        texts(Category::Other),
        vec!["Updated OpenSSL.", "Upgrade libuv to 1.23."]
    );
    assert_eq!(texts(Category::Docs), vec!["[docs] explain menus"]);
    assert!(bucket.section(Category::Feature).is_empty());
    assert!(bucket.section(Category::Unknown).is_empty());
    assert_eq!(bucket.len(), 4);

    let backport = &bucket.section(Category::Fix)[0];
    assert_eq!(backport.pr.as_ref().map(|pr| pr.number), Some(200));
    assert_eq!(backport.original_pr().map(|pr| pr.number), Some(201));

    let libuv = &bucket.section(Category::Other)[1];
    assert_eq!(libuv.repo, electron());
    assert_eq!(libuv.pr.as_ref().map(|pr| pr.repo.clone()), Some(node()));
    assert_eq!(libuv.note, Some(Note::Text("Upgrade libuv to 1.23.".to_string())));
}

#[tokio::test]
async fn skips_dependencies_across_majors() {
    let vcs = fixture();
    let pipeline = pipeline(&vcs, CachedPullRequests::new(github(), MemoryCache::new()));

    let bucket = pipeline.run("v3.0.0", "v4.0.0", "v4.0.0").await.unwrap();

    assert!(
        bucket
            .sections
            .values()
            .flatten()
            .all(|commit| commit.repo == electron())
    );
    assert_eq!(bucket.section(Category::Other).len(), 1);
}

#[tokio::test]
async fn caches_pull_requests() {
    let vcs = fixture();
    let pipeline = pipeline(&vcs, CachedPullRequests::new(github(), MemoryCache::new()));

    pipeline.run("v3.0.0", "v3.1.0", "v3.1.0").await.unwrap();

    let cache = pipeline.source().cache();
    assert_eq!(cache.len(), 3);
    for key in [
        "electron-electron-pull-201",
        "electron-electron-pull-200",
        "electron-node-pull-7",
    ] {
        assert!(cache.read(key).unwrap().is_some(), "{key}");
    }
}

#[tokio::test]
async fn unknown_revision_is_fatal() {
    let vcs = fixture();
    let pipeline = pipeline(&vcs, CachedPullRequests::new(github(), MemoryCache::new()));

    assert!(pipeline.run("v3.0.0", "v3.2.0", "v3.2.0").await.is_err());
}
