//! Notes command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;
use relnote_commit::RepoId;
use relnote_config::{Config, find_config_file, load_config};
use relnote_core::{Pipeline, RepoSource, select_strategy};
use relnote_git::{CommandManifestLookup, GitRepository, origin_repo};
use relnote_github::{CachedPullRequests, FileCache, GitHubClient};
use relnote_parser::MessageParser;
use relnote_render::MarkdownRenderer;
use tracing::{debug, info};

/// Pull request source used by the command; `None` when offline.
type Source = Option<CachedPullRequests<GitHubClient, Option<FileCache>>>;

/// Arguments for the notes command.
#[derive(Debug, Args)]
pub struct NotesArgs {
    /// Previous release (tag, branch or commit)
    #[arg(long)]
    pub from: String,

    /// Release to generate notes for
    #[arg(long)]
    pub to: String,

    /// Release name used in the title (default: the value of --to)
    #[arg(long)]
    pub name: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Render primary repository pull requests as full links
    #[arg(long)]
    pub explicit_links: bool,

    /// Do not look up pull requests on GitHub
    #[arg(long)]
    pub offline: bool,

    /// Do not read or write the pull request cache
    #[arg(long)]
    pub no_cache: bool,

    /// Owner of the primary repository
    #[arg(long, requires = "repo")]
    pub owner: Option<String>,

    /// Name of the primary repository
    #[arg(long, requires = "owner")]
    pub repo: Option<String>,

    /// Checkout of the primary repository (default: current directory)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,
}

/// Runs the notes command.
pub fn run(args: NotesArgs) -> Result<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create async runtime")?;

    rt.block_on(run_async(args))
}

async fn run_async(args: NotesArgs) -> Result<()> {
    let dir = match &args.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("failed to read current directory")?,
    };

    let config = load(&dir)?;
    let primary = primary_repo(&args, &config, &dir)?;
    info!(repo = %primary, from = %args.from, to = %args.to, "generating release notes");

    let tracked = config
        .repository
        .tracked_repos(&primary)
        .context("invalid repository configuration")?;
    let parser = MessageParser::new(tracked);

    let lookup = CommandManifestLookup::new(
        config.dependencies.lookup.program.clone(),
        config.dependencies.lookup.args.clone(),
    );
    let strategy = select_strategy(&dir, &config.dependencies, Box::new(lookup));

    let vcs = GitRepository::new();
    let pipeline = Pipeline::new(
        &vcs,
        parser,
        source(&args, &config)?,
        RepoSource::new(primary.clone(), &dir),
    )
    .with_dependencies(strategy);

    let name = args.name.as_deref().unwrap_or(&args.to);
    let bucket = pipeline
        .run(&args.from, &args.to, name)
        .await
        .with_context(|| format!("failed to collect notes for {}..{}", args.from, args.to))?;
    info!(notes = bucket.len(), "collected release notes");

    let markdown = MarkdownRenderer::new(primary)
        .explicit_links(args.explicit_links || config.render.explicit_links)
        .render(&bucket);

    match &args.output {
        Some(path) => {
            std::fs::write(path, &markdown)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote release notes");
        }
        None => print!("{markdown}"),
    }

    Ok(())
}

/// Loads `relnote.toml` from `dir` or a parent, falling back to defaults.
fn load(dir: &Path) -> Result<Config> {
    match find_config_file(dir) {
        Some(path) => {
            load_config(&path).with_context(|| format!("failed to load {}", path.display()))
        }
        None => {
            debug!(dir = %dir.display(), "no configuration file, using defaults");
            Ok(Config::default())
        }
    }
}

/// Resolves the primary repository from flags, configuration or `origin`.
fn primary_repo(args: &NotesArgs, config: &Config, dir: &Path) -> Result<RepoId> {
    if let (Some(owner), Some(repo)) = (&args.owner, &args.repo) {
        return Ok(RepoId::new(owner, repo));
    }

    if let Some(id) = config.repository.identity() {
        return Ok(id);
    }

    match origin_repo(dir).context("failed to read the origin remote")? {
        Some(id) => {
            debug!(repo = %id, "inferred primary repository from origin");
            Ok(id)
        }
        None => bail!(
            "cannot determine the primary repository; pass --owner and --repo or set them in relnote.toml"
        ),
    }
}

fn source(args: &NotesArgs, config: &Config) -> Result<Source> {
    if args.offline {
        info!("offline, pull requests will not be fetched");
        return Ok(None);
    }

    let client = GitHubClient::new(&config.github.api_url, config.github.token())
        .context("failed to create GitHub client")?;

    let cache = if args.no_cache || !config.cache.enabled {
        None
    } else {
        let dir = match &config.cache.dir {
            Some(dir) => dir.clone(),
            None => FileCache::default_dir().context("failed to locate cache directory")?,
        };
        debug!(dir = %dir.display(), "caching pull requests");
        Some(FileCache::new(dir))
    };

    Ok(Some(CachedPullRequests::new(client, cache)))
}
