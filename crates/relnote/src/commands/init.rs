//! Initialize command.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use relnote_config::{CONFIG_FILE_NAME, DEFAULT_CONFIG};

/// Arguments for the init command.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Directory to write the configuration to (default: current directory)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,
}

/// Runs the init command.
pub fn run(args: &InitArgs) -> Result<()> {
    let dir = match &args.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("failed to read current directory")?,
    };
    let path = dir.join(CONFIG_FILE_NAME);

    if path.exists() && !args.force {
        bail!(
            "{} already exists, use --force to overwrite it",
            path.display()
        );
    }

    std::fs::write(&path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write {}", path.display()))?;

    println!("Created {}", path.display());
    Ok(())
}
