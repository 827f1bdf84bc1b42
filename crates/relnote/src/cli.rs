//! CLI definition.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Generate release notes from the commits and pull requests between two revisions.
#[derive(Debug, Parser)]
#[command(name = "relnote")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate release notes for a range of revisions
    Notes(commands::notes::NotesArgs),

    /// Initialize a new relnote configuration
    Init(commands::init::InitArgs),
}

impl Cli {
    /// Runs the CLI command.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Notes(args) => commands::notes::run(args),
            Commands::Init(args) => commands::init::run(&args),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_notes_name_defaults_to_none() {
        let cli = Cli::parse_from(["relnote", "notes", "--from", "v1.0.0", "--to", "v1.1.0"]);
        let Commands::Notes(args) = cli.command else {
            panic!("expected notes command");
        };
        assert_eq!(args.from, "v1.0.0");
        assert_eq!(args.to, "v1.1.0");
        assert!(args.name.is_none());
        assert!(!args.offline);
    }

    #[test]
    fn test_owner_requires_repo() {
        let result = Cli::try_parse_from([
            "relnote", "notes", "--from", "a", "--to", "b", "--owner", "electron",
        ]);
        assert!(result.is_err());
    }
}
