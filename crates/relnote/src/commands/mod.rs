//! Subcommands.

pub mod init;
pub mod notes;
