//! CLI definition.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Reconcile a release's git history with its Jira tickets.
#[derive(Debug, Parser)]
#[command(name = "ticketmatch")]
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
    /// Compare the commits of a revision range with the release's tickets
    Check(commands::check::CheckArgs),

    /// Write a default ticketmatch configuration
    Init(commands::init::InitArgs),
}

impl Cli {
    /// Runs the CLI command.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Check(args) => commands::check::run(args),
            Commands::Init(args) => commands::init::run(args),
        }
    }
}
