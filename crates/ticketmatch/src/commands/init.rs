//! Initialize command.

use std::fs;

use anyhow::{Context, Result, bail};
use clap::Args;
use tracing::info;

use ticketmatch_config::{CONFIG_FILE_NAME, Config};

/// Arguments for the init command.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Default Jira project key to record
    #[arg(short, long)]
    pub project: Option<String>,
}

/// Runs the init command.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: InitArgs) -> Result<()> {
    let path = std::env::current_dir()
        .context("failed to read current directory")?
        .join(CONFIG_FILE_NAME);

    if path.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let mut config = Config::default();
    config.jira.project = args.project;
    let content = config.to_toml().context("failed to render configuration")?;

    fs::write(&path, content).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "wrote configuration");
    println!("Created {CONFIG_FILE_NAME}");

    Ok(())
}
