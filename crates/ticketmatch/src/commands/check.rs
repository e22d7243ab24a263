//! Check command.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};
use tracing::{debug, info, warn};

use ticketmatch_commit::CommitLog;
use ticketmatch_config::{Config, ConfigError, find_and_load_config};
use ticketmatch_core::{Outcome, Reconciler, ReportPolicy};
use ticketmatch_git::Repository;
use ticketmatch_tracker::{FieldMap, JiraClient, SearchQuery, TicketRecord, parse_search_response};

use crate::render;

/// Report output format.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing and sections
    #[default]
    Text,
    /// The full report as JSON
    Json,
}

/// Arguments for the check command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Revision the range starts after (e.g. the previous release tag)
    #[arg(short, long)]
    pub from: String,

    /// Revision the range ends at [default: git.to from config]
    #[arg(short, long)]
    pub to: Option<String>,

    /// Jira project key [default: jira.project from config]
    #[arg(short, long)]
    pub project: Option<String>,

    /// Jira fix version [default: "<project> <to>"]
    #[arg(long)]
    pub fix_version: Option<String>,

    /// Only report tickets owned by this team
    #[arg(long)]
    pub team: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Read `git log --no-merges --oneline` output from a file instead of the repository
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Read a saved Jira search response from a file instead of querying Jira
    #[arg(long)]
    pub issues_file: Option<PathBuf>,

    /// Jira base URL [default: jira.url from config]
    #[arg(long)]
    pub jira_url: Option<String>,

    /// Jira user for basic auth
    #[arg(long, env = "JIRA_USER")]
    pub user: Option<String>,

    /// Jira API token for basic auth
    #[arg(long, env = "JIRA_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

/// Runs the check command.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: CheckArgs) -> Result<()> {
    let config = load_config_or_default()?;
    let to = args.to.clone().unwrap_or_else(|| config.git.to.clone());
    let range = format!("{}..{to}", args.from);

    let log_text = read_log(&args, &to)?;
    let log = CommitLog::classify(&log_text).context("failed to classify git log")?;
    if log.is_empty() {
        println!("No results found in git log for range {range}");
        return Ok(());
    }
    info!(commits = log.len(), %range, "read commit log");

    let project = args.project.clone().or_else(|| config.jira.project.clone());
    let fix_version = args.fix_version.clone().unwrap_or_else(|| match &project {
        Some(project) => format!("{project} {to}"),
        None => to.clone(),
    });
    let jira_url = args.jira_url.clone().unwrap_or_else(|| config.jira.url.clone());
    let fields = FieldMap {
        team: config.jira.team_field.clone(),
        release_notes: config.jira.release_notes_field.clone(),
    };

    let tickets = if let Some(path) = &args.issues_file {
        let body = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        parse_search_response(&body, &fields)
            .with_context(|| format!("failed to parse issues from {}", path.display()))?
    } else {
        let Some(project) = project.as_deref() else {
            bail!("must specify a Jira project (--project or jira.project in the configuration)");
        };
        let query = SearchQuery::new(project, &fix_version);
        fetch_tickets(&jira_url, &query, &fields, &args)?
    };

    let reconciler = Reconciler::new(ReportPolicy::from(&config.report))
        .with_team(args.team.clone())
        .with_range(range.clone());

    match reconciler.reconcile(log, tickets) {
        Outcome::NoCommits => {
            println!("No results found in git log for range {range}");
        }
        Outcome::NoTickets => {
            let project = project.as_deref().unwrap_or("-");
            println!(
                "Jira returned no results for project '{project}' and fix version '{fix_version}'"
            );
        }
        Outcome::Report(report) => {
            let output = match args.format {
                OutputFormat::Text => render::text(&report, &jira_url, &fix_version)?,
                OutputFormat::Json => {
                    serde_json::to_string_pretty(&report).context("failed to render report")?
                }
            };
            println!("{output}");
        }
    }

    Ok(())
}

/// Loads the nearest configuration, falling back to defaults when there is none.
fn load_config_or_default() -> Result<Config> {
    match find_and_load_config() {
        Ok(config) => Ok(config),
        Err(ConfigError::NotFound(path)) => {
            debug!(?path, "no configuration found, using defaults");
            Ok(Config::default())
        }
        Err(e) => Err(e).context("failed to load configuration"),
    }
}

fn read_log(args: &CheckArgs, to: &str) -> Result<String> {
    if let Some(path) = &args.log_file {
        return fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }

    let repo =
        Repository::discover().context("please run ticketmatch from a git repository")?;
    debug!(path = %repo.path().display(), "opened repository");
    repo.oneline_log(&args.from, to)
        .with_context(|| format!("failed to read git log for {}..{to}", args.from))
}

fn fetch_tickets(
    jira_url: &str,
    query: &SearchQuery,
    fields: &FieldMap,
    args: &CheckArgs,
) -> Result<Vec<TicketRecord>> {
    let mut client = JiraClient::new(jira_url).context("failed to create Jira client")?;
    match (&args.user, &args.token) {
        (Some(user), Some(token)) => client = client.with_credentials(user, token),
        (None, None) => {}
        _ => warn!("both JIRA_USER and JIRA_TOKEN are needed for authentication; querying anonymously"),
    }

    let rt = tokio::runtime::Runtime::new().context("failed to create async runtime")?;
    rt.block_on(client.search(query, fields))
        .context("unable to obtain list of issues from Jira")
}
