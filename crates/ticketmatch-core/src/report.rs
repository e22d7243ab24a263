//! Report assembly.

use chrono::{DateTime, Utc};
use serde::Serialize;
use ticketmatch_commit::CommitLog;
use ticketmatch_tracker::TicketRecord;
use tracing::{debug, info};

use crate::reconcile::{
    TicketSummary, UnknownTokens, UnresolvedPartition, compute_net_presence,
    missing_release_notes, partition_unresolved, unknown_commit_tokens,
};
use crate::{CoreResult, ReportPolicy, TicketLedger};

/// A revert shown under the commit it undoes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedRevert {
    pub hash: String,
    pub description: String,
}

/// A top-level commit with its revert chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedCommit {
    pub hash: String,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reverts: Vec<ListedRevert>,
}

/// One commit group of the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketListing {
    /// Classification key of the group.
    pub key: String,

    /// Tracker state, when the key is a known ticket.
    pub tracker_state: Option<String>,

    pub commits: Vec<ListedCommit>,
}

/// Everything a reconciliation run found.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    pub listing: Vec<TicketListing>,
    pub unknown: UnknownTokens,
    pub unresolved: UnresolvedPartition,
    pub missing_release_notes: Vec<TicketSummary>,
}

impl Report {
    /// Returns true if no section flags anything.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.unknown.is_empty()
            && self.unresolved.not_in_git.is_empty()
            && self.unresolved.in_git.is_empty()
            && self.missing_release_notes.is_empty()
    }
}

/// How a run ended.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The revision range held no commits.
    NoCommits,

    /// The tracker returned no tickets for the release.
    NoTickets,

    /// Both sides had data and were reconciled.
    Report(Box<Report>),
}

/// Runs the full reconciliation with one policy and team filter.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    policy: ReportPolicy,
    team: Option<String>,
    range: Option<String>,
}

impl Reconciler {
    /// Creates a reconciler with the given policy and no team filter.
    #[must_use]
    pub fn new(policy: ReportPolicy) -> Self {
        Self {
            policy,
            team: None,
            range: None,
        }
    }

    /// Restricts the ticket sections to one team.
    #[must_use]
    pub fn with_team(mut self, team: Option<String>) -> Self {
        self.team = team;
        self
    }

    /// Labels the report with the revision range it covers.
    #[must_use]
    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = Some(range.into());
        self
    }

    /// Classifies `log_text` and reconciles it with `tickets`.
    ///
    /// # Errors
    ///
    /// Returns an error if a log line is malformed.
    pub fn run(&self, log_text: &str, tickets: Vec<TicketRecord>) -> CoreResult<Outcome> {
        let log = CommitLog::classify(log_text)?;
        Ok(self.reconcile(log, tickets))
    }

    /// Links reverts in `log` and reconciles it with `tickets`.
    #[must_use]
    pub fn reconcile(&self, mut log: CommitLog, tickets: Vec<TicketRecord>) -> Outcome {
        if log.is_empty() {
            info!("no commits in range");
            return Outcome::NoCommits;
        }
        if tickets.is_empty() {
            info!("no tickets found for release");
            return Outcome::NoTickets;
        }

        log.associate_reverts();
        let mut ledger = TicketLedger::new(tickets);
        compute_net_presence(&log, &mut ledger);

        let team = self.team.as_deref();
        let report = Report {
            generated_at: Utc::now(),
            range: self.range.clone(),
            team: self.team.clone(),
            listing: listing(&log, &ledger),
            unknown: unknown_commit_tokens(&log, &ledger, &self.policy),
            unresolved: partition_unresolved(&ledger, &self.policy, team),
            missing_release_notes: missing_release_notes(&ledger, &self.policy, team),
        };

        debug!(
            commits = log.len(),
            tickets = ledger.len(),
            unknown_tokens = report.unknown.tokens.len(),
            not_in_git = report.unresolved.not_in_git.len(),
            in_git = report.unresolved.in_git.len(),
            missing_notes = report.missing_release_notes.len(),
            "reconciled"
        );
        Outcome::Report(Box::new(report))
    }
}

fn listing(log: &CommitLog, ledger: &TicketLedger) -> Vec<TicketListing> {
    log.groups()
        .map(|(key, _)| TicketListing {
            key: key.to_string(),
            tracker_state: ledger.get(key).map(|t| t.record.state.clone()),
            commits: log
                .top_level(key)
                .map(|id| {
                    let entry = log.entry(id);
                    ListedCommit {
                        hash: entry.hash.clone(),
                        description: entry.description.clone(),
                        reverts: log
                            .revert_chain(id)
                            .map(|revert| ListedRevert {
                                hash: revert.hash.clone(),
                                description: revert.description.clone(),
                            })
                            .collect(),
                    }
                })
                .collect(),
        })
        .collect()
}
