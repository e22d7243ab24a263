//! Reconciliation of commit groups against tracker tickets.

use serde::Serialize;
use ticketmatch_commit::{CommitLog, REVERT_KEY};
use tracing::{debug, warn};

use crate::policy::{ReportPolicy, matches_team};
use crate::{TicketLedger, TrackedTicket};

/// A ticket as it appears in a report section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketSummary {
    pub key: String,
    pub state: String,
    pub issue_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    pub net_presence: i64,
}

impl From<&TrackedTicket> for TicketSummary {
    fn from(ticket: &TrackedTicket) -> Self {
        Self {
            key: ticket.record.key.clone(),
            state: ticket.record.state.clone(),
            issue_type: ticket.record.issue_type.clone(),
            team: ticket.record.team.clone(),
            net_presence: ticket.net_presence,
        }
    }
}

/// A commit token the tracker does not know, with the commits carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnknownToken {
    pub key: String,
    pub hashes: Vec<String>,
}

/// Commit tokens with no matching ticket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnknownTokens {
    /// Unknown ticket-like tokens in sorted key order.
    pub tokens: Vec<UnknownToken>,

    /// Hashes of revert commits whose reverted commit is not in the range.
    pub reverts: Vec<String>,
}

impl UnknownTokens {
    /// Returns true if nothing is unknown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.reverts.is_empty()
    }
}

/// Unresolved tickets split by whether their code is in history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnresolvedPartition {
    pub not_in_git: Vec<TicketSummary>,
    pub in_git: Vec<TicketSummary>,
}

/// Sets every ticket's net presence from the linked commit log.
///
/// Each top-level commit of a ticket's group counts +1 and every commit
/// along its revert chain flips the sign: -1, +1, -1 and so on. Groups with
/// no ticket are ignored. Running this twice on the same ledger does nothing
/// the second time.
pub fn compute_net_presence(log: &CommitLog, ledger: &mut TicketLedger) {
    if ledger.presence_computed {
        warn!("net presence already computed; skipping");
        return;
    }

    for (key, _) in log.groups() {
        let Some(ticket) = ledger.get_mut(key) else {
            continue;
        };

        for id in log.top_level(key) {
            ticket.net_presence += 1;
            let mut step = -1;
            for _ in log.revert_chain(id) {
                ticket.net_presence += step;
                step = -step;
            }
        }
        debug!(%key, net_presence = ticket.net_presence, "computed net presence");
    }

    ledger.presence_computed = true;
}

/// Lists commit groups whose key is neither a known ticket nor exempt.
///
/// The revert sentinel is never a token; its commits are listed by hash
/// instead.
#[must_use]
pub fn unknown_commit_tokens(
    log: &CommitLog,
    ledger: &TicketLedger,
    policy: &ReportPolicy,
) -> UnknownTokens {
    let mut unknown = UnknownTokens::default();

    for (key, _) in log.groups() {
        if ledger.contains(key) || policy.is_exempt(key) {
            continue;
        }

        let hashes = log.group(key).map(|entry| entry.hash.clone()).collect();
        if key == REVERT_KEY {
            unknown.reverts = hashes;
        } else {
            unknown.tokens.push(UnknownToken {
                key: key.to_string(),
                hashes,
            });
        }
    }

    unknown
}

/// Splits the non-terminal tickets by net presence, in tracker order.
#[must_use]
pub fn partition_unresolved(
    ledger: &TicketLedger,
    policy: &ReportPolicy,
    team: Option<&str>,
) -> UnresolvedPartition {
    let mut partition = UnresolvedPartition::default();

    for ticket in ledger.iter() {
        if policy.is_resolved(&ticket.record) || !matches_team(&ticket.record, team) {
            continue;
        }
        if ticket.in_git() {
            partition.in_git.push(ticket.into());
        } else {
            partition.not_in_git.push(ticket.into());
        }
    }

    partition
}

/// Lists tickets, resolved or not, that still need a release note.
#[must_use]
pub fn missing_release_notes(
    ledger: &TicketLedger,
    policy: &ReportPolicy,
    team: Option<&str>,
) -> Vec<TicketSummary> {
    ledger
        .iter()
        .filter(|ticket| matches_team(&ticket.record, team))
        .filter(|ticket| policy.needs_release_note(&ticket.record))
        .map(TicketSummary::from)
        .collect()
}
