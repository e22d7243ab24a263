//! Text rendering of a reconciliation report.

use std::fmt::Write;

use anyhow::{Context, Result};
use ticketmatch_core::{Report, TicketSummary};
use ticketmatch_tracker::browse_url;

/// Renders the commit listing followed by the four report sections.
pub fn text(report: &Report, jira_url: &str, fix_version: &str) -> Result<String> {
    let mut out = String::new();
    write_listing(&mut out, report)?;

    writeln!(out)?;
    writeln!(out, "----- Git commits in Jira -----")?;
    if report.unknown.is_empty() {
        writeln!(out, "ALL COMMIT TOKENS WERE FOUND IN JIRA")?;
    } else {
        writeln!(
            out,
            "COMMIT TOKENS NOT FOUND IN JIRA (OR NOT WITH FIX VERSION OF {fix_version})"
        )?;
        for token in &report.unknown.tokens {
            writeln!(out, "{}", token.key)?;
        }
        for hash in &report.unknown.reverts {
            writeln!(out, "REVERT {hash}")?;
        }
    }

    writeln!(out)?;
    writeln!(out, "----- Unresolved Jira tickets not in git commits -----")?;
    write_tickets(
        &mut out,
        jira_url,
        &report.unresolved.not_in_git,
        "UNRESOLVED ISSUES NOT FOUND IN GIT",
        "ALL ISSUES WERE FOUND IN GIT",
    )?;

    writeln!(out)?;
    writeln!(out, "----- Unresolved Jira tickets found in git commits -----")?;
    write_tickets(
        &mut out,
        jira_url,
        &report.unresolved.in_git,
        "UNRESOLVED ISSUES FOUND IN GIT",
        "ALL ISSUES WERE RESOLVED IN JIRA",
    )?;

    writeln!(out)?;
    writeln!(out, "----- Jira tickets missing release notes -----")?;
    write_tickets(
        &mut out,
        jira_url,
        &report.missing_release_notes,
        "ISSUES MISSING RELEASE NOTES",
        "ALL ISSUES HAVE RELEASE NOTES",
    )?;

    Ok(out)
}

fn write_listing(out: &mut String, report: &Report) -> std::fmt::Result {
    for listing in &report.listing {
        match &listing.tracker_state {
            Some(state) => writeln!(out, "-- {} ({state})", listing.key)?,
            None => writeln!(out, "** {}", listing.key)?,
        }
        for commit in &listing.commits {
            writeln!(out, "    {}  {}", commit.hash, commit.description)?;
            for revert in &commit.reverts {
                writeln!(out, " R  {}  {}", revert.hash, revert.description)?;
            }
        }
    }
    Ok(())
}

fn write_tickets(
    out: &mut String,
    jira_url: &str,
    tickets: &[TicketSummary],
    heading: &str,
    all_clear: &str,
) -> Result<()> {
    if tickets.is_empty() {
        writeln!(out, "{all_clear}")?;
        return Ok(());
    }

    writeln!(out, "{heading}")?;
    for ticket in tickets {
        writeln!(out, "{} {}", ticket.key, ticket.state)?;
    }

    let keys: Vec<&str> = tickets.iter().map(|t| t.key.as_str()).collect();
    let link = browse_url(jira_url, &keys).context("failed to build Jira link")?;
    writeln!(out, "{link}")?;
    Ok(())
}
