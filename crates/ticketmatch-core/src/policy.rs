//! Report policy: which states, tokens and issue types are special.

use ticketmatch_config::ReportConfig;
use ticketmatch_tracker::TicketRecord;

/// Lists that decide how tickets and tokens are reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPolicy {
    /// Commit tokens never reported as unknown.
    pub exempt_tokens: Vec<String>,

    /// Status labels that count as resolved.
    pub terminal_states: Vec<String>,

    /// Issue types that need no release note.
    pub release_note_exempt_types: Vec<String>,
}

impl Default for ReportPolicy {
    fn default() -> Self {
        Self::from(&ReportConfig::default())
    }
}

impl From<&ReportConfig> for ReportPolicy {
    fn from(config: &ReportConfig) -> Self {
        Self {
            exempt_tokens: config.exempt_tokens.clone(),
            terminal_states: config.terminal_states.clone(),
            release_note_exempt_types: config.release_note_exempt_types.clone(),
        }
    }
}

impl ReportPolicy {
    /// Returns true if the ticket is in a terminal state.
    #[must_use]
    pub fn is_resolved(&self, ticket: &TicketRecord) -> bool {
        is_terminal_state(&ticket.state, &self.terminal_states)
    }

    /// Returns true if the ticket needs a release note but has none.
    #[must_use]
    pub fn needs_release_note(&self, ticket: &TicketRecord) -> bool {
        ticket.lacks_release_note()
            && !is_release_note_exempt(&ticket.issue_type, &self.release_note_exempt_types)
    }

    /// Returns true if the commit token is never reported as unknown.
    #[must_use]
    pub fn is_exempt(&self, key: &str) -> bool {
        is_exempt_token(key, &self.exempt_tokens)
    }
}

/// Returns true if `state` contains any of the terminal labels.
///
/// Matching is case-sensitive, so `Resolved` also covers `Resolved - Fixed`.
#[must_use]
pub fn is_terminal_state(state: &str, terminal_states: &[String]) -> bool {
    terminal_states
        .iter()
        .any(|label| state.contains(label.as_str()))
}

/// Returns true if the issue type is exempt from the release note check.
#[must_use]
pub fn is_release_note_exempt(issue_type: &str, exempt_types: &[String]) -> bool {
    exempt_types.iter().any(|t| t == issue_type)
}

/// Returns true if the classification key is in the exemption set.
#[must_use]
pub fn is_exempt_token(key: &str, exempt_tokens: &[String]) -> bool {
    exempt_tokens.iter().any(|t| t.eq_ignore_ascii_case(key))
}

/// Returns true if no team filter is set or the ticket belongs to `team`.
#[must_use]
pub fn matches_team(ticket: &TicketRecord, team: Option<&str>) -> bool {
    team.is_none_or(|team| ticket.team.as_deref() == Some(team))
}
