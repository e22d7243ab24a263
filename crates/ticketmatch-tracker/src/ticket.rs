//! Ticket record as reported by the issue tracker.

use serde::{Deserialize, Serialize};

/// A ticket filed against a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketRecord {
    /// The ticket key (e.g. `PUP-1234`).
    pub key: String,

    /// The workflow status label.
    pub state: String,

    /// The issue type label (e.g. `Bug`, `Epic`).
    pub issue_type: String,

    /// The owning team, if any.
    pub team: Option<String>,

    /// The release note text, if any.
    pub release_note: Option<String>,
}

impl TicketRecord {
    /// Creates a ticket without team or release note.
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        state: impl Into<String>,
        issue_type: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            state: state.into(),
            issue_type: issue_type.into(),
            team: None,
            release_note: None,
        }
    }

    /// Sets the owning team.
    #[must_use]
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    /// Sets the release note text.
    #[must_use]
    pub fn with_release_note(mut self, note: impl Into<String>) -> Self {
        self.release_note = Some(note.into());
        self
    }

    /// Returns true if the release note is absent or blank.
    #[must_use]
    pub fn lacks_release_note(&self) -> bool {
        self.release_note
            .as_deref()
            .is_none_or(|note| note.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let ticket = TicketRecord::new("PUP-1", "Open", "Bug");
        assert_eq!(ticket.key, "PUP-1");
        assert_eq!(ticket.state, "Open");
        assert_eq!(ticket.issue_type, "Bug");
        assert!(ticket.team.is_none());
        assert!(ticket.release_note.is_none());
    }

    #[test]
    fn test_builders() {
        let ticket = TicketRecord::new("PUP-1", "Open", "Bug")
            .with_team("Platform")
            .with_release_note("Fixed a crash");
        assert_eq!(ticket.team.as_deref(), Some("Platform"));
        assert_eq!(ticket.release_note.as_deref(), Some("Fixed a crash"));
    }

    #[test]
    fn test_lacks_release_note() {
        let ticket = TicketRecord::new("PUP-1", "Open", "Bug");
        assert!(ticket.lacks_release_note());
        assert!(ticket.clone().with_release_note("  \n").lacks_release_note());
        assert!(!ticket.with_release_note("Fixed").lacks_release_note());
    }
}
