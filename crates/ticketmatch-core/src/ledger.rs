//! Tracked tickets and their presence counters.

use std::collections::HashMap;

use serde::Serialize;
use ticketmatch_tracker::TicketRecord;
use tracing::warn;

/// A tracker ticket with its net presence in history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackedTicket {
    /// The ticket as reported by the tracker.
    pub record: TicketRecord,

    /// +1 per change, -1/+1 alternating along each revert chain.
    pub net_presence: i64,
}

impl TrackedTicket {
    /// Returns true if a change for this ticket is still in history.
    #[must_use]
    pub fn in_git(&self) -> bool {
        self.net_presence >= 1
    }
}

/// The tickets of one run, in tracker order, looked up case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct TicketLedger {
    tickets: Vec<TrackedTicket>,
    index: HashMap<String, usize>,
    pub(crate) presence_computed: bool,
}

impl TicketLedger {
    /// Builds the ledger; a repeated key replaces the earlier record in place.
    #[must_use]
    pub fn new(records: Vec<TicketRecord>) -> Self {
        let mut ledger = Self::default();

        for record in records {
            let key = record.key.to_uppercase();
            let tracked = TrackedTicket {
                record,
                net_presence: 0,
            };
            if let Some(&slot) = ledger.index.get(&key) {
                warn!(%key, "tracker returned a ticket twice; keeping the last one");
                ledger.tickets[slot] = tracked;
            } else {
                ledger.index.insert(key, ledger.tickets.len());
                ledger.tickets.push(tracked);
            }
        }

        ledger
    }

    /// Looks up a ticket by key, ignoring case.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&TrackedTicket> {
        self.index
            .get(&key.to_uppercase())
            .map(|&slot| &self.tickets[slot])
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut TrackedTicket> {
        self.index
            .get(&key.to_uppercase())
            .map(|&slot| &mut self.tickets[slot])
    }

    /// Returns true if the tracker knows the key.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(&key.to_uppercase())
    }

    /// Iterates tickets in tracker order.
    pub fn iter(&self) -> impl Iterator<Item = &TrackedTicket> {
        self.tickets.iter()
    }

    /// Returns the number of tickets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    /// Returns true if the tracker returned no tickets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}
