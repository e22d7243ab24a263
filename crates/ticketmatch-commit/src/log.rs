//! Grouped commit log and revert association.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, trace};

use crate::{CommitEntry, CommitError, CommitResult, EntryId, ParsedLine};

/// All commits of a log range, grouped by classification key.
///
/// Entries live in a single arena and are addressed by [`EntryId`]. Groups
/// iterate in sorted key order; revert searches walk groups in the order
/// their keys first appeared in the log.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommitLog {
    entries: Vec<CommitEntry>,
    groups: BTreeMap<String, Vec<EntryId>>,
    key_order: Vec<String>,
}

impl CommitLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies every non-blank line of `text`.
    ///
    /// # Errors
    ///
    /// Returns [`CommitError::MalformedLine`] for the first line without a
    /// leading hash; nothing is classified in that case.
    pub fn classify(text: &str) -> CommitResult<Self> {
        let mut log = Self::new();

        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let parsed = ParsedLine::try_parse(line).ok_or_else(|| CommitError::MalformedLine {
                line_number: index + 1,
                line: line.to_string(),
            })?;
            log.push(parsed);
        }

        debug!(
            commits = log.len(),
            groups = log.groups.len(),
            "classified commit log"
        );
        Ok(log)
    }

    /// Appends a parsed line to the group of its key.
    pub fn push(&mut self, parsed: ParsedLine) -> EntryId {
        let id = EntryId(self.entries.len());
        self.entries
            .push(CommitEntry::new(parsed.hash, parsed.description));

        if let Some(group) = self.groups.get_mut(&parsed.key) {
            group.push(id);
        } else {
            self.key_order.push(parsed.key.clone());
            self.groups.insert(parsed.key, vec![id]);
        }
        id
    }

    /// Links every revert commit to the commit it reverts.
    ///
    /// For each entry `E` under key `K`, the whole log is searched for the
    /// first entry whose description is `Revert "(K) <E>"`, then again for
    /// `Revert "<E>"`. Both searches always run, so a match on the second
    /// form replaces the first as `E`'s reverter.
    pub fn associate_reverts(&mut self) {
        let order = self.search_order();

        for (key, id) in &order {
            let id = *id;
            let description = &self.entries[id.0].description;
            let prefixed = format!("Revert \"({key}) {description}\"");
            let bare = format!("Revert \"{description}\"");

            for pattern in [prefixed, bare] {
                if let Some(revert) = self.find_description(&order, id, &pattern) {
                    trace!(
                        original = %self.entries[id.0].hash,
                        revert = %self.entries[revert.0].hash,
                        "linked revert"
                    );
                    self.link(id, revert);
                }
            }
        }
    }

    fn search_order(&self) -> Vec<(String, EntryId)> {
        self.key_order
            .iter()
            .flat_map(|key| {
                self.groups[key]
                    .iter()
                    .map(move |&id| (key.clone(), id))
            })
            .collect()
    }

    fn find_description(
        &self,
        order: &[(String, EntryId)],
        skip: EntryId,
        pattern: &str,
    ) -> Option<EntryId> {
        order
            .iter()
            .map(|&(_, id)| id)
            .find(|&id| id != skip && self.entries[id.0].description == pattern)
    }

    fn link(&mut self, original: EntryId, revert: EntryId) {
        self.entries[original.0].reverted_by = Some(revert);
        let revert = &mut self.entries[revert.0];
        revert.reverts = Some(original);
        revert.has_revert_parent = true;
    }

    /// Returns the entry behind a handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle does not belong to this log.
    #[must_use]
    pub fn entry(&self, id: EntryId) -> &CommitEntry {
        &self.entries[id.0]
    }

    /// Returns the groups in sorted key order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[EntryId])> {
        self.groups
            .iter()
            .map(|(key, ids)| (key.as_str(), ids.as_slice()))
    }

    /// Returns the keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Returns the entries of one group in arrival order.
    pub fn group(&self, key: &str) -> impl Iterator<Item = &CommitEntry> {
        self.groups
            .get(key)
            .into_iter()
            .flatten()
            .map(|&id| self.entry(id))
    }

    /// Returns the handles of a group's entries that are not reverts of another entry.
    pub fn top_level(&self, key: &str) -> impl Iterator<Item = EntryId> {
        self.groups
            .get(key)
            .into_iter()
            .flatten()
            .copied()
            .filter(|&id| self.entry(id).is_top_level())
    }

    /// Walks the reverts of `id`: its reverter, the reverter's reverter, and so on.
    pub fn revert_chain(&self, id: EntryId) -> impl Iterator<Item = &CommitEntry> {
        std::iter::successors(self.entry(id).reverted_by, |&next| {
            self.entry(next).reverted_by
        })
        .map(|next| self.entry(next))
    }

    /// Returns the number of commits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the log had no commits.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
