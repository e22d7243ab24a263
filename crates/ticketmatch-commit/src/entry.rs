//! Commit entry stored in a [`crate::CommitLog`] arena.

use serde::{Deserialize, Serialize};

/// Stable handle of a [`CommitEntry`] inside its [`crate::CommitLog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntryId(pub usize);

/// One parsed commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitEntry {
    /// The abbreviated commit hash.
    pub hash: String,

    /// The subject with any `(TOKEN)` prefix stripped.
    pub description: String,

    /// The commit that reverts this one, walked when listing revert chains.
    pub reverted_by: Option<EntryId>,

    /// The commit this one reverts.
    pub reverts: Option<EntryId>,

    /// Set once another entry's `reverted_by` points here.
    ///
    /// Such entries are listed and counted through their parent's chain,
    /// never on their own.
    pub has_revert_parent: bool,
}

impl CommitEntry {
    /// Creates an unlinked entry.
    #[must_use]
    pub fn new(hash: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            description: description.into(),
            reverted_by: None,
            reverts: None,
            has_revert_parent: false,
        }
    }

    /// Returns the structural identity used for matching.
    #[must_use]
    pub fn identity(&self) -> (&str, &str) {
        (&self.hash, &self.description)
    }

    /// Returns true if this entry is listed on its own.
    #[must_use]
    pub fn is_top_level(&self) -> bool {
        !self.has_revert_parent
    }
}
