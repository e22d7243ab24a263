//! Single log line classification.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{CommitError, CommitResult};

/// Classification key for commits whose whole subject is a `Revert "..."`.
pub const REVERT_KEY: &str = "REVERT";

/// Classification key for commits without a `(TOKEN)` prefix.
pub const UNMARKED_KEY: &str = "UNMARKED";

static REVERT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^([0-9a-fA-F]+)\s+(Revert ".*")$"#).expect("revert line pattern is valid")
});

static TOKEN_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9a-fA-F]+)\s+(?:\(([^)]*)\))?(.*)$").expect("token line pattern is valid")
});

/// A log line split into its hash, classification key and description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedLine {
    /// Uppercased ticket token, or one of [`REVERT_KEY`] / [`UNMARKED_KEY`].
    pub key: String,

    /// The abbreviated commit hash.
    pub hash: String,

    /// The subject with any `(TOKEN)` prefix stripped.
    pub description: String,
}

impl ParsedLine {
    /// Classifies a line, returning `None` when it has no leading hash.
    pub(crate) fn try_parse(line: &str) -> Option<Self> {
        if let Some(caps) = REVERT_LINE.captures(line) {
            return Some(Self {
                key: REVERT_KEY.to_string(),
                hash: caps[1].to_string(),
                description: caps[2].to_string(),
            });
        }

        let caps = TOKEN_LINE.captures(line)?;
        let hash = caps[1].to_string();
        let rest = caps.get(3).map_or("", |m| m.as_str());

        let parsed = match caps.get(2) {
            Some(token) => Self {
                key: token.as_str().to_uppercase(),
                hash,
                description: rest.trim_start().to_string(),
            },
            None => Self {
                key: UNMARKED_KEY.to_string(),
                hash,
                description: rest.to_string(),
            },
        };
        Some(parsed)
    }

    /// Returns true if the line was classified under a sentinel key.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.key == REVERT_KEY || self.key == UNMARKED_KEY
    }

    /// Re-renders the subject as `(KEY) description`.
    ///
    /// Sentinel-keyed lines render as their bare description.
    #[must_use]
    pub fn render(&self) -> String {
        if self.is_sentinel() {
            self.description.clone()
        } else {
            format!("({}) {}", self.key, self.description)
        }
    }
}

/// Parses one raw log line of the form `<hex-hash><whitespace><subject>`.
///
/// The error reports the line as line 1; [`crate::CommitLog::classify`]
/// reports positions within the whole log.
///
/// # Errors
///
/// Returns [`CommitError::MalformedLine`] if the line has no leading hash.
pub fn parse_line(line: &str) -> CommitResult<ParsedLine> {
    ParsedLine::try_parse(line).ok_or_else(|| CommitError::MalformedLine {
        line_number: 1,
        line: line.to_string(),
    })
}
