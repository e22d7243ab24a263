//! Commit log classification for ticketmatch.
//!
//! This crate turns `git log --oneline` style text into ticket-keyed groups
//! and links revert commits to the commits they revert:
//! - [`parse_line`]: classifies a single log line
//! - [`CommitLog`]: the grouped entry arena and revert association
//! - [`CommitEntry`]: a single parsed commit

mod entry;
mod error;
mod log;
mod parse;

pub use entry::{CommitEntry, EntryId};
pub use error::{CommitError, CommitResult};
pub use log::CommitLog;
pub use parse::{ParsedLine, REVERT_KEY, UNMARKED_KEY, parse_line};
