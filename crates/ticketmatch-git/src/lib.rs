//! Git log source for ticketmatch.
//!
//! This crate provides Git operations:
//! - Repository discovery
//! - One-line commit logs for a revision range

mod error;
mod repository;

pub use error::{GitError, GitResult};
pub use repository::Repository;
