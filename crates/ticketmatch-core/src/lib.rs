//! Core library for ticketmatch.
//!
//! This crate reconciles a classified commit log with the tickets filed
//! against a release and produces the report sections:
//! - commit tokens unknown to the tracker
//! - unresolved tickets with and without code in history
//! - tickets missing release notes

mod error;
mod ledger;
pub mod policy;
mod reconcile;
mod report;

pub use error::{CoreError, CoreResult};
pub use ledger::{TicketLedger, TrackedTicket};
pub use policy::ReportPolicy;
pub use reconcile::{
    TicketSummary, UnknownToken, UnknownTokens, UnresolvedPartition, compute_net_presence,
    missing_release_notes, partition_unresolved, unknown_commit_tokens,
};
pub use report::{ListedCommit, ListedRevert, Outcome, Reconciler, Report, TicketListing};
