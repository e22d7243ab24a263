//! Issue tracker integration for ticketmatch.
//!
//! This crate provides:
//! - [`TicketRecord`]: a ticket filed against a release
//! - [`parse_search_response`]: ingestion of a Jira search response
//! - [`JiraClient`]: the search request itself
//! - [`browse_url`]: deep links for viewing a set of tickets

mod client;
mod error;
mod query;
mod response;
mod ticket;

pub use client::JiraClient;
pub use error::{TrackerError, TrackerResult};
pub use query::{FieldMap, SearchQuery, SearchRequest, browse_url};
pub use response::parse_search_response;
pub use ticket::TicketRecord;
