//! Jira adapters - implementations of the TrackerClient port.
//!
//! `JiraClient` talks to a Jira Cloud site over REST with basic auth;
//! `MockTracker` stands in when no credentials are configured and backs the
//! test suite.

mod client;
mod mock;
mod models;

pub use client::JiraClient;
pub use mock::{MockTracker, RecordedOp};
