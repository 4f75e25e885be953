//! Tracker Client Port - interface to the issue tracker's REST API.
//!
//! The engine only calls these operations after a draft has reached
//! readiness. Failures are surfaced to the caller as data; there is no retry
//! here and conversation state is never reset by a failed dispatch.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::issue::IssueDraft;

/// Outcome of a successful issue creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedIssue {
    pub key: String,
    pub url: String,
}

/// Full details of a fetched issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueDetails {
    pub key: String,
    pub summary: String,
    pub status: String,
    pub priority: String,
    pub assignee: String,
    pub issue_type: String,
    pub description: String,
    pub created: String,
    pub updated: String,
    pub url: String,
}

/// One row of a search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSummary {
    pub key: String,
    pub summary: String,
    pub status: String,
    pub priority: String,
    pub assignee: String,
    pub url: String,
}

/// Search outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    pub total: u64,
    pub issues: Vec<IssueSummary>,
}

/// Failures of tracker operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TrackerError {
    /// The tracker answered with a non-success status.
    #[error("tracker returned {status}: {message}")]
    Http { status: u16, message: String },

    /// The request never completed.
    #[error("tracker network error: {0}")]
    Network(String),

    /// The requested issue does not exist.
    #[error("issue not found: {0}")]
    NotFound(String),

    /// Credentials were rejected.
    #[error("tracker authentication failed")]
    AuthenticationFailed,

    /// The response body could not be decoded.
    #[error("tracker response parse error: {0}")]
    Parse(String),
}

/// Port for issue tracker operations.
#[async_trait]
pub trait TrackerClient: Send + Sync {
    /// Creates an issue from a ready draft.
    async fn create_issue(&self, draft: &IssueDraft) -> Result<CreatedIssue, TrackerError>;

    /// Applies draft fields to an existing issue.
    async fn update_issue(&self, key: &str, draft: &IssueDraft) -> Result<(), TrackerError>;

    /// Fetches an issue by key.
    async fn get_issue(&self, key: &str) -> Result<IssueDetails, TrackerError>;

    /// Runs a JQL search.
    async fn search_issues(&self, jql: &str, limit: u32) -> Result<SearchResults, TrackerError>;

    /// Adds a plain-text comment to an issue.
    async fn add_comment(&self, key: &str, body: &str) -> Result<(), TrackerError>;
}
