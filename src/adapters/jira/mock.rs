//! Mock tracker for offline mode and tests.
//!
//! Hands out sequential issue keys, remembers what it was asked to do, and
//! never touches the network. Used automatically when no Jira credentials are
//! configured so the conversation flow stays exercisable end to end.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::domain::issue::{infer_labels, IssueDraft};
use crate::ports::{
    CreatedIssue, IssueDetails, IssueSummary, SearchResults, TrackerClient, TrackerError,
};

/// Operations the mock has observed.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedOp {
    Create(IssueDraft),
    Update { key: String, draft: IssueDraft },
    Get(String),
    Search { jql: String, limit: u32 },
    Comment { key: String, body: String },
}

/// In-memory TrackerClient implementation.
#[derive(Debug)]
pub struct MockTracker {
    project_key: String,
    counter: AtomicU64,
    ops: Mutex<Vec<RecordedOp>>,
    fail_with: Mutex<Option<String>>,
}

impl MockTracker {
    /// Creates a mock tracker issuing keys in the given project.
    pub fn new(project_key: impl Into<String>) -> Self {
        Self {
            project_key: project_key.into(),
            counter: AtomicU64::new(0),
            ops: Mutex::new(Vec::new()),
            fail_with: Mutex::new(None),
        }
    }

    /// Makes every subsequent call fail with the given message.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.fail_with.lock().expect("mock tracker lock poisoned") = Some(message.into());
    }

    /// Operations observed so far.
    pub fn ops(&self) -> Vec<RecordedOp> {
        self.ops.lock().expect("mock tracker lock poisoned").clone()
    }

    fn record(&self, op: RecordedOp) -> Result<(), TrackerError> {
        if let Some(message) = self
            .fail_with
            .lock()
            .expect("mock tracker lock poisoned")
            .clone()
        {
            return Err(TrackerError::Http {
                status: 500,
                message,
            });
        }
        self.ops.lock().expect("mock tracker lock poisoned").push(op);
        Ok(())
    }

    fn url(&self, key: &str) -> String {
        format!("https://mock-jira.invalid/browse/{key}")
    }
}

impl Default for MockTracker {
    fn default() -> Self {
        Self::new("TJ")
    }
}

#[async_trait]
impl TrackerClient for MockTracker {
    async fn create_issue(&self, draft: &IssueDraft) -> Result<CreatedIssue, TrackerError> {
        let mut draft = draft.clone();
        if draft.labels.is_empty() {
            if let Some(description) = draft.description.clone() {
                draft.add_labels(infer_labels(&description));
            }
        }
        self.record(RecordedOp::Create(draft.clone()))?;

        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let project = draft
            .project_key
            .clone()
            .unwrap_or_else(|| self.project_key.clone());
        let key = format!("{project}-{n}");
        Ok(CreatedIssue {
            url: self.url(&key),
            key,
        })
    }

    async fn update_issue(&self, key: &str, draft: &IssueDraft) -> Result<(), TrackerError> {
        self.record(RecordedOp::Update {
            key: key.to_string(),
            draft: draft.clone(),
        })
    }

    async fn get_issue(&self, key: &str) -> Result<IssueDetails, TrackerError> {
        self.record(RecordedOp::Get(key.to_string()))?;
        Ok(IssueDetails {
            key: key.to_string(),
            summary: "Mock issue summary".to_string(),
            status: "To Do".to_string(),
            priority: "Medium".to_string(),
            assignee: "Mock User".to_string(),
            issue_type: "Task".to_string(),
            description: "This is a mock issue".to_string(),
            created: "2024-01-01T00:00:00.000+0000".to_string(),
            updated: "2024-01-01T00:00:00.000+0000".to_string(),
            url: self.url(key),
        })
    }

    async fn search_issues(&self, jql: &str, limit: u32) -> Result<SearchResults, TrackerError> {
        self.record(RecordedOp::Search {
            jql: jql.to_string(),
            limit,
        })?;
        let issues = vec![
            IssueSummary {
                key: format!("{}-123", self.project_key),
                summary: "Mock task".to_string(),
                status: "In Progress".to_string(),
                priority: "High".to_string(),
                assignee: "Mock User".to_string(),
                url: self.url(&format!("{}-123", self.project_key)),
            },
            IssueSummary {
                key: format!("{}-124", self.project_key),
                summary: "Mock story".to_string(),
                status: "To Do".to_string(),
                priority: "Medium".to_string(),
                assignee: "Unassigned".to_string(),
                url: self.url(&format!("{}-124", self.project_key)),
            },
        ];
        let issues: Vec<_> = issues.into_iter().take(limit as usize).collect();
        Ok(SearchResults {
            total: issues.len() as u64,
            issues,
        })
    }

    async fn add_comment(&self, key: &str, body: &str) -> Result<(), TrackerError> {
        self.record(RecordedOp::Comment {
            key: key.to_string(),
            body: body.to_string(),
        })
    }
}
