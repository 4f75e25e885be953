//! HTTP DTOs for the agent endpoints.
//!
//! These types pin down the external wire contract independently of domain
//! types: one turn object with `extracted_data` omitting unset fields,
//! `ready_for_jira` as the readiness flag, and an optional dispatch report.

use serde::{Deserialize, Serialize};

use crate::application::handlers::DispatchOutcome;
use crate::domain::agent::AgentResponse;
use crate::domain::issue::{Intent, IssueDraft};
use crate::ports::{IssueDetails, IssueSummary};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to process one conversational message.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageRequest {
    /// Stable key for the conversation; defaults for single-user clients.
    #[serde(default = "default_user_id")]
    pub user_id: String,
    pub message: String,
}

fn default_user_id() -> String {
    "api_user".to_string()
}

/// Request to create an issue from structured form data. The shape matches
/// the draft's wire form; labels are optional manual additions.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectIssueRequest {
    #[serde(flatten)]
    pub draft: IssueDraft,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One conversation turn, the externally observable contract of the core.
#[derive(Debug, Clone, Serialize)]
pub struct TurnResponse {
    pub intent: Intent,
    pub confidence: f32,
    pub extracted_data: IssueDraft,
    pub missing_fields: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_question: Option<String>,
    pub ready_for_jira: bool,
    pub response_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Present only when the turn reached readiness and dispatch ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionReport>,
}

impl TurnResponse {
    /// Builds the wire turn from an engine response and optional dispatch.
    pub fn from_parts(response: AgentResponse, dispatch: Option<DispatchOutcome>) -> Self {
        Self {
            intent: response.intent,
            confidence: response.confidence,
            extracted_data: response.draft,
            missing_fields: response.missing_fields,
            next_question: response.next_question,
            ready_for_jira: response.ready,
            response_message: response.message,
            error: response.error,
            action: dispatch.map(ActionReport::from),
        }
    }
}

/// What dispatch did, flattened for transports.
#[derive(Debug, Clone, Serialize)]
pub struct ActionReport {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<IssueDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<IssueSummary>>,
}

impl From<DispatchOutcome> for ActionReport {
    fn from(outcome: DispatchOutcome) -> Self {
        match outcome {
            DispatchOutcome::Created(created) => Self {
                success: true,
                message: format!("Created issue {}", created.key),
                issue_key: Some(created.key),
                issue_url: Some(created.url),
                issue: None,
                issues: None,
            },
            DispatchOutcome::Updated { key } => Self {
                success: true,
                message: format!("Updated issue {key}"),
                issue_key: Some(key),
                issue_url: None,
                issue: None,
                issues: None,
            },
            DispatchOutcome::Fetched(details) => Self {
                success: true,
                message: format!("{}: {}", details.key, details.summary),
                issue_key: Some(details.key.clone()),
                issue_url: Some(details.url.clone()),
                issue: Some(details),
                issues: None,
            },
            DispatchOutcome::Found(results) => Self {
                success: true,
                message: format!("Found {} issues", results.issues.len()),
                issue_key: None,
                issue_url: None,
                issue: None,
                issues: Some(results.issues),
            },
            DispatchOutcome::Failed { message } => Self {
                success: false,
                message,
                issue_key: None,
                issue_url: None,
                issue: None,
                issues: None,
            },
        }
    }
}

/// Response for a conversation clear.
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub user_id: String,
    pub cleared: bool,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::issue::{IssueType, Priority};
    use crate::ports::CreatedIssue;

    #[test]
    fn message_request_defaults_user_id() {
        let req: MessageRequest =
            serde_json::from_str(r#"{"message": "create a task"}"#).unwrap();
        assert_eq!(req.user_id, "api_user");
        assert_eq!(req.message, "create a task");
    }

    #[test]
    fn direct_request_flattens_draft_fields() {
        let req: DirectIssueRequest = serde_json::from_str(
            r#"{
                "issue_type": "Task",
                "priority": "High",
                "summary": "Fix DB timeout",
                "description": "Queries time out",
                "labels": ["backend"]
            }"#,
        )
        .unwrap();
        assert_eq!(req.draft.issue_type, Some(IssueType::Task));
        assert_eq!(req.draft.priority, Some(Priority::High));
        assert_eq!(req.draft.labels, vec!["backend"]);
    }

    #[test]
    fn turn_response_omits_unset_draft_fields() {
        let response = AgentResponse::prompt(
            Intent::CreateIssue,
            IssueDraft {
                summary: Some("Fix DB timeout".to_string()),
                ..IssueDraft::default()
            },
            "priority",
            "Select Priority:",
        );
        let turn = TurnResponse::from_parts(response, None);
        let json = serde_json::to_value(&turn).unwrap();

        assert_eq!(json["intent"], "create_issue");
        assert_eq!(json["ready_for_jira"], false);
        assert_eq!(json["missing_fields"][0], "priority");
        let extracted = json["extracted_data"].as_object().unwrap();
        assert_eq!(extracted.len(), 1);
        assert!(extracted.contains_key("summary"));
        assert!(json.get("action").is_none());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn created_outcome_reports_key_and_url() {
        let report = ActionReport::from(DispatchOutcome::Created(CreatedIssue {
            key: "TJ-42".to_string(),
            url: "https://test.atlassian.net/browse/TJ-42".to_string(),
        }));
        assert!(report.success);
        assert_eq!(report.issue_key.as_deref(), Some("TJ-42"));
        assert!(report.message.contains("TJ-42"));
    }

    #[test]
    fn failed_outcome_reports_failure() {
        let report = ActionReport::from(DispatchOutcome::Failed {
            message: "Failed to create issue: tracker returned 500".to_string(),
        });
        assert!(!report.success);
        assert!(report.message.contains("500"));
    }
}
