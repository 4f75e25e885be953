//! DirectIssueHandler - one-shot validation and creation for form submissions.
//!
//! The non-interactive path: a fully-formed draft arrives, gets the same
//! required-field checks as the conversation, and is created immediately when
//! valid. Conversation state is never touched.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::agent::{AgentResponse, CollectionEngine};
use crate::domain::issue::IssueDraft;
use crate::ports::TrackerClient;

use super::process_message::DispatchOutcome;

/// Command carrying a structured draft, e.g. from a web form.
#[derive(Debug, Clone)]
pub struct DirectIssueCommand {
    pub draft: IssueDraft,
}

/// Result of direct validation and (when valid) creation.
#[derive(Debug, Clone)]
pub struct DirectIssueResult {
    pub response: AgentResponse,
    /// Present when validation passed and creation was attempted.
    pub dispatch: Option<DispatchOutcome>,
}

/// Handler for direct issue creation.
pub struct DirectIssueHandler {
    engine: Arc<CollectionEngine>,
    tracker: Arc<dyn TrackerClient>,
}

impl DirectIssueHandler {
    pub fn new(engine: Arc<CollectionEngine>, tracker: Arc<dyn TrackerClient>) -> Self {
        Self { engine, tracker }
    }

    /// Validates the draft and creates the issue when ready.
    pub async fn handle(&self, cmd: DirectIssueCommand) -> DirectIssueResult {
        let response = self.engine.validate_direct(cmd.draft);
        if !response.ready {
            return DirectIssueResult {
                response,
                dispatch: None,
            };
        }

        let dispatch = match self.tracker.create_issue(&response.draft).await {
            Ok(created) => {
                info!(issue = %created.key, "created issue from direct submission");
                DispatchOutcome::Created(created)
            }
            Err(e) => {
                warn!(error = %e, "direct issue creation failed");
                DispatchOutcome::Failed {
                    message: format!("Failed to create issue: {e}"),
                }
            }
        };

        DirectIssueResult {
            response,
            dispatch: Some(dispatch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockIntentExtractor;
    use crate::adapters::jira::MockTracker;
    use crate::domain::issue::{IssueType, Priority};

    fn handler(tracker: Arc<MockTracker>) -> DirectIssueHandler {
        let engine = Arc::new(CollectionEngine::new(
            Arc::new(MockIntentExtractor::new()),
            "TJ",
        ));
        DirectIssueHandler::new(engine, tracker)
    }

    fn full_draft() -> IssueDraft {
        IssueDraft {
            issue_type: Some(IssueType::Story),
            priority: Some(Priority::Medium),
            summary: Some("Wishlist redesign".to_string()),
            description: Some("New wishlist UI for mobile checkout".to_string()),
            ..IssueDraft::default()
        }
    }

    #[tokio::test]
    async fn valid_draft_is_created_with_inferred_labels() {
        let tracker = Arc::new(MockTracker::default());
        let result = handler(tracker.clone())
            .handle(DirectIssueCommand {
                draft: full_draft(),
            })
            .await;

        assert!(result.response.ready);
        assert!(result.response.draft.labels.contains(&"wishlist".to_string()));
        assert!(matches!(
            result.dispatch,
            Some(DispatchOutcome::Created(_))
        ));
    }

    #[tokio::test]
    async fn incomplete_draft_reports_missing_and_skips_creation() {
        let tracker = Arc::new(MockTracker::default());
        let draft = IssueDraft {
            summary: Some("Only a title".to_string()),
            ..IssueDraft::default()
        };

        let result = handler(tracker.clone())
            .handle(DirectIssueCommand { draft })
            .await;

        assert!(!result.response.ready);
        assert_eq!(
            result.response.missing_fields,
            vec!["issue_type", "priority", "description"]
        );
        assert!(result.dispatch.is_none());
        assert!(tracker.ops().is_empty());
    }

    #[tokio::test]
    async fn tracker_failure_surfaces_as_failed_outcome() {
        let tracker = Arc::new(MockTracker::default());
        tracker.fail_with("project archived");

        let result = handler(tracker)
            .handle(DirectIssueCommand {
                draft: full_draft(),
            })
            .await;

        match result.dispatch.unwrap() {
            DispatchOutcome::Failed { message } => assert!(message.contains("project archived")),
            other => panic!("expected failure, got {other:?}"),
        }
    }
}
