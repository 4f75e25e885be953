//! ProcessMessageHandler - run one conversation turn and dispatch on readiness.
//!
//! Serializes access per user by locking the store entry for the whole turn,
//! runs the collection engine, and executes ready responses against the
//! tracker. Tracker failures become a failed outcome; conversation state is
//! never reset by a failed dispatch, and no fault escapes as anything other
//! than data.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::agent::{AgentResponse, CollectionEngine, ConversationStore};
use crate::domain::foundation::UserId;
use crate::domain::issue::{Intent, IssueDraft};
use crate::ports::{CreatedIssue, IssueDetails, SearchResults, TrackerClient};

/// How many rows a conversational search returns.
const SEARCH_LIMIT: u32 = 5;

/// Command to process one user message.
#[derive(Debug, Clone)]
pub struct ProcessMessageCommand {
    pub user_id: UserId,
    pub message: String,
}

/// What dispatch did once a turn reached readiness.
#[derive(Debug, Clone)]
pub enum DispatchOutcome {
    Created(CreatedIssue),
    Updated { key: String },
    Fetched(IssueDetails),
    Found(SearchResults),
    Failed { message: String },
}

impl DispatchOutcome {
    /// True unless the tracker call failed.
    pub fn is_success(&self) -> bool {
        !matches!(self, DispatchOutcome::Failed { .. })
    }
}

/// Result of one processed turn.
#[derive(Debug, Clone)]
pub struct ProcessMessageResult {
    pub response: AgentResponse,
    /// Present only when the turn reached readiness and dispatch ran.
    pub dispatch: Option<DispatchOutcome>,
}

/// Handler for conversational turns.
pub struct ProcessMessageHandler {
    store: Arc<ConversationStore>,
    engine: Arc<CollectionEngine>,
    tracker: Arc<dyn TrackerClient>,
}

impl ProcessMessageHandler {
    pub fn new(
        store: Arc<ConversationStore>,
        engine: Arc<CollectionEngine>,
        tracker: Arc<dyn TrackerClient>,
    ) -> Self {
        Self {
            store,
            engine,
            tracker,
        }
    }

    /// Runs one turn. Infallible: every failure mode is folded into the
    /// response or the dispatch outcome.
    pub async fn handle(&self, cmd: ProcessMessageCommand) -> ProcessMessageResult {
        let entry = self.store.entry(&cmd.user_id);
        let mut state = entry.lock().await;

        let response = self.engine.process_turn(&mut state, &cmd.message).await;
        if !response.ready {
            return ProcessMessageResult {
                response,
                dispatch: None,
            };
        }

        let dispatch = self.dispatch(&response).await;
        info!(
            user = %cmd.user_id,
            intent = %response.intent,
            success = dispatch.is_success(),
            "dispatched ready turn"
        );
        ProcessMessageResult {
            response,
            dispatch: Some(dispatch),
        }
    }

    /// Executes a ready response against the tracker.
    async fn dispatch(&self, response: &AgentResponse) -> DispatchOutcome {
        let draft = &response.draft;

        // An update that names no issue mid-create is the user still
        // describing the issue being created.
        let intent = if response.intent == Intent::UpdateIssue && draft.issue_key.is_none() {
            info!("update intent without issue key; continuing create flow");
            Intent::CreateIssue
        } else {
            response.intent
        };

        match intent {
            Intent::CreateIssue => match self.tracker.create_issue(draft).await {
                Ok(created) => DispatchOutcome::Created(created),
                Err(e) => {
                    warn!(error = %e, "issue creation failed");
                    DispatchOutcome::Failed {
                        message: format!("Failed to create issue: {e}"),
                    }
                }
            },

            Intent::UpdateIssue => {
                // issue_key presence was checked above.
                let key = draft.issue_key.clone().unwrap_or_default();
                match self.tracker.update_issue(&key, draft).await {
                    Ok(()) => DispatchOutcome::Updated { key },
                    Err(e) => {
                        warn!(issue = %key, error = %e, "issue update failed");
                        DispatchOutcome::Failed {
                            message: format!("Failed to update issue {key}: {e}"),
                        }
                    }
                }
            }

            Intent::QueryIssue => {
                let Some(key) = draft.issue_key.clone() else {
                    return DispatchOutcome::Failed {
                        message: "No issue key to look up".to_string(),
                    };
                };
                match self.tracker.get_issue(&key).await {
                    Ok(details) => DispatchOutcome::Fetched(details),
                    Err(e) => DispatchOutcome::Failed {
                        message: format!("Could not find issue {key}: {e}"),
                    },
                }
            }

            Intent::SearchIssues => {
                let jql = build_search_jql(draft);
                match self.tracker.search_issues(&jql, SEARCH_LIMIT).await {
                    Ok(results) => DispatchOutcome::Found(results),
                    Err(e) => DispatchOutcome::Failed {
                        message: format!("Search failed: {e}"),
                    },
                }
            }

            Intent::Help | Intent::Unknown => DispatchOutcome::Failed {
                message: format!("Nothing to execute for intent '{intent}'"),
            },
        }
    }
}

/// Assembles a JQL query from whatever the draft narrowed down.
fn build_search_jql(draft: &IssueDraft) -> String {
    let mut parts = Vec::new();
    if let Some(priority) = draft.priority {
        parts.push(format!("priority = \"{}\"", priority.as_str()));
    }
    if let Some(issue_type) = draft.issue_type {
        parts.push(format!("issuetype = \"{}\"", issue_type.as_str()));
    }
    if let Some(assignee) = &draft.assignee {
        if assignee.contains('@') {
            parts.push(format!("assignee = \"{assignee}\""));
        }
    }
    if parts.is_empty() {
        parts.push("updated >= -7d".to_string());
    }
    format!("{} ORDER BY updated DESC", parts.join(" AND "))
}
