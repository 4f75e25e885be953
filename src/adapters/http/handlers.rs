//! HTTP handlers connecting axum routes to the application handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::{
    ClearConversationCommand, ClearConversationHandler, DirectIssueCommand, DirectIssueHandler,
    DispatchOutcome, ProcessMessageCommand, ProcessMessageHandler,
};
use crate::domain::agent::{CollectionEngine, ConversationStore};
use crate::domain::foundation::UserId;
use crate::ports::TrackerClient;

use super::dto::{
    ClearResponse, DirectIssueRequest, ErrorResponse, MessageRequest, TurnResponse,
};

/// Shared application state for the agent endpoints.
#[derive(Clone)]
pub struct AgentAppState {
    store: Arc<ConversationStore>,
    engine: Arc<CollectionEngine>,
    tracker: Arc<dyn TrackerClient>,
}

impl AgentAppState {
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

    fn process_message_handler(&self) -> ProcessMessageHandler {
        ProcessMessageHandler::new(self.store.clone(), self.engine.clone(), self.tracker.clone())
    }

    fn direct_issue_handler(&self) -> DirectIssueHandler {
        DirectIssueHandler::new(self.engine.clone(), self.tracker.clone())
    }

    fn clear_conversation_handler(&self) -> ClearConversationHandler {
        ClearConversationHandler::new(self.store.clone())
    }
}

/// Process one conversational message.
///
/// POST /agent/messages
pub async fn process_message(
    State(app_state): State<AgentAppState>,
    Json(req): Json<MessageRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    if req.message.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Message is required")),
        ));
    }
    let user_id = UserId::new(req.user_id).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(e.to_string())),
        )
    })?;

    let result = app_state
        .process_message_handler()
        .handle(ProcessMessageCommand {
            user_id,
            message: req.message,
        })
        .await;

    Ok(Json(TurnResponse::from_parts(
        result.response,
        result.dispatch,
    )))
}

/// Create an issue from structured form data.
///
/// POST /issues
pub async fn create_issue_direct(
    State(app_state): State<AgentAppState>,
    Json(req): Json<DirectIssueRequest>,
) -> impl IntoResponse {
    let result = app_state
        .direct_issue_handler()
        .handle(DirectIssueCommand { draft: req.draft })
        .await;

    let status = match &result.dispatch {
        None => StatusCode::BAD_REQUEST,
        Some(DispatchOutcome::Failed { .. }) => StatusCode::BAD_GATEWAY,
        Some(_) => StatusCode::CREATED,
    };
    (
        status,
        Json(TurnResponse::from_parts(result.response, result.dispatch)),
    )
}

/// Drop a user's conversation state.
///
/// DELETE /agent/conversations/{user_id}
pub async fn clear_conversation(
    State(app_state): State<AgentAppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let user_id = UserId::new(user_id).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(e.to_string())),
        )
    })?;

    let cleared = app_state
        .clear_conversation_handler()
        .handle(ClearConversationCommand {
            user_id: user_id.clone(),
        });

    Ok(Json(ClearResponse {
        user_id: user_id.to_string(),
        cleared,
    }))
}

/// Liveness probe.
///
/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
