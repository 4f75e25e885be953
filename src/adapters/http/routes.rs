//! Route definitions for the agent endpoints.

use std::time::Duration;

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{
    clear_conversation, create_issue_direct, health, process_message, AgentAppState,
};

/// Whole-request deadline, set well past the extractor timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Builds the application router.
///
/// # Endpoints
///
/// - `POST /agent/messages` - process one conversational message
/// - `POST /issues` - create an issue from structured form data
/// - `DELETE /agent/conversations/{user_id}` - drop conversation state
/// - `GET /health` - liveness probe
pub fn router(state: AgentAppState) -> Router {
    Router::new()
        .route("/agent/messages", post(process_message))
        .route("/issues", post(create_issue_direct))
        .route("/agent/conversations/:user_id", delete(clear_conversation))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockIntentExtractor;
    use crate::adapters::jira::MockTracker;
    use crate::domain::agent::{CollectionEngine, ConversationStore};
    use std::sync::Arc;

    #[test]
    fn router_builds_with_mock_state() {
        let engine = Arc::new(CollectionEngine::new(
            Arc::new(MockIntentExtractor::new()),
            "TJ",
        ));
        let state = AgentAppState::new(
            Arc::new(ConversationStore::new()),
            engine,
            Arc::new(MockTracker::default()),
        );
        let _router = router(state);
    }
}
