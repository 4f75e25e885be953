//! Integration tests for the HTTP wire contract.
//!
//! Drive the router directly with tower's oneshot and assert the turn
//! object's shape: snake_case intents, `extracted_data` omitting unset
//! fields, `ready_for_jira`, and the action report after dispatch.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use jira_sherpa::adapters::ai::MockIntentExtractor;
use jira_sherpa::adapters::http::{router, AgentAppState};
use jira_sherpa::adapters::jira::MockTracker;
use jira_sherpa::domain::agent::{CollectionEngine, ConversationStore};
use jira_sherpa::domain::issue::{Intent, IssueDraft, IssueType, Priority};
use jira_sherpa::ports::Extraction;

fn app(extractor: MockIntentExtractor) -> axum::Router {
    let engine = Arc::new(CollectionEngine::new(Arc::new(extractor), "TJ"));
    let state = AgentAppState::new(
        Arc::new(ConversationStore::new()),
        engine,
        Arc::new(MockTracker::new("TJ")),
    );
    router(state)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn message_turn_returns_the_contract_shape() {
    let extraction = Extraction::of_intent(Intent::CreateIssue, "Let's get started.")
        .with_draft(IssueDraft {
            summary: Some("Fix DB timeout".to_string()),
            ..IssueDraft::default()
        })
        .with_confidence(0.93);
    let app = app(MockIntentExtractor::new().with_extraction(extraction));

    let response = app
        .oneshot(post_json(
            "/agent/messages",
            json!({"user_id": "alice", "message": "create a task for the DB timeout"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;

    assert_eq!(body["intent"], "create_issue");
    assert_eq!(body["ready_for_jira"], false);
    assert_eq!(body["missing_fields"][0], "issue_type");
    assert!(body["next_question"].as_str().unwrap().contains("1. Task"));
    // Only collected fields appear in the snapshot.
    let extracted = body["extracted_data"].as_object().unwrap();
    assert_eq!(extracted.len(), 1);
    assert_eq!(extracted["summary"], "Fix DB timeout");
    assert!(body.get("action").is_none());
}

#[tokio::test]
async fn empty_message_is_rejected() {
    let app = app(MockIntentExtractor::new());

    let response = app
        .oneshot(post_json(
            "/agent/messages",
            json!({"user_id": "alice", "message": "   "}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn ready_turn_carries_the_action_report() {
    let extraction = Extraction::of_intent(Intent::CreateIssue, "Creating it now.")
        .with_draft(IssueDraft {
            issue_type: Some(IssueType::Task),
            priority: Some(Priority::High),
            summary: Some("Fix DB timeout".to_string()),
            description: Some("Queries time out".to_string()),
            ..IssueDraft::default()
        })
        .with_ready(true);
    let app = app(MockIntentExtractor::new().with_extraction(extraction));

    let response = app
        .oneshot(post_json(
            "/agent/messages",
            json!({"message": "create it with all details"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;

    assert_eq!(body["ready_for_jira"], true);
    assert_eq!(body["action"]["success"], true);
    assert_eq!(body["action"]["issue_key"], "TJ-1");
    assert!(body["action"]["issue_url"]
        .as_str()
        .unwrap()
        .contains("TJ-1"));
}

#[tokio::test]
async fn direct_issue_endpoint_validates_and_creates() {
    let app = app(MockIntentExtractor::new());

    let response = app
        .oneshot(post_json(
            "/issues",
            json!({
                "issue_type": "Task",
                "priority": "High",
                "summary": "Fix DB timeout",
                "description": "API timeout on login for mobile users"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["ready_for_jira"], true);
    assert_eq!(body["action"]["success"], true);
    // Labels were auto-generated from the description.
    let labels = body["extracted_data"]["labels"].as_array().unwrap();
    assert!(labels.contains(&json!("api")));
    assert!(labels.contains(&json!("mobile")));
    // And the project key was defaulted.
    assert_eq!(body["extracted_data"]["project_key"], "TJ");
}

#[tokio::test]
async fn direct_issue_endpoint_rejects_incomplete_drafts() {
    let app = app(MockIntentExtractor::new());

    let response = app
        .oneshot(post_json("/issues", json!({"summary": "Only a title"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["ready_for_jira"], false);
    let missing: Vec<&str> = body["missing_fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(missing, vec!["issue_type", "priority", "description"]);
}

#[tokio::test]
async fn clear_endpoint_reports_whether_state_existed() {
    let app = app(
        MockIntentExtractor::new()
            .with_extraction(Extraction::of_intent(Intent::CreateIssue, "Starting.")),
    );

    // Establish state for alice.
    let response = app
        .clone()
        .oneshot(post_json(
            "/agent/messages",
            json!({"user_id": "alice", "message": "create an issue"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cleared = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/agent/conversations/alice")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(cleared).await;
    assert_eq!(body["cleared"], true);

    let again = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/agent/conversations/alice")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(again).await;
    assert_eq!(body["cleared"], false);
}

#[tokio::test]
async fn health_endpoint_answers() {
    let app = app(MockIntentExtractor::new());

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}
