//! Service entry point: configuration, adapter wiring, HTTP serving.

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use jira_sherpa::adapters::ai::{GeminiConfig, GeminiExtractor, MockIntentExtractor};
use jira_sherpa::adapters::http::{router, AgentAppState};
use jira_sherpa::adapters::jira::{JiraClient, MockTracker};
use jira_sherpa::config::AppConfig;
use jira_sherpa::domain::agent::{CollectionEngine, ConversationStore};
use jira_sherpa::ports::{IntentExtractor, TrackerClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load()?;
    config.validate()?;

    let extractor: Arc<dyn IntentExtractor> = if config.ai.has_api_key() {
        let key = config.ai.api_key.clone().unwrap_or_default();
        let gemini = GeminiConfig::new(key)
            .with_model(config.ai.model.clone())
            .with_base_url(config.ai.base_url.clone())
            .with_timeout(config.ai.timeout());
        info!(model = %config.ai.model, "intent extractor: Gemini");
        Arc::new(GeminiExtractor::new(gemini))
    } else {
        warn!("no AI API key configured; using the scripted mock extractor");
        Arc::new(MockIntentExtractor::new())
    };

    let tracker: Arc<dyn TrackerClient> = if config.jira.is_configured() {
        info!(project = %config.jira.project_key, "tracker: Jira REST");
        Arc::new(JiraClient::new(config.jira.clone()))
    } else {
        warn!("Jira credentials not configured; running in mock mode, no issues will be created");
        Arc::new(MockTracker::new(config.jira.project_key.clone()))
    };

    let engine = Arc::new(CollectionEngine::new(
        extractor,
        config.jira.project_key.clone(),
    ));
    let store = Arc::new(ConversationStore::new());
    let state = AgentAppState::new(store, engine, tracker);

    let addr = config.server.socket_addr();
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
