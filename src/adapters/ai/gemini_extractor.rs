//! Gemini Extractor - IntentExtractor implementation over the Gemini API.
//!
//! Sends the system prompt plus the user message to a `generateContent`
//! endpoint and parses the model's JSON answer into an [`Extraction`]. Models
//! routinely wrap JSON in markdown fences or preamble despite instructions,
//! so the response text is scanned for a fenced block first and a balanced
//! JSON object second. Any shape the parser cannot digest becomes
//! [`ExtractorError::Malformed`]; the engine degrades it, never crashes.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::domain::issue::{Intent, IssueDraft};
use crate::ports::{Extraction, ExtractionContext, ExtractorError, IntentExtractor};

use super::prompts::build_system_prompt;

/// Configuration for the Gemini extractor.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g. "gemini-1.5-flash").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gemini-1.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// IntentExtractor backed by the Gemini generateContent API.
pub struct GeminiExtractor {
    config: GeminiConfig,
    client: Client,
}

impl GeminiExtractor {
    /// Creates a new extractor with the given configuration.
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");
        Self { config, client }
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    fn to_request(&self, ctx: &ExtractionContext<'_>) -> GeminiRequest {
        GeminiRequest {
            system_instruction: GeminiContent {
                role: None,
                parts: vec![GeminiPart {
                    text: build_system_prompt(ctx),
                }],
            },
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: format!("User message: {}", ctx.message),
                }],
            }],
            generation_config: GenerationConfig { temperature: 0.1 },
        }
    }

    /// Parses the model's answer text into an extraction.
    fn parse_response_text(text: &str) -> Result<Extraction, ExtractorError> {
        let payload = extract_json_payload(text);
        let wire: WireExtraction = serde_json::from_str(&payload)
            .map_err(|e| ExtractorError::Malformed(e.to_string()))?;
        Ok(wire.into())
    }
}

#[async_trait]
impl IntentExtractor for GeminiExtractor {
    async fn extract(&self, ctx: ExtractionContext<'_>) -> Result<Extraction, ExtractorError> {
        let request = self.to_request(&ctx);

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ExtractorError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else {
                    ExtractorError::Provider(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ExtractorError::AuthenticationFailed);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractorError::Provider(format!(
                "HTTP {status}: {body}"
            )));
        }

        let body: GeminiResponse = response
            .json()
            .await
            .map_err(|e| ExtractorError::Malformed(e.to_string()))?;

        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| ExtractorError::Malformed("response carried no candidates".to_string()))?;

        debug!(chars = text.len(), "parsing extractor answer");
        Self::parse_response_text(&text)
    }
}

/// Pulls the JSON object out of a model answer that may wrap it in markdown
/// fences or surrounding prose. Falls back to the trimmed input.
fn extract_json_payload(text: &str) -> String {
    let trimmed = text.trim();

    for fence in ["```json", "```"] {
        if let Some(start) = trimmed.find(fence) {
            let after = &trimmed[start + fence.len()..];
            if let Some(end) = after.find("```") {
                let inner = after[..end].trim();
                if !inner.is_empty() {
                    return inner.to_string();
                }
            }
        }
    }

    if let Some(start) = trimmed.find('{') {
        if let Some(balanced) = extract_balanced_object(trimmed, start) {
            return balanced;
        }
    }

    trimmed.to_string()
}

/// Scans for the matching close brace, respecting strings and escapes.
fn extract_balanced_object(s: &str, start: usize) -> Option<String> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, c) in s[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(s[start..start + i + c.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }
    None
}

// ── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GeminiRequest {
    #[serde(rename = "systemInstruction")]
    system_instruction: GeminiContent,
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

/// The JSON contract the model is instructed to produce.
#[derive(Debug, Deserialize)]
struct WireExtraction {
    intent: Intent,
    #[serde(default)]
    confidence: f32,
    #[serde(default)]
    extracted_data: IssueDraft,
    #[serde(default)]
    missing_fields: Vec<String>,
    #[serde(default)]
    next_question: Option<String>,
    #[serde(default)]
    ready_for_jira: bool,
    #[serde(default)]
    response_message: String,
    #[serde(default)]
    error: Option<String>,
}

impl From<WireExtraction> for Extraction {
    fn from(wire: WireExtraction) -> Self {
        Extraction {
            intent: wire.intent,
            confidence: wire.confidence.clamp(0.0, 1.0),
            draft: wire.extracted_data,
            missing_fields: wire.missing_fields,
            next_question: wire.next_question,
            ready: wire.ready_for_jira,
            reply: wire.response_message,
            error: wire.error,
        }
    }
}
