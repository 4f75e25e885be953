//! Intent Extractor Port - interface for natural-language understanding.
//!
//! Given a raw user message and conversation context, an implementation
//! returns a best-guess structured intent, a confidence score, a partial
//! draft, and a natural-language reply. The extractor is allowed to be wrong,
//! slow, or incoherent; the collection engine validates everything it returns
//! and degrades gracefully when the call fails outright.

use async_trait::async_trait;

use crate::domain::agent::HistoryEntry;
use crate::domain::issue::{Intent, IssueDraft, IssueField};

/// Conversation context handed to the extractor alongside the message.
#[derive(Debug, Clone)]
pub struct ExtractionContext<'a> {
    /// The raw user message for this turn.
    pub message: &'a str,
    /// Trailing history entries, oldest first.
    pub history: &'a [HistoryEntry],
    /// Snapshot of the partially collected draft.
    pub draft: &'a IssueDraft,
    /// The field the engine was soliciting, if any.
    pub awaiting_field: Option<IssueField>,
}

/// Structured result of one extraction call.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub intent: Intent,
    /// 0.0..=1.0; implementations clamp before returning.
    pub confidence: f32,
    /// Fields the extractor managed to pull from the message.
    pub draft: IssueDraft,
    /// Field names the extractor believes are still needed.
    pub missing_fields: Vec<String>,
    /// Follow-up question proposed by the extractor.
    pub next_question: Option<String>,
    /// The extractor's own readiness claim; the engine re-derives it.
    pub ready: bool,
    /// Natural-language reply for the user.
    pub reply: String,
    /// Error descriptor the extractor chose to surface.
    pub error: Option<String>,
}

impl Extraction {
    /// A minimal extraction carrying only an intent and a reply. Useful for
    /// tests and for degraded responses.
    pub fn of_intent(intent: Intent, reply: impl Into<String>) -> Self {
        Self {
            intent,
            confidence: 1.0,
            draft: IssueDraft::default(),
            missing_fields: Vec::new(),
            next_question: None,
            ready: false,
            reply: reply.into(),
            error: None,
        }
    }

    /// Sets the partial draft.
    pub fn with_draft(mut self, draft: IssueDraft) -> Self {
        self.draft = draft;
        self
    }

    /// Sets the confidence score.
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }

    /// Marks the extraction as ready for dispatch.
    pub fn with_ready(mut self, ready: bool) -> Self {
        self.ready = ready;
        self
    }

    /// Sets the extractor's missing-field list.
    pub fn with_missing_fields(mut self, fields: Vec<String>) -> Self {
        self.missing_fields = fields;
        self
    }
}

/// Failures of the extraction call.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExtractorError {
    /// The provider answered but the content could not be parsed into the
    /// expected shape.
    #[error("malformed extractor output: {0}")]
    Malformed(String),

    /// The provider call itself failed (HTTP error, network trouble).
    #[error("extractor provider error: {0}")]
    Provider(String),

    /// The call exceeded the configured timeout.
    #[error("extractor timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Credentials were rejected.
    #[error("extractor authentication failed")]
    AuthenticationFailed,
}

/// Port for LLM-backed intent and field extraction.
#[async_trait]
pub trait IntentExtractor: Send + Sync {
    /// Extracts intent and partial issue data from a user message.
    async fn extract(&self, ctx: ExtractionContext<'_>) -> Result<Extraction, ExtractorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn of_intent_builds_minimal_extraction() {
        let e = Extraction::of_intent(Intent::Help, "Here is what I can do");
        assert_eq!(e.intent, Intent::Help);
        assert_eq!(e.confidence, 1.0);
        assert!(!e.ready);
        assert!(e.draft == IssueDraft::default());
    }

    #[test]
    fn builders_compose() {
        let draft = IssueDraft {
            summary: Some("Fix DB timeout".to_string()),
            ..IssueDraft::default()
        };
        let e = Extraction::of_intent(Intent::CreateIssue, "Got it")
            .with_draft(draft.clone())
            .with_confidence(0.9)
            .with_ready(false)
            .with_missing_fields(vec!["description".to_string()]);
        assert_eq!(e.draft, draft);
        assert_eq!(e.confidence, 0.9);
        assert_eq!(e.missing_fields, vec!["description"]);
    }

    #[test]
    fn errors_display_their_cause() {
        let err = ExtractorError::Malformed("unexpected token".to_string());
        assert!(err.to_string().contains("unexpected token"));
        let err = ExtractorError::Timeout { timeout_secs: 30 };
        assert!(err.to_string().contains("30"));
    }
}
