//! The engine's per-turn output contract.

use serde::{Deserialize, Serialize};

use crate::domain::issue::{Intent, IssueDraft};

/// Everything a transport needs to render one conversation turn.
///
/// Invariant: `ready == true` implies `missing_fields` is empty and
/// `next_question` is unset. Constructors uphold this; [`AgentResponse::ready`]
/// clears both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    pub intent: Intent,
    /// Extractor confidence, clamped to 0.0..=1.0.
    pub confidence: f32,
    /// Snapshot of the draft after this turn.
    pub draft: IssueDraft,
    /// Required fields still unset, in registry order.
    pub missing_fields: Vec<String>,
    /// Prompt for the next piece of information, when one is being solicited.
    pub next_question: Option<String>,
    /// True once the draft can be dispatched to the tracker.
    pub ready: bool,
    /// Human-readable reply for this turn.
    pub message: String,
    /// Error descriptor when the turn degraded; never fatal.
    pub error: Option<String>,
}

impl AgentResponse {
    /// A terminal response: all required data present, dispatch may proceed.
    pub fn ready(intent: Intent, draft: IssueDraft, message: impl Into<String>) -> Self {
        Self {
            intent,
            confidence: 1.0,
            draft,
            missing_fields: Vec::new(),
            next_question: None,
            ready: true,
            message: message.into(),
            error: None,
        }
    }

    /// A prompt soliciting one specific field.
    pub fn prompt(
        intent: Intent,
        draft: IssueDraft,
        field: impl Into<String>,
        question: impl Into<String>,
    ) -> Self {
        let question = question.into();
        Self {
            intent,
            confidence: 1.0,
            draft,
            missing_fields: vec![field.into()],
            next_question: Some(question.clone()),
            ready: false,
            message: question,
            error: None,
        }
    }

    /// The degraded response used when intent could not be established.
    pub fn unknown(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            intent: Intent::Unknown,
            confidence: 0.0,
            draft: IssueDraft::default(),
            missing_fields: Vec::new(),
            next_question: None,
            ready: false,
            message: message.into(),
            error,
        }
    }

    /// Attaches an error descriptor.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Checks the readiness invariant. Used by tests and debug assertions.
    pub fn holds_readiness_invariant(&self) -> bool {
        !self.ready || (self.missing_fields.is_empty() && self.next_question.is_none())
    }
}
