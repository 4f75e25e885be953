//! Mock Intent Extractor for testing and offline runs.
//!
//! Replays a queue of scripted results and records every call it receives so
//! tests can verify what context the engine handed over. With an empty queue
//! it answers with a canned help-flavored unknown, which keeps an unconfigured
//! deployment conversational instead of erroring.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::issue::Intent;
use crate::ports::{Extraction, ExtractionContext, ExtractorError, IntentExtractor};

/// A call observed by the mock, captured for assertions.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub message: String,
    pub history_len: usize,
    pub awaiting_field: Option<String>,
}

/// Scripted IntentExtractor implementation.
#[derive(Debug, Default)]
pub struct MockIntentExtractor {
    responses: Mutex<VecDeque<Result<Extraction, ExtractorError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockIntentExtractor {
    /// Creates a mock with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful extraction.
    pub fn with_extraction(self, extraction: Extraction) -> Self {
        self.responses
            .lock()
            .expect("mock extractor lock poisoned")
            .push_back(Ok(extraction));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: ExtractorError) -> Self {
        self.responses
            .lock()
            .expect("mock extractor lock poisoned")
            .push_back(Err(error));
        self
    }

    /// Calls observed so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .expect("mock extractor lock poisoned")
            .clone()
    }
}

#[async_trait]
impl IntentExtractor for MockIntentExtractor {
    async fn extract(&self, ctx: ExtractionContext<'_>) -> Result<Extraction, ExtractorError> {
        self.calls
            .lock()
            .expect("mock extractor lock poisoned")
            .push(RecordedCall {
                message: ctx.message.to_string(),
                history_len: ctx.history.len(),
                awaiting_field: ctx.awaiting_field.map(|f| f.as_str().to_string()),
            });

        self.responses
            .lock()
            .expect("mock extractor lock poisoned")
            .pop_front()
            .unwrap_or_else(|| {
                Ok(Extraction::of_intent(
                    Intent::Unknown,
                    "I can create, update, query, and search Jira issues. \
                     Try 'create an issue' to get started.",
                )
                .with_confidence(0.0))
            })
    }
}
