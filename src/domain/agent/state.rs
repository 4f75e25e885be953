//! Per-user conversation state.
//!
//! One record per user identifier: the draft being assembled, the detected
//! intent, the field currently awaited, and the turn history. Created lazily
//! on first message, memory-resident for the process lifetime, removable only
//! by an explicit clear.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;
use crate::domain::issue::{Intent, IssueDraft, IssueField};

/// How many trailing history entries are handed to the intent extractor as
/// context. Storage itself is unbounded; only this tail is ever read.
pub const HISTORY_CONTEXT_TURNS: usize = 5;

/// Who produced a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryRole {
    User,
    Agent,
}

/// One turn summary in the conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: HistoryRole,
    pub text: String,
}

impl HistoryEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: HistoryRole::User,
            text: text.into(),
        }
    }

    pub fn agent(text: impl Into<String>) -> Self {
        Self {
            role: HistoryRole::Agent,
            text: text.into(),
        }
    }
}

/// Mutable conversation record for a single user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationState {
    pub user_id: UserId,
    pub current_intent: Option<Intent>,
    pub draft: IssueDraft,
    history: Vec<HistoryEntry>,
    pub awaiting_field: Option<IssueField>,
}

impl ConversationState {
    /// Creates a fresh state for a user.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            current_intent: None,
            draft: IssueDraft::default(),
            history: Vec::new(),
            awaiting_field: None,
        }
    }

    /// Appends a user message to the history.
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.history.push(HistoryEntry::user(text));
    }

    /// Appends an agent reply to the history.
    pub fn push_agent(&mut self, text: impl Into<String>) {
        self.history.push(HistoryEntry::agent(text));
    }

    /// The most recent history entries, newest last.
    pub fn history_tail(&self) -> &[HistoryEntry] {
        let len = self.history.len();
        &self.history[len.saturating_sub(HISTORY_CONTEXT_TURNS)..]
    }

    /// Total entries stored.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}
