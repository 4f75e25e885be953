//! Keyed store of per-user conversation state.
//!
//! Creation on first access, explicit deletion, no expiry. Each entry is
//! wrapped in its own async mutex so turns for one user are serialized while
//! different users proceed independently; the outer lock is only held long
//! enough to fetch or insert the entry.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tokio::sync::Mutex;

use crate::domain::foundation::UserId;

use super::state::ConversationState;

/// In-memory conversation state store, one entry per user.
#[derive(Debug, Default)]
pub struct ConversationStore {
    inner: RwLock<HashMap<String, Arc<Mutex<ConversationState>>>>,
}

impl ConversationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the state handle for a user, creating a blank record on first
    /// access. Lock the returned mutex for the duration of a turn.
    pub fn entry(&self, user_id: &UserId) -> Arc<Mutex<ConversationState>> {
        if let Some(existing) = self
            .inner
            .read()
            .expect("conversation store lock poisoned")
            .get(user_id.as_str())
        {
            return existing.clone();
        }

        let mut map = self.inner.write().expect("conversation store lock poisoned");
        map.entry(user_id.as_str().to_string())
            .or_insert_with(|| Arc::new(Mutex::new(ConversationState::new(user_id.clone()))))
            .clone()
    }

    /// Removes a user's conversation state. Returns true if anything existed.
    pub fn clear(&self, user_id: &UserId) -> bool {
        self.inner
            .write()
            .expect("conversation store lock poisoned")
            .remove(user_id.as_str())
            .is_some()
    }

    /// Number of active conversations.
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .expect("conversation store lock poisoned")
            .len()
    }

    /// True when no conversations are active.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::issue::Intent;

    fn uid(s: &str) -> UserId {
        UserId::new(s).unwrap()
    }

    #[tokio::test]
    async fn entry_creates_on_first_access() {
        let store = ConversationStore::new();
        assert!(store.is_empty());

        let handle = store.entry(&uid("alice"));
        assert_eq!(store.len(), 1);
        assert_eq!(handle.lock().await.user_id.as_str(), "alice");
    }

    #[tokio::test]
    async fn entry_returns_the_same_state_across_turns() {
        let store = ConversationStore::new();
        {
            let handle = store.entry(&uid("alice"));
            handle.lock().await.current_intent = Some(Intent::CreateIssue);
        }
        let handle = store.entry(&uid("alice"));
        assert_eq!(
            handle.lock().await.current_intent,
            Some(Intent::CreateIssue)
        );
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn users_are_independent() {
        let store = ConversationStore::new();
        store
            .entry(&uid("alice"))
            .lock()
            .await
            .push_user("create a task");

        let bob = store.entry(&uid("bob"));
        assert_eq!(bob.lock().await.history_len(), 0);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn clear_removes_only_that_user() {
        let store = ConversationStore::new();
        store.entry(&uid("alice"));
        store.entry(&uid("bob"));

        assert!(store.clear(&uid("alice")));
        assert!(!store.clear(&uid("alice")));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn cleared_user_starts_fresh() {
        let store = ConversationStore::new();
        store
            .entry(&uid("alice"))
            .lock()
            .await
            .current_intent = Some(Intent::CreateIssue);

        store.clear(&uid("alice"));
        let handle = store.entry(&uid("alice"));
        assert!(handle.lock().await.current_intent.is_none());
    }
}
