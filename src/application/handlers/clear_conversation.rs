//! ClearConversationHandler - explicit removal of a user's state.

use std::sync::Arc;

use tracing::info;

use crate::domain::agent::ConversationStore;
use crate::domain::foundation::UserId;

/// Command to drop one user's conversation state.
#[derive(Debug, Clone)]
pub struct ClearConversationCommand {
    pub user_id: UserId,
}

/// Handler for conversation removal.
pub struct ClearConversationHandler {
    store: Arc<ConversationStore>,
}

impl ClearConversationHandler {
    pub fn new(store: Arc<ConversationStore>) -> Self {
        Self { store }
    }

    /// Removes the state. Returns true when a conversation existed.
    pub fn handle(&self, cmd: ClearConversationCommand) -> bool {
        let cleared = self.store.clear(&cmd.user_id);
        info!(user = %cmd.user_id, cleared, "clear conversation");
        cleared
    }
}
