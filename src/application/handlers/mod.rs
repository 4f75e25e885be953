//! Use case handlers wiring the engine, the store, and the tracker.

mod clear_conversation;
mod direct_issue;
mod process_message;

pub use clear_conversation::{ClearConversationCommand, ClearConversationHandler};
pub use direct_issue::{DirectIssueCommand, DirectIssueHandler, DirectIssueResult};
pub use process_message::{
    DispatchOutcome, ProcessMessageCommand, ProcessMessageHandler, ProcessMessageResult,
};
