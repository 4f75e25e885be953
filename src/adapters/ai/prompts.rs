//! System prompt for the intent extraction call.
//!
//! The extractor model is instructed to answer with a single JSON object in
//! the shape of [`crate::ports::Extraction`]'s wire form. Conversation
//! context (history tail, current draft, awaited field) is appended so
//! multi-turn requests resolve against what has already been collected.

use crate::domain::agent::{HistoryEntry, HistoryRole};
use crate::ports::ExtractionContext;

/// Base instruction set for the extraction model.
pub const SYSTEM_PROMPT: &str = r#"You are a Jira assistant that helps users manage issues via short messages.
Understand the user's intent and answer with ONLY one valid JSON object. No markdown fences, no commentary, no duplicate keys.
If "ready_for_jira" is true then "missing_fields" must be [] and "next_question" must be null.
This project has no 'Bug' issue type; map bug-like requests to "Task".

CAPABILITIES:
1) Create issues (Task, Story, Epic)
2) Update issues (status, assignee, fields)
3) Query a single issue (status/details)
4) Search issues (by priority/type/assignee)
5) Provide help

RESPONSE FORMAT:
{
  "intent": "create_issue|update_issue|query_issue|search_issues|help|unknown",
  "confidence": 0.0-1.0,
  "extracted_data": {
    "issue_type": "Task|Story|Epic|null",
    "priority": "Lowest|Low|Medium|High|Highest|null",
    "summary": "string|null",
    "description": "string|null",
    "assignee": "string|null",
    "issue_key": "TJ-123|null",
    "status": "To Do|In Progress|In Review|Done|null",
    "labels": ["string"],
    "due_date": "YYYY-MM-DD|null",
    "start_date": "YYYY-MM-DD|null",
    "parent_key": "TJ-123|null",
    "project_key": "TJ|null"
  },
  "missing_fields": ["string"],
  "ready_for_jira": true,
  "next_question": "string|null",
  "response_message": "string",
  "error": "string|null"
}

EXTRACTION RULES:
- issue_type: "bug"/"defect" -> "Task"; "feature"/"user story" -> "Story"; "epic"/"project" -> "Epic"; "task"/"work" -> "Task".
- priority: "critical"/"urgent"/"asap" -> "Highest"; "important"/"soon" -> "High"; "when possible" -> "Low"; default "Medium".
- summary: concise title (<=100 chars); first clause of a long message is the summary, the rest is the description.
- assignee: capture email or name only when clearly specified, else null.
- status: set only when the user asked to move the issue.
- labels: split on commas/spaces, lowercase, hyphenate spaces, deduplicate.
- dates: normalize unambiguous natural dates to YYYY-MM-DD, else leave null and ask.
- project_key: only when the user names a project; otherwise null and the system defaults it."#;

/// Renders the full system prompt including conversation context.
pub fn build_system_prompt(ctx: &ExtractionContext<'_>) -> String {
    if ctx.history.is_empty() {
        return SYSTEM_PROMPT.to_string();
    }

    let draft_json =
        serde_json::to_string_pretty(ctx.draft).unwrap_or_else(|_| "{}".to_string());
    let awaiting = ctx
        .awaiting_field
        .map(|f| f.as_str().to_string())
        .unwrap_or_else(|| "nothing specific".to_string());

    format!(
        "{SYSTEM_PROMPT}\n\nCONVERSATION SO FAR:\n{}\n\nPARTIAL ISSUE DATA:\n{draft_json}\n\nCURRENTLY AWAITING: {awaiting}",
        render_history(ctx.history),
    )
}

fn render_history(history: &[HistoryEntry]) -> String {
    history
        .iter()
        .map(|entry| match entry.role {
            HistoryRole::User => format!("User: {}", entry.text),
            HistoryRole::Agent => format!("Agent: {}", entry.text),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
