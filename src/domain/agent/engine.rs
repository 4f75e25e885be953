//! The field-collection conversation engine.
//!
//! A per-turn state machine that merges LLM intent extraction with a
//! deterministic, resumable, field-by-field interview. Each incoming message
//! takes exactly one of two paths:
//!
//! 1. A field is awaited: the raw reply is validated against that field's
//!    rules and the cursor advances (or re-prompts). The extractor is never
//!    consulted on this path.
//! 2. No field is awaited: the extractor is asked for intent and partial
//!    data, which is merged into the stored draft; a create intent with an
//!    incomplete draft drops the conversation into guided collection at the
//!    first gap.
//!
//! Every turn produces a well-formed [`AgentResponse`]; extractor failures
//! degrade to an unknown-intent reply rather than propagating.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::issue::{
    infer_labels, interpret_choice, validate, Intent, IssueDraft, IssueField, IssueStatus,
    IssueType, Priority, COLLECTION_ORDER,
};
use crate::ports::{Extraction, ExtractionContext, IntentExtractor};

use super::prompts;
use super::response::AgentResponse;
use super::state::ConversationState;

/// Reply used when the extractor failed outright.
const CLARIFY_MESSAGE: &str = "I'm having trouble understanding that request. \
    Try 'create an issue' or ask about an issue key like TJ-123.";

/// Inputs that mean "leave this optional field unset".
fn is_skip(input: &str) -> bool {
    input.is_empty() || input.eq_ignore_ascii_case("skip") || input.eq_ignore_ascii_case("none")
}

/// Turn-by-turn orchestrator for issue field collection.
pub struct CollectionEngine {
    extractor: Arc<dyn IntentExtractor>,
    default_project_key: String,
}

impl CollectionEngine {
    /// Creates an engine backed by the given extractor.
    pub fn new(extractor: Arc<dyn IntentExtractor>, default_project_key: impl Into<String>) -> Self {
        Self {
            extractor,
            default_project_key: default_project_key.into(),
        }
    }

    /// Processes one user message against one user's conversation state.
    ///
    /// Infallible by design: every outcome, including extractor failure, is
    /// expressed as an [`AgentResponse`].
    pub async fn process_turn(
        &self,
        state: &mut ConversationState,
        message: &str,
    ) -> AgentResponse {
        // An awaited field consumes the message directly; the extractor is
        // not consulted for this turn.
        if let Some(field) = state.awaiting_field {
            debug!(user = %state.user_id, field = %field, "handling guided field input");
            let response = self.handle_field_input(state, message, field);
            state.push_user(message);
            state.push_agent(response.message.clone());
            debug_assert!(response.holds_readiness_invariant());
            return response;
        }

        state.push_user(message);

        let extraction = self
            .extractor
            .extract(ExtractionContext {
                message,
                history: state.history_tail(),
                draft: &state.draft,
                awaiting_field: state.awaiting_field,
            })
            .await;

        let response = match extraction {
            Ok(extraction) => self.apply_extraction(state, extraction),
            Err(err) => {
                warn!(user = %state.user_id, error = %err, "intent extraction failed");
                AgentResponse::unknown(CLARIFY_MESSAGE, Some(err.to_string()))
            }
        };

        state.push_agent(response.message.clone());
        debug_assert!(response.holds_readiness_invariant());
        response
    }

    /// One-shot validation for drafts submitted whole (e.g. via a form).
    ///
    /// Shares the required-field rules with the interactive path but never
    /// touches conversation state.
    pub fn validate_direct(&self, mut draft: IssueDraft) -> AgentResponse {
        let missing = draft.missing_required();
        if !missing.is_empty() {
            let joined = missing.join(", ");
            return AgentResponse {
                intent: Intent::CreateIssue,
                confidence: 1.0,
                missing_fields: missing.iter().map(|s| s.to_string()).collect(),
                next_question: None,
                ready: false,
                message: format!("Missing required fields: {joined}"),
                error: Some(format!("Required fields missing: {joined}")),
                draft,
            };
        }

        if draft.labels.is_empty() {
            if let Some(description) = draft.description.clone() {
                draft.add_labels(infer_labels(&description));
            }
        }
        if draft.project_key.is_none() {
            draft.project_key = Some(self.default_project_key.clone());
        }

        AgentResponse::ready(
            Intent::CreateIssue,
            draft,
            "Issue data validated and ready for creation",
        )
    }

    /// Folds a successful extraction into the conversation.
    fn apply_extraction(
        &self,
        state: &mut ConversationState,
        extraction: Extraction,
    ) -> AgentResponse {
        if extraction.intent == Intent::Unknown {
            // Nothing usable; state keeps its draft and intent untouched.
            return AgentResponse::unknown(extraction.reply, extraction.error);
        }

        state.current_intent = Some(extraction.intent);
        state.draft.merge(extraction.draft);

        if extraction.intent == Intent::CreateIssue && !state.draft.is_ready() {
            return self.begin_collection(state);
        }

        // Readiness is re-derived here; the extractor's own claim is only
        // trusted where the draft can back it up.
        let ready = match extraction.intent {
            Intent::CreateIssue => state.draft.is_ready(),
            // An update may arrive without a key mid-create; the dispatcher
            // folds that back into the create flow.
            Intent::UpdateIssue => extraction.ready,
            Intent::QueryIssue => extraction.ready && state.draft.issue_key.is_some(),
            Intent::SearchIssues => extraction.ready,
            Intent::Help | Intent::Unknown => false,
        };

        // A create that is not ready already went to guided collection, so
        // any remaining not-ready case keeps the extractor's own gap list.
        let missing_fields = if ready {
            Vec::new()
        } else {
            extraction.missing_fields
        };

        let response = AgentResponse {
            intent: extraction.intent,
            confidence: extraction.confidence.clamp(0.0, 1.0),
            draft: state.draft.clone(),
            next_question: if ready { None } else { extraction.next_question },
            ready,
            message: extraction.reply,
            error: extraction.error,
            missing_fields,
        };

        if response.ready {
            state.awaiting_field = None;
        } else if let Some(first) = response
            .missing_fields
            .first()
            .and_then(|name| IssueField::parse(name))
        {
            state.awaiting_field = Some(first);
        }
        // Otherwise the awaited field (if any) is left as it was.

        response
    }

    /// Enters guided collection at the first unset field in registry order.
    fn begin_collection(&self, state: &mut ConversationState) -> AgentResponse {
        state.current_intent = Some(Intent::CreateIssue);
        let field = COLLECTION_ORDER
            .iter()
            .copied()
            .find(|f| !state.draft.has_value(*f))
            .unwrap_or(IssueField::Labels);
        state.awaiting_field = Some(field);
        self.field_prompt(state, field, None)
    }

    /// Validates one guided-mode reply and advances or re-prompts.
    fn handle_field_input(
        &self,
        state: &mut ConversationState,
        input: &str,
        field: IssueField,
    ) -> AgentResponse {
        let input = input.trim();

        match field {
            IssueField::IssueType | IssueField::Priority | IssueField::Status => {
                match interpret_choice(field, input) {
                    Some(choice) => {
                        match field {
                            IssueField::IssueType => {
                                state.draft.issue_type = IssueType::parse(choice);
                            }
                            IssueField::Priority => {
                                state.draft.priority = Priority::parse(choice);
                            }
                            _ => state.draft.status = IssueStatus::parse(choice),
                        }
                        self.advance(state, field)
                    }
                    None => self.field_prompt(
                        state,
                        field,
                        Some("Invalid choice. Please try again.".to_string()),
                    ),
                }
            }

            IssueField::Summary => {
                if input.is_empty() {
                    self.field_prompt(
                        state,
                        field,
                        Some("Summary cannot be empty. Please enter a title.".to_string()),
                    )
                } else if !validate::is_valid_summary(input) {
                    self.field_prompt(
                        state,
                        field,
                        Some(format!(
                            "Summary too long ({} characters). Please keep it under {} characters.",
                            input.chars().count(),
                            validate::MAX_SUMMARY_LENGTH,
                        )),
                    )
                } else {
                    state.draft.summary = Some(input.to_string());
                    self.advance(state, field)
                }
            }

            IssueField::Description => {
                if is_skip(input) {
                    state.draft.description = None;
                } else {
                    state.draft.description = Some(input.to_string());
                    // A new description replaces the label set wholesale;
                    // the labels step afterwards can still union more in.
                    state.draft.labels = infer_labels(input);
                }
                self.advance(state, field)
            }

            IssueField::Assignee => {
                if is_skip(input) {
                    state.draft.assignee = None;
                    self.advance(state, field)
                } else if validate::is_valid_email(input) {
                    state.draft.assignee = Some(input.to_string());
                    self.advance(state, field)
                } else {
                    self.field_prompt(
                        state,
                        field,
                        Some("Invalid email format. Please enter a valid email or 'skip'.".to_string()),
                    )
                }
            }

            IssueField::StartDate | IssueField::DueDate => {
                if is_skip(input) {
                    match field {
                        IssueField::StartDate => state.draft.start_date = None,
                        _ => state.draft.due_date = None,
                    }
                    self.advance(state, field)
                } else if validate::is_valid_date(input) {
                    match field {
                        IssueField::StartDate => state.draft.start_date = Some(input.to_string()),
                        _ => state.draft.due_date = Some(input.to_string()),
                    }
                    self.advance(state, field)
                } else {
                    self.field_prompt(
                        state,
                        field,
                        Some("Invalid date format. Please use YYYY-MM-DD or 'skip'.".to_string()),
                    )
                }
            }

            IssueField::ParentKey => {
                if is_skip(input) {
                    state.draft.parent_key = None;
                    self.advance(state, field)
                } else if validate::is_valid_issue_key(input) {
                    state.draft.parent_key = Some(input.to_uppercase());
                    self.advance(state, field)
                } else {
                    self.field_prompt(
                        state,
                        field,
                        Some("Invalid issue key format. Use a key like TJ-123 or 'skip'.".to_string()),
                    )
                }
            }

            IssueField::Labels => {
                if is_skip(input) {
                    // Keep whatever is there, auto-generated labels included.
                } else if input.eq_ignore_ascii_case("clear") {
                    state.draft.labels.clear();
                } else {
                    let manual = input.split(',').filter(|l| !l.trim().is_empty());
                    state.draft.add_labels(manual);
                }
                self.advance(state, field)
            }
        }
    }

    /// Moves the cursor past `current` to the next collectible field, or
    /// declares the draft ready when the registry is exhausted.
    ///
    /// Fields already filled (by extraction or an earlier turn) are skipped;
    /// labels are always offered once as a final review step.
    fn advance(&self, state: &mut ConversationState, current: IssueField) -> AgentResponse {
        let next = COLLECTION_ORDER
            .iter()
            .copied()
            .skip(current.position() + 1)
            .find(|f| *f == IssueField::Labels || !state.draft.has_value(*f));

        match next {
            Some(field) => {
                state.awaiting_field = Some(field);
                self.field_prompt(state, field, None)
            }
            None => {
                state.awaiting_field = None;
                let work_type = state
                    .draft
                    .issue_type
                    .map(|t| t.as_str())
                    .unwrap_or("issue");
                AgentResponse::ready(
                    Intent::CreateIssue,
                    state.draft.clone(),
                    format!(
                        "Perfect! I have all the information needed. Creating your {work_type} now..."
                    ),
                )
            }
        }
    }

    /// Builds the prompt response for a field, optionally led by an error.
    fn field_prompt(
        &self,
        state: &ConversationState,
        field: IssueField,
        error: Option<String>,
    ) -> AgentResponse {
        let question = prompts::question_for(field, &state.draft);
        let text = match &error {
            Some(err) => format!("{err}\n\n{question}"),
            None => question,
        };
        let mut response = AgentResponse::prompt(
            Intent::CreateIssue,
            state.draft.clone(),
            field.as_str(),
            text,
        );
        response.error = error;
        response
    }
}
