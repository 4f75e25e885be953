//! Prompt text for guided field collection.
//!
//! One question per collectible field, phrased the way the assistant speaks.
//! Menu fields render their numbered choice list; optional fields carry the
//! skip hint.

use crate::domain::issue::{IssueDraft, IssueField};

/// Renders the question soliciting a field, given the current draft.
pub fn question_for(field: IssueField, draft: &IssueDraft) -> String {
    match field {
        IssueField::IssueType => menu_question("Select Work Type:", field),
        IssueField::Priority => menu_question("Select Priority:", field),
        IssueField::Status => menu_question("Select Status:", field),
        IssueField::Summary => {
            "Enter Issue Title/Summary:\nProvide a brief, clear title for this issue:".to_string()
        }
        IssueField::Description => {
            "Enter Description:\nProvide detailed information about this issue (or type 'skip'):"
                .to_string()
        }
        IssueField::Assignee => {
            "Enter Assignee:\nEnter an email address to assign this issue (or type 'skip'):"
                .to_string()
        }
        IssueField::StartDate => {
            "Enter Start Date:\nFormat: YYYY-MM-DD (e.g. 2025-09-01) or type 'skip':".to_string()
        }
        IssueField::DueDate => {
            "Enter Due Date:\nFormat: YYYY-MM-DD (e.g. 2025-09-30) or type 'skip':".to_string()
        }
        IssueField::ParentKey => {
            "Enter Parent Issue:\nLink to a parent issue (e.g. TJ-123) or type 'skip':".to_string()
        }
        IssueField::Labels => {
            if draft.labels.is_empty() {
                "Enter Labels:\nAdd labels (comma-separated) or type 'skip':".to_string()
            } else {
                format!(
                    "Review Labels:\nCurrent labels: {}\n\nAdd more labels (comma-separated), \
                     type 'clear' to remove all, or 'skip' to keep current:",
                    draft.labels.join(", ")
                )
            }
        }
    }
}

fn menu_question(heading: &str, field: IssueField) -> String {
    let choices = field
        .choices()
        .expect("menu question rendered for a non-menu field");
    let options = choices
        .iter()
        .enumerate()
        .map(|(i, opt)| format!("{}. {}", i + 1, opt))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{heading}\n{options}\n\nEnter a number or name:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_type_question_lists_exactly_the_choices() {
        let q = question_for(IssueField::IssueType, &IssueDraft::default());
        assert!(q.contains("1. Task"));
        assert!(q.contains("2. Story"));
        assert!(q.contains("3. Epic"));
        assert!(!q.contains("Bug"));
    }

    #[test]
    fn priority_question_lists_five_levels() {
        let q = question_for(IssueField::Priority, &IssueDraft::default());
        for (i, name) in ["Highest", "High", "Medium", "Low", "Lowest"].iter().enumerate() {
            assert!(q.contains(&format!("{}. {}", i + 1, name)));
        }
    }

    #[test]
    fn optional_fields_mention_skip() {
        for field in [
            IssueField::Description,
            IssueField::Assignee,
            IssueField::StartDate,
            IssueField::DueDate,
            IssueField::ParentKey,
        ] {
            let q = question_for(field, &IssueDraft::default());
            assert!(q.contains("skip"), "{field} prompt should mention skip");
        }
    }

    #[test]
    fn labels_question_shows_current_labels_when_present() {
        let mut draft = IssueDraft::default();
        draft.add_labels(["api", "login"]);
        let q = question_for(IssueField::Labels, &draft);
        assert!(q.contains("api, login"));
        assert!(q.contains("clear"));
    }

    #[test]
    fn labels_question_without_labels_asks_plainly() {
        let q = question_for(IssueField::Labels, &IssueDraft::default());
        assert!(q.contains("Add labels"));
        assert!(!q.contains("clear"));
    }
}
