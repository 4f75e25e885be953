//! Field registry for interactive issue creation.
//!
//! Declares the fields an issue interview collects, the order they are asked
//! in, and the closed choice lists for menu-style fields. The registry is
//! static data with no failure modes; everything that can go wrong with user
//! input is the validators' business.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A collectible issue field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueField {
    IssueType,
    Priority,
    Status,
    Summary,
    Description,
    Assignee,
    StartDate,
    DueDate,
    ParentKey,
    Labels,
}

/// The order fields are solicited in during guided collection.
pub const COLLECTION_ORDER: [IssueField; 10] = [
    IssueField::IssueType,
    IssueField::Priority,
    IssueField::Status,
    IssueField::Summary,
    IssueField::Description,
    IssueField::Assignee,
    IssueField::StartDate,
    IssueField::DueDate,
    IssueField::ParentKey,
    IssueField::Labels,
];

/// Fields that must be present before a draft can be dispatched.
pub const REQUIRED_FIELDS: [IssueField; 4] = [
    IssueField::IssueType,
    IssueField::Priority,
    IssueField::Summary,
    IssueField::Description,
];

const ISSUE_TYPE_CHOICES: [&str; 3] = ["Task", "Story", "Epic"];
const PRIORITY_CHOICES: [&str; 5] = ["Highest", "High", "Medium", "Low", "Lowest"];
// Terminal statuses are not offered while an issue is being created.
const STATUS_CHOICES: [&str; 3] = ["To Do", "In Progress", "In Review"];

impl IssueField {
    /// Wire name of the field, as used in responses and extractor output.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueField::IssueType => "issue_type",
            IssueField::Priority => "priority",
            IssueField::Status => "status",
            IssueField::Summary => "summary",
            IssueField::Description => "description",
            IssueField::Assignee => "assignee",
            IssueField::StartDate => "start_date",
            IssueField::DueDate => "due_date",
            IssueField::ParentKey => "parent_key",
            IssueField::Labels => "labels",
        }
    }

    /// Parses a wire name back into a field.
    pub fn parse(name: &str) -> Option<Self> {
        COLLECTION_ORDER.iter().copied().find(|f| f.as_str() == name)
    }

    /// Ordered display choices for menu-style fields, `None` for free text.
    pub fn choices(&self) -> Option<&'static [&'static str]> {
        match self {
            IssueField::IssueType => Some(&ISSUE_TYPE_CHOICES),
            IssueField::Priority => Some(&PRIORITY_CHOICES),
            IssueField::Status => Some(&STATUS_CHOICES),
            _ => None,
        }
    }

    /// Returns true for fields answered by picking from a closed list.
    pub fn is_menu(&self) -> bool {
        self.choices().is_some()
    }

    /// Returns true for fields the user may leave unset with "skip".
    pub fn is_optional(&self) -> bool {
        !REQUIRED_FIELDS.contains(self)
    }

    /// Position of this field in the collection order.
    pub fn position(&self) -> usize {
        COLLECTION_ORDER
            .iter()
            .position(|f| f == self)
            .unwrap_or(COLLECTION_ORDER.len())
    }
}

impl fmt::Display for IssueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Interprets a user's reply to a menu field.
///
/// Accepts a 1-based index into the field's choice list, or a textual match
/// that ignores case, spaces, and hyphens. Returns `None` when nothing
/// matches; an explicit no-match outcome distinct from an empty reply.
pub fn interpret_choice(field: IssueField, text: &str) -> Option<&'static str> {
    let choices = field.choices()?;
    let t = text.trim().to_lowercase();
    if t.is_empty() {
        return None;
    }

    if t.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(n) = t.parse::<usize>() {
            if n >= 1 && n <= choices.len() {
                return Some(choices[n - 1]);
            }
        }
        return None;
    }

    let squash = |s: &str| s.to_lowercase().replace([' ', '-'], "");
    let t_squashed = squash(&t);
    choices
        .iter()
        .find(|opt| t == opt.to_lowercase() || t_squashed == squash(opt))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    mod registry {
        use super::*;

        #[test]
        fn collection_starts_with_issue_type() {
            assert_eq!(COLLECTION_ORDER[0], IssueField::IssueType);
            assert_eq!(COLLECTION_ORDER[9], IssueField::Labels);
        }

        #[test]
        fn wire_names_round_trip() {
            for field in COLLECTION_ORDER {
                assert_eq!(IssueField::parse(field.as_str()), Some(field));
            }
            assert_eq!(IssueField::parse("nonsense"), None);
        }

        #[test]
        fn menu_fields_declare_choices() {
            assert!(IssueField::IssueType.is_menu());
            assert!(IssueField::Priority.is_menu());
            assert!(IssueField::Status.is_menu());
            assert!(!IssueField::Summary.is_menu());
            assert!(!IssueField::Labels.is_menu());
        }

        #[test]
        fn issue_type_choices_are_task_story_epic() {
            assert_eq!(
                IssueField::IssueType.choices().unwrap(),
                &["Task", "Story", "Epic"]
            );
        }

        #[test]
        fn status_choices_exclude_done() {
            let choices = IssueField::Status.choices().unwrap();
            assert!(!choices.contains(&"Done"));
        }

        #[test]
        fn required_fields_are_not_optional() {
            for field in REQUIRED_FIELDS {
                assert!(!field.is_optional(), "{field} should be required");
            }
            assert!(IssueField::Assignee.is_optional());
            assert!(IssueField::Status.is_optional());
        }

        #[test]
        fn serializes_to_snake_case() {
            let json = serde_json::to_string(&IssueField::IssueType).unwrap();
            assert_eq!(json, "\"issue_type\"");
        }
    }

    mod choice_interpretation {
        use super::*;

        #[test]
        fn numeric_index_is_one_based() {
            assert_eq!(
                interpret_choice(IssueField::IssueType, "1"),
                Some("Task")
            );
            assert_eq!(
                interpret_choice(IssueField::IssueType, "2"),
                Some("Story")
            );
            assert_eq!(
                interpret_choice(IssueField::IssueType, "3"),
                Some("Epic")
            );
        }

        #[test]
        fn every_valid_index_maps_to_its_choice() {
            for field in [IssueField::IssueType, IssueField::Priority, IssueField::Status] {
                let choices = field.choices().unwrap();
                for (i, expected) in choices.iter().enumerate() {
                    let reply = (i + 1).to_string();
                    assert_eq!(interpret_choice(field, &reply), Some(*expected));
                }
            }
        }

        #[test]
        fn out_of_range_index_is_rejected() {
            assert_eq!(interpret_choice(IssueField::IssueType, "0"), None);
            assert_eq!(interpret_choice(IssueField::IssueType, "4"), None);
            assert_eq!(interpret_choice(IssueField::Priority, "6"), None);
        }

        #[test]
        fn textual_match_ignores_case() {
            assert_eq!(
                interpret_choice(IssueField::IssueType, "task"),
                Some("Task")
            );
            assert_eq!(
                interpret_choice(IssueField::Priority, "HIGHEST"),
                Some("Highest")
            );
        }

        #[test]
        fn textual_match_ignores_spaces_and_hyphens() {
            assert_eq!(
                interpret_choice(IssueField::Status, "inprogress"),
                Some("In Progress")
            );
            assert_eq!(
                interpret_choice(IssueField::Status, "in-progress"),
                Some("In Progress")
            );
            assert_eq!(
                interpret_choice(IssueField::Status, "  To Do "),
                Some("To Do")
            );
        }

        #[test]
        fn unrelated_text_is_rejected() {
            assert_eq!(interpret_choice(IssueField::IssueType, "bug"), None);
            assert_eq!(interpret_choice(IssueField::Priority, "urgent"), None);
            assert_eq!(interpret_choice(IssueField::Status, ""), None);
        }

        #[test]
        fn free_text_fields_have_no_choices() {
            assert_eq!(interpret_choice(IssueField::Summary, "1"), None);
        }
    }
}
