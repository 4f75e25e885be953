//! The accumulating structured representation of one issue.
//!
//! An [`IssueDraft`] is built up across conversation turns: the intent
//! extractor contributes whatever it could parse from free text, and the
//! guided interview fills the gaps field by field. Merging is overwrite-if-
//! present, except labels which always union.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::fields::{IssueField, REQUIRED_FIELDS};
use super::validate::normalize_label;

/// What the user is trying to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    CreateIssue,
    UpdateIssue,
    QueryIssue,
    SearchIssues,
    Help,
    Unknown,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Intent::CreateIssue => "create_issue",
            Intent::UpdateIssue => "update_issue",
            Intent::QueryIssue => "query_issue",
            Intent::SearchIssues => "search_issues",
            Intent::Help => "help",
            Intent::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

/// Work type of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueType {
    Task,
    Story,
    Epic,
}

impl IssueType {
    /// Display name as Jira knows it.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::Task => "Task",
            IssueType::Story => "Story",
            IssueType::Epic => "Epic",
        }
    }

    /// Parses a display name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Task" => Some(IssueType::Task),
            "Story" => Some(IssueType::Story),
            "Epic" => Some(IssueType::Epic),
            _ => None,
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Issue priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Lowest,
    Low,
    Medium,
    High,
    Highest,
}

impl Priority {
    /// Display name as Jira knows it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Lowest => "Lowest",
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Highest => "Highest",
        }
    }

    /// Parses a display name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Lowest" => Some(Priority::Lowest),
            "Low" => Some(Priority::Low),
            "Medium" => Some(Priority::Medium),
            "High" => Some(Priority::High),
            "Highest" => Some(Priority::Highest),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Workflow status. `Done` is accepted from extraction for update intents but
/// is not offered during interactive entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueStatus {
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "In Review")]
    InReview,
    Done,
}

impl IssueStatus {
    /// Display name as Jira knows it.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::ToDo => "To Do",
            IssueStatus::InProgress => "In Progress",
            IssueStatus::InReview => "In Review",
            IssueStatus::Done => "Done",
        }
    }

    /// Parses a display name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "To Do" => Some(IssueStatus::ToDo),
            "In Progress" => Some(IssueStatus::InProgress),
            "In Review" => Some(IssueStatus::InReview),
            "Done" => Some(IssueStatus::Done),
            _ => None,
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured issue data accumulated across turns.
///
/// Every field is optional while the draft is being assembled. Serialization
/// omits unset fields so snapshots only show what has been collected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<IssueType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<IssueStatus>,

    /// `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    /// `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,

    /// Parent issue key, e.g. `TJ-3`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_key: Option<String>,

    /// Lowercase hyphenated tokens; display order preserved, no duplicates.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_key: Option<String>,

    /// Target key for update/query intents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_key: Option<String>,
}

impl IssueDraft {
    /// Names of required fields still missing, in registry order.
    pub fn missing_required(&self) -> Vec<&'static str> {
        REQUIRED_FIELDS
            .iter()
            .filter(|f| !self.has_value(**f))
            .map(|f| f.as_str())
            .collect()
    }

    /// True once every required field is present.
    pub fn is_ready(&self) -> bool {
        self.missing_required().is_empty()
    }

    /// Whether a collectible field currently holds a value.
    ///
    /// For labels, an empty list counts as unset.
    pub fn has_value(&self, field: IssueField) -> bool {
        match field {
            IssueField::IssueType => self.issue_type.is_some(),
            IssueField::Priority => self.priority.is_some(),
            IssueField::Status => self.status.is_some(),
            IssueField::Summary => self.summary.is_some(),
            IssueField::Description => self.description.is_some(),
            IssueField::Assignee => self.assignee.is_some(),
            IssueField::StartDate => self.start_date.is_some(),
            IssueField::DueDate => self.due_date.is_some(),
            IssueField::ParentKey => self.parent_key.is_some(),
            IssueField::Labels => !self.labels.is_empty(),
        }
    }

    /// Merges newly extracted data into this draft.
    ///
    /// Field-wise overwrite-if-present, except `labels` which unions with the
    /// existing set so nothing collected earlier is lost.
    pub fn merge(&mut self, other: IssueDraft) {
        if other.issue_type.is_some() {
            self.issue_type = other.issue_type;
        }
        if other.priority.is_some() {
            self.priority = other.priority;
        }
        if other.summary.is_some() {
            self.summary = other.summary;
        }
        if other.description.is_some() {
            self.description = other.description;
        }
        if other.assignee.is_some() {
            self.assignee = other.assignee;
        }
        if other.status.is_some() {
            self.status = other.status;
        }
        if other.start_date.is_some() {
            self.start_date = other.start_date;
        }
        if other.due_date.is_some() {
            self.due_date = other.due_date;
        }
        if other.parent_key.is_some() {
            self.parent_key = other.parent_key;
        }
        if other.project_key.is_some() {
            self.project_key = other.project_key;
        }
        if other.issue_key.is_some() {
            self.issue_key = other.issue_key;
        }
        self.add_labels(other.labels);
    }

    /// Unions labels into the draft, normalizing each and preserving the
    /// order existing labels already have.
    pub fn add_labels<I, S>(&mut self, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for label in labels {
            let normalized = normalize_label(label.as_ref());
            if normalized.is_empty() {
                continue;
            }
            if !self.labels.iter().any(|l| *l == normalized) {
                self.labels.push(normalized);
            }
        }
    }
}
