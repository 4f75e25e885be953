//! Issue domain module.
//!
//! The structured representation of a Jira issue as it is assembled across a
//! conversation, plus the pure building blocks the collection engine leans on:
//! the field registry, input validators, and keyword label inference.

pub mod draft;
pub mod fields;
pub mod labels;
pub mod validate;

pub use draft::{Intent, IssueDraft, IssueStatus, IssueType, Priority};
pub use fields::{interpret_choice, IssueField, COLLECTION_ORDER, REQUIRED_FIELDS};
pub use labels::{infer_labels, MAX_INFERRED_LABELS};
