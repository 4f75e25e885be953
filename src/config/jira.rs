//! Jira tracker configuration.

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Configuration for the Jira REST client.
///
/// Credentials are optional as a set: with none of them present the service
/// runs against the in-memory mock tracker and no issues are created.
#[derive(Debug, Clone, Deserialize)]
pub struct JiraConfig {
    /// Site base URL, e.g. `https://yoursite.atlassian.net`.
    pub base_url: Option<String>,

    /// Account email for basic auth.
    pub email: Option<String>,

    /// API token for basic auth.
    pub api_token: Option<Secret<String>>,

    /// Project issues are created in when the draft names none.
    #[serde(default = "default_project_key")]
    pub project_key: String,

    /// Custom field id carrying the start date, e.g. `customfield_10015`.
    /// Start dates are dropped when unset.
    pub start_date_field_id: Option<String>,

    /// Issue type names that accept a parent link.
    #[serde(default = "default_subtask_types")]
    pub subtask_issue_types: Vec<String>,

    /// Issue type names that accept a priority field. `None` sends priority
    /// for every type; set this when the tracker schema rejects priority on
    /// some types.
    #[serde(default)]
    pub priority_issue_types: Option<Vec<String>>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl JiraConfig {
    /// Get timeout as Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// True when base URL, email, and token are all present.
    pub fn is_configured(&self) -> bool {
        self.base_url.as_ref().is_some_and(|v| !v.is_empty())
            && self.email.as_ref().is_some_and(|v| !v.is_empty())
            && self
                .api_token
                .as_ref()
                .is_some_and(|v| !v.expose_secret().is_empty())
    }

    /// True when priority may be sent for the given issue type name.
    pub fn priority_allowed_for(&self, issue_type: &str) -> bool {
        match &self.priority_issue_types {
            None => true,
            Some(types) => types.iter().any(|t| t.eq_ignore_ascii_case(issue_type)),
        }
    }

    /// True when the given issue type name accepts a parent link.
    pub fn parent_allowed_for(&self, issue_type: &str) -> bool {
        self.subtask_issue_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(issue_type))
    }

    /// Validate tracker configuration.
    ///
    /// Credentials must be all present or all absent; a partial set is a
    /// deployment mistake, not a mock-mode request.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let any = self.base_url.is_some() || self.email.is_some() || self.api_token.is_some();
        if any && !self.is_configured() {
            return Err(ValidationError::invalid(
                "jira",
                "set all of base_url, email, and api_token, or none for mock mode",
            ));
        }
        if let Some(url) = &self.base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::invalid(
                    "jira.base_url",
                    "must start with http:// or https://",
                ));
            }
        }
        if self.project_key.trim().is_empty() {
            return Err(ValidationError::invalid(
                "jira.project_key",
                "must not be empty",
            ));
        }
        Ok(())
    }
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            email: None,
            api_token: None,
            project_key: default_project_key(),
            start_date_field_id: None,
            subtask_issue_types: default_subtask_types(),
            priority_issue_types: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_project_key() -> String {
    "TJ".to_string()
}

fn default_subtask_types() -> Vec<String> {
    vec!["Sub-task".to_string()]
}

fn default_timeout() -> u64 {
    30
}
