//! Jira Client - TrackerClient implementation over the Jira Cloud REST API.
//!
//! Basic auth with email + API token. Create and update assemble one merged
//! fields payload; status changes go through the transitions endpoint
//! afterwards because Jira will not accept a status in the fields dict.
//! Assignees are resolved to account ids via user search; an unresolvable
//! assignee is logged and skipped rather than failing the whole create.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

use crate::config::JiraConfig;
use crate::domain::issue::{infer_labels, validate::normalize_label, IssueDraft};
use crate::ports::{
    CreatedIssue, IssueDetails, IssueSummary, SearchResults, TrackerClient, TrackerError,
};

use super::models::{
    CreatedIssueResponse, IssueResponse, SearchResponse, TransitionsResponse, UserField,
};

/// Issue type name to Jira issue type id. The id form survives sites that
/// localize type names; unknown names fall back to Task.
fn issue_type_id(name: &str) -> &'static str {
    match name {
        "Story" => "10004",
        "Epic" => "10000",
        _ => "10003", // Task
    }
}

/// TrackerClient backed by a Jira Cloud site.
pub struct JiraClient {
    config: JiraConfig,
    client: Client,
}

impl JiraClient {
    /// Creates a client from configuration. Call only when
    /// [`JiraConfig::is_configured`] holds.
    pub fn new(config: JiraConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .expect("Failed to create HTTP client");
        Self { config, client }
    }

    fn base_url(&self) -> &str {
        self.config
            .base_url
            .as_deref()
            .unwrap_or_default()
            .trim_end_matches('/')
    }

    fn browse_url(&self, key: &str) -> String {
        format!("{}/browse/{}", self.base_url(), key)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let email = self.config.email.as_deref().unwrap_or_default();
        let token = self
            .config
            .api_token
            .as_ref()
            .map(|t| t.expose_secret().clone())
            .unwrap_or_default();
        self.client
            .request(method, format!("{}{}", self.base_url(), path))
            .basic_auth(email, Some(token))
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, TrackerError> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(TrackerError::AuthenticationFailed);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TrackerError::Http {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    fn network(e: reqwest::Error) -> TrackerError {
        TrackerError::Network(e.to_string())
    }

    fn parse(e: reqwest::Error) -> TrackerError {
        TrackerError::Parse(e.to_string())
    }

    /// Builds the fields payload for a create call.
    fn create_fields(&self, draft: &IssueDraft) -> Map<String, Value> {
        let project_key = draft
            .project_key
            .clone()
            .unwrap_or_else(|| self.config.project_key.clone());
        let type_name = draft
            .issue_type
            .map(|t| t.as_str().to_string())
            .unwrap_or_else(|| "Task".to_string());

        let mut fields = Map::new();
        fields.insert("project".to_string(), json!({ "key": project_key }));
        fields.insert(
            "summary".to_string(),
            json!(draft
                .summary
                .clone()
                .unwrap_or_else(|| "Issue created via assistant".to_string())),
        );
        fields.insert(
            "issuetype".to_string(),
            json!({ "id": issue_type_id(&type_name) }),
        );

        if let Some(description) = &draft.description {
            fields.insert("description".to_string(), json!(description));
        }

        if let Some(priority) = draft.priority {
            if self.config.priority_allowed_for(&type_name) {
                fields.insert("priority".to_string(), json!({ "name": priority.as_str() }));
            } else {
                debug!(issue_type = %type_name, "priority withheld by policy");
            }
        }

        let labels = self.effective_labels(draft);
        if !labels.is_empty() {
            fields.insert("labels".to_string(), json!(labels));
        }

        if let Some(due) = &draft.due_date {
            fields.insert("duedate".to_string(), json!(due));
        }
        if let (Some(field_id), Some(start)) =
            (&self.config.start_date_field_id, &draft.start_date)
        {
            fields.insert(field_id.clone(), json!(start));
        }

        if let Some(parent) = &draft.parent_key {
            if self.config.parent_allowed_for(&type_name) {
                fields.insert("parent".to_string(), json!({ "key": parent }));
            } else {
                debug!(issue_type = %type_name, "parent link withheld; type is not a sub-task");
            }
        }

        fields
    }

    /// Labels to send: the draft's own, normalized, or a set inferred from
    /// the description when none were given.
    fn effective_labels(&self, draft: &IssueDraft) -> Vec<String> {
        if !draft.labels.is_empty() {
            return draft
                .labels
                .iter()
                .map(|l| normalize_label(l))
                .filter(|l| !l.is_empty())
                .collect();
        }
        draft
            .description
            .as_deref()
            .map(infer_labels)
            .unwrap_or_default()
    }

    /// Resolves a user identifier (email or name) to an account id.
    async fn find_account_id(&self, identifier: &str) -> Result<Option<String>, TrackerError> {
        let response = self
            .request(reqwest::Method::GET, "/rest/api/2/user/search")
            .query(&[("query", identifier)])
            .send()
            .await
            .map_err(Self::network)?;
        let response = Self::check(response).await?;
        let users: Vec<UserField> = response.json().await.map_err(Self::parse)?;

        let wanted = identifier.to_lowercase();
        let matched = users
            .iter()
            .find(|u| {
                u.email_address
                    .as_deref()
                    .is_some_and(|e| e.to_lowercase().contains(&wanted))
                    || u.display_name
                        .as_deref()
                        .is_some_and(|n| n.to_lowercase().contains(&wanted))
            })
            .or_else(|| users.first());

        Ok(matched.and_then(|u| u.account_id.clone()))
    }

    /// Moves an issue to the named status via the transitions endpoint.
    /// Returns false when no transition leads there.
    async fn transition_issue(&self, key: &str, target_status: &str) -> Result<bool, TrackerError> {
        let response = self
            .request(
                reqwest::Method::GET,
                &format!("/rest/api/2/issue/{key}/transitions"),
            )
            .send()
            .await
            .map_err(Self::network)?;
        let response = Self::check(response).await?;
        let transitions: TransitionsResponse = response.json().await.map_err(Self::parse)?;

        let target = target_status.trim().to_lowercase();
        let Some(transition) = transitions
            .transitions
            .iter()
            .find(|t| t.to.name.to_lowercase() == target)
        else {
            warn!(issue = key, status = target_status, "no transition leads to status");
            return Ok(false);
        };

        let body = json!({ "transition": { "id": transition.id } });
        let response = self
            .request(
                reqwest::Method::POST,
                &format!("/rest/api/2/issue/{key}/transitions"),
            )
            .json(&body)
            .send()
            .await
            .map_err(Self::network)?;
        Self::check(response).await?;
        info!(issue = key, status = target_status, "transitioned issue");
        Ok(true)
    }

    fn to_details(&self, issue: IssueResponse) -> IssueDetails {
        let fields = issue.fields;
        IssueDetails {
            url: self.browse_url(&issue.key),
            key: issue.key,
            summary: fields.summary.unwrap_or_default(),
            status: fields.status.map(|s| s.name).unwrap_or_else(|| "None".to_string()),
            priority: fields
                .priority
                .map(|p| p.name)
                .unwrap_or_else(|| "None".to_string()),
            assignee: fields
                .assignee
                .and_then(|a| a.display_name)
                .unwrap_or_else(|| "Unassigned".to_string()),
            issue_type: fields
                .issuetype
                .map(|t| t.name)
                .unwrap_or_else(|| "None".to_string()),
            description: fields
                .description
                .unwrap_or_else(|| "No description".to_string()),
            created: fields.created.unwrap_or_default(),
            updated: fields.updated.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl TrackerClient for JiraClient {
    async fn create_issue(&self, draft: &IssueDraft) -> Result<CreatedIssue, TrackerError> {
        let mut fields = self.create_fields(draft);

        if let Some(assignee) = &draft.assignee {
            match self.find_account_id(assignee).await {
                Ok(Some(account_id)) => {
                    fields.insert("assignee".to_string(), json!({ "accountId": account_id }));
                }
                Ok(None) => {
                    warn!(%assignee, "assignee not found, creating unassigned");
                }
                Err(e) => {
                    warn!(%assignee, error = %e, "assignee lookup failed, creating unassigned");
                }
            }
        }

        let fields_debug = Value::Object(fields.clone());
        debug!(fields = %fields_debug, "creating issue");
        let response = self
            .request(reqwest::Method::POST, "/rest/api/2/issue")
            .json(&json!({ "fields": fields }))
            .send()
            .await
            .map_err(Self::network)?;
        let response = Self::check(response).await?;
        let created: CreatedIssueResponse = response.json().await.map_err(Self::parse)?;
        info!(issue = %created.key, "created issue");

        if let Some(status) = draft.status {
            if !self.transition_issue(&created.key, status.as_str()).await? {
                warn!(issue = %created.key, status = status.as_str(), "could not apply initial status");
            }
        }

        Ok(CreatedIssue {
            url: self.browse_url(&created.key),
            key: created.key,
        })
    }

    async fn update_issue(&self, key: &str, draft: &IssueDraft) -> Result<(), TrackerError> {
        let mut fields = Map::new();

        if let Some(summary) = &draft.summary {
            fields.insert("summary".to_string(), json!(summary));
        }
        if let Some(description) = &draft.description {
            fields.insert("description".to_string(), json!(description));
        }
        if let Some(priority) = draft.priority {
            fields.insert("priority".to_string(), json!({ "name": priority.as_str() }));
        }
        if let Some(issue_type) = draft.issue_type {
            fields.insert("issuetype".to_string(), json!({ "name": issue_type.as_str() }));
        }
        if let Some(due) = &draft.due_date {
            fields.insert("duedate".to_string(), json!(due));
        }
        if let (Some(field_id), Some(start)) =
            (&self.config.start_date_field_id, &draft.start_date)
        {
            fields.insert(field_id.clone(), json!(start));
        }
        if !draft.labels.is_empty() {
            let labels: Vec<String> = draft
                .labels
                .iter()
                .map(|l| normalize_label(l))
                .filter(|l| !l.is_empty())
                .collect();
            fields.insert("labels".to_string(), json!(labels));
        }
        if let Some(assignee) = &draft.assignee {
            match self.find_account_id(assignee).await {
                Ok(Some(account_id)) => {
                    fields.insert("assignee".to_string(), json!({ "accountId": account_id }));
                }
                _ => warn!(%assignee, "assignee not found, leaving unchanged"),
            }
        }

        if !fields.is_empty() {
            let fields_debug = Value::Object(fields.clone());
            debug!(issue = key, fields = %fields_debug, "updating issue");
            let response = self
                .request(reqwest::Method::PUT, &format!("/rest/api/2/issue/{key}"))
                .json(&json!({ "fields": fields }))
                .send()
                .await
                .map_err(Self::network)?;
            if response.status() == StatusCode::NOT_FOUND {
                return Err(TrackerError::NotFound(key.to_string()));
            }
            Self::check(response).await?;
        }

        if let Some(status) = draft.status {
            if !self.transition_issue(key, status.as_str()).await? {
                warn!(issue = key, status = status.as_str(), "status transition unavailable");
            }
        }

        info!(issue = key, "updated issue");
        Ok(())
    }

    async fn get_issue(&self, key: &str) -> Result<IssueDetails, TrackerError> {
        let response = self
            .request(reqwest::Method::GET, &format!("/rest/api/2/issue/{key}"))
            .send()
            .await
            .map_err(Self::network)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(TrackerError::NotFound(key.to_string()));
        }
        let response = Self::check(response).await?;
        let issue: IssueResponse = response.json().await.map_err(Self::parse)?;
        Ok(self.to_details(issue))
    }

    async fn search_issues(&self, jql: &str, limit: u32) -> Result<SearchResults, TrackerError> {
        let max_results = limit.to_string();
        let response = self
            .request(reqwest::Method::GET, "/rest/api/2/search")
            .query(&[("jql", jql), ("maxResults", max_results.as_str())])
            .send()
            .await
            .map_err(Self::network)?;
        let response = Self::check(response).await?;
        let results: SearchResponse = response.json().await.map_err(Self::parse)?;

        let issues = results
            .issues
            .into_iter()
            .map(|issue| {
                let details = self.to_details(issue);
                IssueSummary {
                    key: details.key,
                    summary: details.summary,
                    status: details.status,
                    priority: details.priority,
                    assignee: details.assignee,
                    url: details.url,
                }
            })
            .collect();

        Ok(SearchResults {
            total: results.total,
            issues,
        })
    }

    async fn add_comment(&self, key: &str, body: &str) -> Result<(), TrackerError> {
        // API v3 comments take an Atlassian Document Format body.
        let payload = json!({
            "body": {
                "type": "doc",
                "version": 1,
                "content": [
                    {
                        "type": "paragraph",
                        "content": [{ "type": "text", "text": body }]
                    }
                ]
            }
        });
        let response = self
            .request(
                reqwest::Method::POST,
                &format!("/rest/api/3/issue/{key}/comment"),
            )
            .json(&payload)
            .send()
            .await
            .map_err(Self::network)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(TrackerError::NotFound(key.to_string()));
        }
        Self::check(response).await?;
        Ok(())
    }
}
