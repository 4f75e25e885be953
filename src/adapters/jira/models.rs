//! Wire types for the Jira REST API.
//!
//! Response shapes are typed; create/update request bodies are assembled as
//! JSON maps in the client because Jira field payloads are heterogeneous
//! (custom field ids appear as top-level keys).

use serde::Deserialize;

/// `POST /rest/api/2/issue` response.
#[derive(Debug, Deserialize)]
pub struct CreatedIssueResponse {
    pub key: String,
}

/// `GET /rest/api/2/issue/{key}` response.
#[derive(Debug, Deserialize)]
pub struct IssueResponse {
    pub key: String,
    pub fields: IssueFields,
}

#[derive(Debug, Deserialize)]
pub struct IssueFields {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<NamedField>,
    #[serde(default)]
    pub priority: Option<NamedField>,
    #[serde(default)]
    pub issuetype: Option<NamedField>,
    #[serde(default)]
    pub assignee: Option<UserField>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
}

/// Any `{"name": ...}` field (status, priority, issuetype).
#[derive(Debug, Deserialize)]
pub struct NamedField {
    pub name: String,
}

/// Assignee / reporter shape.
#[derive(Debug, Deserialize)]
pub struct UserField {
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
    #[serde(rename = "emailAddress", default)]
    pub email_address: Option<String>,
    #[serde(rename = "accountId", default)]
    pub account_id: Option<String>,
}

/// `GET /rest/api/2/search` response.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub issues: Vec<IssueResponse>,
}

/// `GET /rest/api/2/issue/{key}/transitions` response.
#[derive(Debug, Deserialize)]
pub struct TransitionsResponse {
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

#[derive(Debug, Deserialize)]
pub struct Transition {
    pub id: String,
    pub to: NamedField,
}
