//! Read-only catalogs and search.

use super::{ListParams, ResourceId};
use crate::client::Client;
use crate::Result;
use serde::Serialize;
use serde_json::Value;

/// Service for instance-wide catalogs.
pub struct CatalogService<'a> {
    client: &'a Client,
}

impl<'a> CatalogService<'a> {
    /// Creates a new catalog service.
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists issue statuses.
    pub async fn issue_statuses(&self) -> Result<Value> {
        self.client.get("issue_statuses", &()).await
    }

    /// Lists trackers.
    pub async fn trackers(&self) -> Result<Value> {
        self.client.get("trackers", &()).await
    }

    /// Lists roles.
    pub async fn roles(&self) -> Result<Value> {
        self.client.get("roles", &()).await
    }

    /// Gets a role with its permissions.
    pub async fn role(&self, id: u64) -> Result<Value> {
        self.client.get(&format!("roles/{}", id), &()).await
    }

    /// Lists issue priorities.
    pub async fn issue_priorities(&self) -> Result<Value> {
        self.client.get("enumerations/issue_priorities", &()).await
    }

    /// Lists time entry activities.
    pub async fn time_entry_activities(&self) -> Result<Value> {
        self.client
            .get("enumerations/time_entry_activities", &())
            .await
    }

    /// Lists document categories.
    pub async fn document_categories(&self) -> Result<Value> {
        self.client
            .get("enumerations/document_categories", &())
            .await
    }

    /// Lists custom field definitions (administrators only).
    pub async fn custom_fields(&self) -> Result<Value> {
        self.client.get("custom_fields", &()).await
    }

    /// Lists saved queries visible to the current user.
    pub async fn queries(&self, params: &ListParams) -> Result<Value> {
        self.client.get("queries", params).await
    }
}

/// Search options.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchParams {
    /// The search terms.
    pub q: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// `all`, `my_projects` or `subprojects`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_words: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub titles_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_issues: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub news: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changesets: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wiki_pages: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<bool>,
}

/// Service for full-text search.
pub struct SearchService<'a> {
    client: &'a Client,
}

impl<'a> SearchService<'a> {
    /// Creates a new search service.
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Searches the whole instance, or one project.
    pub async fn search(
        &self,
        project_id: Option<ResourceId>,
        params: &SearchParams,
    ) -> Result<Value> {
        let path = match project_id {
            Some(project_id) => format!("projects/{}/search", project_id),
            None => "search".to_string(),
        };
        self.client.get(&path, params).await
    }
}
