//! Issues, issue relations and issue categories.

use super::{wrap, CustomFieldValue, ResourceId, UploadRef};
use crate::client::Client;
use crate::request::RequestDescriptor;
use crate::Result;
use http::Method;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Filters for listing issues.
///
/// Multi-valued filters are sent comma-separated (`tracker_id=1,2`).
#[derive(Debug, Clone, Default, Serialize)]
pub struct IssueListParams {
    /// Number of records to skip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Maximum number of records to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Sort order, e.g. `"updated_on:desc"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    /// Associations to include (`attachments`, `relations`).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,
    /// Restrict to these issue ids.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issue_id: Vec<u64>,
    /// Project id or identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ResourceId>,
    /// Subproject filter, e.g. `"!*"` to exclude subprojects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subproject_id: Option<String>,
    /// Tracker ids.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tracker_id: Vec<u64>,
    /// `"open"`, `"closed"`, `"*"` or a status id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<String>,
    /// `"me"` or a user id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<String>,
    /// Parent issue id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
    /// Creation date filter, e.g. `">=2024-01-01"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<String>,
    /// Update date filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<String>,
    /// Saved query id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_id: Option<u64>,
    /// Custom field filters keyed `cf_<id>`.
    #[serde(flatten)]
    pub custom_fields: BTreeMap<String, String>,
}

/// Options for fetching one issue.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IssueGetParams {
    /// Associations to include (`children`, `attachments`, `relations`,
    /// `changesets`, `journals`, `watchers`, `allowed_statuses`).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,
}

/// Issue attributes for create and update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IssueFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ResourceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracker_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_version_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_issue_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done_ratio: Option<u8>,
    /// Journal note, on update only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_notes: Option<bool>,
    /// Watchers to add, on creation only. Sent as a JSON array.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub watcher_user_ids: Vec<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub custom_fields: Vec<CustomFieldValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub uploads: Vec<UploadRef>,
}

/// Service for issue operations.
pub struct IssuesService<'a> {
    client: &'a Client,
}

impl<'a> IssuesService<'a> {
    /// Creates a new issues service.
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists issues.
    pub async fn list(&self, params: &IssueListParams) -> Result<Value> {
        self.client.get("issues", params).await
    }

    /// Gets an issue.
    pub async fn get(&self, id: u64, params: &IssueGetParams) -> Result<Value> {
        self.client.get(&format!("issues/{}", id), params).await
    }

    /// Creates an issue.
    pub async fn create(&self, issue: &IssueFields) -> Result<Value> {
        self.client.post("issues", &wrap("issue", issue)).await
    }

    /// Updates an issue.
    pub async fn update(&self, id: u64, issue: &IssueFields) -> Result<Value> {
        self.client
            .put(&format!("issues/{}", id), &wrap("issue", issue))
            .await
    }

    /// Deletes an issue.
    pub async fn delete(&self, id: u64) -> Result<Value> {
        self.client.delete(&format!("issues/{}", id)).await
    }

    /// Adds a watcher to an issue.
    pub async fn add_watcher(&self, id: u64, user_id: u64) -> Result<Value> {
        self.client
            .post(
                &format!("issues/{}/watchers", id),
                &json!({ "user_id": user_id }),
            )
            .await
    }

    /// Removes a watcher from an issue.
    pub async fn remove_watcher(&self, id: u64, user_id: u64) -> Result<Value> {
        self.client
            .delete(&format!("issues/{}/watchers/{}", id, user_id))
            .await
    }
}

/// Relation attributes for creation.
#[derive(Debug, Clone, Serialize)]
pub struct IssueRelationFields {
    /// The related issue.
    pub issue_to_id: u64,
    /// `relates`, `duplicates`, `blocks`, `precedes`, ...
    pub relation_type: String,
    /// Delay in days, for `precedes`/`follows`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<i32>,
}

/// Service for issue relation operations.
pub struct IssueRelationsService<'a> {
    client: &'a Client,
}

impl<'a> IssueRelationsService<'a> {
    /// Creates a new issue relations service.
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists the relations of an issue.
    pub async fn list(&self, issue_id: u64) -> Result<Value> {
        self.client
            .get(&format!("issues/{}/relations", issue_id), &())
            .await
    }

    /// Gets a relation.
    pub async fn get(&self, id: u64) -> Result<Value> {
        self.client.get(&format!("relations/{}", id), &()).await
    }

    /// Relates an issue to another.
    pub async fn create(&self, issue_id: u64, relation: &IssueRelationFields) -> Result<Value> {
        self.client
            .post(
                &format!("issues/{}/relations", issue_id),
                &wrap("relation", relation),
            )
            .await
    }

    /// Deletes a relation.
    pub async fn delete(&self, id: u64) -> Result<Value> {
        self.client.delete(&format!("relations/{}", id)).await
    }
}

/// Issue category attributes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IssueCategoryFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<u64>,
}

/// Service for issue category operations.
pub struct IssueCategoriesService<'a> {
    client: &'a Client,
}

impl<'a> IssueCategoriesService<'a> {
    /// Creates a new issue categories service.
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists the categories of a project.
    pub async fn list(&self, project_id: impl Into<ResourceId>) -> Result<Value> {
        self.client
            .get(&format!("projects/{}/issue_categories", project_id.into()), &())
            .await
    }

    /// Gets a category.
    pub async fn get(&self, id: u64) -> Result<Value> {
        self.client
            .get(&format!("issue_categories/{}", id), &())
            .await
    }

    /// Creates a category in a project.
    pub async fn create(
        &self,
        project_id: impl Into<ResourceId>,
        category: &IssueCategoryFields,
    ) -> Result<Value> {
        self.client
            .post(
                &format!("projects/{}/issue_categories", project_id.into()),
                &wrap("issue_category", category),
            )
            .await
    }

    /// Updates a category.
    pub async fn update(&self, id: u64, category: &IssueCategoryFields) -> Result<Value> {
        self.client
            .put(
                &format!("issue_categories/{}", id),
                &wrap("issue_category", category),
            )
            .await
    }

    /// Deletes a category, optionally moving its issues to another category.
    pub async fn delete(&self, id: u64, reassign_to_id: Option<u64>) -> Result<Value> {
        let mut descriptor =
            RequestDescriptor::new(Method::DELETE, format!("issue_categories/{}", id));
        if let Some(reassign_to_id) = reassign_to_id {
            descriptor = descriptor.with_params(json!({ "reassign_to_id": reassign_to_id }));
        }
        self.client.request(descriptor).await
    }
}
