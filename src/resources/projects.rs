//! Projects, versions and memberships.

use super::{wrap, CustomFieldValue, ListParams, ResourceId};
use crate::client::Client;
use crate::Result;
use serde::Serialize;
use serde_json::Value;

/// Options for listing projects.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Associations to include (`trackers`, `issue_categories`,
    /// `enabled_modules`, `time_entry_activities`, `issue_custom_fields`).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,
}

/// Options for fetching one project.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectGetParams {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,
}

/// Project attributes for create and update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inherit_members: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_assigned_to_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_version_id: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tracker_ids: Vec<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub enabled_module_names: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issue_custom_field_ids: Vec<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub custom_fields: Vec<CustomFieldValue>,
}

/// Service for project operations.
pub struct ProjectsService<'a> {
    client: &'a Client,
}

impl<'a> ProjectsService<'a> {
    /// Creates a new projects service.
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists projects visible to the current user.
    pub async fn list(&self, params: &ProjectListParams) -> Result<Value> {
        self.client.get("projects", params).await
    }

    /// Gets a project by id or identifier.
    pub async fn get(&self, id: impl Into<ResourceId>, params: &ProjectGetParams) -> Result<Value> {
        self.client
            .get(&format!("projects/{}", id.into()), params)
            .await
    }

    /// Creates a project.
    pub async fn create(&self, project: &ProjectFields) -> Result<Value> {
        self.client.post("projects", &wrap("project", project)).await
    }

    /// Updates a project.
    pub async fn update(
        &self,
        id: impl Into<ResourceId>,
        project: &ProjectFields,
    ) -> Result<Value> {
        self.client
            .put(&format!("projects/{}", id.into()), &wrap("project", project))
            .await
    }

    /// Deletes a project.
    pub async fn delete(&self, id: impl Into<ResourceId>) -> Result<Value> {
        self.client.delete(&format!("projects/{}", id.into())).await
    }

    /// Archives a project.
    pub async fn archive(&self, id: impl Into<ResourceId>) -> Result<Value> {
        self.client
            .put_empty(&format!("projects/{}/archive", id.into()))
            .await
    }

    /// Unarchives a project.
    pub async fn unarchive(&self, id: impl Into<ResourceId>) -> Result<Value> {
        self.client
            .put_empty(&format!("projects/{}/unarchive", id.into()))
            .await
    }
}

/// Version attributes for create and update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VersionFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `open`, `locked` or `closed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// `none`, `descendants`, `hierarchy`, `tree` or `system`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sharing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wiki_page_title: Option<String>,
}

/// Service for version operations.
pub struct VersionsService<'a> {
    client: &'a Client,
}

impl<'a> VersionsService<'a> {
    /// Creates a new versions service.
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists the versions of a project, including shared ones.
    pub async fn list(&self, project_id: impl Into<ResourceId>) -> Result<Value> {
        self.client
            .get(&format!("projects/{}/versions", project_id.into()), &())
            .await
    }

    /// Gets a version.
    pub async fn get(&self, id: u64) -> Result<Value> {
        self.client.get(&format!("versions/{}", id), &()).await
    }

    /// Creates a version in a project.
    pub async fn create(
        &self,
        project_id: impl Into<ResourceId>,
        version: &VersionFields,
    ) -> Result<Value> {
        self.client
            .post(
                &format!("projects/{}/versions", project_id.into()),
                &wrap("version", version),
            )
            .await
    }

    /// Updates a version.
    pub async fn update(&self, id: u64, version: &VersionFields) -> Result<Value> {
        self.client
            .put(&format!("versions/{}", id), &wrap("version", version))
            .await
    }

    /// Deletes a version.
    pub async fn delete(&self, id: u64) -> Result<Value> {
        self.client.delete(&format!("versions/{}", id)).await
    }
}

/// Membership attributes.
///
/// `user_id` (a user or group) is required on creation and ignored on update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MembershipFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    pub role_ids: Vec<u64>,
}

/// Service for project membership operations.
pub struct MembershipsService<'a> {
    client: &'a Client,
}

impl<'a> MembershipsService<'a> {
    /// Creates a new memberships service.
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists the memberships of a project.
    pub async fn list(
        &self,
        project_id: impl Into<ResourceId>,
        params: &ListParams,
    ) -> Result<Value> {
        self.client
            .get(&format!("projects/{}/memberships", project_id.into()), params)
            .await
    }

    /// Gets a membership.
    pub async fn get(&self, id: u64) -> Result<Value> {
        self.client.get(&format!("memberships/{}", id), &()).await
    }

    /// Adds a user or group to a project.
    pub async fn create(
        &self,
        project_id: impl Into<ResourceId>,
        membership: &MembershipFields,
    ) -> Result<Value> {
        self.client
            .post(
                &format!("projects/{}/memberships", project_id.into()),
                &wrap("membership", membership),
            )
            .await
    }

    /// Replaces the roles of a membership.
    pub async fn update(&self, id: u64, membership: &MembershipFields) -> Result<Value> {
        self.client
            .put(&format!("memberships/{}", id), &wrap("membership", membership))
            .await
    }

    /// Deletes a membership.
    pub async fn delete(&self, id: u64) -> Result<Value> {
        self.client.delete(&format!("memberships/{}", id)).await
    }
}
