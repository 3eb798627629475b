//! News.

use super::{wrap, ListParams, ResourceId, UploadRef};
use crate::client::Client;
use crate::Result;
use serde::Serialize;
use serde_json::Value;

/// News attributes for create and update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewsFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub uploads: Vec<UploadRef>,
}

/// Service for news operations.
pub struct NewsService<'a> {
    client: &'a Client,
}

impl<'a> NewsService<'a> {
    /// Creates a new news service.
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists news across all projects, or for one project.
    pub async fn list(&self, project_id: Option<ResourceId>, params: &ListParams) -> Result<Value> {
        let path = match project_id {
            Some(project_id) => format!("projects/{}/news", project_id),
            None => "news".to_string(),
        };
        self.client.get(&path, params).await
    }

    /// Gets a news item.
    pub async fn get(&self, id: u64) -> Result<Value> {
        self.client.get(&format!("news/{}", id), &()).await
    }

    /// Publishes news in a project.
    pub async fn create(
        &self,
        project_id: impl Into<ResourceId>,
        news: &NewsFields,
    ) -> Result<Value> {
        self.client
            .post(
                &format!("projects/{}/news", project_id.into()),
                &wrap("news", news),
            )
            .await
    }

    /// Updates a news item.
    pub async fn update(&self, id: u64, news: &NewsFields) -> Result<Value> {
        self.client
            .put(&format!("news/{}", id), &wrap("news", news))
            .await
    }

    /// Deletes a news item.
    pub async fn delete(&self, id: u64) -> Result<Value> {
        self.client.delete(&format!("news/{}", id)).await
    }
}
