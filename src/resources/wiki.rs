//! Wiki pages.

use super::{segment, wrap, ResourceId, UploadRef};
use crate::client::Client;
use crate::Result;
use serde::Serialize;
use serde_json::{json, Value};

/// Wiki page attributes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WikiPageFields {
    pub text: String,
    /// Change comment shown in the page history.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    /// The version being edited, for conflict detection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_title: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub uploads: Vec<UploadRef>,
}

/// Service for wiki operations.
pub struct WikiService<'a> {
    client: &'a Client,
}

impl<'a> WikiService<'a> {
    /// Creates a new wiki service.
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists the pages of a project wiki.
    pub async fn list(&self, project_id: impl Into<ResourceId>) -> Result<Value> {
        self.client
            .get(&format!("projects/{}/wiki/index", project_id.into()), &())
            .await
    }

    /// Gets a page, or one of its past versions.
    pub async fn get(
        &self,
        project_id: impl Into<ResourceId>,
        title: &str,
        version: Option<u32>,
        include_attachments: bool,
    ) -> Result<Value> {
        let mut path = format!("projects/{}/wiki/{}", project_id.into(), segment(title));
        if let Some(version) = version {
            path = format!("{}/{}", path, version);
        }
        let params = if include_attachments {
            json!({ "include": ["attachments"] })
        } else {
            Value::Null
        };
        self.client.get(&path, &params).await
    }

    /// Creates the page, or updates it if it exists.
    pub async fn create_or_update(
        &self,
        project_id: impl Into<ResourceId>,
        title: &str,
        page: &WikiPageFields,
    ) -> Result<Value> {
        self.client
            .put(
                &format!("projects/{}/wiki/{}", project_id.into(), segment(title)),
                &wrap("wiki_page", page),
            )
            .await
    }

    /// Deletes a page and its history.
    pub async fn delete(&self, project_id: impl Into<ResourceId>, title: &str) -> Result<Value> {
        self.client
            .delete(&format!("projects/{}/wiki/{}", project_id.into(), segment(title)))
            .await
    }
}
