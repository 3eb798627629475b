//! Attachments, uploads and project files.
//!
//! Files are attached in two steps: the content is sent to the uploads
//! endpoint, which answers with a token, and the token is then referenced
//! from an issue, wiki page, news item or project file through an
//! [`UploadRef`](super::UploadRef).

use super::{wrap, ResourceId};
use crate::client::Client;
use crate::Result;
use serde::Serialize;
use serde_json::Value;

/// Service for attachment operations.
pub struct AttachmentsService<'a> {
    client: &'a Client,
}

/// Editable attachment attributes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AttachmentFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl<'a> AttachmentsService<'a> {
    /// Creates a new attachments service.
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Gets attachment metadata, including its `content_url`.
    pub async fn get(&self, id: u64) -> Result<Value> {
        self.client.get(&format!("attachments/{}", id), &()).await
    }

    /// Renames or re-describes an attachment.
    pub async fn update(&self, id: u64, attachment: &AttachmentFields) -> Result<Value> {
        self.client
            .put(&format!("attachments/{}", id), &wrap("attachment", attachment))
            .await
    }

    /// Deletes an attachment.
    pub async fn delete(&self, id: u64) -> Result<Value> {
        self.client.delete(&format!("attachments/{}", id)).await
    }
}

/// Service for uploading file content.
pub struct UploadsService<'a> {
    client: &'a Client,
}

impl<'a> UploadsService<'a> {
    /// Creates a new uploads service.
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Uploads raw content and returns `{"upload": {"id": .., "token": ".."}}`.
    ///
    /// The content counts against the client's body-size ceiling.
    pub async fn upload(&self, content: impl Into<Vec<u8>>) -> Result<Value> {
        self.client.upload(content).await
    }

    /// Uploads raw content and returns only the token.
    ///
    /// Returns `None` if the response does not carry one.
    pub async fn upload_token(&self, content: impl Into<Vec<u8>>) -> Result<Option<String>> {
        let response = self.upload(content).await?;
        Ok(response["upload"]["token"].as_str().map(str::to_string))
    }
}

/// A project file, created from an upload token.
#[derive(Debug, Clone, Serialize)]
pub struct FileFields {
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Service for project file operations.
pub struct FilesService<'a> {
    client: &'a Client,
}

impl<'a> FilesService<'a> {
    /// Creates a new files service.
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists the files of a project.
    pub async fn list(&self, project_id: impl Into<ResourceId>) -> Result<Value> {
        self.client
            .get(&format!("projects/{}/files", project_id.into()), &())
            .await
    }

    /// Adds an uploaded file to a project.
    pub async fn create(
        &self,
        project_id: impl Into<ResourceId>,
        file: &FileFields,
    ) -> Result<Value> {
        self.client
            .post(
                &format!("projects/{}/files", project_id.into()),
                &wrap("file", file),
            )
            .await
    }
}
