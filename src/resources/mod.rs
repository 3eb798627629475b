//! Per-resource services.
//!
//! Each service is a borrowed view over a [`Client`](crate::Client) that builds
//! resource paths and typed payloads, then delegates to
//! [`Client::request`](crate::Client::request). Creation and update payloads
//! are wrapped under the singular resource key (`{"issue": {...}}`). Responses
//! are returned as decoded JSON.

mod attachments;
mod catalog;
mod issues;
mod news;
mod projects;
mod time_entries;
mod users;
mod wiki;

pub use attachments::{
    AttachmentFields, AttachmentsService, FileFields, FilesService, UploadsService,
};
pub use catalog::{CatalogService, SearchParams, SearchService};
pub use issues::{
    IssueCategoriesService, IssueCategoryFields, IssueFields, IssueGetParams, IssueListParams,
    IssueRelationFields, IssueRelationsService, IssuesService,
};
pub use news::{NewsFields, NewsService};
pub use projects::{
    MembershipFields, MembershipsService, ProjectFields, ProjectGetParams, ProjectListParams,
    ProjectsService, VersionFields, VersionsService,
};
pub use time_entries::{TimeEntriesService, TimeEntryFields, TimeEntryListParams};
pub use users::{
    GroupFields, GroupsService, MyAccountFields, MyAccountService, UserFields, UserListParams,
    UsersService,
};
pub use wiki::{WikiPageFields, WikiService};

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A numeric id or a textual identifier (project identifiers, user logins).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResourceId {
    /// A numeric database id.
    Id(u64),
    /// A textual identifier.
    Identifier(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Id(id) => write!(f, "{}", id),
            ResourceId::Identifier(identifier) => f.write_str(&urlencoding::encode(identifier)),
        }
    }
}

impl From<u64> for ResourceId {
    fn from(id: u64) -> Self {
        ResourceId::Id(id)
    }
}

impl From<&str> for ResourceId {
    fn from(identifier: &str) -> Self {
        ResourceId::Identifier(identifier.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(identifier: String) -> Self {
        ResourceId::Identifier(identifier)
    }
}

/// Offset/limit pagination, accepted by every list endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ListParams {
    /// Number of records to skip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Maximum number of records to return (the server caps this at 100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// A reference to a previously uploaded file.
///
/// The token comes from [`UploadsService::upload`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadRef {
    /// The upload token.
    pub token: String,
    /// The file name to store.
    pub filename: String,
    /// The MIME type of the file.
    pub content_type: String,
    /// An optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UploadRef {
    /// Creates a reference without a description.
    pub fn new(
        token: impl Into<String>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            filename: filename.into(),
            content_type: content_type.into(),
            description: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A custom field value in a create or update payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomFieldValue {
    /// The custom field id.
    pub id: u64,
    /// A single value, or several for multi-value fields.
    pub value: serde_json::Value,
}

impl CustomFieldValue {
    /// Creates a custom field value.
    pub fn new(id: u64, value: impl Into<serde_json::Value>) -> Self {
        Self {
            id,
            value: value.into(),
        }
    }
}

/// Wraps a payload under its singular resource key.
pub(crate) fn wrap<'a, T: Serialize>(
    key: &'static str,
    value: &'a T,
) -> BTreeMap<&'static str, &'a T> {
    BTreeMap::from([(key, value)])
}

/// Encodes a free-form path segment such as a wiki page title.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
