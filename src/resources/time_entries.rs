//! Time entries.

use super::{wrap, CustomFieldValue, ResourceId};
use crate::client::Client;
use crate::Result;
use serde::Serialize;
use serde_json::Value;

/// Filters for listing time entries.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TimeEntryListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// `"me"` or a user id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ResourceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_id: Option<u64>,
    /// Exact date, `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spent_on: Option<String>,
    /// Range start, `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Range end, `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

/// Time entry attributes for create and update.
///
/// On creation either `issue_id` or `project_id` is required.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TimeEntryFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ResourceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spent_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    /// Log time for another user (requires the matching permission).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub custom_fields: Vec<CustomFieldValue>,
}

/// Service for time entry operations.
pub struct TimeEntriesService<'a> {
    client: &'a Client,
}

impl<'a> TimeEntriesService<'a> {
    /// Creates a new time entries service.
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists time entries.
    pub async fn list(&self, params: &TimeEntryListParams) -> Result<Value> {
        self.client.get("time_entries", params).await
    }

    /// Gets a time entry.
    pub async fn get(&self, id: u64) -> Result<Value> {
        self.client.get(&format!("time_entries/{}", id), &()).await
    }

    /// Logs time.
    pub async fn create(&self, entry: &TimeEntryFields) -> Result<Value> {
        self.client
            .post("time_entries", &wrap("time_entry", entry))
            .await
    }

    /// Updates a time entry.
    pub async fn update(&self, id: u64, entry: &TimeEntryFields) -> Result<Value> {
        self.client
            .put(&format!("time_entries/{}", id), &wrap("time_entry", entry))
            .await
    }

    /// Deletes a time entry.
    pub async fn delete(&self, id: u64) -> Result<Value> {
        self.client.delete(&format!("time_entries/{}", id)).await
    }
}
