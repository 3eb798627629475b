//! Users, groups and the current user's account.

use super::{wrap, CustomFieldValue, ListParams};
use crate::client::Client;
use crate::Result;
use serde::Serialize;
use serde_json::{json, Value};

/// Filters for listing users (administrators only).
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// `1` active, `2` registered, `3` locked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u8>,
    /// Matches login, first name, last name and mail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<u64>,
}

/// User attributes for create and update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_source_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mail_notification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub must_change_passwd: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generate_password: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub custom_fields: Vec<CustomFieldValue>,
}

#[derive(Serialize)]
struct UserPayload<'a> {
    user: &'a UserFields,
    #[serde(skip_serializing_if = "Option::is_none")]
    send_information: Option<bool>,
}

/// Service for user operations.
pub struct UsersService<'a> {
    client: &'a Client,
}

impl<'a> UsersService<'a> {
    /// Creates a new users service.
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists users.
    pub async fn list(&self, params: &UserListParams) -> Result<Value> {
        self.client.get("users", params).await
    }

    /// Gets a user, optionally including `memberships` and `groups`.
    pub async fn get(&self, id: u64, include: &[&str]) -> Result<Value> {
        self.client
            .get(&format!("users/{}", id), &include_params(include))
            .await
    }

    /// Gets the user the client is authenticated (or impersonating) as.
    pub async fn current(&self, include: &[&str]) -> Result<Value> {
        self.client
            .get("users/current", &include_params(include))
            .await
    }

    /// Creates a user, optionally mailing the account information.
    pub async fn create(&self, user: &UserFields, send_information: bool) -> Result<Value> {
        let payload = UserPayload {
            user,
            send_information: send_information.then_some(true),
        };
        self.client.post("users", &payload).await
    }

    /// Updates a user.
    pub async fn update(&self, id: u64, user: &UserFields) -> Result<Value> {
        self.client
            .put(&format!("users/{}", id), &wrap("user", user))
            .await
    }

    /// Deletes a user.
    pub async fn delete(&self, id: u64) -> Result<Value> {
        self.client.delete(&format!("users/{}", id)).await
    }
}

/// Group attributes for create and update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GroupFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub user_ids: Vec<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub custom_fields: Vec<CustomFieldValue>,
}

/// Service for group operations.
pub struct GroupsService<'a> {
    client: &'a Client,
}

impl<'a> GroupsService<'a> {
    /// Creates a new groups service.
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists groups.
    pub async fn list(&self, params: &ListParams) -> Result<Value> {
        self.client.get("groups", params).await
    }

    /// Gets a group, optionally including `users` and `memberships`.
    pub async fn get(&self, id: u64, include: &[&str]) -> Result<Value> {
        self.client
            .get(&format!("groups/{}", id), &include_params(include))
            .await
    }

    /// Creates a group.
    pub async fn create(&self, group: &GroupFields) -> Result<Value> {
        self.client.post("groups", &wrap("group", group)).await
    }

    /// Updates a group.
    pub async fn update(&self, id: u64, group: &GroupFields) -> Result<Value> {
        self.client
            .put(&format!("groups/{}", id), &wrap("group", group))
            .await
    }

    /// Deletes a group.
    pub async fn delete(&self, id: u64) -> Result<Value> {
        self.client.delete(&format!("groups/{}", id)).await
    }

    /// Adds a user to a group.
    pub async fn add_user(&self, id: u64, user_id: u64) -> Result<Value> {
        self.client
            .post(&format!("groups/{}/users", id), &json!({ "user_id": user_id }))
            .await
    }

    /// Removes a user from a group.
    pub async fn remove_user(&self, id: u64, user_id: u64) -> Result<Value> {
        self.client
            .delete(&format!("groups/{}/users/{}", id, user_id))
            .await
    }
}

/// Editable attributes of the current user's account.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MyAccountFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mail_notification: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub custom_fields: Vec<CustomFieldValue>,
}

/// Service for the authenticated user's own account.
pub struct MyAccountService<'a> {
    client: &'a Client,
}

impl<'a> MyAccountService<'a> {
    /// Creates a new account service.
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Gets the account details.
    pub async fn get(&self) -> Result<Value> {
        self.client.get("my/account", &()).await
    }

    /// Updates the account details.
    pub async fn update(&self, account: &MyAccountFields) -> Result<Value> {
        self.client.put("my/account", &wrap("user", account)).await
    }
}

fn include_params(include: &[&str]) -> Value {
    if include.is_empty() {
        Value::Null
    } else {
        json!({ "include": include })
    }
}
