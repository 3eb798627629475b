//! The Redmine client and request dispatcher.
//!
//! The [`Client`] type is the main entry point. Every resource service
//! funnels into [`Client::request`], which picks the payload encoding, sends
//! the call through the client's [`Session`] and translates failures.

use crate::{
    config::ClientConfig,
    error::translate,
    request::{Payload, RequestDescriptor, RequestMode},
    resources::{
        AttachmentsService, CatalogService, FilesService, GroupsService, IssueCategoriesService,
        IssueRelationsService, IssuesService, MembershipsService, MyAccountService, NewsService,
        ProjectsService, SearchService, TimeEntriesService, UploadsService, UsersService,
        VersionsService, WikiService,
    },
    session::{Body, Session},
    Error, Result,
};
use http::Method;
use once_cell::sync::OnceCell;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// A client for one Redmine instance.
///
/// Cloning is cheap; clones share the configuration and the session.
///
/// # Examples
///
/// ```no_run
/// use redmine_client::{Client, ClientConfig};
/// use redmine_client::resources::IssueListParams;
///
/// # async fn example() -> Result<(), redmine_client::Error> {
/// let client = Client::new(
///     ClientConfig::builder()
///         .base_url("https://redmine.example.com")
///         .api_key("0123456789abcdef")
///         .build()?,
/// );
///
/// let params = IssueListParams {
///     project_id: Some("website".into()),
///     status_id: Some("open".into()),
///     limit: Some(25),
///     ..Default::default()
/// };
/// let issues = client.issues().list(&params).await?;
/// println!("{} open issues", issues["total_count"]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    config: ClientConfig,
    session: OnceCell<Session>,
}

impl Client {
    /// Creates a client. No connection is made until the first request.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                config,
                session: OnceCell::new(),
            }),
        }
    }

    /// The configuration this client was created with.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Returns the session, creating it on first use.
    ///
    /// The session is created at most once per client; later calls return the
    /// same instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be created from the configuration.
    pub fn session(&self) -> Result<&Session> {
        self.inner
            .session
            .get_or_try_init(|| Session::new(&self.inner.config))
    }

    /// Dispatches one request and returns the decoded response body.
    ///
    /// - GET: structured parameters are normalized (sequences joined with
    ///   commas) and sent as the query string
    /// - POST, PUT, DELETE: structured parameters are sent unchanged as JSON
    /// - the `uploads` path: raw bytes are sent as `application/octet-stream`
    ///
    /// # Errors
    ///
    /// Returns a single [`Error`] describing the failure. A payload that does
    /// not fit the request mode is rejected before anything is sent.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use redmine_client::{Client, ClientConfig, RequestDescriptor};
    /// use http::Method;
    /// use serde_json::json;
    ///
    /// # async fn example() -> Result<(), redmine_client::Error> {
    /// let client = Client::new(
    ///     ClientConfig::builder()
    ///         .base_url("https://redmine.example.com")
    ///         .build()?,
    /// );
    ///
    /// let descriptor = RequestDescriptor::new(Method::GET, "issues")
    ///     .with_params(json!({ "params": { "limit": 5, "tracker_id": [1, 2] } }));
    /// let issues = client.request(descriptor).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn request(&self, descriptor: RequestDescriptor) -> Result<Value> {
        let session = self.session()?;
        let mode = descriptor.mode();
        let endpoint = descriptor.endpoint();

        let query = match mode {
            RequestMode::Query => descriptor.query_params().to_query_pairs(),
            _ => Vec::new(),
        };

        let body = match (mode, descriptor.payload) {
            (RequestMode::Query | RequestMode::Json, Payload::Raw(_)) => {
                return Err(Error::ConfigurationError(format!(
                    "raw payloads are only accepted by the {} endpoint",
                    crate::request::UPLOADS_PATH
                )));
            }
            (RequestMode::Query, _) => Body::None,
            (RequestMode::Json, Payload::Empty) => Body::None,
            (RequestMode::Json, Payload::Structured(value)) => Body::Json(
                serde_json::to_vec(&value).map_err(|e| Error::SerializationFailed(e.to_string()))?,
            ),
            (RequestMode::Upload, Payload::Raw(bytes)) => Body::Bytes(bytes),
            (RequestMode::Upload, Payload::Empty) => Body::Bytes(Vec::new()),
            (RequestMode::Upload, Payload::Structured(_)) => {
                return Err(Error::ConfigurationError(
                    "uploads expect a raw byte payload".to_string(),
                ));
            }
        };

        let method = descriptor.method;
        session
            .execute(method.clone(), &endpoint, &query, body)
            .await
            .map_err(|failure| {
                let error = translate(failure, session.base_url(), &endpoint);
                tracing::warn!(
                    error = %error,
                    kind = ?error.kind(),
                    method = %method,
                    path = %endpoint,
                    "Request failed"
                );
                error
            })
    }

    /// Makes a GET request with query parameters.
    pub async fn get<P>(&self, path: &str, params: &P) -> Result<Value>
    where
        P: Serialize + ?Sized,
    {
        let descriptor = RequestDescriptor::new(Method::GET, path).with_params(to_value(params)?);
        self.request(descriptor).await
    }

    /// Makes a POST request with a JSON body.
    pub async fn post<B>(&self, path: &str, body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let descriptor = RequestDescriptor::new(Method::POST, path).with_params(to_value(body)?);
        self.request(descriptor).await
    }

    /// Makes a PUT request with a JSON body.
    pub async fn put<B>(&self, path: &str, body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let descriptor = RequestDescriptor::new(Method::PUT, path).with_params(to_value(body)?);
        self.request(descriptor).await
    }

    /// Makes a PUT request without a body.
    pub async fn put_empty(&self, path: &str) -> Result<Value> {
        self.request(RequestDescriptor::new(Method::PUT, path)).await
    }

    /// Makes a DELETE request.
    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.request(RequestDescriptor::new(Method::DELETE, path)).await
    }

    /// Uploads raw bytes to the uploads endpoint.
    pub async fn upload(&self, content: impl Into<Vec<u8>>) -> Result<Value> {
        let descriptor =
            RequestDescriptor::new(Method::POST, crate::request::UPLOADS_PATH).with_bytes(content);
        self.request(descriptor).await
    }

    /// Project operations.
    pub fn projects(&self) -> ProjectsService<'_> {
        ProjectsService::new(self)
    }

    /// Issue operations.
    pub fn issues(&self) -> IssuesService<'_> {
        IssuesService::new(self)
    }

    /// Issue relation operations.
    pub fn issue_relations(&self) -> IssueRelationsService<'_> {
        IssueRelationsService::new(self)
    }

    /// Issue category operations.
    pub fn issue_categories(&self) -> IssueCategoriesService<'_> {
        IssueCategoriesService::new(self)
    }

    /// Version operations.
    pub fn versions(&self) -> VersionsService<'_> {
        VersionsService::new(self)
    }

    /// Wiki page operations.
    pub fn wiki(&self) -> WikiService<'_> {
        WikiService::new(self)
    }

    /// Time entry operations.
    pub fn time_entries(&self) -> TimeEntriesService<'_> {
        TimeEntriesService::new(self)
    }

    /// Project membership operations.
    pub fn memberships(&self) -> MembershipsService<'_> {
        MembershipsService::new(self)
    }

    /// User operations.
    pub fn users(&self) -> UsersService<'_> {
        UsersService::new(self)
    }

    /// Group operations.
    pub fn groups(&self) -> GroupsService<'_> {
        GroupsService::new(self)
    }

    /// News operations.
    pub fn news(&self) -> NewsService<'_> {
        NewsService::new(self)
    }

    /// Attachment operations.
    pub fn attachments(&self) -> AttachmentsService<'_> {
        AttachmentsService::new(self)
    }

    /// File upload operations.
    pub fn uploads(&self) -> UploadsService<'_> {
        UploadsService::new(self)
    }

    /// Project file operations.
    pub fn files(&self) -> FilesService<'_> {
        FilesService::new(self)
    }

    /// Read-only catalogs: statuses, trackers, roles, enumerations, custom fields, queries.
    pub fn catalog(&self) -> CatalogService<'_> {
        CatalogService::new(self)
    }

    /// Operations on the authenticated user's account.
    pub fn my_account(&self) -> MyAccountService<'_> {
        MyAccountService::new(self)
    }

    /// Full-text search.
    pub fn search(&self) -> SearchService<'_> {
        SearchService::new(self)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.inner.config)
            .field("session_created", &self.inner.session.get().is_some())
            .finish()
    }
}

fn to_value<T>(value: &T) -> Result<Value>
where
    T: Serialize + ?Sized,
{
    serde_json::to_value(value).map_err(|e| Error::SerializationFailed(e.to_string()))
}
