//! Client configuration.
//!
//! A [`ClientConfig`] is supplied once when a [`Client`](crate::Client) is
//! created and never changes afterwards.

use crate::{Error, Result};
use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Default ceiling for outgoing request bodies, in bytes (5 MiB).
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 5_242_880;

const ENV_URL: &str = "REDMINE_URL";
const ENV_API_KEY: &str = "REDMINE_API_KEY";
const ENV_USERNAME: &str = "REDMINE_USERNAME";
const ENV_PASSWORD: &str = "REDMINE_PASSWORD";
const ENV_IMPERSONATE: &str = "REDMINE_IMPERSONATE";
const ENV_MAX_UPLOAD_SIZE: &str = "REDMINE_MAX_UPLOAD_SIZE";

/// Connection settings for a Redmine instance.
///
/// Authentication is resolved from the optional fields when the first request
/// is made: an API key wins over a username/password pair, and no credentials
/// at all is valid for publicly readable resources.
///
/// # Examples
///
/// ```
/// use redmine_client::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .base_url("https://redmine.example.com/")
///     .api_key("0123456789abcdef")
///     .impersonate_user("jsmith")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.base_url(), "https://redmine.example.com");
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawConfig")]
pub struct ClientConfig {
    base_url: String,
    api_key: Option<SecretString>,
    username: Option<String>,
    password: Option<SecretString>,
    impersonate_user: Option<String>,
    max_upload_size: usize,
    timeout: Option<Duration>,
}

impl ClientConfig {
    /// Creates a new `ClientConfigBuilder`.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Loads configuration from `REDMINE_*` environment variables.
    ///
    /// `REDMINE_URL` is required. `REDMINE_API_KEY`, `REDMINE_USERNAME`,
    /// `REDMINE_PASSWORD`, `REDMINE_IMPERSONATE` and `REDMINE_MAX_UPLOAD_SIZE`
    /// are optional.
    ///
    /// # Errors
    ///
    /// Returns an error if `REDMINE_URL` is missing or invalid, or if
    /// `REDMINE_MAX_UPLOAD_SIZE` is not a number.
    pub fn from_env() -> Result<Self> {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        let mut builder = Self::builder().base_url(var(ENV_URL).ok_or_else(|| {
            Error::ConfigurationError(format!("{} is not set", ENV_URL))
        })?);

        if let Some(key) = var(ENV_API_KEY) {
            builder = builder.api_key(key);
        }
        if let (Some(username), Some(password)) = (var(ENV_USERNAME), var(ENV_PASSWORD)) {
            builder = builder.basic_auth(username, password);
        }
        if let Some(login) = var(ENV_IMPERSONATE) {
            builder = builder.impersonate_user(login);
        }
        if let Some(size) = var(ENV_MAX_UPLOAD_SIZE) {
            let size = size.parse::<usize>().map_err(|e| {
                Error::ConfigurationError(format!("{} is invalid: {}", ENV_MAX_UPLOAD_SIZE, e))
            })?;
            builder = builder.max_upload_size(size);
        }

        builder.build()
    }

    /// The base address, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The API key, if configured.
    pub fn api_key(&self) -> Option<&SecretString> {
        self.api_key.as_ref()
    }

    /// The basic-auth username, if configured.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// The basic-auth password, if configured.
    pub fn password(&self) -> Option<&SecretString> {
        self.password.as_ref()
    }

    /// The login to act as, if configured.
    pub fn impersonate_user(&self) -> Option<&str> {
        self.impersonate_user.as_deref()
    }

    /// The body-size ceiling in bytes.
    pub fn max_upload_size(&self) -> usize {
        self.max_upload_size
    }

    /// The transport timeout, if configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    api_key: Option<SecretString>,
    username: Option<String>,
    password: Option<SecretString>,
    impersonate_user: Option<String>,
    max_upload_size: Option<usize>,
    timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base address of the Redmine instance.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Authenticates with an API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(key.into()));
        self
    }

    /// Authenticates with HTTP basic credentials.
    ///
    /// Ignored when an API key is also set.
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(SecretString::new(password.into()));
        self
    }

    /// Acts on behalf of another login (requires an admin credential).
    pub fn impersonate_user(mut self, login: impl Into<String>) -> Self {
        self.impersonate_user = Some(login.into());
        self
    }

    /// Sets the body-size ceiling in bytes.
    pub fn max_upload_size(mut self, bytes: usize) -> Self {
        self.max_upload_size = Some(bytes);
        self
    }

    /// Sets a transport-level timeout for each request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base address is missing, empty, not a valid URL,
    /// or not an `http`/`https` address.
    pub fn build(self) -> Result<ClientConfig> {
        let base_url = self
            .base_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| Error::ConfigurationError("Base URL is required".to_string()))?;

        let parsed = Url::parse(&base_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::ConfigurationError(format!(
                "Base URL must use http or https, got scheme '{}'",
                parsed.scheme()
            )));
        }

        Ok(ClientConfig {
            base_url,
            api_key: self.api_key,
            username: self.username,
            password: self.password,
            impersonate_user: self.impersonate_user,
            max_upload_size: self.max_upload_size.unwrap_or(DEFAULT_MAX_UPLOAD_SIZE),
            timeout: self.timeout,
        })
    }
}

/// Deserialization shape; validated through the builder.
#[derive(Deserialize)]
struct RawConfig {
    base_url: String,
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    impersonate_user: Option<String>,
    #[serde(default)]
    max_upload_size: Option<usize>,
    #[serde(default)]
    timeout_secs: Option<u64>,
}

impl TryFrom<RawConfig> for ClientConfig {
    type Error = Error;

    fn try_from(raw: RawConfig) -> Result<Self> {
        let builder = ClientConfigBuilder {
            base_url: Some(raw.base_url),
            api_key: raw.api_key.map(SecretString::new),
            username: raw.username,
            password: raw.password.map(SecretString::new),
            impersonate_user: raw.impersonate_user,
            max_upload_size: raw.max_upload_size,
            timeout: raw.timeout_secs.map(Duration::from_secs),
        };
        builder.build()
    }
}
