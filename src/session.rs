//! The transport session.
//!
//! A [`Session`] binds one `reqwest::Client` to a base address, the resolved
//! authentication and a body-size ceiling. It holds no per-call state, so
//! concurrent requests share it freely. Failures are reported as a
//! [`TransportFailure`], which callers turn into an [`Error`](crate::Error)
//! with [`translate`](crate::translate).

use crate::auth::{Auth, Credentials};
use crate::config::ClientConfig;
use crate::{Error, Result};
use http::header::{HeaderValue, CONTENT_TYPE};
use http::{Method, StatusCode};
use secrecy::ExposeSecret;
use std::time::Instant;

const JSON_CONTENT_TYPE: &str = "application/json";
const OCTET_STREAM_CONTENT_TYPE: &str = "application/octet-stream";

/// Code reported when a body is larger than the configured ceiling.
pub const BODY_LIMIT_EXCEEDED: &str = "body_limit_exceeded";

/// How a call failed at the transport level.
#[derive(Debug)]
pub enum TransportFailure {
    /// No response was received.
    NoResponse {
        /// The low-level error code.
        code: String,
    },
    /// A response with a failing status was received.
    HttpFailure {
        /// The response status.
        status: StatusCode,
        /// The raw response body.
        body: String,
    },
    /// Anything else.
    Other(Box<dyn std::error::Error + Send + Sync + 'static>),
}

/// An outgoing request body.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// No body.
    None,
    /// Serialized JSON, sent with the session's JSON content type.
    Json(Vec<u8>),
    /// Raw bytes, sent as `application/octet-stream`.
    Bytes(Vec<u8>),
}

impl Body {
    fn len(&self) -> usize {
        match self {
            Body::None => 0,
            Body::Json(bytes) | Body::Bytes(bytes) => bytes.len(),
        }
    }
}

/// A transport handle bound to one client configuration.
#[derive(Debug)]
pub struct Session {
    http_client: reqwest::Client,
    base_url: String,
    max_body_size: usize,
    auth: Auth,
}

impl Session {
    /// Resolves authentication and builds the underlying HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if a credential cannot be used as a header value or
    /// the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let auth = Auth::resolve(config);

        let mut headers = auth.headers()?;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().map_err(|e| {
            Error::ConfigurationError(format!("Failed to build HTTP client: {}", e))
        })?;

        tracing::debug!(
            base_url = %config.base_url(),
            auth = auth.credentials().mode(),
            impersonating = auth.impersonate_user().is_some(),
            max_body_size = config.max_upload_size(),
            "Created Redmine session"
        );

        Ok(Self {
            http_client,
            base_url: config.base_url().to_string(),
            max_body_size: config.max_upload_size(),
            auth,
        })
    }

    /// The base address requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The body-size ceiling in bytes.
    pub fn max_body_size(&self) -> usize {
        self.max_body_size
    }

    /// The resolved authentication.
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Sends one request to `{base_url}/{endpoint}` and decodes the JSON reply.
    ///
    /// An empty success body decodes to `null`.
    pub async fn execute(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(String, String)],
        body: Body,
    ) -> std::result::Result<serde_json::Value, TransportFailure> {
        if body.len() > self.max_body_size {
            tracing::warn!(
                size = body.len(),
                max_body_size = self.max_body_size,
                endpoint = %endpoint,
                "Request body exceeds the size ceiling"
            );
            return Err(TransportFailure::NoResponse {
                code: BODY_LIMIT_EXCEEDED.to_string(),
            });
        }

        let url = format!("{}/{}", self.base_url, endpoint);

        tracing::debug!(method = %method, url = %url, "Executing HTTP request");

        let mut request = self.http_client.request(method, url.as_str());

        if !query.is_empty() {
            request = request.query(query);
        }

        if let Credentials::Basic { username, password } = self.auth.credentials() {
            request = request.basic_auth(username, Some(password.expose_secret()));
        }

        request = match body {
            Body::None => request,
            Body::Json(bytes) => request.body(bytes),
            Body::Bytes(bytes) => request
                .header(CONTENT_TYPE, OCTET_STREAM_CONTENT_TYPE)
                .body(bytes),
        };

        let start_time = Instant::now();
        let response = request.send().await.map_err(failure_from_send)?;
        let status = response.status();

        tracing::info!(
            status = status.as_u16(),
            latency_ms = start_time.elapsed().as_millis(),
            "Received HTTP response"
        );

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportFailure::HttpFailure { status, body });
        }

        let raw_body = response
            .bytes()
            .await
            .map_err(|e| TransportFailure::Other(Box::new(e)))?;

        if raw_body.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::Value::Null);
        }

        serde_json::from_slice(&raw_body).map_err(|e| {
            tracing::error!(error = %e, "Failed to decode response body");
            TransportFailure::Other(Box::new(e))
        })
    }
}

/// Classifies an error returned before any response arrived.
fn failure_from_send(err: reqwest::Error) -> TransportFailure {
    if err.is_builder() {
        return TransportFailure::Other(Box::new(err));
    }

    TransportFailure::NoResponse {
        code: error_code(&err),
    }
}

/// The most specific code available: the I/O error kind if one is in the
/// source chain, otherwise the reqwest error category.
fn error_code(err: &reqwest::Error) -> String {
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            return format!("{:?}", io.kind());
        }
        source = cause.source();
    }

    let category = if err.is_timeout() {
        "timeout"
    } else if err.is_connect() {
        "connect"
    } else if err.is_redirect() {
        "redirect"
    } else {
        "request"
    };
    category.to_string()
}
