//! Error types for Redmine API calls.
//!
//! Every failed dispatch reaches the caller as exactly one [`Error`]. Transport
//! failures are classified by [`translate`] into a connection failure, a
//! validation failure carrying the server's reasons, or a plain HTTP status
//! failure. Failures the translator does not recognize are passed through
//! untouched as [`Error::Unclassified`].

use crate::session::TransportFailure;
use http::StatusCode;

/// The main error type for Redmine API calls.
///
/// # Examples
///
/// ```no_run
/// use redmine_client::{Client, ClientConfig, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::new(
///     ClientConfig::builder()
///         .base_url("https://redmine.example.com")
///         .api_key("secret")
///         .build()?,
/// );
///
/// match client.issues().get(42, &Default::default()).await {
///     Ok(issue) => println!("{}", issue["issue"]["subject"]),
///     Err(Error::Validation { messages, .. }) => {
///         for message in messages {
///             eprintln!("rejected: {}", message);
///         }
///     }
///     Err(Error::Connection { base_url, code }) => {
///         eprintln!("{} unreachable ({})", base_url, code);
///     }
///     Err(e) => eprintln!("request failed: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// No response was ever received (refused connection, DNS failure, timeout,
    /// or a body that was refused before being sent).
    #[error("Failed to connect to {base_url}: {code}")]
    Connection {
        /// The configured base address the request targeted
        base_url: String,
        /// The low-level error code reported by the transport
        code: String,
    },

    /// The server rejected the request content and listed its reasons.
    ///
    /// The display form is the reasons joined with `", "`.
    #[error("{}", .messages.join(", "))]
    Validation {
        /// Human-readable reasons, in server order
        messages: Vec<String>,
        /// The HTTP status code of the rejection
        status: StatusCode,
    },

    /// The server answered with a failing status and no structured reasons.
    #[error("HTTP {} {status_text} ({path})", .status.as_u16())]
    HttpStatus {
        /// The HTTP status code
        status: StatusCode,
        /// The canonical reason phrase for the status
        status_text: String,
        /// The endpoint path that was called
        path: String,
    },

    /// A failure shape the translator does not recognize, passed through as is.
    #[error(transparent)]
    Unclassified(Box<dyn std::error::Error + Send + Sync + 'static>),

    /// Invalid configuration was provided.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The configured base address could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Failed to serialize request parameters or body.
    #[error("Failed to serialize request: {0}")]
    SerializationFailed(String),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No response was received.
    Connection,
    /// The server listed validation reasons.
    Validation,
    /// The server responded with a failing status.
    HttpStatus,
    /// An unrecognized failure passed through.
    Unclassified,
    /// The request could not be built from the given configuration or payload.
    Configuration,
}

impl Error {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Connection { .. } => ErrorKind::Connection,
            Error::Validation { .. } => ErrorKind::Validation,
            Error::HttpStatus { .. } => ErrorKind::HttpStatus,
            Error::Unclassified(_) => ErrorKind::Unclassified,
            Error::ConfigurationError(_)
            | Error::InvalidUrl(_)
            | Error::SerializationFailed(_) => ErrorKind::Configuration,
        }
    }

    /// Returns the HTTP status code if a response was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Validation { status, .. } => Some(*status),
            Error::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the validation reasons, or an empty slice for other errors.
    pub fn messages(&self) -> &[String] {
        match self {
            Error::Validation { messages, .. } => messages,
            _ => &[],
        }
    }
}

/// Converts a transport failure into the error raised to the caller.
///
/// Classification order, first match wins:
///
/// 1. no response was received: [`Error::Connection`] naming `base_url` and the code
/// 2. the response body carries an `errors` list: [`Error::Validation`]
/// 3. any other failing response: [`Error::HttpStatus`] naming `path`
/// 4. anything else: [`Error::Unclassified`] wrapping the original failure
pub fn translate(failure: TransportFailure, base_url: &str, path: &str) -> Error {
    match failure {
        TransportFailure::NoResponse { code } => Error::Connection {
            base_url: base_url.to_string(),
            code,
        },
        TransportFailure::HttpFailure { status, body } => match validation_messages(&body) {
            Some(messages) => Error::Validation { messages, status },
            None => Error::HttpStatus {
                status,
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                path: path.to_string(),
            },
        },
        TransportFailure::Other(source) => Error::Unclassified(source),
    }
}

/// Extracts `{"errors": [...]}` from a response body.
///
/// Returns `None` unless the body is JSON with a non-empty `errors` array.
fn validation_messages(body: &str) -> Option<Vec<String>> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let errors = value.get("errors")?.as_array()?;
    if errors.is_empty() {
        return None;
    }

    Some(
        errors
            .iter()
            .map(|e| match e {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
    )
}

/// A specialized `Result` type for Redmine API calls.
pub type Result<T> = std::result::Result<T, Error>;
