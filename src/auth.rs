//! Authentication resolution.
//!
//! Redmine accepts either an API key header or HTTP basic credentials, and
//! lets an administrator act as another user through a separate header. The
//! resolver picks exactly one credential mechanism from a [`ClientConfig`] and
//! layers impersonation on top of it. It never validates credentials; a wrong
//! key is reported by the server at request time.

use crate::config::ClientConfig;
use crate::{Error, Result};
use http::{HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-Redmine-API-Key";

/// Header carrying the impersonated login.
pub const SWITCH_USER_HEADER: &str = "X-Redmine-Switch-User";

/// The credential mechanism selected for a client.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Send the key in the [`API_KEY_HEADER`] header.
    ApiKey(SecretString),
    /// Send HTTP basic credentials.
    Basic {
        /// The login.
        username: String,
        /// The password.
        password: SecretString,
    },
    /// Anonymous access.
    None,
}

impl Credentials {
    /// Short name of the mechanism, safe to log.
    pub fn mode(&self) -> &'static str {
        match self {
            Credentials::ApiKey(_) => "api_key",
            Credentials::Basic { .. } => "basic",
            Credentials::None => "none",
        }
    }
}

/// Resolved authentication: one credential mechanism plus optional impersonation.
#[derive(Debug, Clone)]
pub struct Auth {
    credentials: Credentials,
    impersonate_user: Option<String>,
}

impl Auth {
    /// Selects the authentication for `config`.
    ///
    /// A non-empty API key takes precedence; otherwise a complete, non-empty
    /// username/password pair is used; otherwise the client is anonymous.
    /// There is no fallback between mechanisms.
    ///
    /// # Examples
    ///
    /// ```
    /// use redmine_client::auth::{Auth, Credentials};
    /// use redmine_client::ClientConfig;
    ///
    /// let config = ClientConfig::builder()
    ///     .base_url("https://redmine.example.com")
    ///     .api_key("K")
    ///     .basic_auth("u", "p")
    ///     .build()
    ///     .unwrap();
    ///
    /// let auth = Auth::resolve(&config);
    /// assert!(matches!(auth.credentials(), Credentials::ApiKey(_)));
    /// ```
    pub fn resolve(config: &ClientConfig) -> Self {
        let present = |v: Option<&str>| v.filter(|s| !s.is_empty()).map(str::to_string);
        let secret = |v: Option<&SecretString>| {
            v.filter(|s| !s.expose_secret().is_empty()).cloned()
        };

        let credentials = match (
            secret(config.api_key()),
            present(config.username()),
            secret(config.password()),
        ) {
            (Some(key), _, _) => Credentials::ApiKey(key),
            (None, Some(username), Some(password)) => Credentials::Basic { username, password },
            _ => Credentials::None,
        };

        Self {
            credentials,
            impersonate_user: present(config.impersonate_user()),
        }
    }

    /// The selected credential mechanism.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The login being impersonated, if any.
    pub fn impersonate_user(&self) -> Option<&str> {
        self.impersonate_user.as_deref()
    }

    /// Headers to attach to every request.
    ///
    /// Contains the API key header in API-key mode and the switch-user header
    /// when impersonating. Basic credentials are not a header here; they are
    /// attached per request by the transport.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be used as a header value.
    pub fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        if let Credentials::ApiKey(key) = &self.credentials {
            let mut value = header_value(key.expose_secret(), API_KEY_HEADER)?;
            value.set_sensitive(true);
            headers.insert(HeaderName::from_static("x-redmine-api-key"), value);
        }

        if let Some(login) = &self.impersonate_user {
            headers.insert(
                HeaderName::from_static("x-redmine-switch-user"),
                header_value(login, SWITCH_USER_HEADER)?,
            );
        }

        Ok(headers)
    }
}

fn header_value(value: &str, name: &str) -> Result<HeaderValue> {
    HeaderValue::try_from(value)
        .map_err(|e| Error::ConfigurationError(format!("Invalid value for {}: {}", name, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> crate::config::ClientConfigBuilder {
        ClientConfig::builder().base_url("https://redmine.example.com")
    }

    #[test]
    fn test_api_key_wins_over_basic() {
        let auth = Auth::resolve(&config().api_key("K").basic_auth("u", "p").build().unwrap());
        match auth.credentials() {
            Credentials::ApiKey(key) => assert_eq!(key.expose_secret(), "K"),
            other => panic!("Expected ApiKey, got {:?}", other),
        }

        let headers = auth.headers().unwrap();
        assert_eq!(headers.get(API_KEY_HEADER).unwrap(), "K");
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_basic_without_api_key() {
        let auth = Auth::resolve(&config().basic_auth("u", "p").build().unwrap());
        match auth.credentials() {
            Credentials::Basic { username, password } => {
                assert_eq!(username, "u");
                assert_eq!(password.expose_secret(), "p");
            }
            other => panic!("Expected Basic, got {:?}", other),
        }
        assert!(auth.headers().unwrap().is_empty());
    }

    #[test]
    fn test_no_credentials() {
        let auth = Auth::resolve(&config().build().unwrap());
        assert!(matches!(auth.credentials(), Credentials::None));
        assert_eq!(auth.credentials().mode(), "none");
    }

    #[test]
    fn test_empty_values_do_not_count() {
        let auth = Auth::resolve(&config().api_key("").basic_auth("u", "").build().unwrap());
        assert!(matches!(auth.credentials(), Credentials::None));

        let auth = Auth::resolve(&config().api_key("").basic_auth("u", "p").build().unwrap());
        assert_eq!(auth.credentials().mode(), "basic");
    }

    #[test]
    fn test_impersonation_layers_on_api_key() {
        let auth = Auth::resolve(&config().api_key("K").impersonate_user("bob").build().unwrap());
        let headers = auth.headers().unwrap();

        assert_eq!(headers.get(API_KEY_HEADER).unwrap(), "K");
        assert_eq!(headers.get(SWITCH_USER_HEADER).unwrap(), "bob");
    }

    #[test]
    fn test_impersonation_layers_on_basic() {
        let auth = Auth::resolve(
            &config()
                .basic_auth("admin", "pw")
                .impersonate_user("bob")
                .build()
                .unwrap(),
        );

        assert_eq!(auth.credentials().mode(), "basic");
        assert_eq!(auth.impersonate_user(), Some("bob"));
        assert_eq!(auth.headers().unwrap().get(SWITCH_USER_HEADER).unwrap(), "bob");
    }

    #[test]
    fn test_debug_does_not_expose_secrets() {
        let auth = Auth::resolve(&config().api_key("secret_key").build().unwrap());
        assert!(!format!("{:?}", auth).contains("secret_key"));

        let auth = Auth::resolve(&config().basic_auth("u", "secret_pw").build().unwrap());
        assert!(!format!("{:?}", auth).contains("secret_pw"));
    }

    #[test]
    fn test_invalid_header_value() {
        let auth = Auth::resolve(&config().api_key("bad\nkey").build().unwrap());
        assert!(matches!(auth.headers(), Err(Error::ConfigurationError(_))));
    }
}
