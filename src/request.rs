//! Request descriptors.
//!
//! A [`RequestDescriptor`] names one call: the verb, the resource path
//! (no leading slash, no `.json` suffix) and the payload. The descriptor
//! decides how the payload is encoded through [`RequestMode`].

use crate::params::ParamValue;
use http::Method;

/// The one resource path that carries raw bytes instead of JSON.
pub const UPLOADS_PATH: &str = "uploads";

/// The payload of a request.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// No parameters and no body.
    Empty,
    /// Structured parameters: the query string for GET, the JSON body otherwise.
    Structured(serde_json::Value),
    /// Raw bytes for the uploads endpoint.
    Raw(Vec<u8>),
}

/// How a request's payload is put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    /// Normalized parameters in the query string, no body.
    Query,
    /// Parameters as an untransformed JSON body.
    Json,
    /// Raw bytes sent as `application/octet-stream`.
    Upload,
}

/// A single call against the API.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    /// The HTTP method.
    pub method: Method,

    /// The resource path, relative to the base address.
    pub path: String,

    /// The request payload.
    pub payload: Payload,
}

impl RequestDescriptor {
    /// Creates a descriptor with an empty payload.
    ///
    /// Leading slashes on `path` are stripped. The path is otherwise kept as
    /// given; the `.json` suffix is always appended by [`endpoint`](Self::endpoint).
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let path = path.into().trim_start_matches('/').to_string();

        Self {
            method,
            path,
            payload: Payload::Empty,
        }
    }

    /// Sets structured parameters.
    pub fn with_params(mut self, params: serde_json::Value) -> Self {
        self.payload = Payload::Structured(params);
        self
    }

    /// Sets a raw byte payload.
    pub fn with_bytes(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.payload = Payload::Raw(bytes.into());
        self
    }

    /// The endpoint actually invoked, relative to the base address.
    pub fn endpoint(&self) -> String {
        format!("{}.json", self.path)
    }

    /// The encoding for this request.
    ///
    /// The uploads path always uploads, whatever the verb.
    pub fn mode(&self) -> RequestMode {
        if self.path == UPLOADS_PATH {
            RequestMode::Upload
        } else if self.method == Method::GET {
            RequestMode::Query
        } else {
            RequestMode::Json
        }
    }

    /// The normalized query parameters for a GET request.
    ///
    /// By convention GET payloads may wrap their parameters in a single
    /// `params` key; the wrapper is removed before normalization.
    pub fn query_params(&self) -> ParamValue {
        match &self.payload {
            Payload::Structured(value) => {
                let params = match value.as_object() {
                    Some(map) if map.len() == 1 && map.contains_key("params") => &map["params"],
                    _ => value,
                };
                ParamValue::from(params.clone()).normalize()
            }
            _ => ParamValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_leading_slash_is_stripped() {
        let descriptor = RequestDescriptor::new(Method::GET, "/issues");
        assert_eq!(descriptor.path, "issues");
        assert_eq!(descriptor.endpoint(), "issues.json");
    }

    #[test]
    fn test_json_suffix_is_part_of_the_path() {
        let descriptor = RequestDescriptor::new(Method::GET, "projects/docs/wiki/schema.json");
        assert_eq!(descriptor.path, "projects/docs/wiki/schema.json");
        assert_eq!(descriptor.endpoint(), "projects/docs/wiki/schema.json.json");
    }

    #[test]
    fn test_modes() {
        assert_eq!(RequestDescriptor::new(Method::GET, "issues").mode(), RequestMode::Query);
        assert_eq!(RequestDescriptor::new(Method::POST, "issues").mode(), RequestMode::Json);
        assert_eq!(RequestDescriptor::new(Method::PUT, "issues/1").mode(), RequestMode::Json);
        assert_eq!(RequestDescriptor::new(Method::DELETE, "issues/1").mode(), RequestMode::Json);
        assert_eq!(RequestDescriptor::new(Method::POST, "uploads").mode(), RequestMode::Upload);
        assert_eq!(RequestDescriptor::new(Method::GET, "uploads").mode(), RequestMode::Upload);
    }

    #[test]
    fn test_params_envelope_is_unwrapped() {
        let descriptor = RequestDescriptor::new(Method::GET, "issues")
            .with_params(json!({ "params": { "limit": 5, "status_id": [1, 2] } }));

        assert_eq!(
            descriptor.query_params(),
            ParamValue::from(json!({ "limit": 5, "status_id": "1,2" }))
        );
    }

    #[test]
    fn test_bare_params_are_used_as_is() {
        let descriptor =
            RequestDescriptor::new(Method::GET, "issues").with_params(json!({ "limit": 5 }));
        assert_eq!(descriptor.query_params(), ParamValue::from(json!({ "limit": 5 })));
    }

    #[test]
    fn test_non_structured_payload_has_no_query() {
        assert!(RequestDescriptor::new(Method::GET, "issues").query_params().is_null());
    }
}
