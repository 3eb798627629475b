//! Query parameter values and array flattening.
//!
//! Redmine expects multi-valued filters as a single comma-separated value
//! (`status_id=1,2,3`), so every sequence found in GET parameters is joined
//! before the parameters are encoded into the query string. JSON bodies are
//! never flattened.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A parameter mapping, keyed by field name.
pub type ParamMap = BTreeMap<String, ParamValue>;

/// A structured parameter value.
///
/// This is the closed set of shapes parameters can take. Typed parameter
/// structs are converted into it through `serde_json::Value`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// An absent value. Omitted from query strings.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number, kept in its JSON representation.
    Number(serde_json::Number),
    /// A string.
    String(String),
    /// An ordered sequence of values.
    Seq(Vec<ParamValue>),
    /// A nested mapping.
    Map(ParamMap),
}

impl ParamValue {
    /// Builds a parameter value from any serializable type.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented as JSON.
    pub fn from_serialize<T>(value: &T) -> crate::Result<Self>
    where
        T: Serialize + ?Sized,
    {
        serde_json::to_value(value)
            .map(Self::from)
            .map_err(|e| crate::Error::SerializationFailed(e.to_string()))
    }

    /// Returns a copy where every sequence, at any depth, is joined into a
    /// comma-separated string.
    ///
    /// Mappings are normalized recursively and scalars are returned unchanged.
    /// The result is a fixed point: normalizing it again changes nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use redmine_client::params::ParamValue;
    /// use serde_json::json;
    ///
    /// let params = ParamValue::from(json!({ "status_id": [1, 2, 3], "limit": 5 }));
    /// let normalized = params.normalize();
    ///
    /// assert_eq!(normalized, ParamValue::from(json!({ "status_id": "1,2,3", "limit": 5 })));
    /// ```
    pub fn normalize(&self) -> ParamValue {
        match self {
            ParamValue::Map(map) => ParamValue::Map(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.normalize()))
                    .collect(),
            ),
            ParamValue::Seq(items) => ParamValue::String(join(items)),
            scalar => scalar.clone(),
        }
    }

    /// Encodes this value as query-string pairs.
    ///
    /// Only mappings produce pairs. Nested mappings use bracket keys
    /// (`parent[child]`), `null` entries are skipped, and any sequence still
    /// present is joined the same way [`normalize`](Self::normalize) would.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let ParamValue::Map(map) = self {
            for (key, value) in map {
                push_pairs(&mut pairs, key.clone(), value);
            }
        }
        pairs
    }

    /// Returns `true` for the `Null` variant.
    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }
}

fn push_pairs(pairs: &mut Vec<(String, String)>, key: String, value: &ParamValue) {
    match value {
        ParamValue::Null => {}
        ParamValue::Map(map) => {
            for (child, value) in map {
                push_pairs(pairs, format!("{}[{}]", key, child), value);
            }
        }
        other => pairs.push((key, other.to_string())),
    }
}

fn join(items: &[ParamValue]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// The plain text form used inside query strings and joined sequences.
impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Null => Ok(()),
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Number(n) => write!(f, "{}", n),
            ParamValue::String(s) => f.write_str(s),
            ParamValue::Seq(items) => f.write_str(&join(items)),
            ParamValue::Map(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl From<serde_json::Value> for ParamValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ParamValue::Null,
            serde_json::Value::Bool(b) => ParamValue::Bool(b),
            serde_json::Value::Number(n) => ParamValue::Number(n),
            serde_json::Value::String(s) => ParamValue::String(s),
            serde_json::Value::Array(items) => {
                ParamValue::Seq(items.into_iter().map(ParamValue::from).collect())
            }
            serde_json::Value::Object(map) => ParamValue::Map(
                map.into_iter()
                    .map(|(key, value)| (key, ParamValue::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Number(value.into())
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        ParamValue::Number(value.into())
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(items: Vec<T>) -> Self {
        ParamValue::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl From<ParamMap> for ParamValue {
    fn from(map: ParamMap) -> Self {
        ParamValue::Map(map)
    }
}
