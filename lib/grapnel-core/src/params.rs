//! Request parameters.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Result;

/// Request parameters, sent as a JSON object body.
///
/// Each value is a [`serde_json::Value`], so a parameter may be a string,
/// number, boolean, null, array, or nested object. Requests carrying
/// parameters have their `Content-Type` forced to
/// [`Params::CONTENT_TYPE`].
///
/// # Example
///
/// ```
/// use grapnel_core::Params;
/// use serde_json::json;
///
/// let params = Params::new()
///     .with("name", "Alice")
///     .with("age", 30)
///     .with("tags", json!(["admin", "staff"]));
///
/// assert_eq!(params.len(), 3);
/// assert_eq!(params.get("name"), Some(&json!("Alice")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(Map<String, Value>);

impl Params {
    /// MIME type of the encoded parameters.
    pub const CONTENT_TYPE: &'static str = "application/json";

    /// Create an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Add a parameter, consuming and returning the set.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Insert a parameter, replacing any existing value under the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Get a parameter value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns `true` if no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the parameters in insertion-independent key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Encode the parameters as a JSON object body.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn to_bytes(&self) -> Result<Bytes> {
        crate::to_json(&self.0)
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Params {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}
