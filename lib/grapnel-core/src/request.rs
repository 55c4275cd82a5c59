//! Request descriptors and wire requests.
//!
//! A [`RequestPlan`] names what to call: a path relative to the client's
//! base URL, a method, optional JSON parameters, and headers. The pipeline
//! resolves it into a [`WireRequest`] (absolute URL, encoded body), which
//! pre-send hooks may amend before dispatch.
//!
//! # Example
//!
//! ```
//! use grapnel_core::{Method, Params, RequestPlan};
//!
//! let plan = RequestPlan::post("/users")
//!     .with_params(Params::new().with("name", "Alice"))
//!     .with_header("Accept", "application/json");
//!
//! assert_eq!(plan.method(), Method::Post);
//! assert_eq!(plan.path(), "/users");
//! ```

use std::collections::HashMap;

use bytes::Bytes;

use crate::{Method, Params};

// ============================================================================
// Request Plan
// ============================================================================

/// A request descriptor: everything needed to issue (or reissue) a call.
///
/// Plans are inert data. Dispatching one never mutates it, so a recovery
/// hook can reissue the plan it was handed, or derive an amended copy
/// (e.g. with a refreshed `Authorization` header), without affecting the
/// original.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestPlan {
    path: String,
    method: Method,
    params: Option<Params>,
    headers: HashMap<String, String>,
}

impl RequestPlan {
    /// Create a plan for the given method and path.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            params: None,
            headers: HashMap::new(),
        }
    }

    /// Create a GET plan.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Create a POST plan.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// Create a PUT plan.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    /// Create a DELETE plan.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Create a PATCH plan.
    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    /// Attach JSON parameters, replacing any previously set.
    #[must_use]
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = Some(params);
        self
    }

    /// Set a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set multiple headers.
    #[must_use]
    pub fn with_headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Path relative to the client's base URL.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// JSON parameters, if any.
    #[must_use]
    pub const fn params(&self) -> Option<&Params> {
        self.params.as_ref()
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Look up one header value.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

// ============================================================================
// Wire Request
// ============================================================================

/// The transport-ready form of a [`RequestPlan`].
///
/// Method and URL are fixed at construction; headers and body stay open so
/// pre-send hooks can amend them. Once handed to a transport the request
/// is consumed and no further mutation is possible.
#[derive(Debug, Clone)]
pub struct WireRequest {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<Bytes>,
}

impl WireRequest {
    /// Create a wire request for the given method and absolute URL.
    #[must_use]
    pub fn new(method: Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Absolute request URL.
    #[must_use]
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Mutable view of the headers.
    #[must_use]
    pub fn headers_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.headers
    }

    /// Look up one header value.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Set a header, replacing any existing value under the same name.
    pub fn insert_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    /// Remove a header by name.
    pub fn remove_header(&mut self, name: &str) -> Option<String> {
        self.headers.remove(name)
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Set the request body.
    pub fn set_body(&mut self, body: Bytes) {
        self.body = Some(body);
    }

    /// Split into method, URL, headers, and body.
    #[must_use]
    pub fn into_parts(self) -> (Method, url::Url, HashMap<String, String>, Option<Bytes>) {
        (self.method, self.url, self.headers, self.body)
    }
}
