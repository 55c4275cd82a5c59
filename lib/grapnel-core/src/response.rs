//! Response types.
//!
//! [`RawResponse`] is what the transport produced: status, headers, and
//! body bytes, never mutated afterwards. [`TypedResponse`] pairs a decoded
//! payload with the raw response it was decoded from, so callers keep
//! access to status and headers alongside the data.

use std::collections::HashMap;

use bytes::Bytes;

// ============================================================================
// Raw Response
// ============================================================================

/// A completed HTTP exchange as the transport saw it.
#[derive(Debug, Clone)]
pub struct RawResponse {
    status: u16,
    headers: HashMap<String, String>,
    body: Bytes,
}

impl RawResponse {
    /// Creates a new raw response.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, String>, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Status code of the exchange.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// All response headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Look up one header value.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Response body bytes.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns `true` if the body holds no bytes.
    #[must_use]
    pub fn body_is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Consume into the body bytes.
    #[must_use]
    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// Split into status, headers, and body.
    #[must_use]
    pub fn into_parts(self) -> (u16, HashMap<String, String>, Bytes) {
        (self.status, self.headers, self.body)
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Status is 3xx.
    #[must_use]
    pub const fn is_redirection(&self) -> bool {
        self.status >= 300 && self.status < 400
    }

    /// Status is 4xx.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Status is 5xx.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }

    /// View the body as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns the conversion error when the body is not valid UTF-8.
    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }
}

// ============================================================================
// Typed Response
// ============================================================================

/// A decoded payload together with the raw response it came from.
#[derive(Debug, Clone)]
pub struct TypedResponse<T> {
    data: T,
    raw: RawResponse,
}

impl<T> TypedResponse<T> {
    /// Pair an already-decoded payload with its raw response.
    #[must_use]
    pub fn new(data: T, raw: RawResponse) -> Self {
        Self { data, raw }
    }

    /// Decoded payload.
    #[must_use]
    pub const fn data(&self) -> &T {
        &self.data
    }

    /// The raw response the payload was decoded from.
    #[must_use]
    pub const fn raw(&self) -> &RawResponse {
        &self.raw
    }

    /// Status code of the underlying exchange.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.raw.status()
    }

    /// Consume into the decoded payload.
    #[must_use]
    pub fn into_data(self) -> T {
        self.data
    }

    /// Consume into (payload, raw response).
    #[must_use]
    pub fn into_parts(self) -> (T, RawResponse) {
        (self.data, self.raw)
    }
}

impl<T: serde::de::DeserializeOwned> TypedResponse<T> {
    /// Decode the raw response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails, with the JSON path to the
    /// failing field.
    pub fn from_raw(raw: RawResponse) -> crate::Result<Self> {
        let data = crate::from_json(raw.body())?;
        Ok(Self { data, raw })
    }
}
