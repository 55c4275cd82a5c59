//! Error types for grapnel.

use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};

// ============================================================================
// Structured Error Body
// ============================================================================

/// Structured error payload carried by client error responses.
///
/// Servers commonly answer 4xx with a small JSON document naming the
/// failure. When a client error body matches this shape it is decoded and
/// attached to [`Error::ClientError`]; when it does not, the error carries
/// no body (never a decode failure).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g. `"expired"`).
    pub error: String,
    /// Optional human-readable detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// Create a structured error body from an error code.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
        }
    }

    /// Attach a human-readable detail message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

// ============================================================================
// Error Type
// ============================================================================

/// Main error type for grapnel operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// The response completed but cannot be classified (empty body).
    #[display("unknown response")]
    #[from(skip)]
    Unknown,

    /// Client error response (3xx or 4xx status).
    #[display("client error {status}")]
    #[from(skip)]
    ClientError {
        /// Status code of the response.
        status: u16,
        /// Structured error body, when the response body matches
        /// [`ApiErrorBody`].
        #[error(not(source))]
        body: Option<ApiErrorBody>,
    },

    /// Server error response (5xx status).
    #[display("server error {status}")]
    #[from(skip)]
    ServerError {
        /// Status code of the response.
        status: u16,
    },

    /// The connection failed before or during the exchange.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS negotiation or certificate validation failed.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// The request deadline elapsed before a response arrived.
    #[display("request timed out")]
    #[from(skip)]
    Timeout,

    /// The request could not be built.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// A request body failed to serialize.
    #[display("encode error: {_0}")]
    #[from]
    Encode(serde_json::Error),

    /// A response body failed to deserialize.
    #[display("decode error at '{path}': {message}")]
    #[from(skip)]
    Decode {
        /// JSON path of the failing field (e.g. `readings[1].celsius`).
        path: String,
        /// What went wrong there.
        message: String,
    },

    /// The base or joined URL did not parse.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),
}

/// Convenience result alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a client error from a status code, without a structured body.
    #[must_use]
    pub const fn client(status: u16) -> Self {
        Self::ClientError { status, body: None }
    }

    /// Create a client error carrying a structured body.
    #[must_use]
    pub const fn client_with_body(status: u16, body: ApiErrorBody) -> Self {
        Self::ClientError {
            status,
            body: Some(body),
        }
    }

    /// Create a server error from a status code.
    #[must_use]
    pub const fn server(status: u16) -> Self {
        Self::ServerError { status }
    }

    /// Create a connection error from a transport message.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error from a handshake or certificate message.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error from a builder message.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a decode error from a JSON path and a message.
    #[must_use]
    pub fn decode(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` when the request deadline elapsed.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` for connection-level failures.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns `true` if the request never produced a response
    /// (connection, TLS, or timeout failure).
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Tls(_) | Self::Timeout)
    }

    /// Returns the HTTP status code if this error carries one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::ClientError { status, .. } | Self::ServerError { status } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` for a 3xx/4xx response error.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::ClientError { .. })
    }

    /// Returns `true` for a 5xx response error.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::ServerError { .. })
    }

    /// Returns `true` for a 404 response.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns the structured error body if this is a client error that
    /// carried one.
    #[must_use]
    pub const fn error_body(&self) -> Option<&ApiErrorBody> {
        match self {
            Self::ClientError { body, .. } => body.as_ref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_stays_terse() {
        assert_eq!(Error::client(404).to_string(), "client error 404");
        assert_eq!(Error::server(503).to_string(), "server error 503");
        assert_eq!(Error::Unknown.to_string(), "unknown response");
        assert_eq!(Error::Timeout.to_string(), "request timed out");
        assert_eq!(
            Error::connection("connection refused").to_string(),
            "connection error: connection refused"
        );
        assert_eq!(
            Error::decode("readings[1].celsius", "invalid type").to_string(),
            "decode error at 'readings[1].celsius': invalid type"
        );
    }

    #[test]
    fn status_comes_only_from_http_errors() {
        assert_eq!(Error::client(422).status(), Some(422));
        assert_eq!(Error::server(502).status(), Some(502));
        assert_eq!(Error::Timeout.status(), None);
        assert_eq!(Error::Unknown.status(), None);

        assert!(Error::client(422).is_client_error());
        assert!(!Error::client(422).is_server_error());
        assert!(Error::server(502).is_server_error());
        assert!(!Error::server(502).is_client_error());
    }

    #[test]
    fn transport_failures_never_carry_a_status() {
        for err in [
            Error::Timeout,
            Error::connection("refused"),
            Error::tls("bad certificate"),
        ] {
            assert!(err.is_transport());
            assert_eq!(err.status(), None);
        }

        assert!(!Error::Unknown.is_transport());
        assert!(!Error::client(404).is_transport());
        assert!(!Error::server(500).is_transport());
    }

    #[test]
    fn not_found_is_exactly_404() {
        assert!(Error::client(404).is_not_found());
        assert!(!Error::client(403).is_not_found());
        assert!(!Error::server(500).is_not_found());
        assert!(!Error::Timeout.is_not_found());
    }

    #[test]
    fn error_body_access() {
        let err = Error::client(404);
        assert!(err.error_body().is_none());

        let body = ApiErrorBody::new("not_found").with_message("no such item");
        let err = Error::client_with_body(404, body.clone());
        assert_eq!(err.error_body(), Some(&body));

        assert!(Error::Timeout.error_body().is_none());
    }

    #[test]
    fn api_error_body_decodes_without_message() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"error": "expired"}"#).expect("decode");
        assert_eq!(body.error, "expired");
        assert!(body.message.is_none());
    }
}
