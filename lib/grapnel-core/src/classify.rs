//! Response classification.
//!
//! A completed response is classified from its status code and body bytes
//! before any payload decoding happens. Two policies exist:
//!
//! - [`classify`]: the full policy used by the interceptor pipeline.
//!   3xx/4xx is a client error (with a structured body when one parses),
//!   5xx a server error.
//! - [`classify_bypass`]: the policy used by the raw pipeline. 4xx/5xx is
//!   uniformly a client error and the body is never inspected.
//!
//! Both treat an empty body as [`Classification::Unknown`], whatever the
//! status says.

use crate::{ApiErrorBody, Error, RawResponse, Result};

/// Verdict of classifying a completed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The response may proceed to payload decoding.
    Success,
    /// Empty body: nothing to classify or decode.
    Unknown,
    /// Client error.
    Client {
        /// HTTP status code.
        status: u16,
        /// Structured error body, when the response body matches
        /// [`ApiErrorBody`].
        body: Option<ApiErrorBody>,
    },
    /// Server error.
    Server {
        /// HTTP status code.
        status: u16,
    },
}

impl Classification {
    /// Returns `true` for the [`Classification::Success`] verdict.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Map the verdict onto the response it was derived from.
    ///
    /// # Errors
    ///
    /// Returns the error corresponding to a non-success verdict.
    pub fn into_result(self, raw: RawResponse) -> Result<RawResponse> {
        match self {
            Self::Success => Ok(raw),
            Self::Unknown => Err(Error::Unknown),
            Self::Client { status, body } => Err(Error::ClientError { status, body }),
            Self::Server { status } => Err(Error::ServerError { status }),
        }
    }
}

/// Classify a completed response under the full pipeline policy.
///
/// Redirections count as client errors here: the pipeline never follows
/// them, so a 3xx is a call that failed to land, not a success. Statuses
/// outside 300..600 (including 2xx and informational codes) proceed to
/// decoding.
#[must_use]
pub fn classify(status: u16, body: &[u8]) -> Classification {
    if body.is_empty() {
        return Classification::Unknown;
    }
    match status {
        300..500 => Classification::Client {
            status,
            body: serde_json::from_slice(body).ok(),
        },
        500..600 => Classification::Server { status },
        _ => Classification::Success,
    }
}

/// Classify a completed response under the raw pipeline policy.
///
/// Every 4xx/5xx is a client error without a body, keeping the bypass
/// path free of decoding work.
#[must_use]
pub fn classify_bypass(status: u16, body: &[u8]) -> Classification {
    if body.is_empty() {
        return Classification::Unknown;
    }
    match status {
        400..600 => Classification::Client { status, body: None },
        _ => Classification::Success,
    }
}
