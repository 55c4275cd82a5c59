//! Logging interceptor for request and response tracing.

use tracing::{debug, error, info, warn};

use crate::interceptor::Interceptor;
use crate::{RawResponse, RequestPlan, WireRequest};

/// Log level for the lines emitted by [`LoggingInterceptor`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Log requests and successful responses at DEBUG.
    Debug,
    /// Log requests and successful responses at INFO.
    #[default]
    Info,
}

/// Interceptor that logs every request and response on the full pipeline.
///
/// Error responses keep their own severity regardless of the configured
/// level: client errors log at WARN, server errors at ERROR.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingInterceptor {
    level: LogLevel,
}

impl LoggingInterceptor {
    /// Create a logging interceptor at the default INFO level.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a logging interceptor that logs at DEBUG.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
        }
    }
}

impl Interceptor for LoggingInterceptor {
    fn name(&self) -> &str {
        "logging"
    }

    fn on_request(&self, request: &mut WireRequest) {
        let method = request.method();
        let url = request.url();
        match self.level {
            LogLevel::Debug => debug!(%method, %url, "sending request"),
            LogLevel::Info => info!(%method, %url, "sending request"),
        }
    }

    fn on_response(&self, plan: &RequestPlan, response: &RawResponse) {
        let status = response.status();
        let path = plan.path();
        if response.is_server_error() {
            error!(status, path, "server error response");
        } else if response.is_client_error() {
            warn!(status, path, "client error response");
        } else {
            match self.level {
                LogLevel::Debug => debug!(status, path, "received response"),
                LogLevel::Info => info!(status, path, "received response"),
            }
        }
    }
}
