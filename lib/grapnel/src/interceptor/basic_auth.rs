//! HTTP basic authentication interceptor.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::WireRequest;
use crate::interceptor::Interceptor;

/// Interceptor that sets an `Authorization: Basic <credentials>` header on
/// every request going through the full pipeline.
///
/// Credentials are encoded once at construction. Any Authorization header
/// already on the wire request is replaced.
#[derive(Clone)]
pub struct BasicAuthInterceptor {
    credentials: String,
}

impl std::fmt::Debug for BasicAuthInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuthInterceptor")
            .field("credentials", &"***")
            .finish()
    }
}

impl BasicAuthInterceptor {
    /// Create a basic auth interceptor for the given username and password.
    #[must_use]
    pub fn new(username: impl AsRef<str>, password: impl AsRef<str>) -> Self {
        let credentials = STANDARD.encode(format!(
            "{}:{}",
            username.as_ref(),
            password.as_ref()
        ));
        Self { credentials }
    }
}

impl Interceptor for BasicAuthInterceptor {
    fn name(&self) -> &str {
        "basic-auth"
    }

    fn on_request(&self, request: &mut WireRequest) {
        request.insert_header("Authorization", format!("Basic {}", self.credentials));
    }
}
