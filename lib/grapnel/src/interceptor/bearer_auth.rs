//! Bearer token authentication interceptor.

use std::sync::Arc;

use crate::WireRequest;
use crate::interceptor::Interceptor;

/// Interceptor that sets an `Authorization: Bearer <token>` header on every
/// request going through the full pipeline.
///
/// Any Authorization header already on the wire request is replaced, so an
/// earlier hook or the plan itself cannot leak a stale credential past this
/// one.
#[derive(Clone)]
pub struct BearerAuthInterceptor {
    token: Arc<str>,
}

impl std::fmt::Debug for BearerAuthInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerAuthInterceptor")
            .field("token", &"***")
            .finish()
    }
}

impl BearerAuthInterceptor {
    /// Create a bearer auth interceptor for the given token.
    #[must_use]
    pub fn new(token: impl Into<Arc<str>>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl Interceptor for BearerAuthInterceptor {
    fn name(&self) -> &str {
        "bearer-auth"
    }

    fn on_request(&self, request: &mut WireRequest) {
        request.insert_header("Authorization", format!("Bearer {}", self.token));
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;
    use crate::Method;

    fn request() -> WireRequest {
        let url = Url::parse("https://api.example.com/items").expect("url");
        WireRequest::new(Method::Get, url)
    }

    #[test]
    fn sets_the_authorization_header() {
        let interceptor = BearerAuthInterceptor::new("secret-token");
        let mut request = request();

        interceptor.on_request(&mut request);

        assert_eq!(
            request.header("Authorization"),
            Some("Bearer secret-token")
        );
    }

    #[test]
    fn replaces_an_existing_credential() {
        let interceptor = BearerAuthInterceptor::new("fresh");
        let mut request = request();
        request.insert_header("Authorization", "Bearer stale");

        interceptor.on_request(&mut request);

        assert_eq!(request.header("Authorization"), Some("Bearer fresh"));
    }

    #[test]
    fn debug_redacts_the_token() {
        let interceptor = BearerAuthInterceptor::new("secret-token");
        let debug = format!("{interceptor:?}");

        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("***"));
    }
}
