//! Transport abstraction.
//!
//! The pipeline is transport-agnostic: anything that can turn a
//! [`WireRequest`] into a [`RawResponse`] can sit underneath it. The
//! production implementation lives in the `grapnel` crate; tests script
//! their own.

use futures_core::future::BoxFuture;

use crate::{RawResponse, Result, WireRequest};

/// An HTTP transport: sends one wire request, produces one raw response.
///
/// Implementations own connection management, TLS, and timeout
/// enforcement. A transport error means no response exists; the pipeline
/// propagates it without consulting any interceptor.
pub trait Transport: Send + Sync {
    /// Send a request and await the complete response.
    fn send(&self, request: WireRequest) -> BoxFuture<'_, Result<RawResponse>>;
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use bytes::Bytes;

    use super::*;
    use crate::Method;

    #[test]
    fn transport_is_object_safe() {
        struct Canned;

        impl Transport for Canned {
            fn send(&self, _request: WireRequest) -> BoxFuture<'_, Result<RawResponse>> {
                Box::pin(std::future::ready(Ok(RawResponse::new(
                    200,
                    HashMap::new(),
                    Bytes::new(),
                ))))
            }
        }

        let url = url::Url::parse("https://api.example.com").expect("valid URL");
        let transport: Arc<dyn Transport> = Arc::new(Canned);
        let _future = transport.send(WireRequest::new(Method::Get, url));
    }
}
