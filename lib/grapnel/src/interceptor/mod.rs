//! Interceptor chain building blocks.
//!
//! An [`Interceptor`] is a named unit with three hooks, all optional:
//!
//! - [`on_request`](Interceptor::on_request) - amend the outgoing request
//!   before dispatch
//! - [`on_response`](Interceptor::on_response) - observe the completed
//!   response (side effects only)
//! - [`on_error`](Interceptor::on_error) - offer a substitute response
//!   before the pipeline classifies the outcome
//!
//! Interceptors are registered on a [`Client`](crate::Client) and run in
//! registration order. Recovery hooks never see the chain: the
//! [`RawClient`](crate::RawClient) handle they receive reaches the
//! transport directly, so recovery work cannot trigger further recovery.
//!
//! # Available Interceptors
//!
//! - [`BearerAuthInterceptor`] - Adds `Authorization: Bearer <token>` header
//! - [`BasicAuthInterceptor`] - Adds `Authorization: Basic <base64>` header
//! - [`LoggingInterceptor`] - Logs requests/responses using `tracing`
//! - [`MetricsInterceptor`] - Records request/response counters
//! - [`RetryInterceptor`] - Replays the request once on configured statuses
//!
//! # Example
//!
//! ```ignore
//! use grapnel::{Client, LoggingInterceptor, BearerAuthInterceptor};
//!
//! let mut client = Client::new("https://api.example.com")?;
//! client.add_interceptor(BearerAuthInterceptor::new("my-token"));
//! client.add_interceptor(LoggingInterceptor::new());
//! ```

use std::any::Any;
use std::future;

use futures_core::future::BoxFuture;

use crate::client::RawClient;
use crate::{RawResponse, RequestPlan, TypedResponse, WireRequest};

mod basic_auth;
mod bearer_auth;
mod logging;
mod metrics;
mod retry;

pub use basic_auth::BasicAuthInterceptor;
pub use bearer_auth::BearerAuthInterceptor;
pub use logging::{LogLevel, LoggingInterceptor};
pub use metrics::MetricsInterceptor;
pub use retry::RetryInterceptor;

// ============================================================================
// Interceptor Trait
// ============================================================================

/// A chain-composable unit decorating the request pipeline.
///
/// Every hook has a no-op default, so implementations override only what
/// they need. Hooks run in registration order and must not assume they are
/// alone in the chain: an earlier interceptor's request mutations are
/// visible to later ones.
pub trait Interceptor: Send + Sync {
    /// Name used in pipeline logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Amend the outgoing request before dispatch.
    ///
    /// Mutations are cumulative across the chain and all happen before the
    /// transport sees the request.
    fn on_request(&self, _request: &mut WireRequest) {}

    /// Observe a completed response. Side effects only; the outcome of the
    /// pipeline cannot be changed from here.
    fn on_response(&self, _plan: &RequestPlan, _response: &RawResponse) {}

    /// Offer a substitute for a completed response.
    ///
    /// Runs for every completed, non-empty response before classification,
    /// so an interceptor may substitute on technically-successful responses
    /// too. Hooks are tried in registration order; the first substitute
    /// whose payload matches the calling pipeline's type wins and
    /// short-circuits the rest. Return `None` to decline; an internal
    /// failure is also a decline (log it and return `None`).
    ///
    /// `raw` reaches the transport without touching the chain. Use
    /// [`RawClient::request`](crate::RawClient::request) for side calls
    /// (e.g. a token refresh) and
    /// [`RawClient::replay`](crate::RawClient::replay) to reissue `plan`
    /// (or an amended copy) as a substitute.
    fn on_error<'a>(
        &'a self,
        _response: &'a RawResponse,
        _plan: &'a RequestPlan,
        _raw: RawClient<'a>,
    ) -> BoxFuture<'a, Option<Recovered>> {
        Box::pin(future::ready(None))
    }
}

// ============================================================================
// Recovered Substitute
// ============================================================================

/// A type-erased substitute response produced by a recovery hook.
///
/// The chain is heterogeneous: interceptors cannot name the payload type of
/// the pipeline run that invokes them. A hook therefore erases the
/// [`TypedResponse`] it produces, and the pipeline reclaims it at the
/// caller's type, treating a shape mismatch as a decline.
pub struct Recovered {
    payload: Box<dyn Any + Send>,
}

impl Recovered {
    /// Erase a typed response for the pipeline to reclaim.
    #[must_use]
    pub fn new<T: Send + 'static>(response: TypedResponse<T>) -> Self {
        Self {
            payload: Box::new(response),
        }
    }

    /// Reclaim the substitute at the expected payload type.
    ///
    /// # Errors
    ///
    /// A shape mismatch returns the erased substitute unconsumed.
    pub fn downcast<T: Send + 'static>(self) -> Result<TypedResponse<T>, Self> {
        match self.payload.downcast::<TypedResponse<T>>() {
            Ok(response) => Ok(*response),
            Err(payload) => Err(Self { payload }),
        }
    }
}

impl std::fmt::Debug for Recovered {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recovered").finish_non_exhaustive()
    }
}
