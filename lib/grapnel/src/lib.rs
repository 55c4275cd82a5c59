//! Interceptor-chain HTTP client pipeline.
//!
//! A [`Client`] decorates a [`Transport`] with an ordered chain of
//! [`Interceptor`]s. Every request runs the full pipeline:
//!
//! 1. the plan is resolved into a wire request (URL join, headers, JSON
//!    parameters),
//! 2. each interceptor may amend the wire request before it is sent,
//! 3. the transport dispatches it,
//! 4. each interceptor observes the completed response,
//! 5. interceptors may substitute the outcome (token refresh, replay),
//! 6. the response is classified and decoded.
//!
//! A parallel raw path ([`Client::request_raw`]) reaches the transport with
//! no interceptor involvement. Recovery hooks are handed a [`RawClient`]
//! bound to that path, so recovery work can never trigger further recovery.
//!
//! # Example
//!
//! ```ignore
//! use grapnel::{Client, LoggingInterceptor, RequestPlan};
//!
//! #[derive(Debug, serde::Deserialize)]
//! pub struct Item {
//!     id: u64,
//! }
//!
//! let client = Client::builder("https://api.example.com")
//!     .interceptor(LoggingInterceptor::new())
//!     .build()?;
//!
//! let items = client.request::<Vec<Item>>(RequestPlan::get("/items")).await?;
//! println!("{:?}", items.data());
//! ```

mod client;
mod config;
pub mod interceptor;
pub mod prelude;
mod transport;

// Re-export client types
pub use client::{Client, ClientBuilder, RawClient};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use transport::HyperTransport;

// Re-export the interceptor surface
pub use interceptor::{
    BasicAuthInterceptor, BearerAuthInterceptor, Interceptor, LogLevel, LoggingInterceptor,
    MetricsInterceptor, Recovered, RetryInterceptor,
};

// Re-export core types
pub use grapnel_core::{
    ApiErrorBody, BoxFuture, Classification, Error, Method, Params, RawResponse, RequestPlan,
    Result, Transport, TypedResponse, WireRequest, classify, classify_bypass, from_json, to_json,
};

// Re-export url for base URL handling
pub use url;
