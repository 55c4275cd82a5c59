//! Core types and traits for the grapnel interceptor HTTP pipeline.
//!
//! This crate provides the foundational types used by grapnel:
//! - [`Method`] - HTTP method enum
//! - [`RequestPlan`] - reissuable request descriptor
//! - [`WireRequest`] - transport-ready request
//! - [`Params`] - JSON request parameters
//! - [`RawResponse`] and [`TypedResponse`] - HTTP response types
//! - [`Classification`] - status/body classification policies
//! - [`Error`] and [`Result`] - Error handling
//! - [`Transport`] - Transport trait the pipeline runs on

mod body;
mod classify;
mod error;
mod method;
mod params;
pub mod prelude;
mod request;
mod response;
mod transport;

pub use body::{from_json, to_json};
pub use classify::{Classification, classify, classify_bypass};
pub use error::{ApiErrorBody, Error, Result};
pub use method::Method;
pub use params::Params;
pub use request::{RequestPlan, WireRequest};
pub use response::{RawResponse, TypedResponse};
pub use transport::Transport;

// Re-export the boxed future alias used in trait signatures
pub use futures_core::future::BoxFuture;
