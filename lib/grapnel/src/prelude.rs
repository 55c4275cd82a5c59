//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions for
//! easy glob importing:
//!
//! ```ignore
//! use grapnel::prelude::*;
//! ```

pub use crate::{
    ApiErrorBody, Client, ClientConfig, Error, Interceptor, Method, Params, RawClient,
    RawResponse, Recovered, RequestPlan, Result, TypedResponse, WireRequest, from_json, to_json,
};
pub use serde::{Deserialize, Serialize};
