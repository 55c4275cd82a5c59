//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use grapnel_core::prelude::*;
//! ```

pub use crate::{
    ApiErrorBody, Classification, Error, Method, Params, RawResponse, RequestPlan, Result,
    Transport, TypedResponse, WireRequest, classify, classify_bypass, from_json, to_json,
};
