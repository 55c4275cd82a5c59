//! Todo API Example
//!
//! Demonstrates grapnel's interceptor pipeline against a public JSON API.

// Example-specific lint allowances
#![allow(missing_docs)]
#![allow(clippy::unused_async)]
#![allow(clippy::print_stdout)]
#![allow(dead_code)]

use std::time::Duration;

use grapnel::prelude::*;
use grapnel::{LoggingInterceptor, RetryInterceptor};

// ============================================================================
// Data Types
// ============================================================================

/// A todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    pub completed: bool,
}

/// A blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    pub body: String,
}

// ============================================================================
// Main: Demonstrate usage
// ============================================================================

#[tokio::main]
async fn main() -> grapnel::Result<()> {
    // Plain client over the default hyper transport
    let client = Client::new("https://jsonplaceholder.typicode.com")?;

    println!("Todo API client created!");
    println!("Base URL: {}", client.base_url());

    // Client with an interceptor chain: request/response logging plus a
    // single replay on transient upstream failures
    let client_with_chain = Client::builder("https://jsonplaceholder.typicode.com")
        .timeout(Duration::from_secs(10))
        .user_agent("todo-api-demo/0.1")
        .interceptor(LoggingInterceptor::new())
        .interceptor(RetryInterceptor::new())
        .build()?;

    println!("\nTodo API client with interceptors created!");
    println!("Base URL: {}", client_with_chain.base_url());
    println!("Chain length: {}", client_with_chain.interceptor_count());

    // Note: These calls hit the live API when network access is available.
    // For demonstration, we just show the request shapes.

    println!("\n=== Example API calls (require network access) ===");
    println!("client.request::<Vec<Todo>>(RequestPlan::get(\"/todos\")).await?");
    println!("client.request::<Todo>(RequestPlan::get(\"/todos/1\")).await?");
    println!(
        "client.request::<Post>(RequestPlan::post(\"/posts\").with_params(params)).await?"
    );

    Ok(())
}

// ============================================================================
// Tests using wiremock
// ============================================================================
