//! Single-shot retry interceptor for transient upstream failures.

use futures_core::future::BoxFuture;
use tracing::{debug, warn};

use crate::client::RawClient;
use crate::interceptor::{Interceptor, Recovered};
use crate::{Method, RawResponse, RequestPlan};

const DEFAULT_STATUSES: [u16; 3] = [502, 503, 504];

/// Interceptor that replays a request once when the response status looks
/// transient.
///
/// Only idempotent plans are replayed; a POST or PATCH that reached the
/// server may already have taken effect. The replay goes through the raw
/// path, so no hook observes it and it can never trigger another retry. If
/// the replay itself fails, the original response stays in the pipeline and
/// the hook declines.
#[derive(Debug, Clone)]
pub struct RetryInterceptor {
    statuses: Vec<u16>,
}

impl Default for RetryInterceptor {
    fn default() -> Self {
        Self {
            statuses: DEFAULT_STATUSES.to_vec(),
        }
    }
}

impl RetryInterceptor {
    /// Create a retry interceptor replaying on 502, 503 and 504.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a retry interceptor replaying on the given statuses.
    #[must_use]
    pub fn on_statuses(statuses: impl Into<Vec<u16>>) -> Self {
        Self {
            statuses: statuses.into(),
        }
    }

    fn wants_replay(&self, status: u16, method: Method) -> bool {
        self.statuses.contains(&status) && method.is_idempotent()
    }
}

impl Interceptor for RetryInterceptor {
    fn name(&self) -> &str {
        "retry"
    }

    fn on_error<'a>(
        &'a self,
        response: &'a RawResponse,
        plan: &'a RequestPlan,
        raw: RawClient<'a>,
    ) -> BoxFuture<'a, Option<Recovered>> {
        Box::pin(async move {
            if !self.wants_replay(response.status(), plan.method()) {
                return None;
            }

            debug!(
                status = response.status(),
                path = plan.path(),
                "replaying request once"
            );

            match raw.replay(plan.clone()).await {
                Ok(recovered) => Some(recovered),
                Err(err) => {
                    warn!(error = %err, path = plan.path(), "replay failed, declining");
                    None
                }
            }
        })
    }
}
