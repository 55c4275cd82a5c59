//! Metrics interceptor emitting request and response counters.

use metrics::counter;

use crate::interceptor::Interceptor;
use crate::{RawResponse, RequestPlan, WireRequest};

const REQUESTS_TOTAL: &str = "http_client_requests_total";
const RESPONSES_TOTAL: &str = "http_client_responses_total";

const LABEL_METHOD: &str = "method";
const LABEL_STATUS: &str = "status";

/// Interceptor that counts requests and completed responses through the
/// [`metrics`] facade.
///
/// `http_client_requests_total` is labelled by method;
/// `http_client_responses_total` by method and status. Transport failures
/// produce no response, so the two counters can diverge.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsInterceptor;

impl MetricsInterceptor {
    /// Create a metrics interceptor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Interceptor for MetricsInterceptor {
    fn name(&self) -> &str {
        "metrics"
    }

    fn on_request(&self, request: &mut WireRequest) {
        counter!(REQUESTS_TOTAL, LABEL_METHOD => request.method().as_str()).increment(1);
    }

    fn on_response(&self, plan: &RequestPlan, response: &RawResponse) {
        counter!(
            RESPONSES_TOTAL,
            LABEL_METHOD => plan.method().as_str(),
            LABEL_STATUS => response.status().to_string(),
        )
        .increment(1);
    }
}
