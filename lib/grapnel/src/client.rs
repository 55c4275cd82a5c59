//! The interceptor-chain HTTP client.
//!
//! [`Client`] decorates a [`Transport`] with an ordered chain of
//! interceptors. [`Client::request`] runs the full pipeline: build the
//! wire request, run pre-send hooks, dispatch, run post-receive hooks,
//! offer the response to recovery hooks, classify, decode.
//! [`Client::request_raw`] reaches the transport with no interceptor
//! involvement at all; recovery hooks work through a [`RawClient`], which
//! only exposes that path, so recovery can never trigger further recovery.

use std::sync::Arc;
use std::time::Instant;

use futures_core::future::BoxFuture;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::interceptor::{Interceptor, Recovered};
use crate::transport::HyperTransport;
use crate::{
    Error, Params, RawResponse, RequestPlan, Result, Transport, TypedResponse, WireRequest,
    classify, classify_bypass,
};

// ============================================================================
// Client
// ============================================================================

/// HTTP client running requests through an ordered interceptor chain.
///
/// # Example
///
/// ```ignore
/// use grapnel::{Client, RequestPlan};
///
/// #[derive(Debug, serde::Deserialize)]
/// struct Item { id: u64 }
///
/// let client = Client::builder("https://api.example.com")
///     .interceptor(grapnel::LoggingInterceptor::new())
///     .build()?;
///
/// let items = client.request::<Vec<Item>>(RequestPlan::get("/items")).await?;
/// ```
#[derive(Clone)]
pub struct Client {
    base_url: Url,
    transport: Arc<dyn Transport>,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("interceptors", &self.interceptors.len())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client over the production transport with default
    /// configuration and an empty chain.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or is not
    /// hierarchical.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::builder(base_url).build()
    }

    /// Create a new client builder.
    #[must_use]
    pub fn builder(base_url: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(base_url)
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Number of interceptors in the chain.
    #[must_use]
    pub fn interceptor_count(&self) -> usize {
        self.interceptors.len()
    }

    /// Append an interceptor to the chain.
    ///
    /// Chain order is registration order: it decides pre-send and
    /// post-receive invocation order and recovery trial order. The chain is
    /// never reordered or deduplicated; an interceptor added twice runs
    /// twice. Registration needs exclusive access, so a client already
    /// shared across tasks can no longer be extended.
    pub fn add_interceptor(&mut self, interceptor: impl Interceptor + 'static) {
        self.interceptors.push(Arc::new(interceptor));
    }

    /// Append an already-shared interceptor to the chain.
    pub fn add_interceptor_arc(&mut self, interceptor: Arc<dyn Interceptor>) {
        self.interceptors.push(interceptor);
    }

    /// Run a request through the full interceptor pipeline.
    ///
    /// The plan itself is never mutated; pre-send hooks amend the wire
    /// request built from it. After dispatch, every post-receive hook
    /// observes the response, then recovery hooks may substitute the
    /// outcome before classification. Transport failures propagate
    /// immediately and are never offered to recovery.
    ///
    /// # Errors
    ///
    /// - [`Error::Unknown`] when the response body is empty
    /// - [`Error::ClientError`] for 3xx/4xx responses nobody recovered
    /// - [`Error::ServerError`] for 5xx responses nobody recovered
    /// - [`Error::Decode`] when the success body does not match `T`
    /// - transport and request-building errors as they occur
    pub async fn request<T>(&self, plan: RequestPlan) -> Result<TypedResponse<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let mut wire = self.build_wire(&plan)?;

        for interceptor in &self.interceptors {
            interceptor.on_request(&mut wire);
        }

        let method = wire.method();
        let url = wire.url().to_string();
        debug!(%method, %url, "dispatching request");
        let start = Instant::now();

        let raw = match self.transport.send(wire).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(%method, %url, error = %err, "transport failed");
                return Err(err);
            }
        };

        let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        debug!(status = raw.status(), elapsed_ms, "request completed");

        for interceptor in &self.interceptors {
            interceptor.on_response(&plan, &raw);
        }

        // Nothing to classify or decode; recovery is skipped as well.
        if raw.body_is_empty() {
            return Err(Error::Unknown);
        }

        if let Some(substitute) = self.try_recover::<T>(&raw, &plan).await {
            return Ok(substitute);
        }

        let raw = classify(raw.status(), raw.body()).into_result(raw)?;
        TypedResponse::from_raw(raw)
    }

    /// Run a request on the raw path: no pre-send hooks, no post-receive
    /// hooks, no recovery, and the bypass classification (4xx/5xx uniform
    /// client error, body never inspected).
    ///
    /// # Errors
    ///
    /// - [`Error::Unknown`] when the response body is empty
    /// - [`Error::ClientError`] for any 4xx/5xx response
    /// - [`Error::Decode`] when the success body does not match `T`
    /// - transport and request-building errors as they occur
    pub async fn request_raw<T>(&self, plan: RequestPlan) -> Result<TypedResponse<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let raw = self.dispatch_bypass(&plan).await?;
        let raw = classify_bypass(raw.status(), raw.body()).into_result(raw)?;
        TypedResponse::from_raw(raw)
    }

    /// Resolve a plan into a wire request: join the base URL with the
    /// plan's path, apply its headers, then encode parameters. Parameters
    /// are always JSON, so their content type wins over any caller-set
    /// value.
    fn build_wire(&self, plan: &RequestPlan) -> Result<WireRequest> {
        let url = join_url(&self.base_url, plan.path())?;
        let mut wire = WireRequest::new(plan.method(), url);

        for (name, value) in plan.headers() {
            wire.insert_header(name.clone(), value.clone());
        }

        if let Some(params) = plan.params() {
            wire.set_body(params.to_bytes()?);
            wire.insert_header("Content-Type", Params::CONTENT_TYPE);
        }

        Ok(wire)
    }

    /// Build and dispatch without touching the chain. Shared by
    /// [`Client::request_raw`] and recovery replays.
    async fn dispatch_bypass(&self, plan: &RequestPlan) -> Result<RawResponse> {
        let wire = self.build_wire(plan)?;
        debug!(method = %wire.method(), url = %wire.url(), "dispatching raw request");
        self.transport.send(wire).await
    }

    /// Offer the completed response to each recovery hook in chain order.
    /// The first substitute matching the caller's payload type wins; a
    /// mismatched substitute counts as a decline and the trial moves on.
    async fn try_recover<T>(
        &self,
        response: &RawResponse,
        plan: &RequestPlan,
    ) -> Option<TypedResponse<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        for interceptor in &self.interceptors {
            let handle = RawClient::new::<T>(self);
            let Some(recovered) = interceptor.on_error(response, plan, handle).await else {
                continue;
            };

            match recovered.downcast::<T>() {
                Ok(substitute) => {
                    debug!(
                        interceptor = interceptor.name(),
                        "response substituted by interceptor"
                    );
                    return Some(substitute);
                }
                Err(_) => {
                    warn!(
                        interceptor = interceptor.name(),
                        "substitute payload shape mismatch, treating as decline"
                    );
                }
            }
        }

        None
    }
}

// ============================================================================
// Raw Client (recovery handle)
// ============================================================================

/// Decode a bypass response as the pipeline's payload type and erase it.
fn redecode_as<T>(client: &Client, plan: RequestPlan) -> BoxFuture<'_, Result<Recovered>>
where
    T: DeserializeOwned + Send + 'static,
{
    Box::pin(async move {
        let response = client.request_raw::<T>(plan).await?;
        Ok(Recovered::new(response))
    })
}

type Redecode = for<'b> fn(&'b Client, RequestPlan) -> BoxFuture<'b, Result<Recovered>>;

/// Interceptor-free pipeline handle passed to recovery hooks.
///
/// Every request issued through it takes the raw path, so no hook runs for
/// it. The handle is bound to the payload type of the pipeline run that
/// created it: [`RawClient::replay`] decodes at that type without the hook
/// ever naming it.
#[derive(Clone, Copy)]
pub struct RawClient<'a> {
    client: &'a Client,
    redecode: Redecode,
}

impl std::fmt::Debug for RawClient<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawClient").finish_non_exhaustive()
    }
}

impl<'a> RawClient<'a> {
    pub(crate) fn new<T>(client: &'a Client) -> Self
    where
        T: DeserializeOwned + Send + 'static,
    {
        Self {
            client,
            redecode: redecode_as::<T>,
        }
    }

    /// Issue a raw request decoded as the hook's own type, e.g. a token
    /// refresh call.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Client::request_raw`].
    pub async fn request<U>(self, plan: RequestPlan) -> Result<TypedResponse<U>>
    where
        U: DeserializeOwned + Send + 'static,
    {
        self.client.request_raw(plan).await
    }

    /// Reissue a plan on the raw path and package the decoded response as
    /// a substitute for the pipeline run this handle came from.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Client::request_raw`]; a hook that cannot
    /// replay usually logs the error and declines.
    pub async fn replay(self, plan: RequestPlan) -> Result<Recovered> {
        (self.redecode)(self.client, plan).await
    }
}

// ============================================================================
// URL joining
// ============================================================================

/// Append a request path to the base URL segment by segment, keeping the
/// base's own path intact.
fn join_url(base: &Url, path: &str) -> Result<Url> {
    let mut url = base.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| Error::invalid_request(format!("base URL is not hierarchical: {base}")))?;
        segments.pop_if_empty();
        segments.extend(path.split('/').filter(|segment| !segment.is_empty()));
    }
    Ok(url)
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`Client`].
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use grapnel::{Client, BearerAuthInterceptor, LoggingInterceptor};
///
/// let client = Client::builder("https://api.example.com")
///     .timeout(Duration::from_secs(10))
///     .interceptor(BearerAuthInterceptor::new("my-token"))
///     .interceptor(LoggingInterceptor::new())
///     .build()?;
/// ```
pub struct ClientBuilder {
    base_url: String,
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl std::fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("base_url", &self.base_url)
            .field("config", &self.config)
            .field("interceptors", &self.interceptors.len())
            .finish_non_exhaustive()
    }
}

impl ClientBuilder {
    fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            config: ClientConfig::default(),
            transport: None,
            interceptors: Vec::new(),
        }
    }

    /// Set the request timeout (applies to the default transport).
    #[must_use]
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the connection timeout (applies to the default transport).
    #[must_use]
    pub fn connect_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set the maximum idle connections per host (applies to the default
    /// transport).
    #[must_use]
    pub fn pool_max_idle_per_host(mut self, count: usize) -> Self {
        self.config.pool_max_idle_per_host = count;
        self
    }

    /// Set the idle connection timeout (applies to the default transport).
    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config.pool_idle_timeout = timeout;
        self
    }

    /// Set the default `User-Agent` header (applies to the default
    /// transport).
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(agent.into());
        self
    }

    /// Replace the transport configuration wholesale (applies to the
    /// default transport).
    #[must_use]
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a custom transport instead of the built-in hyper one. Transport
    /// configuration set on this builder is ignored in that case.
    #[must_use]
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Use an already-shared custom transport.
    #[must_use]
    pub fn transport_arc(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Append an interceptor to the chain.
    #[must_use]
    pub fn interceptor(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    /// Append an already-shared interceptor to the chain.
    #[must_use]
    pub fn interceptor_arc(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or is not
    /// hierarchical.
    pub fn build(self) -> Result<Client> {
        let base_url = Url::parse(&self.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::invalid_request(format!(
                "base URL is not hierarchical: {base_url}"
            )));
        }

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HyperTransport::new(self.config)),
        };

        Ok(Client {
            base_url,
            transport,
            interceptors: self.interceptors,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    use bytes::Bytes;

    use super::*;
    use crate::interceptor::RetryInterceptor;

    // ========================================================================
    // Scripted transport
    // ========================================================================

    /// Transport that replays a scripted sequence of outcomes and records
    /// every wire request it saw.
    #[derive(Default)]
    struct ScriptedTransport {
        script: Mutex<VecDeque<Result<RawResponse>>>,
        seen: Mutex<Vec<WireRequest>>,
    }

    impl ScriptedTransport {
        fn new(script: impl IntoIterator<Item = Result<RawResponse>>) -> Self {
            Self {
                script: Mutex::new(script.into_iter().collect()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn respond(status: u16, body: &'static str) -> Result<RawResponse> {
            Ok(RawResponse::new(
                status,
                HashMap::new(),
                Bytes::from_static(body.as_bytes()),
            ))
        }

        fn calls(&self) -> usize {
            self.seen.lock().expect("seen lock").len()
        }

        fn request_at(&self, index: usize) -> WireRequest {
            self.seen
                .lock()
                .expect("seen lock")
                .get(index)
                .cloned()
                .expect("request recorded")
        }
    }

    impl Transport for ScriptedTransport {
        fn send(&self, request: WireRequest) -> BoxFuture<'_, Result<RawResponse>> {
            self.seen.lock().expect("seen lock").push(request);
            let next = self
                .script
                .lock()
                .expect("script lock")
                .pop_front()
                .unwrap_or_else(|| Err(Error::connection("script exhausted")));
            Box::pin(std::future::ready(next))
        }
    }

    fn scripted_client(transport: Arc<ScriptedTransport>) -> Client {
        Client::builder("https://api.example.com")
            .transport_arc(transport)
            .build()
            .expect("client")
    }

    // ========================================================================
    // Test interceptors
    // ========================================================================

    /// Counts recovery consultations, always declines.
    #[derive(Default)]
    struct CountingDecliner {
        consulted: AtomicU32,
    }

    impl Interceptor for CountingDecliner {
        fn on_error<'a>(
            &'a self,
            _response: &'a RawResponse,
            _plan: &'a RequestPlan,
            _raw: RawClient<'a>,
        ) -> BoxFuture<'a, Option<Recovered>> {
            self.consulted.fetch_add(1, Ordering::SeqCst);
            Box::pin(std::future::ready(None))
        }
    }

    /// Stamps a header, appending to any value left by earlier hooks.
    struct HeaderStamp {
        value: &'static str,
    }

    impl Interceptor for HeaderStamp {
        fn on_request(&self, request: &mut WireRequest) {
            let stamped = match request.header("X-Stamp") {
                Some(existing) => format!("{existing},{}", self.value),
                None => self.value.to_string(),
            };
            request.insert_header("X-Stamp", stamped);
        }
    }

    // ========================================================================
    // URL joining
    // ========================================================================

    #[test]
    fn join_url_appends_path_segments() {
        let base = Url::parse("https://api.example.com").expect("base");
        let joined = join_url(&base, "/items").expect("join");
        assert_eq!(joined.as_str(), "https://api.example.com/items");

        let joined = join_url(&base, "items/42").expect("join");
        assert_eq!(joined.as_str(), "https://api.example.com/items/42");
    }

    #[test]
    fn join_url_keeps_base_path() {
        let base = Url::parse("https://api.example.com/v2/").expect("base");
        let joined = join_url(&base, "/items").expect("join");
        assert_eq!(joined.as_str(), "https://api.example.com/v2/items");

        let base = Url::parse("https://api.example.com/v2").expect("base");
        let joined = join_url(&base, "items").expect("join");
        assert_eq!(joined.as_str(), "https://api.example.com/v2/items");
    }

    #[test]
    fn join_url_percent_encodes_segments() {
        let base = Url::parse("https://api.example.com").expect("base");
        let joined = join_url(&base, "/items/a b").expect("join");
        assert_eq!(joined.as_str(), "https://api.example.com/items/a%20b");
    }

    // ========================================================================
    // Builder
    // ========================================================================

    #[test]
    fn builder_rejects_invalid_base_url() {
        let err = Client::new("not a url").expect_err("invalid");
        assert!(matches!(err, Error::InvalidUrl(_)));

        let err = Client::new("mailto:someone@example.com").expect_err("opaque");
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[test]
    fn builder_collects_interceptors_in_order() {
        let client = Client::builder("https://api.example.com")
            .transport(ScriptedTransport::default())
            .interceptor(HeaderStamp { value: "one" })
            .interceptor(HeaderStamp { value: "two" })
            .build()
            .expect("client");

        assert_eq!(client.interceptor_count(), 2);
    }

    #[test]
    fn client_is_debug() {
        let client = Client::builder("https://api.example.com")
            .transport(ScriptedTransport::default())
            .build()
            .expect("client");
        let debug = format!("{client:?}");
        assert!(debug.contains("Client"));
        assert!(debug.contains("api.example.com"));
    }

    // ========================================================================
    // Wire building
    // ========================================================================

    #[test]
    fn build_wire_applies_headers_then_params() {
        let client = scripted_client(Arc::new(ScriptedTransport::default()));

        let plan = RequestPlan::post("/items")
            .with_header("Content-Type", "text/plain")
            .with_header("X-Trace", "abc")
            .with_params(Params::new().with("name", "Alice"));

        let wire = client.build_wire(&plan).expect("wire");

        // Params always win the content type.
        assert_eq!(wire.header("Content-Type"), Some("application/json"));
        assert_eq!(wire.header("X-Trace"), Some("abc"));
        let body = wire.body().expect("body");
        let value: serde_json::Value = serde_json::from_slice(body).expect("json");
        assert_eq!(value, serde_json::json!({"name": "Alice"}));
    }

    #[test]
    fn build_wire_without_params_has_no_body() {
        let client = scripted_client(Arc::new(ScriptedTransport::default()));
        let wire = client
            .build_wire(&RequestPlan::get("/items"))
            .expect("wire");

        assert!(wire.body().is_none());
        assert!(wire.header("Content-Type").is_none());
    }

    // ========================================================================
    // Pipeline behavior
    // ========================================================================

    #[tokio::test]
    async fn presend_mutations_are_cumulative_and_ordered() {
        let transport = Arc::new(ScriptedTransport::new([ScriptedTransport::respond(
            200, "[1]",
        )]));
        let mut client = scripted_client(Arc::clone(&transport));
        client.add_interceptor(HeaderStamp { value: "one" });
        client.add_interceptor(HeaderStamp { value: "two" });

        let response = client
            .request::<Vec<u32>>(RequestPlan::get("/items"))
            .await
            .expect("response");
        assert_eq!(response.data(), &vec![1]);

        // The second hook saw the first hook's value.
        let sent = transport.request_at(0);
        assert_eq!(sent.header("X-Stamp"), Some("one,two"));
    }

    #[tokio::test]
    async fn empty_body_is_unknown_and_skips_recovery() {
        let transport = Arc::new(ScriptedTransport::new([ScriptedTransport::respond(
            200, "",
        )]));
        let decliner = Arc::new(CountingDecliner::default());
        let mut client = scripted_client(transport);
        client.add_interceptor_arc(Arc::clone(&decliner) as Arc<dyn Interceptor>);

        let err = client
            .request::<Vec<u32>>(RequestPlan::get("/items"))
            .await
            .expect_err("unknown");

        assert!(matches!(err, Error::Unknown));
        assert_eq!(decliner.consulted.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn transport_failure_skips_recovery() {
        let transport = Arc::new(ScriptedTransport::new([Err(Error::connection(
            "refused",
        ))]));
        let decliner = Arc::new(CountingDecliner::default());
        let mut client = scripted_client(transport);
        client.add_interceptor_arc(Arc::clone(&decliner) as Arc<dyn Interceptor>);

        let err = client
            .request::<Vec<u32>>(RequestPlan::get("/items"))
            .await
            .expect_err("connection");

        assert!(err.is_connection());
        assert_eq!(decliner.consulted.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn recovery_is_consulted_even_on_success() {
        let transport = Arc::new(ScriptedTransport::new([ScriptedTransport::respond(
            200, "[1,2]",
        )]));
        let decliner = Arc::new(CountingDecliner::default());
        let mut client = scripted_client(transport);
        client.add_interceptor_arc(Arc::clone(&decliner) as Arc<dyn Interceptor>);

        let response = client
            .request::<Vec<u32>>(RequestPlan::get("/items"))
            .await
            .expect("response");

        assert_eq!(response.data(), &vec![1, 2]);
        assert_eq!(decliner.consulted.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn declined_recovery_falls_through_to_classification() {
        let transport = Arc::new(ScriptedTransport::new([ScriptedTransport::respond(
            503,
            "unavailable",
        )]));
        let decliner = Arc::new(CountingDecliner::default());
        let mut client = scripted_client(transport);
        client.add_interceptor_arc(Arc::clone(&decliner) as Arc<dyn Interceptor>);

        let err = client
            .request::<Vec<u32>>(RequestPlan::get("/items"))
            .await
            .expect_err("server error");

        assert!(err.is_server_error());
        assert_eq!(err.status(), Some(503));
        assert_eq!(decliner.consulted.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retry_interceptor_replays_through_bypass() {
        let transport = Arc::new(ScriptedTransport::new([
            ScriptedTransport::respond(503, "unavailable"),
            ScriptedTransport::respond(200, "[7]"),
        ]));
        let decliner = Arc::new(CountingDecliner::default());
        let mut client = scripted_client(Arc::clone(&transport));
        client.add_interceptor(RetryInterceptor::new());
        // Registered after the retry hook: must never be consulted once the
        // retry substitutes, and the replay itself runs no hooks either.
        client.add_interceptor_arc(Arc::clone(&decliner) as Arc<dyn Interceptor>);

        let response = client
            .request::<Vec<u32>>(RequestPlan::get("/items"))
            .await
            .expect("substituted");

        assert_eq!(response.data(), &vec![7]);
        assert_eq!(transport.calls(), 2);
        assert_eq!(decliner.consulted.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn raw_request_skips_the_chain() {
        let transport = Arc::new(ScriptedTransport::new([ScriptedTransport::respond(
            200, "[3]",
        )]));
        let decliner = Arc::new(CountingDecliner::default());
        let mut client = scripted_client(Arc::clone(&transport));
        client.add_interceptor(HeaderStamp { value: "one" });
        client.add_interceptor_arc(Arc::clone(&decliner) as Arc<dyn Interceptor>);

        let response = client
            .request_raw::<Vec<u32>>(RequestPlan::get("/items"))
            .await
            .expect("response");

        assert_eq!(response.data(), &vec![3]);
        assert_eq!(decliner.consulted.load(Ordering::SeqCst), 0);
        assert!(transport.request_at(0).header("X-Stamp").is_none());
    }

    #[tokio::test]
    async fn raw_request_uses_bypass_classification() {
        let transport = Arc::new(ScriptedTransport::new([ScriptedTransport::respond(
            503,
            "unavailable",
        )]));
        let client = scripted_client(transport);

        let err = client
            .request_raw::<Vec<u32>>(RequestPlan::get("/items"))
            .await
            .expect_err("client error");

        // Uniform on the raw path: a 503 is a client error with no body.
        assert!(err.is_client_error());
        assert_eq!(err.status(), Some(503));
        assert!(err.error_body().is_none());
    }
}
