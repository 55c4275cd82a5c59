//! Production transport backed by hyper.
//!
//! [`HyperTransport`] owns a pooled hyper client with rustls TLS and
//! webpki roots. It is the transport a [`crate::Client`] falls back to when
//! the builder is given no other.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use futures_core::future::BoxFuture;
use http_body_util::{BodyExt, Full};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::Client as LegacyClient;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use tokio::time::timeout;
use tracing::warn;

use crate::config::ClientConfig;
use crate::{Error, RawResponse, Result, Transport, WireRequest};

/// Transport dispatching over a pooled hyper client.
pub struct HyperTransport {
    client: LegacyClient<HttpsConnector<HttpConnector>, Full<Bytes>>,
    timeout: Duration,
    user_agent: Option<http::HeaderValue>,
}

impl std::fmt::Debug for HyperTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperTransport")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl Default for HyperTransport {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl HyperTransport {
    /// Build a transport from the given configuration.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        let client = LegacyClient::builder(TokioExecutor::new())
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(config.pool_idle_timeout)
            .build(https_connector(&config));

        let user_agent = config.user_agent.as_deref().and_then(|agent| {
            http::HeaderValue::from_str(agent)
                .inspect_err(|_| warn!(agent, "user agent is not a valid header value, ignoring"))
                .ok()
        });

        Self {
            client,
            timeout: config.timeout,
            user_agent,
        }
    }

    async fn execute(&self, request: WireRequest) -> Result<RawResponse> {
        let request = to_http_request(request, self.user_agent.as_ref())?;

        let response = timeout(self.timeout, self.client.request(request))
            .await
            .map_err(|_| Error::Timeout)?
            .map_err(|err| map_hyper_error(&err))?;

        let (parts, body) = response.into_parts();
        let status = parts.status.as_u16();
        let headers = extract_headers(&parts.headers);
        let body = body
            .collect()
            .await
            .map_err(|err| Error::connection(err.to_string()))?
            .to_bytes();

        Ok(RawResponse::new(status, headers, body))
    }
}

impl Transport for HyperTransport {
    fn send(&self, request: WireRequest) -> BoxFuture<'_, Result<RawResponse>> {
        Box::pin(self.execute(request))
    }
}

/// HTTPS connector with webpki roots, plain HTTP allowed for local use.
fn https_connector(config: &ClientConfig) -> HttpsConnector<HttpConnector> {
    let root_store: rustls::RootCertStore =
        webpki_roots::TLS_SERVER_ROOTS.iter().cloned().collect();

    let tls_config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    let mut http = HttpConnector::new();
    http.enforce_http(false);
    http.set_connect_timeout(Some(config.connect_timeout));

    HttpsConnectorBuilder::new()
        .with_tls_config(tls_config)
        .https_or_http()
        .enable_http1()
        .enable_http2()
        .wrap_connector(http)
}

fn to_http_request(
    request: WireRequest,
    user_agent: Option<&http::HeaderValue>,
) -> Result<http::Request<Full<Bytes>>> {
    let (method, url, headers, body) = request.into_parts();

    let mut builder = http::Request::builder()
        .method(http::Method::from(method))
        .uri(url.as_str());
    for (name, value) in &headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    let mut converted = builder
        .body(Full::new(body.unwrap_or_default()))
        .map_err(|err| Error::invalid_request(err.to_string()))?;

    if let Some(agent) = user_agent {
        converted
            .headers_mut()
            .entry(http::header::USER_AGENT)
            .or_insert_with(|| agent.clone());
    }

    Ok(converted)
}

fn extract_headers(headers: &http::HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect()
}

fn map_hyper_error(err: &hyper_util::client::legacy::Error) -> Error {
    if err.is_connect() {
        return Error::connection(err.to_string());
    }

    let message = err.to_string();
    let lowered = message.to_lowercase();
    if lowered.contains("tls") || lowered.contains("ssl") || lowered.contains("certificate") {
        Error::tls(message)
    } else {
        Error::connection(message)
    }
}
