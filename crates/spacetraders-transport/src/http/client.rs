//! HTTP transport client implementation
//!
//! Implements the Transport trait on top of a pooled reqwest client. One
//! call to `send_http` is exactly one network exchange: retries belong to
//! the caller.

use crate::error::{Result, TransportError};
use crate::traits::{HttpRequest, HttpResponse, Transport};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use url::Url;

/// HTTP transport implementation
///
/// Handles:
/// - Connection pooling
/// - Per-request deadlines
/// - Mapping of expired deadlines to [`TransportError::Timeout`]
///
/// The pooled client is owned exclusively by the transport and dropped by
/// [`Transport::close`]. Any request sent afterwards fails with
/// [`TransportError::Closed`].
pub struct HttpTransport {
    client: RwLock<Option<ReqwestClient>>,
}

impl HttpTransport {
    /// Create a new HTTP transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpTransportConfig::default())
    }

    /// Create a new HTTP transport with custom configuration
    pub fn with_config(config: HttpTransportConfig) -> Result<Self> {
        let mut builder = ReqwestClient::builder()
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host);

        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        Ok(Self {
            client: RwLock::new(Some(client)),
        })
    }

    async fn client(&self) -> Result<ReqwestClient> {
        self.client
            .read()
            .await
            .as_ref()
            .cloned()
            .ok_or(TransportError::Closed)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send_http(&self, request: HttpRequest) -> Result<HttpResponse> {
        let client = self.client().await?;

        let url = Url::parse(&request.url)
            .map_err(|e| TransportError::Http(format!("Invalid URL '{}': {}", request.url, e)))?;

        tracing::debug!(method = %request.method, url = %url, "Sending HTTP request");

        let mut req = client.request(request.method.clone(), url);

        for (key, value) in &request.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if !request.query.is_empty() {
            req = req.query(&request.query);
        }

        if let Some(body) = request.body {
            req = req.body(body);
        }

        if let Some(timeout) = request.timeout {
            req = req.timeout(timeout);
        }

        let response = req.send().await?;

        let status = response.status().as_u16();
        tracing::debug!(status, "Received HTTP response");
        let mut headers = HashMap::new();

        for (key, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(key.to_string(), v.to_string());
            }
        }

        // A deadline that expires while the body streams in is still a timeout
        let body = response.bytes().await?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    async fn is_connected(&self) -> bool {
        self.client.read().await.is_some()
    }

    async fn close(&self) -> Result<()> {
        // Dropping the client tears down its idle pool
        if self.client.write().await.take().is_some() {
            tracing::debug!("HTTP transport closed");
        }
        Ok(())
    }
}

/// HTTP transport configuration
#[derive(Clone, Debug)]
pub struct HttpTransportConfig {
    /// Connection timeout
    pub connect_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// User-Agent header sent with every request
    pub user_agent: Option<String>,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            pool_max_idle_per_host: 4,
            user_agent: Some(concat!("spacetraders-rs/", env!("CARGO_PKG_VERSION")).to_string()),
        }
    }
}
