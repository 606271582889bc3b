//! The request dispatcher
//!
//! A [`Dispatcher`] owns one transport session and one lock for one
//! credential. Every [`Route`] it executes goes through the same pipeline:
//!
//! 1. take the lock (callers queue here, in FIFO order),
//! 2. send the route, replaying it on transport timeouts up to the retry limit,
//! 3. classify the response (401 and 503 are fatal, anything else is parsed),
//! 4. honour the rate-limit headers by sleeping *before* releasing the lock,
//!    so the pause also holds back every queued caller.
//!
//! The lock is a guard scoped to the call, so it is released on every exit
//! path, including when the caller's future is dropped while waiting.

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::observability::{RequestMetadata, RequestTimer, ResponseMetadata};
use crate::rate_limit::RateLimitState;
use crate::route::Route;
use secrecy::SecretString;
use serde::de::DeserializeOwned;
use spacetraders_transport::http::HttpTransportConfig;
use spacetraders_transport::{HttpTransport, RetryPolicy, Transport};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

/// Executes routes for one credential, one at a time.
///
/// # Example
///
/// ```rust,no_run
/// use spacetraders::{Dispatcher, Route};
///
/// # async fn example() -> spacetraders::Result<()> {
/// let dispatcher = Dispatcher::builder().token("my-token").build()?;
///
/// let status = dispatcher
///     .dispatch(&Route::get("https://api.spacetraders.io/game/status")?)
///     .await?;
/// println!("{}", status["status"]);
///
/// dispatcher.shutdown().await?;
/// # Ok(())
/// # }
/// ```
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    token: SecretString,
    policy: RetryPolicy,
    timeout: Option<Duration>,
    lock: Arc<Mutex<()>>,
    closed: AtomicBool,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("policy", &self.policy)
            .field("timeout", &self.timeout)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Create a new builder for configuring a dispatcher.
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    /// Execute a route and return its parsed JSON body.
    ///
    /// Waits for any dispatch already in flight on this dispatcher. When the
    /// response reports an exhausted rate-limit budget, this call sleeps for
    /// the server's `Retry-After` delay before returning, so its latency can
    /// exceed the request itself.
    ///
    /// # Errors
    ///
    /// - [`Error::Http`] for a 401 or 503 response, or an unparseable body
    /// - [`Error::ReachedMaximumRetries`] when every attempt timed out
    /// - [`Error::Transport`] for a non-timeout transport failure
    /// - [`Error::Closed`] after [`shutdown`](Self::shutdown)
    pub async fn dispatch(&self, route: &Route) -> Result<serde_json::Value> {
        if self.is_closed() {
            return Err(Error::Closed);
        }

        let _guard = self.lock.lock().await;

        // Shutdown may have completed while this call was queued
        if self.is_closed() {
            return Err(Error::Closed);
        }

        let meta = RequestMetadata::from_route(route);
        let timer = RequestTimer::start();

        let result = self.execute(route, &meta, &timer).await;
        if let Err(err) = &result {
            meta.log_failure(err, timer.elapsed());
        }
        result
    }

    /// Execute a route and deserialize its body into `T`.
    ///
    /// # Errors
    ///
    /// Everything [`dispatch`](Self::dispatch) returns, plus
    /// [`Error::Serialization`] if the body does not match `T`.
    pub async fn dispatch_as<T: DeserializeOwned>(&self, route: &Route) -> Result<T> {
        let value = self.dispatch(route).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Close the owned transport session.
    ///
    /// Waits for the exchange in flight, if any, to finish. Calls queued
    /// behind it and every later call fail with [`Error::Closed`] without
    /// performing I/O. Calling this more than once is a no-op.
    pub async fn shutdown(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        let _guard = self.lock.lock().await;
        self.transport.close().await?;
        tracing::info!("Dispatcher shut down");
        Ok(())
    }

    /// Whether [`shutdown`](Self::shutdown) has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// The retry policy applied to every route.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// The deadline that overrides route timeouts, if set.
    pub fn timeout_override(&self) -> Option<Duration> {
        self.timeout
    }

    async fn execute(
        &self,
        route: &Route,
        meta: &RequestMetadata,
        timer: &RequestTimer,
    ) -> Result<serde_json::Value> {
        let timeout = self.timeout.unwrap_or_else(|| route.timeout_duration());
        let max_retries = self.policy.max_retries();
        let mut attempt = 0;

        while attempt < max_retries {
            attempt += 1;
            let request = route.to_request(&self.token, timeout)?;
            meta.log_attempt(attempt, timeout);

            let response = match self.transport.send_http(request).await {
                Ok(response) => response,
                Err(err) if RetryPolicy::is_retryable(&err) => {
                    meta.log_timeout(attempt, max_retries, timeout);
                    self.pause_before_replay(attempt).await;
                    continue;
                }
                Err(err) => return Err(err.into()),
            };

            match response.status {
                401 => return Err(Error::from_unauthorized(&response.body)),
                503 if self.policy.retries_status(503) => {
                    meta.log_unavailable_retry(attempt, max_retries);
                    self.pause_before_replay(attempt).await;
                    continue;
                }
                503 => return Err(Error::service_unavailable()),
                status => {
                    let value = parse_body(status, &response.body)?;

                    if let Some(wait) = RateLimitState::from_response(&response).pause() {
                        meta.log_rate_limit_pause(wait);
                        tokio::time::sleep(wait).await;
                    }

                    ResponseMetadata {
                        status,
                        body_size: response.body.len(),
                        elapsed: timer.elapsed(),
                        attempts: attempt,
                    }
                    .log_success(meta);

                    return Ok(value);
                }
            }
        }

        Err(Error::ReachedMaximumRetries { max_retries })
    }

    async fn pause_before_replay(&self, attempt: u32) {
        let backoff = self.policy.backoff();
        if !backoff.is_zero() && attempt < self.policy.max_retries() {
            tokio::time::sleep(backoff).await;
        }
    }
}

fn parse_body(status: u16, body: &[u8]) -> Result<serde_json::Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_slice(body).map_err(|e| Error::malformed(status, e))
}

/// Builder for creating a [`Dispatcher`].
#[derive(Default)]
pub struct DispatcherBuilder {
    token: Option<SecretString>,
    transport: Option<Arc<dyn Transport>>,
    policy: RetryPolicy,
    timeout: Option<Duration>,
    lock: Option<Arc<Mutex<()>>>,
    user_agent: Option<String>,
}

impl DispatcherBuilder {
    /// Start from a client configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            token: config.token.clone(),
            policy: config.retry_policy(),
            timeout: config.timeout,
            user_agent: config.user_agent.clone(),
            ..Default::default()
        }
    }

    /// Set the bearer token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::new(token.into().into_boxed_str()));
        self
    }

    /// Set the bearer token from an existing secret.
    pub fn secret_token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    /// Use a specific transport instead of a fresh [`HttpTransport`].
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Set the full retry policy.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the number of attempts per route.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.policy = self.policy.with_max_retries(max_retries);
        self
    }

    /// Override every route's timeout with a fixed deadline.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Serialize through an externally owned lock.
    pub fn lock(mut self, lock: Arc<Mutex<()>>) -> Self {
        self.lock = Some(lock);
        self
    }

    /// Set the User-Agent used by the default transport.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the dispatcher.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingConfig`] without a token or with a zero timeout
    /// override, or [`Error::Transport`] if the default HTTP transport cannot
    /// be created.
    pub fn build(self) -> Result<Dispatcher> {
        let token = self
            .token
            .ok_or_else(|| Error::MissingConfig("bearer token".to_string()))?;
        if self.timeout.is_some_and(|timeout| timeout.is_zero()) {
            return Err(Error::MissingConfig(
                "timeout override must be greater than zero".to_string(),
            ));
        }

        let transport = match self.transport {
            Some(transport) => transport,
            None => {
                let mut config = HttpTransportConfig::default();
                if self.user_agent.is_some() {
                    config.user_agent = self.user_agent;
                }
                Arc::new(HttpTransport::with_config(config)?)
            }
        };

        Ok(Dispatcher {
            transport,
            token,
            policy: self.policy,
            timeout: self.timeout,
            lock: self.lock.unwrap_or_default(),
            closed: AtomicBool::new(false),
        })
    }
}
