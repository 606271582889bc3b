//! Structured logging for dispatched requests
//!
//! All dispatcher log lines go through this module so that every event
//! carries the same fields (`method`, `url`, `attempt`, ...). The library
//! only emits `tracing` events; installing a subscriber is up to the host
//! program, or to [`init_tracing`] with the `trace` feature.

use crate::route::Route;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Request metadata for structured logging
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// HTTP method
    pub method: &'static str,
    /// Absolute URL
    pub url: String,
    /// Number of query parameters
    pub query_len: usize,
}

impl RequestMetadata {
    /// Capture the loggable parts of a route
    pub fn from_route(route: &Route) -> Self {
        Self {
            method: route.method().as_str(),
            url: route.url().to_string(),
            query_len: route.query_params().len(),
        }
    }

    /// Log an attempt being sent
    pub fn log_attempt(&self, attempt: u32, timeout: Duration) {
        debug!(
            method = self.method,
            url = %self.url,
            query_len = self.query_len,
            attempt,
            timeout_ms = timeout.as_millis() as u64,
            "Sending request"
        );
    }

    /// Log an attempt that hit its deadline
    pub fn log_timeout(&self, attempt: u32, max_retries: u32, timeout: Duration) {
        warn!(
            method = self.method,
            url = %self.url,
            attempt,
            max_retries,
            "Request timed out after {:.1} seconds",
            timeout.as_secs_f64()
        );
    }

    /// Log a 503 that is about to be replayed
    pub fn log_unavailable_retry(&self, attempt: u32, max_retries: u32) {
        warn!(
            method = self.method,
            url = %self.url,
            attempt,
            max_retries,
            "Service unavailable, retrying"
        );
    }

    /// Log the pause taken after the rate-limit budget ran out
    pub fn log_rate_limit_pause(&self, wait: Duration) {
        warn!(
            method = self.method,
            url = %self.url,
            wait_secs = wait.as_secs_f64(),
            "Client has hit ratelimit, locking and waiting for {:.2} seconds",
            wait.as_secs_f64()
        );
    }

    /// Log a terminal failure
    pub fn log_failure(&self, err: &crate::Error, elapsed: Duration) {
        error!(
            method = self.method,
            url = %self.url,
            elapsed_ms = elapsed.as_millis() as u64,
            error = %err,
            "Request failed"
        );
    }
}

/// Response metadata for structured logging
#[derive(Debug, Clone)]
pub struct ResponseMetadata {
    /// HTTP status code
    pub status: u16,
    /// Response body size in bytes
    pub body_size: usize,
    /// Time elapsed since the dispatcher lock was taken
    pub elapsed: Duration,
    /// Number of attempts used, including the successful one
    pub attempts: u32,
}

impl ResponseMetadata {
    /// Log a successful exchange
    pub fn log_success(&self, request: &RequestMetadata) {
        info!(
            method = request.method,
            url = %request.url,
            status = self.status,
            elapsed_ms = self.elapsed.as_millis() as u64,
            body_size = self.body_size,
            attempts = self.attempts,
            "Request succeeded"
        );
    }
}

/// Timer for measuring request duration
pub struct RequestTimer {
    start: Instant,
}

impl RequestTimer {
    /// Start a new timer
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed time since the timer was started
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Install a formatting subscriber filtered by `RUST_LOG`.
///
/// Defaults to `spacetraders=info` when `RUST_LOG` is unset. Does nothing if
/// a global subscriber is already installed.
#[cfg(feature = "trace")]
#[cfg_attr(docsrs, doc(cfg(feature = "trace")))]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("spacetraders=info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
