//! Retry policy for the request dispatcher
//!
//! Decides which transport outcomes consume an attempt and are replayed, and
//! which are terminal.

use crate::error::TransportError;
use std::time::Duration;

/// Retry policy applied to every dispatched request.
///
/// # Default Configuration
///
/// - `max_retries`: 5 total attempts
/// - `retry_on_unavailable`: false (a 503 fails fast)
/// - `backoff`: zero (a timed-out request is replayed immediately)
///
/// # Examples
///
/// ```rust
/// use spacetraders_transport::http::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_retries(), 5);
///
/// let custom = RetryPolicy::builder()
///     .max_retries(3)
///     .retry_on_unavailable(true)
///     .backoff(Duration::from_millis(250))
///     .build();
/// assert!(custom.retries_status(503));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    retry_on_unavailable: bool,
    backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            retry_on_unavailable: false,
            backoff: Duration::ZERO,
        }
    }
}

impl RetryPolicy {
    /// Create a new builder starting from the default policy.
    pub fn builder() -> RetryPolicyBuilder {
        RetryPolicyBuilder::default()
    }

    /// Check if a transport error should be retried.
    ///
    /// Only an expired deadline is retryable. Connection failures, malformed
    /// exchanges and a closed transport are terminal: replaying a request
    /// whose outcome is unknown can duplicate a side-effecting game action.
    pub fn is_retryable(error: &TransportError) -> bool {
        match error {
            TransportError::Timeout => true,

            TransportError::Http(_)
            | TransportError::Connection(_)
            | TransportError::Io(_)
            | TransportError::Serialization(_)
            | TransportError::Closed
            | TransportError::Other(_) => false,
        }
    }

    /// Check if a response status should consume an attempt and be replayed.
    pub fn retries_status(&self, status: u16) -> bool {
        status == 503 && self.retry_on_unavailable
    }

    /// Total number of attempts a request may make.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Whether 503 responses are replayed.
    pub fn retry_on_unavailable(&self) -> bool {
        self.retry_on_unavailable
    }

    /// Pause inserted between a failed attempt and its replay.
    pub fn backoff(&self) -> Duration {
        self.backoff
    }

    /// Return a copy of this policy with a different attempt limit.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

/// Builder for retry policies.
#[derive(Debug, Default)]
pub struct RetryPolicyBuilder {
    inner: RetryPolicy,
}

impl RetryPolicyBuilder {
    /// Set the total number of attempts.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.inner.max_retries = max_retries;
        self
    }

    /// Replay 503 responses instead of failing fast.
    pub fn retry_on_unavailable(mut self, enabled: bool) -> Self {
        self.inner.retry_on_unavailable = enabled;
        self
    }

    /// Set the pause between attempts.
    pub fn backoff(mut self, backoff: Duration) -> Self {
        self.inner.backoff = backoff;
        self
    }

    /// Build the retry policy.
    pub fn build(self) -> RetryPolicy {
        self.inner
    }
}
