//! Configuration for the SpaceTraders client

#[cfg(feature = "env")]
use crate::error::{Error, Result};
use secrecy::SecretString;
use spacetraders_transport::RetryPolicy;
use std::time::Duration;

/// Default number of attempts per dispatched request.
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Configuration for the client and its dispatcher.
///
/// Every field is optional; an unset field falls back to the default and is
/// left alone by [`ClientConfig::merge`].
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Bearer token for the account
    pub token: Option<SecretString>,

    /// Base URL for the API
    pub base_url: Option<String>,

    /// Deadline that overrides every route's own timeout when set
    pub timeout: Option<Duration>,

    /// Total attempts per request before giving up, [`DEFAULT_MAX_RETRIES`] if unset
    pub max_retries: Option<u32>,

    /// Replay 503 responses instead of failing fast, off if unset
    pub retry_on_unavailable: Option<bool>,

    /// Pause between a timed-out attempt and its replay, none if unset
    pub retry_backoff: Option<Duration>,

    /// User-Agent header sent with every request
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// Create a new configuration with a bearer token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(SecretString::new(token.into().into_boxed_str())),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first if present.
    /// This will look for:
    /// - `SPACETRADERS_TOKEN` for authentication
    /// - `SPACETRADERS_BASE_URL` for the API base URL
    /// - `SPACETRADERS_TIMEOUT` for the override deadline (in seconds, fractional allowed)
    /// - `SPACETRADERS_MAX_RETRIES` for maximum attempts
    /// - `SPACETRADERS_RETRY_ON_UNAVAILABLE` (`true`/`1`) to replay 503 responses
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingConfig`] if a variable is present but cannot be
    /// parsed, or if `SPACETRADERS_TIMEOUT` is zero.
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self> {
        use std::env;

        let _ = dotenvy::dotenv();

        let mut config = Self::default();

        if let Ok(token) = env::var("SPACETRADERS_TOKEN") {
            config.token = Some(SecretString::new(token.into_boxed_str()));
        }

        if let Ok(base_url) = env::var("SPACETRADERS_BASE_URL") {
            config.base_url = Some(base_url);
        }

        if let Ok(timeout_str) = env::var("SPACETRADERS_TIMEOUT") {
            let timeout = timeout_str
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
                .filter(|timeout| !timeout.is_zero())
                .ok_or_else(|| {
                    Error::MissingConfig(format!("SPACETRADERS_TIMEOUT is invalid: {}", timeout_str))
                })?;
            config.timeout = Some(timeout);
        }

        if let Ok(max_retries_str) = env::var("SPACETRADERS_MAX_RETRIES") {
            let max_retries = max_retries_str.trim().parse::<u32>().map_err(|_| {
                Error::MissingConfig(format!(
                    "SPACETRADERS_MAX_RETRIES is invalid: {}",
                    max_retries_str
                ))
            })?;
            config.max_retries = Some(max_retries);
        }

        if let Ok(flag) = env::var("SPACETRADERS_RETRY_ON_UNAVAILABLE") {
            config.retry_on_unavailable = Some(matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            ));
        }

        Ok(config)
    }

    /// Merge this configuration with another.
    ///
    /// Fields set on `other` win, including values equal to the defaults;
    /// fields `other` leaves unset keep this configuration's value.
    pub fn merge(mut self, other: ClientConfig) -> Self {
        if other.token.is_some() {
            self.token = other.token;
        }
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.timeout.is_some() {
            self.timeout = other.timeout;
        }
        if other.max_retries.is_some() {
            self.max_retries = other.max_retries;
        }
        if other.retry_on_unavailable.is_some() {
            self.retry_on_unavailable = other.retry_on_unavailable;
        }
        if other.retry_backoff.is_some() {
            self.retry_backoff = other.retry_backoff;
        }
        if other.user_agent.is_some() {
            self.user_agent = other.user_agent;
        }

        self
    }

    /// The retry policy described by this configuration.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::builder()
            .max_retries(self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES))
            .retry_on_unavailable(self.retry_on_unavailable.unwrap_or(false))
            .backoff(self.retry_backoff.unwrap_or(Duration::ZERO))
            .build()
    }
}
