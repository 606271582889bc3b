//! Error types for the SpaceTraders client
//!
//! Every failed dispatch ends in exactly one of three terminal outcomes:
//! a route that could not be built ([`Error::Construction`]), a response the
//! server or the protocol made fatal ([`Error::Http`]), or a request that
//! timed out on every attempt ([`Error::ReachedMaximumRetries`]). The other
//! variants cover the surrounding plumbing.

use spacetraders_transport::TransportError;
use thiserror::Error;

/// Result type alias for operations that can fail with a client error.
pub type Result<T> = std::result::Result<T, Error>;

/// Code used when the server's error envelope carries no code.
pub const UNKNOWN_CODE: &str = "Unknown";

/// Message used when the server's error envelope carries no message.
pub const UNKNOWN_MESSAGE: &str = "Unknown Error";

/// Main error type for the SpaceTraders client.
#[derive(Debug, Error)]
pub enum Error {
    /// A route was built with a missing or invalid method or URL.
    ///
    /// This is a caller bug. It is raised before any I/O and never retried.
    #[error("Invalid route: {0}")]
    Construction(String),

    /// The server returned a fatal status or a response that could not be
    /// interpreted.
    #[error("Code {code}: {message}")]
    Http {
        /// Error code reported by the server, or the HTTP status
        code: String,
        /// Error message reported by the server
        message: String,
    },

    /// Every attempt hit a transport timeout.
    #[error("Hit maximum retries: {max_retries}")]
    ReachedMaximumRetries {
        /// The configured attempt limit that was exhausted
        max_retries: u32,
    },

    /// The transport failed with a non-timeout error.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The dispatcher was shut down before or while this call was queued.
    #[error("Dispatcher has been shut down")]
    Closed,

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid base URL or endpoint path.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid HTTP header name.
    #[error("Invalid HTTP header name: {0}")]
    InvalidHeaderName(String),

    /// Invalid HTTP header value.
    #[error("Invalid HTTP header value: {0}")]
    InvalidHeaderValue(String),

    /// Missing required configuration.
    #[error("Missing required configuration: {0}")]
    MissingConfig(String),
}

impl Error {
    /// Build an [`Error::Http`] from a 401 response body.
    ///
    /// The body is expected to look like
    /// `{"error": {"code": ..., "message": ...}}`. Missing or non-JSON parts
    /// fall back to [`UNKNOWN_CODE`] and [`UNKNOWN_MESSAGE`] so that decoding
    /// the error can never fail on its own.
    pub fn from_unauthorized(body: &[u8]) -> Self {
        let details = serde_json::from_slice::<ErrorEnvelope>(body)
            .ok()
            .and_then(|e| e.error)
            .unwrap_or_default();

        let code = match details.code {
            Some(serde_json::Value::String(code)) => code,
            Some(serde_json::Value::Number(code)) => code.to_string(),
            _ => UNKNOWN_CODE.to_string(),
        };

        Error::Http {
            code,
            message: details
                .message
                .unwrap_or_else(|| UNKNOWN_MESSAGE.to_string()),
        }
    }

    /// The error raised for a 503 response.
    pub fn service_unavailable() -> Self {
        Error::Http {
            code: "503".to_string(),
            message: "Service Unavailable".to_string(),
        }
    }

    /// The error raised for a response whose body could not be interpreted.
    pub fn malformed(status: u16, detail: impl std::fmt::Display) -> Self {
        Error::Http {
            code: status.to_string(),
            message: format!("Malformed response: {}", detail),
        }
    }

    /// The server-reported code of an [`Error::Http`].
    pub fn code(&self) -> Option<&str> {
        match self {
            Error::Http { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Whether issuing the same request again later may succeed.
    ///
    /// The dispatcher has already spent its own attempts by the time this
    /// error surfaces; this only tells the caller whether a later call is
    /// worth making.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::ReachedMaximumRetries { .. } => true,
            Error::Http { code, .. } => code == "503",
            Error::Transport(err) => {
                matches!(err, TransportError::Timeout | TransportError::Connection(_))
            }
            _ => false,
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorDetails>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct ErrorDetails {
    code: Option<serde_json::Value>,
    message: Option<String>,
}
