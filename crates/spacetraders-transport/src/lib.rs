//! Transport layer for the SpaceTraders client
//!
//! Provides a trait-based transport abstraction so the request dispatcher can
//! run against the real HTTP stack or against a scripted stand-in in tests.
//!
//! # Architecture
//!
//! - **Transport trait**: Generic interface for a single request/response exchange
//! - **HTTP transport**: JSON-over-HTTPS client via reqwest
//! - **Retry policy**: Classification of transport failures into retryable and terminal
//! - **Error handling**: Unified error type for every transport failure
//!
//! # Usage
//!
//! ```ignore
//! use spacetraders_transport::{Transport, HttpTransport, HttpRequest};
//! use http::Method;
//!
//! let transport = HttpTransport::new()?;
//! let request = HttpRequest::new(Method::GET, "https://api.spacetraders.io/game/status");
//! let response = transport.send_http(request).await?;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod http;
pub mod traits;

// Re-export commonly used types
pub use error::{Result, TransportError};
pub use http::{HttpTransport, HttpTransportConfig, RetryPolicy};
pub use traits::{HttpRequest, HttpResponse, Transport};
