//! # SpaceTraders SDK
//!
//! Async client for the SpaceTraders game API supporting:
//! - Validated, immutable routes
//! - A per-token dispatcher that serializes requests in FIFO order
//! - Replay of timed-out attempts up to a retry limit
//! - Rate-limit pauses driven by `x-ratelimit-remaining` and `Retry-After`
//! - Typed endpoints for accounts, loans, flight plans, locations, ships and structures
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use spacetraders::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new("your-token")?;
//!
//!     let status = client.game().status().await?;
//!     println!("{}", status.status);
//!
//!     for ship in client.ships().list().await? {
//!         println!("{} at {:?}", ship.id, ship.location);
//!     }
//!
//!     client.shutdown().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Raw routes
//!
//! Endpoints without a dedicated method can be reached with a hand-built
//! [`Route`]; it goes through the same lock, retries and rate limiting.
//!
//! ```rust,no_run
//! use spacetraders::{Client, Route};
//!
//! # async fn example(client: Client) -> spacetraders::Result<()> {
//! let route = Route::get(client.url("/systems"))?;
//! let systems = client.dispatch(&route).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Re-export commonly used types
pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL};
pub use config::ClientConfig;
pub use dispatcher::{Dispatcher, DispatcherBuilder};
pub use error::{Error, Result};
pub use rate_limit::RateLimitState;
pub use route::{Method, Route};
pub use types::*;

// Module declarations
pub mod client;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod observability;
pub mod rate_limit;
pub mod resources;
pub mod route;
pub mod types;

#[cfg(feature = "trace")]
#[cfg_attr(docsrs, doc(cfg(feature = "trace")))]
pub use observability::init_tracing;

// Re-export the transport seam so custom transports can be plugged in
pub use async_trait::async_trait;
pub use spacetraders_transport::{
    HttpRequest, HttpResponse, HttpTransport, RetryPolicy, Transport, TransportError,
};

/// Prelude module for common imports
///
/// # Examples
///
/// ```rust
/// use spacetraders::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Client, ClientConfig, Error, Result, Route,
        types::{
            FlightPlan, Loan, Location, LocationRef, Ship, ShipRef, Structure, StructureRef, User,
        },
    };
}

/// SDK version, automatically updated from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
