//! HTTP transport implementation
//!
//! Provides the reqwest-backed [`HttpTransport`] and the [`RetryPolicy`]
//! that decides which transport outcomes are worth another attempt.

pub mod client;
pub mod retry;

pub use client::{HttpTransport, HttpTransportConfig};
pub use retry::{RetryPolicy, RetryPolicyBuilder};
