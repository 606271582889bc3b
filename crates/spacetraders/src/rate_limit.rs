//! Rate-limit interpretation
//!
//! The game API reports its per-credential budget on every response through
//! `x-ratelimit-remaining` and `Retry-After`. Each response is judged on its
//! own; nothing is carried over between calls.

use spacetraders_transport::HttpResponse;
use std::time::Duration;

/// Header carrying the number of requests left in the current window.
pub const REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Header carrying the number of seconds until the window resets.
pub const RETRY_AFTER_HEADER: &str = "retry-after";

/// Rate-limit bookkeeping derived from a single response.
///
/// Missing or unparseable headers leave the matching field as `None`, which
/// is treated as "no pressure".
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RateLimitState {
    /// Requests remaining in the current window
    pub remaining: Option<u64>,
    /// Delay the server asks for before the next request
    pub retry_after: Option<Duration>,
}

impl RateLimitState {
    /// Read the rate-limit headers of a response.
    pub fn from_response(response: &HttpResponse) -> Self {
        Self::from_header_values(
            response.get_header(REMAINING_HEADER),
            response.get_header(RETRY_AFTER_HEADER),
        )
    }

    /// Interpret raw header values.
    pub fn from_header_values(remaining: Option<&str>, retry_after: Option<&str>) -> Self {
        Self {
            remaining: remaining.and_then(parse_remaining),
            retry_after: retry_after.and_then(parse_retry_after),
        }
    }

    /// How long to hold the dispatcher before the next request, if at all.
    ///
    /// A pause is due only when the budget is spent and the server named a
    /// positive delay.
    pub fn pause(&self) -> Option<Duration> {
        match (self.remaining, self.retry_after) {
            (Some(0), Some(delay)) if !delay.is_zero() => Some(delay),
            _ => None,
        }
    }
}

fn parse_remaining(value: &str) -> Option<u64> {
    value.trim().parse().ok()
}

fn parse_retry_after(value: &str) -> Option<Duration> {
    let secs: f64 = value.trim().parse().ok()?;
    if secs.is_sign_negative() {
        return None;
    }
    Duration::try_from_secs_f64(secs).ok()
}
