//! Routes: immutable descriptions of one outbound call
//!
//! A [`Route`] is validated when it is built, so a missing method or URL is
//! reported as [`Error::Construction`] before the dispatcher is involved.
//! Once handed to the dispatcher a route is only read, and a retried attempt
//! replays it verbatim.

use crate::error::{Error, Result};
use secrecy::{ExposeSecret, SecretString};
use spacetraders_transport::HttpRequest;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// HTTP methods accepted by the game API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl Method {
    /// Upper-case wire name of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = Error;

    /// Parse a method name, ignoring case.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            "" => Err(Error::Construction("method is empty".to_string())),
            other => Err(Error::Construction(format!(
                "unsupported method '{}'",
                other
            ))),
        }
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => http::Method::GET,
            Method::Post => http::Method::POST,
            Method::Put => http::Method::PUT,
            Method::Delete => http::Method::DELETE,
        }
    }
}

/// One intended HTTP call.
///
/// # Example
///
/// ```rust
/// use spacetraders::{Method, Route};
/// use std::time::Duration;
///
/// let route = Route::new("post", "https://api.spacetraders.io/my/loans")?
///     .query("type", "STARTUP")
///     .timeout(Duration::from_secs(10));
///
/// assert_eq!(route.method(), Method::Post);
/// assert_eq!(route.to_string(), "https://api.spacetraders.io/my/loans");
/// # Ok::<(), spacetraders::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    method: Method,
    url: String,
    headers: BTreeMap<String, String>,
    body: Option<serde_json::Value>,
    query: Vec<(String, String)>,
    timeout: Duration,
}

impl Route {
    /// Deadline applied to each attempt unless overridden.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Create a route from a method name and an absolute URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Construction`] if the method is empty or not one of
    /// GET/POST/PUT/DELETE, or if the URL is empty or not absolute.
    pub fn new(method: impl AsRef<str>, url: impl Into<String>) -> Result<Self> {
        let method = method.as_ref().parse::<Method>()?;
        Self::with_method(method, url)
    }

    /// Create a route from a typed method and an absolute URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Construction`] if the URL is empty or not absolute.
    pub fn with_method(method: Method, url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(Error::Construction("url is empty".to_string()));
        }
        Url::parse(&url)
            .map_err(|e| Error::Construction(format!("url '{}' is not absolute: {}", url, e)))?;

        Ok(Self {
            method,
            url,
            headers: BTreeMap::new(),
            body: None,
            query: Vec::new(),
            timeout: Self::DEFAULT_TIMEOUT,
        })
    }

    /// Create a route from parts that may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Construction`] if either part is `None` or invalid.
    pub fn try_from_parts(method: Option<&str>, url: Option<&str>) -> Result<Self> {
        match (method, url) {
            (Some(method), Some(url)) => Self::new(method, url),
            (None, _) => Err(Error::Construction("method is missing".to_string())),
            (_, None) => Err(Error::Construction("url is missing".to_string())),
        }
    }

    /// Shorthand for a `GET` route.
    pub fn get(url: impl Into<String>) -> Result<Self> {
        Self::with_method(Method::Get, url)
    }

    /// Shorthand for a `POST` route.
    pub fn post(url: impl Into<String>) -> Result<Self> {
        Self::with_method(Method::Post, url)
    }

    /// Shorthand for a `PUT` route.
    pub fn put(url: impl Into<String>) -> Result<Self> {
        Self::with_method(Method::Put, url)
    }

    /// Shorthand for a `DELETE` route.
    pub fn delete(url: impl Into<String>) -> Result<Self> {
        Self::with_method(Method::Delete, url)
    }

    /// Add a request header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Set a JSON body.
    pub fn body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize `body` into the route's JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if the value cannot be represented as JSON.
    pub fn json<T: serde::Serialize + ?Sized>(self, body: &T) -> Result<Self> {
        Ok(self.body(serde_json::to_value(body)?))
    }

    /// Set the per-attempt deadline.
    ///
    /// A zero deadline is rejected with [`Error::Construction`] when the
    /// route is dispatched.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The route's method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// The route's absolute URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Headers supplied by the caller.
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// JSON body, if any.
    pub fn json_body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// Query parameters, in insertion order.
    pub fn query_params(&self) -> &[(String, String)] {
        &self.query
    }

    /// Per-attempt deadline.
    pub fn timeout_duration(&self) -> Duration {
        self.timeout
    }

    /// Build the wire request for one attempt.
    ///
    /// The bearer token always comes from the dispatcher; an `Authorization`
    /// header supplied on the route is discarded.
    pub(crate) fn to_request(&self, token: &SecretString, timeout: Duration) -> Result<HttpRequest> {
        if timeout.is_zero() {
            return Err(Error::Construction(format!("timeout for {} is zero", self)));
        }

        let mut request = HttpRequest::new(self.method.into(), self.url.clone());

        for (key, value) in &self.headers {
            if key.eq_ignore_ascii_case("authorization") {
                continue;
            }
            http::HeaderName::from_bytes(key.as_bytes())
                .map_err(|_| Error::InvalidHeaderName(key.clone()))?;
            http::HeaderValue::from_str(value)
                .map_err(|_| Error::InvalidHeaderValue(value.clone()))?;
            request = request.with_header(key.as_str(), value.as_str());
        }

        request = request.with_header(
            "Authorization",
            format!("Bearer {}", token.expose_secret()),
        );

        for (key, value) in &self.query {
            request = request.with_query(key.as_str(), value.as_str());
        }

        if let Some(body) = &self.body {
            request = request
                .with_json(body)
                .map_err(|e| Error::Construction(format!("body cannot be encoded: {}", e)))?;
        }

        Ok(request.with_timeout(timeout))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
