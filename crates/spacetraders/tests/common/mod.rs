//! Common test utilities and helpers

use spacetraders::{Client, Dispatcher, HttpRequest, HttpResponse, Transport, TransportError};
use spacetraders::async_trait;
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

/// Load a response fixture
#[allow(dead_code)]
pub fn load_response_fixture(name: &str) -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let path = Path::new(manifest_dir)
        .join("tests")
        .join("fixtures")
        .join("responses")
        .join(format!("{}.json", name));

    std::fs::read_to_string(&path).unwrap_or_else(|e| {
        panic!(
            "Failed to load response fixture '{}' from {:?}: {}",
            name, path, e
        )
    })
}

/// Create a test bearer token
#[allow(dead_code)]
pub fn test_token() -> String {
    "st-test-token-0123456789abcdef".to_string()
}

/// One scripted reaction of [`ScriptedTransport`].
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Return this response
    Respond(HttpResponse),
    /// Fail with a transport timeout
    Timeout,
    /// Fail with a non-timeout transport error
    Refused,
}

#[allow(dead_code)]
impl Outcome {
    /// A JSON response with a status code.
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self::with_headers(status, &[], body)
    }

    /// A JSON response carrying extra headers.
    pub fn with_headers(status: u16, headers: &[(&str, &str)], body: serde_json::Value) -> Self {
        let headers: HashMap<String, String> = headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self::Respond(HttpResponse::new(status, headers, body.to_string()))
    }

    /// A response with a raw body.
    pub fn raw(status: u16, body: &'static str) -> Self {
        Self::Respond(HttpResponse::new(status, HashMap::new(), body))
    }
}

/// A transport that replays a script instead of doing I/O.
///
/// Records every request it receives and the highest number of exchanges
/// that were ever in flight at once.
#[allow(dead_code)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Outcome>>,
    fallback: Option<Outcome>,
    latency: Duration,
    requests: Mutex<Vec<HttpRequest>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    closed: AtomicBool,
}

#[allow(dead_code)]
impl ScriptedTransport {
    /// Replay `outcomes` in order, then fail with a refused connection.
    pub fn new(outcomes: impl IntoIterator<Item = Outcome>) -> Arc<Self> {
        Arc::new(Self::build(outcomes, None, Duration::ZERO))
    }

    /// Answer every request with the same outcome.
    pub fn always(outcome: Outcome) -> Arc<Self> {
        Arc::new(Self::build([], Some(outcome), Duration::ZERO))
    }

    /// Answer every request with the same outcome after a simulated delay.
    pub fn always_with_latency(outcome: Outcome, latency: Duration) -> Arc<Self> {
        Arc::new(Self::build([], Some(outcome), latency))
    }

    fn build(
        outcomes: impl IntoIterator<Item = Outcome>,
        fallback: Option<Outcome>,
        latency: Duration,
    ) -> Self {
        Self {
            script: Mutex::new(outcomes.into_iter().collect()),
            fallback,
            latency,
            requests: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            closed: AtomicBool::new(false),
        }
    }

    /// Number of exchanges performed.
    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Every request received, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Highest number of concurrent exchanges observed.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Whether `close` was called.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send_http(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        if self.is_closed() {
            return Err(TransportError::Closed);
        }

        self.requests.lock().unwrap().push(request);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let next = self.script.lock().unwrap().pop_front();
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match next.or_else(|| self.fallback.clone()) {
            Some(Outcome::Respond(response)) => Ok(response),
            Some(Outcome::Timeout) => Err(TransportError::Timeout),
            Some(Outcome::Refused) | None => {
                Err(TransportError::Connection("connection refused".to_string()))
            }
        }
    }

    async fn is_connected(&self) -> bool {
        !self.is_closed()
    }

    async fn close(&self) -> Result<(), TransportError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// A dispatcher over a scripted transport.
#[allow(dead_code)]
pub fn dispatcher(transport: Arc<ScriptedTransport>, max_retries: u32) -> Dispatcher {
    Dispatcher::builder()
        .token(test_token())
        .transport(transport)
        .max_retries(max_retries)
        .build()
        .unwrap()
}

/// A client pointed at a mock server.
#[allow(dead_code)]
pub fn client_for(base_url: &str) -> Client {
    Client::builder()
        .token(test_token())
        .base_url(base_url)
        .build()
        .unwrap()
}
