//! Main client implementation for the SpaceTraders API

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use serde::de::DeserializeOwned;
use spacetraders_transport::Transport;
use tokio::sync::Mutex;
use url::Url;

use crate::{
    config::ClientConfig,
    dispatcher::{Dispatcher, DispatcherBuilder},
    error::{Error, Result},
    resources::{Account, FlightPlans, Game, Loans, Locations, Ships, Structures},
    route::{Method, Route},
    types::User,
};

/// Default base URL for the SpaceTraders API.
pub const DEFAULT_BASE_URL: &str = "https://api.spacetraders.io";

/// Main client for interacting with the SpaceTraders API.
///
/// A client wraps one [`Dispatcher`], so every endpoint called through it
/// (and through every clone of it) shares one lock and one rate-limit budget.
///
/// # Example
///
/// ```rust,no_run
/// use spacetraders::Client;
///
/// # async fn example() -> spacetraders::Result<()> {
/// let client = Client::new("my-token")?;
/// let user = client.account().get().await?;
/// println!("{} has {} credits", user.username, user.credits);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    dispatcher: Dispatcher,
    base_url: String,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url)
            .field("dispatcher", &self.inner.dispatcher)
            .finish()
    }
}

impl Client {
    /// Create a client for a bearer token with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the default HTTP transport cannot be created.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::builder().token(token).build()
    }

    /// Create a new client builder for advanced configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client from a configuration object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingConfig`] without a token and
    /// [`Error::InvalidUrl`] for an unusable base URL.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let dispatcher = DispatcherBuilder::from_config(&config).build()?;
        Self::from_dispatcher(dispatcher, config.base_url.as_deref())
    }

    /// Create a client around an existing dispatcher.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] for an unusable base URL.
    pub fn from_dispatcher(dispatcher: Dispatcher, base_url: Option<&str>) -> Result<Self> {
        let base_url = validate_base_url(base_url.unwrap_or(DEFAULT_BASE_URL))?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                dispatcher,
                base_url,
            }),
        })
    }

    /// Create a client and verify the token against `/my/account`.
    ///
    /// Returns the client together with the account it belongs to, so a bad
    /// token surfaces here instead of on the first game call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the server rejects the token, plus every
    /// error [`Client::new`] can return.
    pub async fn connect(token: impl Into<String>) -> Result<(Self, User)> {
        Self::builder().token(token).connect().await
    }

    /// Access the account endpoint.
    pub fn account(&self) -> Account {
        Account::new(self.clone())
    }

    /// Access the game status and leaderboard endpoints.
    pub fn game(&self) -> Game {
        Game::new(self.clone())
    }

    /// Access the loan endpoints.
    pub fn loans(&self) -> Loans {
        Loans::new(self.clone())
    }

    /// Access the flight plan endpoints.
    pub fn flight_plans(&self) -> FlightPlans {
        FlightPlans::new(self.clone())
    }

    /// Access the location endpoints.
    pub fn locations(&self) -> Locations {
        Locations::new(self.clone())
    }

    /// Access the ship, cargo and order endpoints.
    pub fn ships(&self) -> Ships {
        Ships::new(self.clone())
    }

    /// Access the structure deposit and transfer endpoints.
    pub fn structures(&self) -> Structures {
        Structures::new(self.clone())
    }

    /// Dispatch a hand-built route through the shared dispatcher.
    ///
    /// Useful for endpoints without a dedicated resource method.
    pub async fn dispatch(&self, route: &Route) -> Result<serde_json::Value> {
        self.inner.dispatcher.dispatch(route).await
    }

    /// Dispatch a route and deserialize the body into `T`.
    pub async fn dispatch_as<T: DeserializeOwned>(&self, route: &Route) -> Result<T> {
        self.inner.dispatcher.dispatch_as(route).await
    }

    /// Absolute URL for an API path such as `/my/ships`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.inner.base_url, path.trim_start_matches('/'))
    }

    /// The base URL every resource path is joined to.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// The dispatcher shared by every clone of this client.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.inner.dispatcher
    }

    /// Close the underlying transport session.
    ///
    /// See [`Dispatcher::shutdown`].
    pub async fn shutdown(&self) -> Result<()> {
        self.inner.dispatcher.shutdown().await
    }

    /// Route to the base URL extended by `segments`.
    ///
    /// Each segment is percent-encoded on its own, so identifiers containing
    /// `/`, `?` or `#` stay inside their segment.
    pub(crate) fn route(&self, method: Method, segments: &[&str]) -> Result<Route> {
        Route::with_method(method, self.endpoint(segments, false)?)
    }

    /// Like [`Client::route`] with a trailing slash after the last segment.
    pub(crate) fn route_with_trailing_slash(
        &self,
        method: Method,
        segments: &[&str],
    ) -> Result<Route> {
        Route::with_method(method, self.endpoint(segments, true)?)
    }

    fn endpoint(&self, segments: &[&str], trailing_slash: bool) -> Result<String> {
        if let Some(bad) = segments
            .iter()
            .find(|s| s.is_empty() || matches!(**s, "." | ".."))
        {
            return Err(Error::Construction(format!(
                "invalid path segment '{}'",
                bad
            )));
        }

        let mut url = Url::parse(&self.inner.base_url)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", self.inner.base_url, e)))?;
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                Error::InvalidUrl(format!("{} cannot be a base", self.inner.base_url))
            })?;
            path.pop_if_empty().extend(segments);
            if trailing_slash {
                path.push("");
            }
        }

        Ok(url.into())
    }
}

fn validate_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidUrl("base URL is empty".to_string()));
    }

    let url = Url::parse(trimmed).map_err(|e| Error::InvalidUrl(format!("{}: {}", trimmed, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::InvalidUrl(format!(
            "unsupported scheme '{}', expected http or https",
            url.scheme()
        )));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Builder for creating a configured [`Client`].
#[derive(Default)]
pub struct ClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
    lock: Option<Arc<Mutex<()>>>,
}

impl ClientBuilder {
    /// Start from an existing configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the bearer token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.token = Some(SecretString::new(token.into().into_boxed_str()));
        self
    }

    /// Set the base URL for the API.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// Override every route's timeout with a fixed deadline.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set the number of attempts per request.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.config.max_retries = Some(max_retries);
        self
    }

    /// Replay 503 responses instead of failing fast.
    pub fn retry_on_unavailable(mut self, enabled: bool) -> Self {
        self.config.retry_on_unavailable = Some(enabled);
        self
    }

    /// Pause between a failed attempt and its replay.
    pub fn retry_backoff(mut self, backoff: Duration) -> Self {
        self.config.retry_backoff = Some(backoff);
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Use a specific transport instead of a fresh HTTP transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Serialize through a lock shared with other clients.
    ///
    /// Clients built with the same lock share one rate-limit budget, which
    /// is what the server enforces for a single token.
    pub fn lock(mut self, lock: Arc<Mutex<()>>) -> Self {
        self.lock = Some(lock);
        self
    }

    /// Build the client with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingConfig`] without a token and
    /// [`Error::InvalidUrl`] for an unusable base URL.
    pub fn build(self) -> Result<Client> {
        self.build_client()
    }

    /// Build the client and verify the token against `/my/account`.
    ///
    /// See [`Client::connect`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the server rejects the token, plus every
    /// error [`ClientBuilder::build`] can return.
    pub async fn connect(self) -> Result<(Client, User)> {
        let client = self.build_client()?;
        let user = client.account().get().await?;
        tracing::debug!(username = %user.username, "token verified");
        Ok((client, user))
    }

    fn build_client(self) -> Result<Client> {
        let mut dispatcher = DispatcherBuilder::from_config(&self.config);
        if let Some(transport) = self.transport {
            dispatcher = dispatcher.transport(transport);
        }
        if let Some(lock) = self.lock {
            dispatcher = dispatcher.lock(lock);
        }

        Client::from_dispatcher(dispatcher.build()?, self.config.base_url.as_deref())
    }
}
