//! Tautulli API client
//!
//! The [`Client`] builds command requests, sends them under a caller-supplied
//! [`Context`], classifies the status code, and decodes the body. It keeps no
//! per-call state, so one client can be cloned and shared across tasks.

use crate::activity::Activity;
use crate::context::{Context, ContextError};
use crate::decode::{decode, Destination};
use crate::error::{Result, TautulliError};
use crate::notifications::Notifications;
use crate::params::encode_parameters;
use crate::request::{build_command_url, sanitize_url, CommonParameters, DEFAULT_API_PATH};
use crate::response::{check_response, Response};
use crate::server::Server;
use reqwest::header::USER_AGENT;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// User agent sent with every request unless overridden
pub const DEFAULT_USER_AGENT: &str = "tautulli-rs";

/// Options for building a [`Client`]
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// API path relative to the base URL (default: `api/v2`)
    pub api_path: String,
    /// Ask the server for debug output and log requests
    pub debug: bool,
    /// Callback token sent with every command
    pub callback: Option<String>,
    /// User agent header value
    pub user_agent: String,
    /// Request timeout applied by the HTTP client this library builds
    pub timeout: Option<Duration>,
    /// Connection pool max idle connections per host
    pub pool_max_idle_per_host: Option<usize>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_path: DEFAULT_API_PATH.to_string(),
            debug: false,
            callback: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
            pool_max_idle_per_host: None,
        }
    }
}

impl ClientOptions {
    /// Set the API path
    pub fn with_api_path(mut self, api_path: impl Into<String>) -> Self {
        self.api_path = api_path.into();
        self
    }

    /// Enable or disable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set the callback token
    pub fn with_callback(mut self, callback: impl Into<String>) -> Self {
        self.callback = Some(callback.into());
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection pool size
    pub fn with_pool_size(mut self, max_idle_per_host: usize) -> Self {
        self.pool_max_idle_per_host = Some(max_idle_per_host);
        self
    }
}

/// Tautulli API client
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    api_path: String,
    user_agent: String,
    callback: Option<String>,
    debug: bool,
}

impl Client {
    /// Create a new client
    ///
    /// When `http_client` is `None` a new HTTP client is built from `options`. The
    /// base URL should end with `/`; requests against one that does not fail with a
    /// configuration error.
    pub fn new(
        http_client: Option<reqwest::Client>,
        base_url: Url,
        api_key: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self> {
        let http = match http_client {
            Some(http) => http,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = options.timeout {
                    builder = builder.timeout(timeout);
                }
                if let Some(max_idle) = options.pool_max_idle_per_host {
                    builder = builder.pool_max_idle_per_host(max_idle);
                }
                builder.build().map_err(|e| {
                    TautulliError::config_with_source("Failed to create HTTP client", e)
                })?
            }
        };

        Ok(Self {
            http,
            base_url,
            api_key: api_key.into(),
            api_path: options.api_path,
            user_agent: options.user_agent,
            callback: options.callback,
            debug: options.debug,
        })
    }

    /// Create a new client with default options
    pub fn with_defaults(base_url: &str, api_key: impl Into<String>) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        Self::new(None, base_url, api_key, ClientOptions::default())
    }

    /// A copy of the underlying HTTP client; copies share the connection pool
    pub fn http_client(&self) -> reqwest::Client {
        self.http.clone()
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// API path relative to the base URL
    pub fn api_path(&self) -> &str {
        &self.api_path
    }

    /// User agent sent with requests
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Whether debug mode is on
    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Notification commands
    pub fn notifications(&self) -> Notifications<'_> {
        Notifications::new(self)
    }

    /// Activity commands
    pub fn activity(&self) -> Activity<'_> {
        Activity::new(self)
    }

    /// Server commands
    pub fn server(&self) -> Server<'_> {
        Server::new(self)
    }

    /// Build a GET request for `command` with the given parameters
    pub fn new_request<P>(&self, command: &str, params: Option<&P>) -> Result<reqwest::Request>
    where
        P: Serialize + ?Sized,
    {
        let encoded = encode_parameters(params)?;
        let common = CommonParameters::new(&self.api_key, command, self.debug)
            .with_callback(self.callback.as_deref());
        let url = build_command_url(&self.base_url, &self.api_path, &common, &encoded)?;

        if self.debug {
            debug!(command, url = %sanitize_url(&url), "New request");
        }

        self.http
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .build()
            .map_err(|e| TautulliError::config_with_source("Failed to build request", e))
    }

    /// Send a request and return the response with its body unread
    ///
    /// A missing context fails before anything is sent. If the context is canceled
    /// or expires, its error is returned in place of any transport error.
    pub async fn send(&self, ctx: Option<&Context>, request: reqwest::Request) -> Result<Response> {
        let ctx = ctx.ok_or(ContextError::Missing)?;
        if let Some(err) = ctx.err() {
            return Err(err.into());
        }

        let method = request.method().clone();
        let url = request.url().clone();

        let result = tokio::select! {
            biased;
            err = ctx.done() => return Err(err.into()),
            result = self.http.execute(request) => result,
        };

        match result {
            Ok(inner) => Ok(Response::new(method, inner)),
            Err(e) => {
                if let Some(err) = ctx.err() {
                    return Err(err.into());
                }
                Err(TautulliError::transport("Request failed", &url, e))
            }
        }
    }

    /// Send a request and classify the response
    ///
    /// On success the body is left unread; reading and dropping it is up to the
    /// caller.
    #[instrument(skip(self, ctx, request), fields(method = %request.method(), url = %sanitize_url(request.url())))]
    pub async fn bare_do(&self, ctx: Option<&Context>, request: reqwest::Request) -> Result<Response> {
        let response = self.send(ctx, request).await?;
        debug!(status = response.status().as_u16(), "Received response");
        check_response(response).await
    }

    /// Send a request, classify the response, and deliver the body to `destination`
    pub async fn do_request<T>(
        &self,
        ctx: Option<&Context>,
        request: reqwest::Request,
        destination: Destination<'_, T>,
    ) -> Result<Response>
    where
        T: DeserializeOwned,
    {
        let mut response = self.bare_do(ctx, request).await?;
        decode(&mut response, destination).await?;
        Ok(response)
    }

    /// Run `command` and decode the JSON body; an empty body yields `None`
    pub async fn call<P, T>(&self, ctx: &Context, command: &str, params: Option<&P>) -> Result<Option<T>>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.new_request(command, params)?;
        let mut target = None;
        self.do_request(Some(ctx), request, Destination::Json(&mut target))
            .await?;
        Ok(target)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("api_path", &self.api_path)
            .field("user_agent", &self.user_agent)
            .field("callback", &self.callback)
            .field("debug", &self.debug)
            .finish()
    }
}
