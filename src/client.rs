//! High-level chat client for issuing streaming requests.
//!
//! This module provides [`ChatClient`], the main entry point for sending
//! chat payloads to a streaming backend.
//!
//! # Example
//!
//! ```ignore
//! use libchat::{ChatClient, ChatPayload, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = ChatClient::builder()
//!         .base_url("https://chat.example.com")
//!         .build()?;
//!
//!     let response = client
//!         .send_and_collect(&ChatPayload::message("What is 2+2?"))
//!         .await?;
//!     println!("{}", response.text);
//!     Ok(())
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use futures::TryStreamExt;
use tokio_util::sync::CancellationToken;

use crate::config::{ClientConfig, ClientConfigBuilder};
use crate::protocol::ChatPayload;
use crate::stream::{with_timeout, CollectedResponse, EventStream, SessionOutcome, StreamHandler};
use crate::{Error, Result};

/// A client for a streaming chat backend.
///
/// `ChatClient` holds the configuration and a connection pool, and provides
/// methods for:
/// - The pull-based event stream ([`send`](Self::send))
/// - Callback dispatch with cancellation ([`run`](Self::run))
/// - Collecting a whole response ([`send_and_collect`](Self::send_and_collect))
///
/// # Thread Safety
///
/// `ChatClient` is `Send + Sync` and can be safely shared across tasks.
/// Each call issues its own request, so concurrent requests are supported;
/// every request owns its stream exclusively.
///
/// # Example
///
/// ```ignore
/// use libchat::{ChatClient, ChatPayload};
///
/// let client = ChatClient::builder()
///     .base_url("https://chat.example.com")
///     .auth_token("secret")
///     .build()?;
///
/// let response = client.send_and_collect(&ChatPayload::message("Hello!")).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ChatClient {
    config: Arc<ClientConfig>,
    http: reqwest::Client,
}

impl ChatClient {
    /// Create a client for the given base URL with default configuration.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let client = ChatClient::new("https://chat.example.com")?;
    /// ```
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let config = ClientConfig::builder().base_url(base_url).build()?;
        Self::with_config(config)
    }

    /// Create a client with the given configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::InvalidConfig(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    /// Create a builder for configuring a new client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Send a payload and return the stream of decoded response events.
    ///
    /// This is the low-level pull API. For callback dispatch use
    /// [`run`](Self::run); for simple use cases prefer
    /// [`send_and_collect`](Self::send_and_collect).
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Request`] if the request cannot be sent, or with
    /// [`Error::Status`] carrying the response body when the server answers
    /// with a non-success status; no event decoding is attempted in that
    /// case.
    ///
    /// # Cancellation
    ///
    /// Dropping the returned [`EventStream`] aborts the request and
    /// releases the connection.
    pub async fn send(&self, payload: &ChatPayload) -> Result<EventStream> {
        let mut request = self
            .http
            .post(self.config.chat_url().clone())
            .json(payload);
        if let Some(token) = self.config.auth_token() {
            request = request.bearer_auth(token);
        }
        for (name, value) in self.config.headers() {
            request = request.header(name, value);
        }

        let response = request.send().await.map_err(Error::Request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body = if body.is_empty() {
                format!("request failed with status {status}")
            } else {
                body
            };
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(EventStream::new(
            response.bytes_stream().map_err(Error::Transport),
        ))
    }

    /// Send a payload and dispatch the response onto `handler`.
    ///
    /// This is the session controller: it issues the request, drives the
    /// decode pipeline until a terminal event, a transport failure, or the
    /// cancellation token fires, and releases the stream on every exit
    /// path. Exactly one of `on_done`/`on_error` is invoked per call,
    /// except under cancellation, which invokes neither.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use libchat::{CancellationToken, ChatPayload, LoggingHandler};
    ///
    /// let token = CancellationToken::new();
    /// let mut handler = LoggingHandler::new();
    /// let outcome = client
    ///     .run(&ChatPayload::message("Hello"), &mut handler, token)
    ///     .await;
    /// assert!(outcome.is_success());
    /// ```
    pub async fn run(
        &self,
        payload: &ChatPayload,
        handler: &mut dyn StreamHandler,
        cancel: CancellationToken,
    ) -> SessionOutcome {
        let stream = tokio::select! {
            biased;
            _ = cancel.cancelled() => return SessionOutcome::Cancelled,
            result = self.send(payload) => match result {
                Ok(stream) => stream,
                Err(e) => {
                    handler.on_error(&e.to_string());
                    return SessionOutcome::Failed(e);
                }
            },
        };

        stream.dispatch(handler, cancel).await
    }

    /// Send a payload and collect the full response.
    ///
    /// Applies the configured timeout, if any.
    pub async fn send_and_collect(&self, payload: &ChatPayload) -> Result<CollectedResponse> {
        let stream = self.send(payload).await?;

        if let Some(timeout) = self.config.timeout() {
            with_timeout(timeout, stream.collect()).await
        } else {
            stream.collect().await
        }
    }

    /// Get a reference to the client's configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

/// Builder for [`ChatClient`].
///
/// This wraps [`ClientConfigBuilder`] and builds directly into a
/// [`ChatClient`].
///
/// # Example
///
/// ```ignore
/// let client = ChatClient::builder()
///     .base_url("https://chat.example.com")
///     .auth_token("secret")
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    inner: ClientConfigBuilder,
}

impl ClientBuilder {
    /// Create a new client builder with default settings.
    pub fn new() -> Self {
        Self {
            inner: ClientConfigBuilder::default(),
        }
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid (missing or
    /// unparseable base URL).
    pub fn build(self) -> Result<ChatClient> {
        let config = self.inner.build()?;
        ChatClient::with_config(config)
    }

    /// Set the base URL of the chat backend (required).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.inner = self.inner.base_url(url);
        self
    }

    /// Override the request path of the streaming chat endpoint.
    pub fn chat_path(mut self, path: impl Into<String>) -> Self {
        self.inner = self.inner.chat_path(path);
        self
    }

    /// Set a bearer token sent in the `Authorization` header.
    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.inner = self.inner.auth_token(token);
        self
    }

    /// Add/override an extra header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.inner = self.inner.header(name, value);
        self
    }

    /// Timeout for the collect convenience methods.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.inner = self.inner.timeout(duration);
        self
    }
}
