//! Client configuration and builder.
//!
//! This module provides the builder pattern for configuring the chat client.
//!
//! # Example
//!
//! ```ignore
//! use libchat::config::ClientConfig;
//! use std::time::Duration;
//!
//! let config = ClientConfig::builder()
//!     .base_url("https://chat.example.com")
//!     .auth_token("secret")
//!     .timeout(Duration::from_secs(120))
//!     .build()?;
//! ```

use std::collections::HashMap;
use std::time::Duration;

use url::Url;

use super::options::DEFAULT_CHAT_PATH;
use crate::{Error, Result};

/// Configuration for the chat client.
///
/// Use [`ClientConfig::builder()`] to create a new configuration. The base
/// URL and endpoint path are validated and joined at `build()` time, so a
/// built config always carries a usable endpoint URL.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    // Endpoint
    pub(crate) chat_url: Url,

    // Authentication
    pub(crate) auth_token: Option<String>,

    // Request options
    pub(crate) headers: HashMap<String, String>,
    pub(crate) timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a new builder for ClientConfig.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Get the fully resolved chat endpoint URL.
    pub fn chat_url(&self) -> &Url {
        &self.chat_url
    }

    /// Get the bearer token if set.
    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    /// Get the extra request headers.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Get the timeout if set.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Builder for [`ClientConfig`].
///
/// The builder validates the configuration when
/// [`build()`](ClientConfigBuilder::build) is called, ensuring the base URL
/// parses and the endpoint path can be joined onto it.
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    chat_path: String,
    auth_token: Option<String>,
    headers: HashMap<String, String>,
    timeout: Option<Duration>,
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            chat_path: DEFAULT_CHAT_PATH.to_string(),
            auth_token: None,
            headers: HashMap::new(),
            timeout: None,
        }
    }
}

impl ClientConfigBuilder {
    /// Set the base URL of the chat backend (required).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Override the request path of the streaming chat endpoint.
    ///
    /// Defaults to [`DEFAULT_CHAT_PATH`].
    pub fn chat_path(mut self, path: impl Into<String>) -> Self {
        self.chat_path = path.into();
        self
    }

    /// Set a bearer token sent in the `Authorization` header.
    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Add/override an extra header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Timeout for collecting a full response.
    ///
    /// Applies to the convenience collect methods; the streaming APIs are
    /// not bounded so long-running streams stay usable.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the base URL is missing or does
    /// not parse, or if the endpoint path cannot be joined onto it.
    pub fn build(self) -> Result<ClientConfig> {
        let base = self
            .base_url
            .ok_or_else(|| Error::InvalidConfig("base URL is required".to_string()))?;

        let joined = format!(
            "{}/{}",
            base.trim_end_matches('/'),
            self.chat_path.trim_start_matches('/')
        );
        let chat_url = Url::parse(&joined)
            .map_err(|e| Error::InvalidConfig(format!("invalid endpoint URL {joined:?}: {e}")))?;

        Ok(ClientConfig {
            chat_url,
            auth_token: self.auth_token,
            headers: self.headers,
            timeout: self.timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ClientConfig>();
        assert_send_sync::<ClientConfigBuilder>();
    }

    #[test]
    fn build_joins_default_path() {
        let config = ClientConfig::builder()
            .base_url("https://chat.example.com")
            .build()
            .unwrap();
        assert_eq!(config.chat_url().as_str(), "https://chat.example.com/api/chat");
    }

    #[test]
    fn build_tolerates_trailing_slash() {
        let config = ClientConfig::builder()
            .base_url("https://chat.example.com/")
            .build()
            .unwrap();
        assert_eq!(config.chat_url().as_str(), "https://chat.example.com/api/chat");
    }

    #[test]
    fn build_with_custom_path() {
        let config = ClientConfig::builder()
            .base_url("http://localhost:8080")
            .chat_path("/v2/stream")
            .build()
            .unwrap();
        assert_eq!(config.chat_url().as_str(), "http://localhost:8080/v2/stream");
    }

    #[test]
    fn build_with_path_missing_leading_slash() {
        let config = ClientConfig::builder()
            .base_url("http://localhost:8080")
            .chat_path("v2/stream")
            .build()
            .unwrap();
        assert_eq!(config.chat_url().as_str(), "http://localhost:8080/v2/stream");
    }

    #[test]
    fn build_requires_base_url() {
        let result = ClientConfig::builder().build();
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn build_rejects_unparseable_url() {
        let result = ClientConfig::builder().base_url("not a url").build();
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn auth_token_and_headers_stored() {
        let config = ClientConfig::builder()
            .base_url("https://chat.example.com")
            .auth_token("secret")
            .header("x-workspace", "default")
            .build()
            .unwrap();
        assert_eq!(config.auth_token(), Some("secret"));
        assert_eq!(
            config.headers().get("x-workspace").map(String::as_str),
            Some("default")
        );
    }

    #[test]
    fn timeout_stored() {
        let config = ClientConfig::builder()
            .base_url("https://chat.example.com")
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap();
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn timeout_defaults_to_none() {
        let config = ClientConfig::builder()
            .base_url("https://chat.example.com")
            .build()
            .unwrap();
        assert!(config.timeout().is_none());
    }
}
