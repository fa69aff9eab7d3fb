//! Type-safe configuration options for the chat client.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default request path of the streaming chat endpoint, relative to the
/// configured base URL.
pub const DEFAULT_CHAT_PATH: &str = "/api/chat";

/// Newtype for session IDs to prevent string mixups.
///
/// A session ID identifies a server-side conversation. Omitting it from a
/// [`ChatPayload`](crate::protocol::ChatPayload) asks the server to start a
/// new session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    /// Create a new SessionId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        SessionId(id.into())
    }

    /// Get the session ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        SessionId(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        SessionId(s.to_string())
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
