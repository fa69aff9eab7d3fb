//! Request payload types for the streaming chat endpoint.

use serde::{Deserialize, Serialize};

use crate::config::SessionId;

/// Role of a turn in a conversation history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A message written by the end user.
    User,
    /// A message produced by the assistant.
    Assistant,
}

/// One turn of a conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Who produced the turn.
    pub role: Role,
    /// The turn's text content.
    pub content: String,
}

impl Turn {
    /// Create a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A file attached to a chat request, carried inline as name + content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachedFile {
    /// File name as shown to the server.
    pub name: String,
    /// File content.
    pub content: String,
}

/// The request body of one streaming chat call.
///
/// Exactly one of [`message`](Self::message) (single-message form) or
/// [`history`](Self::history) (full ordered turn history) is expected per
/// call. Setting both is a caller error the client forwards as-is; the
/// server owns that validation.
///
/// An absent [`session_id`](Self::session_id) asks the server to start a
/// new session.
///
/// # Example
///
/// ```
/// use libchat::protocol::ChatPayload;
///
/// let payload = ChatPayload::message("What changed in the last run?")
///     .with_session("sess-42")
///     .with_file("pipeline.yaml", "steps: []\n");
/// assert!(payload.history.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatPayload {
    /// Server-side session to continue; absent means start a new one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,

    /// Single-message form of the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Full-history form of the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<Turn>>,

    /// Files attached to the request, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<AttachedFile>,
}

impl ChatPayload {
    /// Create a single-message payload.
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            message: Some(text.into()),
            ..Self::default()
        }
    }

    /// Create a full-history payload.
    pub fn history(turns: impl IntoIterator<Item = Turn>) -> Self {
        Self {
            history: Some(turns.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Continue an existing server-side session.
    pub fn with_session(mut self, id: impl Into<SessionId>) -> Self {
        self.session_id = Some(id.into());
        self
    }

    /// Attach a file to the request.
    pub fn with_file(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.push(AttachedFile {
            name: name.into(),
            content: content.into(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_payload_omits_absent_fields() {
        let payload = ChatPayload::message("hi");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["message"], "hi");
        assert!(json.get("session_id").is_none());
        assert!(json.get("history").is_none());
        assert!(json.get("files").is_none());
    }

    #[test]
    fn history_payload_serializes_turns_in_order() {
        let payload = ChatPayload::history([
            Turn::user("first"),
            Turn::assistant("second"),
            Turn::user("third"),
        ]);
        let json = serde_json::to_value(&payload).unwrap();
        let history = json["history"].as_array().unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0]["role"], "user");
        assert_eq!(history[1]["role"], "assistant");
        assert_eq!(history[2]["content"], "third");
    }

    #[test]
    fn with_session_sets_id() {
        let payload = ChatPayload::message("hi").with_session("sess-1");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["session_id"], "sess-1");
    }

    #[test]
    fn with_file_appends_in_order() {
        let payload = ChatPayload::message("hi")
            .with_file("a.txt", "alpha")
            .with_file("b.txt", "beta");
        assert_eq!(payload.files.len(), 2);
        assert_eq!(payload.files[0].name, "a.txt");
        assert_eq!(payload.files[1].content, "beta");
    }

    #[test]
    fn payload_roundtrip() {
        let payload = ChatPayload::history([Turn::user("hello")])
            .with_session("sess-2")
            .with_file("notes.md", "# notes");
        let json = serde_json::to_string(&payload).unwrap();
        let parsed: ChatPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(payload, parsed);
    }

    #[test]
    fn role_wire_names_are_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );
    }

    #[test]
    fn types_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ChatPayload>();
        assert_send_sync::<Turn>();
        assert_send_sync::<AttachedFile>();
    }
}
