//! Typed event records decoded from the response stream.

use serde::Deserialize;
use serde_json::Value;

/// Fallback detail used when an `error` event carries neither an `error`
/// nor a `content` field.
pub const UNKNOWN_ERROR: &str = "unknown error";

/// One decoded event record from the response stream.
///
/// Every event-bearing line carries a JSON object with a `type` discriminant.
/// The known kinds form a closed set; anything else the server may add in
/// the future is carried verbatim as [`ServerEvent::Other`], so new kinds
/// reach the passthrough callback without a crate change.
///
/// All kind-specific fields are optional on the wire; missing fields decode
/// to `None`/defaults rather than failing the record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Incremental response text.
    Chunk {
        /// The text fragment; absent means an empty fragment.
        #[serde(default)]
        content: Option<String>,
    },

    /// A server-side tool invocation has started.
    ToolCallStart {
        /// Correlation id; tools may legally be reported without one.
        #[serde(default)]
        id: Option<String>,
        /// Name of the tool being invoked.
        #[serde(default)]
        name: String,
        /// Argument payload as sent to the tool.
        #[serde(default)]
        input: Value,
    },

    /// A tool invocation finished successfully.
    ToolCallEnd {
        /// Correlation id matching the start event, when present.
        #[serde(default)]
        id: Option<String>,
        /// Result payload produced by the tool.
        #[serde(default)]
        result: Option<Value>,
    },

    /// A tool invocation failed.
    ToolCallError {
        /// Correlation id matching the start event, when present.
        #[serde(default)]
        id: Option<String>,
        /// Error detail reported by the server.
        #[serde(default)]
        error: Option<String>,
    },

    /// Terminal success marker; the session ends after this event.
    Done,

    /// Terminal failure marker; the session ends after this event.
    Error {
        /// Error detail (preferred over `content` when both are present).
        #[serde(default)]
        error: Option<String>,
        /// Legacy detail field some backends use instead of `error`.
        #[serde(default)]
        content: Option<String>,
    },

    /// Forward-compatible carrier for any unrecognized `type`.
    ///
    /// Never produced by the serde derive; the record parser constructs it
    /// when the tag matches none of the known kinds.
    #[serde(skip)]
    Other(RawEvent),
}

/// An event of an unrecognized kind, carried verbatim.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawEvent {
    /// The `type` discriminant from the wire.
    #[serde(rename = "type")]
    pub kind: String,
    /// All remaining fields of the record.
    #[serde(flatten)]
    pub data: serde_json::Map<String, Value>,
}

impl ServerEvent {
    /// Wire names of the known event kinds.
    pub(crate) const KNOWN_KINDS: &'static [&'static str] = &[
        "chunk",
        "tool_call_start",
        "tool_call_end",
        "tool_call_error",
        "done",
        "error",
    ];

    /// Get the wire name of this event's kind.
    pub fn kind(&self) -> &str {
        match self {
            ServerEvent::Chunk { .. } => "chunk",
            ServerEvent::ToolCallStart { .. } => "tool_call_start",
            ServerEvent::ToolCallEnd { .. } => "tool_call_end",
            ServerEvent::ToolCallError { .. } => "tool_call_error",
            ServerEvent::Done => "done",
            ServerEvent::Error { .. } => "error",
            ServerEvent::Other(raw) => &raw.kind,
        }
    }

    /// Check if this event ends the session (`done` or `error`).
    pub fn is_terminal(&self) -> bool {
        matches!(self, ServerEvent::Done | ServerEvent::Error { .. })
    }

    /// Get the text fragment if this is a chunk event.
    pub fn chunk_text(&self) -> Option<&str> {
        match self {
            ServerEvent::Chunk { content } => Some(content.as_deref().unwrap_or("")),
            _ => None,
        }
    }

    /// Resolve the error detail of an `error` event.
    ///
    /// Prefers the `error` field, falls back to `content`, then to
    /// [`UNKNOWN_ERROR`]. Returns `None` for any other kind.
    pub fn error_detail(&self) -> Option<&str> {
        match self {
            ServerEvent::Error { error, content } => Some(
                error
                    .as_deref()
                    .or(content.as_deref())
                    .unwrap_or(UNKNOWN_ERROR),
            ),
            _ => None,
        }
    }
}
