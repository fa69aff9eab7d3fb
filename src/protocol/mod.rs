//! Wire types for the streaming chat protocol.
//!
//! The response body of a chat request is a sequence of UTF-8 text lines.
//! Event-bearing lines start with the `data: ` marker followed by a single
//! JSON object whose `type` field selects one of the [`ServerEvent`] kinds.
//! Lines without the marker are framing noise and are ignored.
//!
//! # Example
//!
//! ```
//! use libchat::protocol::ServerEvent;
//!
//! let json = r#"{"type": "chunk", "content": "Hello!"}"#;
//! let event: ServerEvent = serde_json::from_str(json).unwrap();
//! assert_eq!(event.chunk_text(), Some("Hello!"));
//! ```

mod events;
mod messages;

// Re-export all public types
pub use events::{RawEvent, ServerEvent, UNKNOWN_ERROR};
pub use messages::{AttachedFile, ChatPayload, Role, Turn};
