//! # libchat
//!
//! Async Rust client for chat backends that stream newline-delimited,
//! `data: `-prefixed JSON event records over a single HTTP POST.
//!
//! This library provides:
//! - An incremental decode pipeline (bytes → lines → typed events) that is
//!   correct under arbitrary transport chunking
//! - Ordered callback dispatch with exactly one terminal event per session
//! - Tool-call lifecycle tracking (`calling → completed | error`)
//! - Cooperative cancellation that always releases the stream
//!
//! ## Quick Start
//!
//! ```ignore
//! use libchat::{ChatClient, ChatPayload, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = ChatClient::new("https://chat.example.com")?;
//!     let response = client
//!         .send_and_collect(&ChatPayload::message("What is 2+2?"))
//!         .await?;
//!     println!("{}", response.text);
//!     Ok(())
//! }
//! ```
//!
//! ## Streaming
//!
//! ```ignore
//! use futures::StreamExt;
//! use libchat::{ChatClient, ChatPayload, ServerEvent};
//!
//! let client = ChatClient::new("https://chat.example.com")?;
//! let mut stream = client.send(&ChatPayload::message("Write a poem")).await?;
//! while let Some(event) = stream.next().await {
//!     if let ServerEvent::Chunk { content } = event? {
//!         print!("{}", content.unwrap_or_default());
//!     }
//! }
//! ```
//!
//! ## Callbacks and cancellation
//!
//! ```ignore
//! use libchat::{CancellationToken, ChatClient, ChatPayload, StreamHandler};
//!
//! #[derive(Default)]
//! struct Printer;
//!
//! impl StreamHandler for Printer {
//!     fn on_chunk(&mut self, text: &str) {
//!         print!("{}", text);
//!     }
//! }
//!
//! let token = CancellationToken::new();
//! let mut handler = Printer;
//! let outcome = client
//!     .run(&ChatPayload::message("Hello"), &mut handler, token.clone())
//!     .await;
//! // token.cancel() from anywhere stops dispatch and releases the stream.
//! ```
//!
//! ## Multi-turn Conversations
//!
//! ```ignore
//! let mut conversation = Conversation::new(client);
//! let _ = conversation.send("My name is Alice").await?;
//! let reply = conversation.send("What's my name?").await?;
//! // The backend sees the full history: "Your name is Alice"
//! ```

mod client;
pub mod config;
mod conversation;
mod error;
pub mod protocol;
pub mod stream;
pub mod tools;
pub mod wire;

pub use error::{Error, Result};

// Re-export the main client types at crate root
pub use client::{ChatClient, ClientBuilder};
pub use conversation::Conversation;

// Re-export commonly used config types at crate root
pub use config::{ClientConfig, ClientConfigBuilder, SessionId};

// Re-export commonly used protocol types at crate root
pub use protocol::{AttachedFile, ChatPayload, RawEvent, Role, ServerEvent, Turn};

// Re-export commonly used stream types at crate root
pub use stream::{
    CollectedResponse, EventStream, LoggingHandler, SessionOutcome, StreamHandler,
};

// Re-export commonly used tool types at crate root
pub use tools::{ToolCall, ToolCallStatus, ToolCallTracker};

// Cancellation is part of the public API surface
pub use tokio_util::sync::CancellationToken;
