//! Multi-turn conversation transcripts.
//!
//! This module provides [`Conversation`], a caller-side transcript over the
//! one-shot [`ChatClient`]. Each turn replays the full ordered history in
//! the request payload, so it works against stateless backends, and the
//! tool calls reported during each response are kept with their final
//! lifecycle status.
//!
//! # Example
//!
//! ```ignore
//! use libchat::{ChatClient, Conversation, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = ChatClient::new("https://chat.example.com")?;
//!     let mut conversation = Conversation::new(client);
//!
//!     let _ = conversation.send("My name is Alice").await?;
//!     let reply = conversation.send("What's my name?").await?;
//!     println!("{}", reply); // "Your name is Alice"
//!
//!     Ok(())
//! }
//! ```

use crate::client::ChatClient;
use crate::protocol::{ChatPayload, Turn};
use crate::tools::ToolCall;
use crate::Result;

/// A multi-turn conversation over a streaming chat backend.
///
/// The conversation owns the transcript: the ordered turn history and the
/// tool calls observed across all turns. Each [`send`](Self::send) issues
/// one full-history request; on success the exchange is appended to the
/// history, on failure the transcript is left unchanged so the turn can be
/// retried.
#[derive(Debug)]
pub struct Conversation {
    client: ChatClient,
    history: Vec<Turn>,
    tool_calls: Vec<ToolCall>,
}

impl Conversation {
    /// Create an empty conversation over the given client.
    pub fn new(client: ChatClient) -> Self {
        Self {
            client,
            history: Vec::new(),
            tool_calls: Vec::new(),
        }
    }

    /// Send the next user message and collect the assistant's reply.
    ///
    /// The request carries the full history plus this message. On success
    /// the user and assistant turns are appended to the transcript and any
    /// tool calls from the response are recorded.
    pub async fn send(&mut self, message: &str) -> Result<String> {
        let payload = self.payload_for(message);
        let response = self.client.send_and_collect(&payload).await?;

        self.history.push(Turn::user(message));
        self.history.push(Turn::assistant(response.text.clone()));
        self.tool_calls.extend(response.tool_calls);

        Ok(response.text)
    }

    /// The ordered turn history of all successful exchanges.
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Tool calls observed across all turns, in start order.
    pub fn tool_calls(&self) -> &[ToolCall] {
        &self.tool_calls
    }

    /// Forget the transcript, keeping the client.
    pub fn clear(&mut self) {
        self.history.clear();
        self.tool_calls.clear();
    }

    /// Get a reference to the underlying client.
    pub fn client(&self) -> &ChatClient {
        &self.client
    }

    /// Build the full-history payload for the next message.
    fn payload_for(&self, message: &str) -> ChatPayload {
        let mut turns = self.history.clone();
        turns.push(Turn::user(message));
        ChatPayload::history(turns)
    }
}
