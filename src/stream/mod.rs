//! Streaming response handling.
//!
//! This module turns one chat response into either an async sequence of
//! typed events or a sequence of handler callbacks. The main types are:
//!
//! - [`EventStream`] - a pull-based [`futures::Stream`] of decoded
//!   [`ServerEvent`](crate::protocol::ServerEvent)s
//! - [`StreamHandler`] - the callback surface driven by
//!   [`EventStream::dispatch`]
//! - [`SessionOutcome`] - how a dispatched session ended
//! - [`CollectedResponse`] - a convenience type for collecting a full
//!   response
//!
//! # Example
//!
//! ```ignore
//! use futures::StreamExt;
//! use libchat::ServerEvent;
//!
//! let mut stream = client.send(&payload).await?;
//! while let Some(event) = stream.next().await {
//!     match event? {
//!         ServerEvent::Chunk { content } => print!("{}", content.unwrap_or_default()),
//!         ServerEvent::Done => break,
//!         _ => {}
//!     }
//! }
//! ```
//!
//! # Ordering and termination
//!
//! Events are yielded in the exact order their lines appeared in the
//! response body; exactly one terminal event (`done` or `error`) ends the
//! session, after which the transport is released and nothing further is
//! yielded or dispatched. A transport that closes without a terminal event
//! surfaces as [`Error::StreamClosed`](crate::Error::StreamClosed).

mod driver;
mod handler;
mod response;

pub use driver::SessionOutcome;
pub use handler::{LogLevel, LoggingHandler, StreamHandler};
pub use response::{with_timeout, CollectedResponse, EventStream};
