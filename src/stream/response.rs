//! Response stream implementation.
//!
//! This module provides [`EventStream`], which implements [`futures::Stream`]
//! to yield [`ServerEvent`]s decoded from a streaming response body.

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use bytes::Bytes;
use futures::stream::BoxStream;
use futures::{Stream, StreamExt};
use tokio::time::timeout as tokio_timeout;

use crate::protocol::ServerEvent;
use crate::tools::{ToolCall, ToolCallTracker};
use crate::wire::{parse_line, LineFramer, Utf8Decoder};
use crate::{Error, Result};

/// A stream of decoded events from one chat response.
///
/// This is the pull-based low-level API: the transport is only polled when
/// the consumer polls, so decoding never reads ahead of dispatch. Events are
/// yielded in the exact order their lines appeared in the response body.
///
/// # Termination
///
/// The stream ends after yielding the first terminal event (`done` or
/// `error`); the transport is released at that point and buffered later
/// records are never yielded. If the transport closes without a terminal
/// event, the stream yields [`Error::StreamClosed`] instead of ending
/// silently.
///
/// # Cancellation
///
/// Dropping an `EventStream` drops the underlying response body, aborting
/// the request. For token-based cancellation with callbacks, see
/// [`dispatch`](Self::dispatch).
///
/// # Example
///
/// ```ignore
/// use futures::StreamExt;
/// use libchat::ServerEvent;
///
/// let mut stream = client.send(&payload).await?;
/// while let Some(event) = stream.next().await {
///     match event? {
///         ServerEvent::Chunk { content } => print!("{}", content.unwrap_or_default()),
///         ServerEvent::Done => break,
///         _ => {}
///     }
/// }
/// ```
pub struct EventStream {
    /// The transport byte stream; dropped as soon as the session ends.
    inner: Option<BoxStream<'static, Result<Bytes>>>,
    decoder: Utf8Decoder,
    framer: LineFramer,
    /// Events decoded from the current chunk, not yet yielded.
    pending: VecDeque<ServerEvent>,
    /// Set once a terminal event or error has been yielded.
    terminated: bool,
}

impl EventStream {
    /// Create an event stream over a transport byte stream.
    ///
    /// The chunk source is any ordered stream of byte chunks; tests feed
    /// in-memory chunks, [`ChatClient::send`](crate::ChatClient::send) feeds
    /// the response body.
    pub fn new<S>(bytes: S) -> Self
    where
        S: Stream<Item = Result<Bytes>> + Send + 'static,
    {
        Self {
            inner: Some(bytes.boxed()),
            decoder: Utf8Decoder::new(),
            framer: LineFramer::new(),
            pending: VecDeque::new(),
            terminated: false,
        }
    }

    /// Release the transport and drop any buffered events.
    fn close(&mut self) {
        self.inner = None;
        self.pending.clear();
        self.terminated = true;
    }

    /// Collect the full response, feeding tool-call events through a
    /// tracker.
    ///
    /// Resolves when the terminal `done` event arrives. A terminal `error`
    /// event maps to [`Error::Server`]; transport failures and truncated
    /// streams surface as their respective errors.
    pub async fn collect(mut self) -> Result<CollectedResponse> {
        let mut response = CollectedResponse::default();
        let mut tracker = ToolCallTracker::new();

        while let Some(event) = self.next().await {
            let event = event?;
            match &event {
                ServerEvent::Chunk { content } => {
                    response.text.push_str(content.as_deref().unwrap_or(""));
                }
                ServerEvent::Done => {
                    response.events.push(event);
                    response.tool_calls = tracker.into_calls();
                    return Ok(response);
                }
                ServerEvent::Error { .. } => {
                    let message = event
                        .error_detail()
                        .unwrap_or(crate::protocol::UNKNOWN_ERROR)
                        .to_string();
                    return Err(Error::Server { message });
                }
                _ => {
                    tracker.apply(&event);
                }
            }
            response.events.push(event);
        }

        // The stream yields Error::StreamClosed before ending without a
        // terminal event, so this is unreachable in practice.
        Err(Error::StreamClosed)
    }

    /// Collect all text from the stream, ignoring other events.
    ///
    /// This is a convenience method for simple use cases where you just
    /// want the final text output.
    pub async fn collect_text(self) -> Result<String> {
        Ok(self.collect().await?.text)
    }
}

impl Stream for EventStream {
    type Item = Result<ServerEvent>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if let Some(event) = this.pending.pop_front() {
                if event.is_terminal() {
                    // Stop reading: later records, buffered or not, are
                    // never processed.
                    this.close();
                }
                return Poll::Ready(Some(Ok(event)));
            }

            if this.terminated {
                return Poll::Ready(None);
            }

            let Some(inner) = this.inner.as_mut() else {
                return Poll::Ready(None);
            };

            match inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(chunk))) => {
                    let text = this.decoder.decode(&chunk);
                    for line in this.framer.push(&text) {
                        if let Some(event) = parse_line(&line) {
                            this.pending.push_back(event);
                        }
                    }
                    // Nothing decoded yet: poll the transport again.
                }
                Poll::Ready(Some(Err(e))) => {
                    this.close();
                    return Poll::Ready(Some(Err(e)));
                }
                Poll::Ready(None) => {
                    if !this.framer.pending().is_empty() {
                        tracing::debug!(
                            len = this.framer.pending().len(),
                            "discarding unterminated trailing line at end of stream"
                        );
                    }
                    this.close();
                    return Poll::Ready(Some(Err(Error::StreamClosed)));
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// A collected response from a completed stream.
#[derive(Debug, Clone, Default)]
pub struct CollectedResponse {
    /// All chunk text concatenated.
    pub text: String,
    /// Tool calls reported during the response, in start order, with their
    /// final lifecycle status.
    pub tool_calls: Vec<ToolCall>,
    /// All events in arrival order, terminal event included.
    pub events: Vec<ServerEvent>,
}

/// Run a future with a timeout.
///
/// Returns an error if the future doesn't complete within the specified
/// duration.
pub async fn with_timeout<F, T>(duration: Duration, future: F) -> Result<T>
where
    F: std::future::Future<Output = Result<T>>,
{
    match tokio_timeout(duration, future).await {
        Ok(result) => result,
        Err(_) => Err(Error::Timeout(duration)),
    }
}
