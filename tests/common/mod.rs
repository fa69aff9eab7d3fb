//! Test utilities for libchat integration tests.

use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::Stream;
use serde_json::{json, Value};

use libchat::{Result, ServerEvent, StreamHandler, ToolCallTracker};

/// Builder for realistic wire bodies.
///
/// Produces the newline-delimited, `data: `-prefixed body a streaming chat
/// backend would send, ready to be fed to an `EventStream` whole or
/// re-chunked at arbitrary byte boundaries.
pub struct ScenarioBuilder {
    body: String,
}

impl ScenarioBuilder {
    /// Create an empty scenario.
    pub fn new() -> Self {
        Self { body: String::new() }
    }

    /// Append a raw line (newline added).
    pub fn line(mut self, raw: &str) -> Self {
        self.body.push_str(raw);
        self.body.push('\n');
        self
    }

    /// Append an event record line from a JSON value.
    pub fn event(self, value: Value) -> Self {
        let json = serde_json::to_string(&value).expect("test event serializes");
        let line = format!("data: {json}");
        self.line(&line)
    }

    /// Append a `chunk` event.
    pub fn chunk(self, text: &str) -> Self {
        self.event(json!({"type": "chunk", "content": text}))
    }

    /// Append a `tool_call_start` event.
    pub fn tool_start(self, id: Option<&str>, name: &str, input: Value) -> Self {
        let mut value = json!({"type": "tool_call_start", "name": name, "input": input});
        if let Some(id) = id {
            value["id"] = json!(id);
        }
        self.event(value)
    }

    /// Append a `tool_call_end` event.
    pub fn tool_end(self, id: Option<&str>, result: Value) -> Self {
        let mut value = json!({"type": "tool_call_end", "result": result});
        if let Some(id) = id {
            value["id"] = json!(id);
        }
        self.event(value)
    }

    /// Append a `tool_call_error` event.
    pub fn tool_error(self, id: Option<&str>, error: &str) -> Self {
        let mut value = json!({"type": "tool_call_error", "error": error});
        if let Some(id) = id {
            value["id"] = json!(id);
        }
        self.event(value)
    }

    /// Append the terminal `done` event.
    pub fn done(self) -> Self {
        self.event(json!({"type": "done"}))
    }

    /// Build the wire body.
    pub fn build(self) -> String {
        self.body
    }
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Split bytes into chunks of at most `size` bytes.
pub fn chunked(bytes: &[u8], size: usize) -> Vec<Bytes> {
    bytes
        .chunks(size.max(1))
        .map(Bytes::copy_from_slice)
        .collect()
}

/// Turn owned chunks into a transport byte stream.
pub fn byte_stream(chunks: Vec<Bytes>) -> impl Stream<Item = Result<Bytes>> + Send + 'static {
    futures::stream::iter(chunks.into_iter().map(Ok))
}

/// Handler that records every callback in order.
#[derive(Default)]
pub struct Recorder {
    pub calls: Vec<String>,
}

impl StreamHandler for Recorder {
    fn on_chunk(&mut self, text: &str) {
        self.calls.push(format!("chunk:{text}"));
    }

    fn on_done(&mut self) {
        self.calls.push("done".to_string());
    }

    fn on_error(&mut self, message: &str) {
        self.calls.push(format!("error:{message}"));
    }

    fn on_event(&mut self, event: &ServerEvent) {
        self.calls.push(format!("event:{}", event.kind()));
    }
}

/// Handler that records callbacks and feeds passthrough events through a
/// tool-call tracker, the way a conversation transcript would.
#[derive(Default)]
pub struct TrackingHandler {
    pub calls: Vec<String>,
    pub tracker: ToolCallTracker,
}

impl StreamHandler for TrackingHandler {
    fn on_chunk(&mut self, text: &str) {
        self.calls.push(format!("chunk:{text}"));
    }

    fn on_done(&mut self) {
        self.calls.push("done".to_string());
    }

    fn on_error(&mut self, message: &str) {
        self.calls.push(format!("error:{message}"));
    }

    fn on_event(&mut self, event: &ServerEvent) {
        self.calls.push(format!("event:{}", event.kind()));
        self.tracker.apply(event);
    }
}

/// Byte-stream wrapper that counts how many times it is dropped.
///
/// Used to assert the session controller releases the transport exactly
/// once on every exit path.
pub struct DropTracker<S> {
    inner: S,
    drops: Arc<AtomicUsize>,
}

impl<S> DropTracker<S> {
    /// Wrap a stream; the returned counter observes the drop.
    pub fn new(inner: S) -> (Self, Arc<AtomicUsize>) {
        let drops = Arc::new(AtomicUsize::new(0));
        (
            Self {
                inner,
                drops: Arc::clone(&drops),
            },
            drops,
        )
    }
}

impl<S: Stream + Unpin> Stream for DropTracker<S> {
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.get_mut().inner).poll_next(cx)
    }
}

impl<S> Drop for DropTracker<S> {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::SeqCst);
    }
}
