//! Callback handler trait and implementations.

use crate::protocol::ServerEvent;

/// Callbacks invoked while a response stream is dispatched.
///
/// All methods have default empty implementations for selective handling.
/// They are called synchronously from the dispatch loop, in the exact order
/// the events' lines appeared in the stream; implementations must be
/// lightweight, since blocking delays stream processing.
///
/// Exactly one of [`on_done`](Self::on_done) / [`on_error`](Self::on_error)
/// fires per session, exactly once, terminally. Cancellation fires neither.
///
/// # Example
///
/// ```
/// use libchat::StreamHandler;
///
/// #[derive(Default)]
/// struct Collector {
///     text: String,
/// }
///
/// impl StreamHandler for Collector {
///     fn on_chunk(&mut self, text: &str) {
///         self.text.push_str(text);
///     }
/// }
/// ```
pub trait StreamHandler: Send {
    /// Called for each `chunk` event with its text fragment.
    ///
    /// A chunk with no content field is delivered as an empty string.
    fn on_chunk(&mut self, text: &str) {
        let _ = text;
    }

    /// Called exactly once when the server sends the terminal `done` event.
    fn on_done(&mut self) {}

    /// Called exactly once when the session fails: a terminal `error`
    /// event, a transport failure, or a stream that closed without any
    /// terminal event.
    fn on_error(&mut self, message: &str) {
        let _ = message;
    }

    /// Called for every event that is not `chunk`/`done`/`error`: the
    /// tool-call lifecycle events and any forward-compatible unknown kind.
    ///
    /// This is the extension point; new server event kinds arrive here
    /// without a crate change. The default implementation drops them.
    fn on_event(&mut self, event: &ServerEvent) {
        let _ = event;
    }
}

/// Simple handler that logs stream activity using tracing.
///
/// # Example
///
/// ```ignore
/// use libchat::{CancellationToken, LoggingHandler};
///
/// let mut handler = LoggingHandler::new();
/// let outcome = client.run(&payload, &mut handler, CancellationToken::new()).await;
/// ```
#[derive(Debug, Clone, Default)]
pub struct LoggingHandler {
    level: LogLevel,
}

/// Log level for [`LoggingHandler`].
#[derive(Debug, Clone, Copy, Default)]
pub enum LogLevel {
    /// Log at trace level.
    Trace,
    /// Log at debug level (default).
    #[default]
    Debug,
    /// Log at info level.
    Info,
}

impl LoggingHandler {
    /// Create a new logging handler with debug level.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a logging handler with a specific level.
    pub fn with_level(level: LogLevel) -> Self {
        Self { level }
    }
}

impl StreamHandler for LoggingHandler {
    fn on_chunk(&mut self, text: &str) {
        match self.level {
            LogLevel::Trace => tracing::trace!(len = text.len(), "chunk"),
            LogLevel::Debug => tracing::debug!(len = text.len(), "chunk"),
            LogLevel::Info => tracing::info!(len = text.len(), "chunk"),
        }
    }

    fn on_done(&mut self) {
        match self.level {
            LogLevel::Trace => tracing::trace!("done"),
            LogLevel::Debug => tracing::debug!("done"),
            LogLevel::Info => tracing::info!("done"),
        }
    }

    fn on_error(&mut self, message: &str) {
        tracing::warn!(message = %message, "stream error");
    }

    fn on_event(&mut self, event: &ServerEvent) {
        match self.level {
            LogLevel::Trace => tracing::trace!(kind = %event.kind(), "event"),
            LogLevel::Debug => tracing::debug!(kind = %event.kind(), "event"),
            LogLevel::Info => tracing::info!(kind = %event.kind(), "event"),
        }
    }
}
