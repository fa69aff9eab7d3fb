//! Dispatch loop: classifies decoded events onto handler callbacks.

use futures::StreamExt;
use tokio_util::sync::CancellationToken;

use crate::protocol::{ServerEvent, UNKNOWN_ERROR};
use crate::Error;

use super::handler::StreamHandler;
use super::response::EventStream;

/// How a dispatched session ended.
///
/// Exactly one outcome is produced per session. `Completed` and `Failed`
/// correspond to the single terminal callback ([`StreamHandler::on_done`] /
/// [`StreamHandler::on_error`]); `Cancelled` fires neither, since
/// caller-initiated cancellation is not an error.
#[derive(Debug)]
pub enum SessionOutcome {
    /// The server sent the terminal `done` event.
    Completed,
    /// The session failed: a terminal `error` event, a transport failure,
    /// or a stream that closed without any terminal event.
    Failed(Error),
    /// The cancellation token fired before a terminal event.
    Cancelled,
}

impl SessionOutcome {
    /// Check if the session completed normally.
    pub fn is_success(&self) -> bool {
        matches!(self, SessionOutcome::Completed)
    }

    /// Check if the session was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SessionOutcome::Cancelled)
    }

    /// Convert into a `Result`, mapping cancellation to [`Error::Cancelled`].
    pub fn into_result(self) -> crate::Result<()> {
        match self {
            SessionOutcome::Completed => Ok(()),
            SessionOutcome::Failed(e) => Err(e),
            SessionOutcome::Cancelled => Err(Error::Cancelled),
        }
    }
}

impl EventStream {
    /// Drive the stream to completion, dispatching events onto `handler`.
    ///
    /// Events are dispatched exactly once, synchronously, in arrival order:
    ///
    /// - `chunk` → [`on_chunk`](StreamHandler::on_chunk) with the content
    ///   (empty string when absent);
    /// - `done` → [`on_done`](StreamHandler::on_done), then the loop stops
    ///   and the transport is released, nothing further is dispatched;
    /// - `error` → [`on_error`](StreamHandler::on_error) with the event's
    ///   detail, same stop-and-release behavior;
    /// - everything else → [`on_event`](StreamHandler::on_event).
    ///
    /// Transport failures and a stream that closes without a terminal event
    /// are routed through `on_error` as well, so exactly one terminal
    /// callback fires on every path except cancellation.
    ///
    /// The cancellation token is checked before every read and dispatch:
    /// once cancellation is observed no further event is dispatched, even
    /// if more bytes were already buffered, and the transport is still
    /// released. Cancelling after the session reached a terminal state is a
    /// no-op.
    pub async fn dispatch(
        mut self,
        handler: &mut dyn StreamHandler,
        cancel: CancellationToken,
    ) -> SessionOutcome {
        loop {
            let item = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::debug!("session cancelled");
                    return SessionOutcome::Cancelled;
                }
                item = self.next() => item,
            };

            match item {
                Some(Ok(event)) => match event {
                    ServerEvent::Chunk { content } => {
                        handler.on_chunk(content.as_deref().unwrap_or(""));
                    }
                    ServerEvent::Done => {
                        handler.on_done();
                        return SessionOutcome::Completed;
                    }
                    ServerEvent::Error { .. } => {
                        let message = event
                            .error_detail()
                            .unwrap_or(UNKNOWN_ERROR)
                            .to_string();
                        handler.on_error(&message);
                        return SessionOutcome::Failed(Error::Server { message });
                    }
                    other => handler.on_event(&other),
                },
                Some(Err(e)) => {
                    handler.on_error(&e.to_string());
                    return SessionOutcome::Failed(e);
                }
                None => {
                    // The stream reports truncation as an error before
                    // ending, so this only guards against future changes.
                    let e = Error::StreamClosed;
                    handler.on_error(&e.to_string());
                    return SessionOutcome::Failed(e);
                }
            }
        }
    }
}
