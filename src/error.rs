use std::time::Duration;

/// Errors that can occur when using libchat.
///
/// Errors are organized by category:
/// - Configuration errors: detected at `build()` time
/// - Transport errors: request rejected, bad status, or mid-stream failure
/// - Protocol errors: the stream ended without a terminal event
/// - Runtime errors: failures during execution
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    // -------------------------------------------------------------------------
    // Configuration errors (detected at build() time)
    // -------------------------------------------------------------------------
    /// Invalid configuration provided to builder.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // -------------------------------------------------------------------------
    // Transport errors
    // -------------------------------------------------------------------------
    /// The request could not be sent (connection refused, DNS failure, ...).
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The server rejected the request with a non-success status.
    ///
    /// `body` carries the response body when one was readable, otherwise a
    /// status-based message. No event decoding is attempted for these
    /// responses.
    #[error("server returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body or a generic status-based message.
        body: String,
    },

    /// The transport failed mid-stream, after a successful response status.
    #[error("transport error while streaming: {0}")]
    Transport(#[source] reqwest::Error),

    // -------------------------------------------------------------------------
    // Protocol errors
    // -------------------------------------------------------------------------
    /// The stream closed before a terminal `done` or `error` event.
    ///
    /// Partial output may already have been dispatched; this is reported as
    /// an abnormal termination rather than silent success.
    #[error("stream closed before a terminal event")]
    StreamClosed,

    // -------------------------------------------------------------------------
    // Runtime errors
    // -------------------------------------------------------------------------
    /// The server reported a failure through an `error` event.
    #[error("server error: {message}")]
    Server {
        /// Error detail from the event (`error` field, `content` fallback).
        message: String,
    },

    /// Request exceeded the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Request was cancelled via the cancellation token or by dropping the
    /// stream.
    #[error("request cancelled")]
    Cancelled,
}

/// A specialized Result type for libchat operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is retryable.
    ///
    /// Transport failures, timeouts, and truncated streams are transient;
    /// configuration and server-reported errors are not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Request(_) | Error::Transport(_) | Error::Timeout(_) | Error::StreamClosed
        )
    }

    /// Get the HTTP status code if this is a status error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this error represents caller-initiated cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }

    #[test]
    fn is_retryable_detection() {
        assert!(Error::Timeout(Duration::from_secs(30)).is_retryable());
        assert!(Error::StreamClosed.is_retryable());
        assert!(!Error::InvalidConfig("bad".into()).is_retryable());
        assert!(!Error::Cancelled.is_retryable());
        assert!(!Error::Server {
            message: "boom".into()
        }
        .is_retryable());
        assert!(!Error::Status {
            status: 500,
            body: "oops".into()
        }
        .is_retryable());
    }

    #[test]
    fn status_accessor() {
        let err = Error::Status {
            status: 404,
            body: "not found".into(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(Error::StreamClosed.status(), None);
    }

    #[test]
    fn is_cancelled_detection() {
        assert!(Error::Cancelled.is_cancelled());
        assert!(!Error::StreamClosed.is_cancelled());
    }

    #[test]
    fn display_includes_detail() {
        let err = Error::Status {
            status: 503,
            body: "overloaded".into(),
        };
        let text = err.to_string();
        assert!(text.contains("503"));
        assert!(text.contains("overloaded"));

        let err = Error::Server {
            message: "boom".into(),
        };
        assert!(err.to_string().contains("boom"));
    }
}
