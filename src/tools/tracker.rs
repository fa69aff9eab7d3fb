//! Tool-call lifecycle tracking.

use serde_json::Value;

use crate::protocol::ServerEvent;

/// Lifecycle status of a tool call.
///
/// A call starts in [`Calling`](Self::Calling) and moves to exactly one of
/// the terminal states. No transition is defined out of a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToolCallStatus {
    /// The server reported the invocation started and it has not finished.
    #[default]
    Calling,
    /// The invocation finished successfully, carrying a result payload.
    Completed,
    /// The invocation failed, carrying an error message.
    Error,
}

/// One server-initiated tool invocation, as reported over the stream.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    /// Correlation id; tools may legally be reported without one.
    pub id: Option<String>,
    /// Name of the tool.
    pub name: String,
    /// Argument payload the tool was invoked with.
    pub input: Value,
    /// Current lifecycle status.
    pub status: ToolCallStatus,
    /// Result payload, set when the call completes.
    pub result: Option<Value>,
    /// Error message, set when the call fails.
    pub error: Option<String>,
}

impl ToolCall {
    /// Check if this call has reached a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status != ToolCallStatus::Calling
    }
}

/// Caller-side state machine over the tool-call events of one turn.
///
/// The decoder is stateless about tool calls: it only forwards the
/// `tool_call_start`/`tool_call_end`/`tool_call_error` events. A consumer
/// that wants per-call state (a conversation transcript, a progress view)
/// feeds those events through a tracker:
///
/// ```
/// use libchat::protocol::ServerEvent;
/// use libchat::tools::{ToolCallStatus, ToolCallTracker};
///
/// let mut tracker = ToolCallTracker::new();
/// let start: ServerEvent =
///     serde_json::from_str(r#"{"type": "tool_call_start", "id": "t1", "name": "search"}"#)
///         .unwrap();
/// let end: ServerEvent =
///     serde_json::from_str(r#"{"type": "tool_call_end", "id": "t1", "result": 3}"#).unwrap();
/// tracker.apply(&start);
/// tracker.apply(&end);
/// assert_eq!(tracker.calls()[0].status, ToolCallStatus::Completed);
/// ```
///
/// # Correlation
///
/// Terminal events correlate by id when one is present. A terminal event
/// *without* an id resolves the oldest in-flight call that also has no id
/// (FIFO); with at most one anonymous call in flight (the case the wire
/// protocol is understood to produce) this is unambiguous, and with more
/// it is at least deterministic. Terminal events for an unknown or
/// already-terminal target are tolerated no-ops: the protocol does not
/// guarantee resilience against duplicate or late delivery.
#[derive(Debug, Default)]
pub struct ToolCallTracker {
    calls: Vec<ToolCall>,
}

impl ToolCallTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// All tool calls seen so far, in start order.
    pub fn calls(&self) -> &[ToolCall] {
        &self.calls
    }

    /// Number of calls still in the `Calling` state.
    pub fn in_flight(&self) -> usize {
        self.calls.iter().filter(|c| !c.is_terminal()).count()
    }

    /// Consume the tracker, returning the calls in start order.
    pub fn into_calls(self) -> Vec<ToolCall> {
        self.calls
    }

    /// Feed one stream event through the state machine.
    ///
    /// Non-tool-call events are ignored. Returns the call affected by this
    /// event, or `None` when the event was ignored or a tolerated no-op.
    pub fn apply(&mut self, event: &ServerEvent) -> Option<&ToolCall> {
        match event {
            ServerEvent::ToolCallStart { id, name, input } => {
                self.calls.push(ToolCall {
                    id: id.clone(),
                    name: name.clone(),
                    input: input.clone(),
                    status: ToolCallStatus::Calling,
                    result: None,
                    error: None,
                });
                self.calls.last()
            }
            ServerEvent::ToolCallEnd { id, result } => {
                let call = self.resolve(id.as_deref(), "tool_call_end")?;
                call.status = ToolCallStatus::Completed;
                call.result = result.clone();
                Some(call)
            }
            ServerEvent::ToolCallError { id, error } => {
                let call = self.resolve(id.as_deref(), "tool_call_error")?;
                call.status = ToolCallStatus::Error;
                call.error = error.clone();
                Some(call)
            }
            _ => None,
        }
    }

    /// Find the in-flight call a terminal event targets.
    ///
    /// By id when present; otherwise the oldest in-flight anonymous call.
    fn resolve(&mut self, id: Option<&str>, event_kind: &str) -> Option<&mut ToolCall> {
        let index = match id {
            Some(id) => {
                match self.calls.iter().position(|c| c.id.as_deref() == Some(id)) {
                    Some(i) if !self.calls[i].is_terminal() => Some(i),
                    Some(_) => {
                        tracing::debug!(tool_id = %id, event = %event_kind, "ignoring event for already-terminal tool call");
                        None
                    }
                    None => {
                        tracing::debug!(tool_id = %id, event = %event_kind, "ignoring event for unknown tool call");
                        None
                    }
                }
            }
            None => {
                let found = self
                    .calls
                    .iter()
                    .position(|c| c.id.is_none() && !c.is_terminal());
                if found.is_none() {
                    tracing::debug!(event = %event_kind, "ignoring anonymous event with no in-flight anonymous tool call");
                }
                found
            }
        };
        index.map(|i| &mut self.calls[i])
    }
}
