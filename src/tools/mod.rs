//! Tool-call lifecycle types.
//!
//! Servers report tool invocations over the stream as paired events:
//! `tool_call_start`, then exactly one of `tool_call_end` or
//! `tool_call_error`. The decoder forwards these through the passthrough
//! callback without keeping state; [`ToolCallTracker`] is the caller-side
//! state machine that turns the event sequence into per-call
//! [`ToolCall`] records.

mod tracker;

pub use tracker::{ToolCall, ToolCallStatus, ToolCallTracker};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn types_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ToolCall>();
        assert_send_sync::<ToolCallStatus>();
        assert_send_sync::<ToolCallTracker>();
    }

    #[test]
    fn status_default_is_calling() {
        assert_eq!(ToolCallStatus::default(), ToolCallStatus::Calling);
    }
}
