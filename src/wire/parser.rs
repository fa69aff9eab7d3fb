//! Event record recognition and parsing.

use crate::protocol::{RawEvent, ServerEvent};

/// Fixed literal marker of an event-bearing line.
pub const EVENT_PREFIX: &str = "data: ";

/// Parse one framed line into an event record.
///
/// Lines without the [`EVENT_PREFIX`] marker (blank lines included) are
/// framing noise and return `None` without a diagnostic. Marked lines are
/// parsed as a JSON object: known kinds decode to their typed variant, an
/// unrecognized `type` string is carried through as [`ServerEvent::Other`],
/// and anything malformed is skipped with a debug diagnostic so a single
/// bad record never aborts an otherwise healthy stream.
pub fn parse_line(line: &str) -> Option<ServerEvent> {
    let payload = line.strip_prefix(EVENT_PREFIX)?;

    match serde_json::from_str::<ServerEvent>(payload) {
        Ok(event) => Some(event),
        Err(typed_err) => match serde_json::from_str::<RawEvent>(payload) {
            Ok(raw) if !ServerEvent::KNOWN_KINDS.contains(&raw.kind.as_str()) => {
                Some(ServerEvent::Other(raw))
            }
            _ => {
                tracing::debug!(
                    error = %typed_err,
                    line = %truncate(payload, 200),
                    "skipping malformed event record"
                );
                None
            }
        },
    }
}

/// Truncate a line for diagnostics.
fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
