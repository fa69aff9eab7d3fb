//! Byte-to-event decode pipeline for the response stream.
//!
//! The response body arrives as ordered byte chunks with no alignment
//! guarantees: a chunk may end inside a multi-byte character, inside a JSON
//! payload, or exactly at a newline. This module turns those chunks into
//! typed events in three explicit stages:
//!
//! ```text
//! bytes ──▶ Utf8Decoder ──▶ LineFramer ──▶ parse_line ──▶ ServerEvent
//! ```
//!
//! Each stage owns its own carry state, so the whole pipeline is testable
//! without a live network by feeding byte slices directly.

mod decoder;
mod framing;
mod parser;

pub use decoder::Utf8Decoder;
pub use framing::LineFramer;
pub use parser::{parse_line, EVENT_PREFIX};
