//! Incremental UTF-8 decoding of transport chunks.

/// Decodes raw byte chunks into text, one chunk at a time.
///
/// The transport is free to split the stream anywhere, including inside a
/// multi-byte character. An incomplete trailing sequence is carried over and
/// completed by the leading bytes of the next chunk. Malformed sequences
/// decode to U+FFFD rather than failing the session.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    /// Incomplete multi-byte sequence carried from the previous chunk.
    /// At most 3 bytes (the longest incomplete UTF-8 prefix).
    partial: Vec<u8>,
}

impl Utf8Decoder {
    /// Create a new decoder with an empty carry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one chunk, in arrival order.
    ///
    /// Returns the text that became complete with this chunk; a chunk that
    /// ends mid-character contributes its tail to the next call instead.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let joined;
        let input: &[u8] = if self.partial.is_empty() {
            chunk
        } else {
            let mut buf = std::mem::take(&mut self.partial);
            buf.extend_from_slice(chunk);
            joined = buf;
            &joined
        };

        let mut out = String::with_capacity(input.len());
        let mut rest = input;
        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    out.push_str(text);
                    break;
                }
                Err(err) => {
                    let (valid, after) = rest.split_at(err.valid_up_to());
                    // The prefix up to valid_up_to() is valid UTF-8, so the
                    // lossy conversion borrows it without replacement.
                    out.push_str(&String::from_utf8_lossy(valid));
                    match err.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                        None => {
                            // Incomplete sequence at the chunk boundary;
                            // carry it into the next chunk.
                            self.partial = after.to_vec();
                            break;
                        }
                    }
                }
            }
        }
        out
    }

    /// Flush the decoder at end of stream.
    ///
    /// Any dangling incomplete sequence can no longer be completed and is
    /// replaced rather than dropped silently.
    pub fn finish(&mut self) -> String {
        if self.partial.is_empty() {
            return String::new();
        }
        let partial = std::mem::take(&mut self.partial);
        String::from_utf8_lossy(&partial).into_owned()
    }
}
