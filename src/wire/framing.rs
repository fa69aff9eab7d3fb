//! Line framing of the decoded response text.

/// Accumulates decoded text and yields complete, newline-terminated lines.
///
/// Incoming text is appended to a carry-over buffer; every `\n`-terminated
/// segment is emitted as a complete line (newline excluded, one trailing
/// `\r` trimmed for transports that send `\r\n`), and the final unterminated
/// segment stays in the buffer for the next push.
///
/// At end of stream a non-empty carry is *discarded*, not emitted: a stream
/// must terminate with a trailing newline for its last record to be
/// recognized. This is a deliberate simplification of the wire contract
/// (servers always newline-terminate records), and the discard is logged by
/// the caller rather than silently "fixed" here.
#[derive(Debug, Default)]
pub struct LineFramer {
    carry: String,
}

impl LineFramer {
    /// Create a framer with an empty carry buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append decoded text and return the lines it completed, in order.
    pub fn push(&mut self, text: &str) -> Vec<String> {
        self.carry.push_str(text);
        if !self.carry.contains('\n') {
            return Vec::new();
        }

        let buf = std::mem::take(&mut self.carry);
        let mut lines: Vec<String> = buf.split('\n').map(str::to_owned).collect();
        // split() always yields at least one segment; the last one is the
        // (possibly empty) unterminated remainder.
        self.carry = lines.pop().unwrap_or_default();
        for line in &mut lines {
            if line.ends_with('\r') {
                line.pop();
            }
        }
        lines
    }

    /// The unterminated remainder currently buffered, if any.
    pub fn pending(&self) -> &str {
        &self.carry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_line_in_one_push() {
        let mut framer = LineFramer::new();
        assert_eq!(framer.push("hello\n"), vec!["hello"]);
        assert_eq!(framer.pending(), "");
    }

    #[test]
    fn partial_line_is_carried() {
        let mut framer = LineFramer::new();
        assert!(framer.push("hel").is_empty());
        assert_eq!(framer.pending(), "hel");
        assert_eq!(framer.push("lo\nwor"), vec!["hello"]);
        assert_eq!(framer.pending(), "wor");
        assert_eq!(framer.push("ld\n"), vec!["world"]);
    }

    #[test]
    fn multiple_lines_in_one_push() {
        let mut framer = LineFramer::new();
        assert_eq!(framer.push("a\nb\nc\n"), vec!["a", "b", "c"]);
        assert_eq!(framer.pending(), "");
    }

    #[test]
    fn blank_lines_are_emitted() {
        let mut framer = LineFramer::new();
        assert_eq!(framer.push("a\n\nb\n"), vec!["a", "", "b"]);
    }

    #[test]
    fn crlf_is_trimmed() {
        let mut framer = LineFramer::new();
        assert_eq!(framer.push("a\r\nb\r\n"), vec!["a", "b"]);
    }

    #[test]
    fn split_exactly_at_newline() {
        let mut framer = LineFramer::new();
        assert_eq!(framer.push("line"), Vec::<String>::new());
        assert_eq!(framer.push("\n"), vec!["line"]);
    }

    #[test]
    fn unterminated_tail_stays_pending() {
        let mut framer = LineFramer::new();
        assert_eq!(framer.push("done\ntrailing"), vec!["done"]);
        assert_eq!(framer.pending(), "trailing");
    }

    #[test]
    fn empty_push_is_noop() {
        let mut framer = LineFramer::new();
        assert!(framer.push("").is_empty());
        assert_eq!(framer.pending(), "");
    }
}
