//! Incremental server-sent-events parser.
//!
//! The chat stream endpoint delivers fragments as SSE `data:` lines. Byte
//! chunks from the network do not align with line or event boundaries, so
//! the parser buffers partial lines across chunks and emits one payload
//! per completed event. A `data: [DONE]` payload is the end-of-stream
//! sentinel.

/// The sentinel payload meaning "no more fragments".
pub const DONE_SENTINEL: &str = "[DONE]";

/// One parsed SSE event payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SsePayload {
    /// A text fragment from a `data:` line.
    Fragment(String),
    /// The `[DONE]` sentinel.
    Done,
}

/// Line-buffered SSE parser state.
#[derive(Debug, Default)]
pub struct SseParser {
    line_buf: String,
    /// Data lines of the event currently being assembled (an event may
    /// span multiple `data:` lines; they join with newlines).
    current_data: Vec<String>,
    saw_done: bool,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one network chunk; returns payloads completed by it.
    pub fn push(&mut self, chunk: &str) -> Vec<SsePayload> {
        let mut payloads = Vec::new();
        self.line_buf.push_str(chunk);

        while let Some(newline_pos) = self.line_buf.find('\n') {
            let line = self.line_buf[..newline_pos]
                .trim_end_matches('\r')
                .to_string();
            self.line_buf.drain(..=newline_pos);
            self.process_line(&line, &mut payloads);
        }

        payloads
    }

    /// Flush any event left unterminated when the connection closes.
    pub fn finish(&mut self) -> Vec<SsePayload> {
        let mut payloads = Vec::new();
        let trailing = std::mem::take(&mut self.line_buf);
        let trailing = trailing.trim_end_matches('\r');
        if !trailing.is_empty() {
            self.process_line(trailing, &mut payloads);
        }
        // Dispatch a dangling event that never got its blank line.
        self.dispatch(&mut payloads);
        payloads
    }

    /// Whether the sentinel has been seen.
    pub fn is_done(&self) -> bool {
        self.saw_done
    }

    fn process_line(&mut self, line: &str, payloads: &mut Vec<SsePayload>) {
        if line.is_empty() {
            // Blank line terminates the event.
            self.dispatch(payloads);
        } else if let Some(data) = line.strip_prefix("data:") {
            self.current_data.push(data.strip_prefix(' ').unwrap_or(data).to_string());
        }
        // `event:`, `id:`, `retry:` and comment lines carry nothing the
        // chat stream uses; ignore them.
    }

    fn dispatch(&mut self, payloads: &mut Vec<SsePayload>) {
        if self.current_data.is_empty() || self.saw_done {
            self.current_data.clear();
            return;
        }
        let data = self.current_data.join("\n");
        self.current_data.clear();
        if data == DONE_SENTINEL {
            self.saw_done = true;
            payloads.push(SsePayload::Done);
        } else {
            payloads.push(SsePayload::Fragment(data));
        }
    }
}

/// Decode the decodable prefix of `buf`, leaving only a trailing
/// incomplete multibyte sequence for the next network chunk.
///
/// Invalid sequences inside the buffer are replaced with U+FFFD and
/// skipped, so a corrupt byte never withholds or discards the valid
/// text around it.
pub(crate) fn take_complete_utf8(buf: &mut Vec<u8>) -> String {
    let mut out = String::new();
    let mut start = 0;

    loop {
        match std::str::from_utf8(&buf[start..]) {
            Ok(s) => {
                out.push_str(s);
                start = buf.len();
                break;
            }
            Err(e) => {
                let valid = e.valid_up_to();
                out.push_str(&String::from_utf8_lossy(&buf[start..start + valid]));
                start += valid;
                match e.error_len() {
                    // Invalid sequence; substitute and resume after it.
                    Some(bad) => {
                        out.push('\u{FFFD}');
                        start += bad;
                    }
                    // Incomplete sequence at the tail; keep it buffered.
                    None => break,
                }
            }
        }
    }

    buf.drain(..start);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_split_across_chunks_reassembles() {
        // "안" is 3 bytes in UTF-8; split it mid-character.
        let bytes = "안녕".as_bytes();
        let mut buf = bytes[..4].to_vec();
        let first = take_complete_utf8(&mut buf);
        assert_eq!(first, "안");
        assert_eq!(buf.len(), 1);

        buf.extend_from_slice(&bytes[4..]);
        let second = take_complete_utf8(&mut buf);
        assert_eq!(second, "녕");
        assert!(buf.is_empty());
    }

    #[test]
    fn invalid_byte_keeps_following_text() {
        let mut buf = vec![0xFF];
        buf.extend_from_slice(b"hello");
        assert_eq!(take_complete_utf8(&mut buf), "\u{FFFD}hello");
        assert!(buf.is_empty());
    }

    #[test]
    fn lone_invalid_byte_does_not_withhold_later_chunks() {
        let mut buf = vec![0xFF];
        assert_eq!(take_complete_utf8(&mut buf), "\u{FFFD}");
        assert!(buf.is_empty());

        buf.extend_from_slice(b"hi");
        assert_eq!(take_complete_utf8(&mut buf), "hi");
        assert!(buf.is_empty());
    }

    #[test]
    fn invalid_byte_coexists_with_incomplete_tail() {
        // Valid text, a bad byte, then the first two bytes of "안".
        let mut buf = b"ok".to_vec();
        buf.push(0xFF);
        buf.extend_from_slice(&"안".as_bytes()[..2]);

        assert_eq!(take_complete_utf8(&mut buf), "ok\u{FFFD}");
        assert_eq!(buf.len(), 2);

        buf.push("안".as_bytes()[2]);
        assert_eq!(take_complete_utf8(&mut buf), "안");
        assert!(buf.is_empty());
    }

    #[test]
    fn parses_single_event() {
        let mut parser = SseParser::new();
        let payloads = parser.push("data: Hello\n\n");
        assert_eq!(payloads, vec![SsePayload::Fragment("Hello".to_string())]);
    }

    #[test]
    fn reassembles_events_split_across_chunks() {
        let mut parser = SseParser::new();
        assert!(parser.push("data: Hel").is_empty());
        assert!(parser.push("lo\n").is_empty());
        let payloads = parser.push("\ndata: world\n\n");
        assert_eq!(
            payloads,
            vec![
                SsePayload::Fragment("Hello".to_string()),
                SsePayload::Fragment("world".to_string()),
            ]
        );
    }

    #[test]
    fn sentinel_ends_the_stream() {
        let mut parser = SseParser::new();
        let payloads = parser.push("data: tail\n\ndata: [DONE]\n\n");
        assert_eq!(
            payloads,
            vec![
                SsePayload::Fragment("tail".to_string()),
                SsePayload::Done,
            ]
        );
        assert!(parser.is_done());
        // Anything after the sentinel is dropped.
        assert!(parser.push("data: stray\n\n").is_empty());
    }

    #[test]
    fn multi_data_lines_join_with_newline() {
        let mut parser = SseParser::new();
        let payloads = parser.push("data: line one\ndata: line two\n\n");
        assert_eq!(
            payloads,
            vec![SsePayload::Fragment("line one\nline two".to_string())]
        );
    }

    #[test]
    fn crlf_lines_are_handled() {
        let mut parser = SseParser::new();
        let payloads = parser.push("data: Hello\r\n\r\n");
        assert_eq!(payloads, vec![SsePayload::Fragment("Hello".to_string())]);
    }

    #[test]
    fn comment_and_event_lines_are_ignored() {
        let mut parser = SseParser::new();
        let payloads = parser.push(": keepalive\nevent: message\ndata: x\n\n");
        assert_eq!(payloads, vec![SsePayload::Fragment("x".to_string())]);
    }

    #[test]
    fn finish_flushes_dangling_event() {
        let mut parser = SseParser::new();
        assert!(parser.push("data: tail-no-blank\n").is_empty());
        let payloads = parser.finish();
        assert_eq!(
            payloads,
            vec![SsePayload::Fragment("tail-no-blank".to_string())]
        );
    }

    #[test]
    fn empty_data_line_produces_empty_fragment() {
        let mut parser = SseParser::new();
        let payloads = parser.push("data: \n\n");
        assert_eq!(payloads, vec![SsePayload::Fragment(String::new())]);
    }
}
