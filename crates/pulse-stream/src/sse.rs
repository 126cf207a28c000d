//! SSE frame parsing and push-event decoding.

use serde::Deserialize;

/// Event tag the channel reacts to.
pub const SCRAPE_COMPLETE: &str = "scrape_complete";

/// A decoded push payload.
///
/// Only the `event` tag drives behavior; the remaining fields are the
/// broadcast metadata the backend attaches to a scrape-complete event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PushEvent {
    pub event: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub items: Option<u64>,
    #[serde(default, rename = "new")]
    pub new_items: Option<u64>,
    #[serde(default)]
    pub errors: Option<u64>,
}

impl PushEvent {
    pub fn is_scrape_complete(&self) -> bool {
        self.event == SCRAPE_COMPLETE
    }
}

/// Decode a push payload.
///
/// Returns an explicit parse result; the channel routes errors to a single
/// logging path instead of discarding them unconditionally.
pub fn parse_push_event(payload: &str) -> Result<PushEvent, serde_json::Error> {
    serde_json::from_str(payload)
}

/// Upper bound on bytes buffered for an unterminated frame. A stream
/// that exceeds it is not speaking SSE; the pending frame is dropped.
const MAX_PENDING_BYTES: usize = 64 * 1024;

/// Incremental SSE frame parser.
///
/// Feed raw body chunks with [`SseParser::push`]; completed `data`
/// payloads come back once the blank line terminating their event
/// arrives. Field lines other than `data:` (`event:`, `id:`, `retry:`)
/// and comment lines are skipped. Unterminated input is bounded by
/// [`MAX_PENDING_BYTES`].
#[derive(Debug, Default)]
pub struct SseParser {
    buffer: String,
    data_lines: Vec<String>,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one body chunk, returning any payloads it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.push_str(&String::from_utf8_lossy(chunk));

        let mut completed = Vec::new();
        while let Some(newline) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=newline).collect();
            let line = line.trim_end_matches(['\n', '\r']);

            if line.is_empty() {
                // Blank line terminates the event.
                if !self.data_lines.is_empty() {
                    completed.push(self.data_lines.join("\n"));
                    self.data_lines.clear();
                }
            } else if let Some(value) = line.strip_prefix("data:") {
                self.data_lines
                    .push(value.strip_prefix(' ').unwrap_or(value).to_string());
            }
            // Comments (":") and other fields are ignored.
        }

        if self.pending_bytes() > MAX_PENDING_BYTES {
            self.buffer.clear();
            self.data_lines.clear();
        }
        completed
    }

    fn pending_bytes(&self) -> usize {
        self.buffer.len() + self.data_lines.iter().map(String::len).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_event() {
        let mut parser = SseParser::new();
        let payloads = parser.push(b"event: message\ndata: {\"event\":\"scrape_complete\"}\n\n");
        assert_eq!(payloads, vec![r#"{"event":"scrape_complete"}"#]);
    }

    #[test]
    fn test_event_split_across_chunks() {
        let mut parser = SseParser::new();
        assert!(parser.push(b"data: {\"event\":").is_empty());
        assert!(parser.push(b"\"scrape_complete\"}").is_empty());
        let payloads = parser.push(b"\n\n");
        assert_eq!(payloads, vec![r#"{"event":"scrape_complete"}"#]);
    }

    #[test]
    fn test_crlf_lines() {
        let mut parser = SseParser::new();
        let payloads = parser.push(b"data: x\r\n\r\n");
        assert_eq!(payloads, vec!["x"]);
    }

    #[test]
    fn test_multiline_data_joined() {
        let mut parser = SseParser::new();
        let payloads = parser.push(b"data: a\ndata: b\n\n");
        assert_eq!(payloads, vec!["a\nb"]);
    }

    #[test]
    fn test_ping_without_data_yields_nothing() {
        let mut parser = SseParser::new();
        // Keep-alive frames carry an event name but no data line.
        assert!(parser.push(b"event: ping\n\n").is_empty());
    }

    #[test]
    fn test_comment_ignored() {
        let mut parser = SseParser::new();
        assert!(parser.push(b": keep-alive\n\n").is_empty());
    }

    #[test]
    fn test_runaway_line_is_dropped() {
        let mut parser = SseParser::new();
        // No newline ever arrives: not SSE. The pending bytes are bounded.
        let noise = vec![b'x'; 70 * 1024];
        assert!(parser.push(&noise).is_empty());

        // The runaway fragment was discarded; later frames still parse.
        let payloads = parser.push(b"\ndata: ok\n\n");
        assert_eq!(payloads, vec!["ok"]);
    }

    #[test]
    fn test_runaway_data_lines_are_dropped() {
        let mut parser = SseParser::new();
        // A flood of data lines with no terminating blank line.
        let chunk = format!("data: {}\n", "y".repeat(1024)).repeat(80);
        assert!(parser.push(chunk.as_bytes()).is_empty());

        // The hoarded frame was dropped rather than dispatched.
        let payloads = parser.push(b"\ndata: ok\n\n");
        assert_eq!(payloads, vec!["ok"]);
    }

    #[test]
    fn test_parse_recognized_event() {
        let event = parse_push_event(
            r#"{"event":"scrape_complete","source":"reddit","items":25,"new":3,"errors":0}"#,
        )
        .unwrap();
        assert!(event.is_scrape_complete());
        assert_eq!(event.source.as_deref(), Some("reddit"));
        assert_eq!(event.new_items, Some(3));
    }

    #[test]
    fn test_parse_unrecognized_tag() {
        let event = parse_push_event(r#"{"event":"heartbeat"}"#).unwrap();
        assert!(!event.is_scrape_complete());
    }

    #[test]
    fn test_parse_malformed_payload() {
        assert!(parse_push_event("not json").is_err());
        assert!(parse_push_event(r#"{"no_event_tag":1}"#).is_err());
    }
}
