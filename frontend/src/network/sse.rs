//! Incremental decoder for `text/event-stream` bodies.
//!
//! The completion endpoints stream `data: {json}` events terminated by a
//! blank line and finish with `data: [DONE]`.  Network chunks can split an
//! event (or a UTF-8 sequence) anywhere, so the decoder buffers raw bytes
//! until a full line is available.

use crate::models::ApiChatCompletionChunk;

use super::error::ApiError;

const DONE_SENTINEL: &str = "[DONE]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
    Data(String),
    Done,
}

#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    data_lines: Vec<String>,
    done: bool,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once `[DONE]` has been seen. Later input is ignored.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Feed one network chunk and return every event it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Result<Vec<SseEvent>, ApiError> {
        let mut events = Vec::new();
        if self.done {
            return Ok(events);
        }
        self.buffer.extend_from_slice(chunk);

        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let mut line: Vec<u8> = self.buffer.drain(..=pos).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            let line = decode_line(line)?;
            if let Some(event) = self.handle_line(&line) {
                let is_done = event == SseEvent::Done;
                events.push(event);
                if is_done {
                    self.done = true;
                    self.buffer.clear();
                    break;
                }
            }
        }
        Ok(events)
    }

    /// Flush whatever is left once the body has ended.
    pub fn finish(&mut self) -> Result<Vec<SseEvent>, ApiError> {
        let mut events = Vec::new();
        if self.done {
            return Ok(events);
        }
        if !self.buffer.is_empty() {
            let rest = std::mem::take(&mut self.buffer);
            let line = decode_line(rest)?;
            let line = line.trim_end_matches('\r').to_string();
            if let Some(event) = self.handle_line(&line) {
                events.push(event);
            }
        }
        if let Some(event) = self.dispatch() {
            events.push(event);
        }
        self.done = true;
        Ok(events)
    }

    fn handle_line(&mut self, line: &str) -> Option<SseEvent> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.find(':') {
            Some(idx) => {
                let value = &line[idx + 1..];
                (&line[..idx], value.strip_prefix(' ').unwrap_or(value))
            }
            None => (line, ""),
        };

        // `event:`, `id:` and `retry:` carry nothing the console uses.
        if field == "data" {
            self.data_lines.push(value.to_string());
        }
        None
    }

    fn dispatch(&mut self) -> Option<SseEvent> {
        if self.data_lines.is_empty() {
            return None;
        }
        let data = self.data_lines.join("\n");
        self.data_lines.clear();
        if data.trim() == DONE_SENTINEL {
            Some(SseEvent::Done)
        } else {
            Some(SseEvent::Data(data))
        }
    }
}

fn decode_line(line: Vec<u8>) -> Result<String, ApiError> {
    String::from_utf8(line).map_err(|e| ApiError::Stream(format!("invalid UTF-8 in stream: {}", e)))
}

fn malformed(err: serde_json::Error) -> ApiError {
    ApiError::Stream(format!("malformed chunk: {}", err))
}

/// Extract the text fragment from one `data:` payload.
///
/// Malformed JSON and payloads with an `error` member are stream errors;
/// chunks without content (role announcements, finish markers) yield an
/// empty string.
pub fn parse_completion_fragment(data: &str) -> Result<String, ApiError> {
    let value: serde_json::Value = serde_json::from_str(data).map_err(malformed)?;
    if let Some(err) = value.get("error") {
        let message = err
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| err.to_string());
        return Err(ApiError::Stream(message));
    }
    let chunk: ApiChatCompletionChunk = serde_json::from_value(value).map_err(malformed)?;
    Ok(chunk.content().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn data(s: &str) -> SseEvent {
        SseEvent::Data(s.to_string())
    }

    #[test]
    fn decodes_events_split_across_chunks() {
        let mut dec = SseDecoder::new();
        assert!(dec.push(b"data: {\"a\"").unwrap().is_empty());
        assert!(dec.push(b":1}\n").unwrap().is_empty());
        assert_eq!(dec.push(b"\n").unwrap(), vec![data("{\"a\":1}")]);
    }

    #[test]
    fn handles_crlf_and_comments() {
        let mut dec = SseDecoder::new();
        let events = dec.push(b": keep-alive\r\n\r\ndata:x\r\n\r\n").unwrap();
        assert_eq!(events, vec![data("x")]);
    }

    #[test]
    fn joins_multi_line_data() {
        let mut dec = SseDecoder::new();
        let events = dec.push(b"data: one\ndata: two\n\n").unwrap();
        assert_eq!(events, vec![data("one\ntwo")]);
    }

    #[test]
    fn done_sentinel_stops_decoding() {
        let mut dec = SseDecoder::new();
        let events = dec.push(b"data: a\n\ndata: [DONE]\n\ndata: b\n\n").unwrap();
        assert_eq!(events, vec![data("a"), SseEvent::Done]);
        assert!(dec.is_done());
        assert!(dec.push(b"data: c\n\n").unwrap().is_empty());
        assert!(dec.finish().unwrap().is_empty());
    }

    #[test]
    fn finish_flushes_unterminated_event() {
        let mut dec = SseDecoder::new();
        assert!(dec.push(b"data: tail").unwrap().is_empty());
        assert_eq!(dec.finish().unwrap(), vec![data("tail")]);
    }

    #[test]
    fn ignores_other_fields() {
        let mut dec = SseDecoder::new();
        let events = dec.push(b"event: message\nid: 4\nretry: 10\ndata: x\n\n").unwrap();
        assert_eq!(events, vec![data("x")]);
    }

    #[test]
    fn fragment_extraction() {
        let frag = parse_completion_fragment(r#"{"choices":[{"delta":{"content":"Hi"}}]}"#).unwrap();
        assert_eq!(frag, "Hi");

        let empty = parse_completion_fragment(r#"{"choices":[{"delta":{},"finish_reason":"stop"}]}"#)
            .unwrap();
        assert_eq!(empty, "");

        let err = parse_completion_fragment(r#"{"error":{"message":"model not loaded"}}"#);
        assert_eq!(err, Err(ApiError::Stream("model not loaded".into())));

        assert!(matches!(
            parse_completion_fragment("{not json"),
            Err(ApiError::Stream(_))
        ));
    }

    #[test]
    fn invalid_utf8_is_a_stream_error() {
        let mut dec = SseDecoder::new();
        assert!(matches!(dec.push(b"data: \xff\xfe\n\n"), Err(ApiError::Stream(_))));

        let mut dec = SseDecoder::new();
        dec.push(b"data: \xc3").unwrap();
        assert!(matches!(dec.finish(), Err(ApiError::Stream(_))));
    }

    #[test]
    fn multibyte_character_split_across_chunks_survives() {
        let mut dec = SseDecoder::new();
        assert!(dec.push(b"data: \xe2\x82").unwrap().is_empty());
        assert_eq!(dec.push(b"\xac\n\n").unwrap(), vec![data("€")]);
    }

    fn sample_body(fragments: &[String]) -> Vec<u8> {
        let mut body = String::new();
        for f in fragments {
            let payload = serde_json::json!({"choices": [{"delta": {"content": f}}]});
            body.push_str(&format!("data: {}\r\n\r\n", payload));
        }
        body.push_str("data: [DONE]\n\n");
        body.into_bytes()
    }

    fn decode_all(body: &[u8], cuts: &[usize]) -> Vec<SseEvent> {
        let mut dec = SseDecoder::new();
        let mut events = Vec::new();
        let mut start = 0;
        let mut cuts: Vec<usize> = cuts.iter().map(|c| c % (body.len() + 1)).collect();
        cuts.sort_unstable();
        for cut in cuts {
            events.extend(dec.push(&body[start..cut.max(start)]).unwrap());
            start = cut.max(start);
        }
        events.extend(dec.push(&body[start..]).unwrap());
        events.extend(dec.finish().unwrap());
        events
    }

    proptest! {
        #[test]
        fn chunk_boundaries_do_not_change_the_result(
            fragments in prop::collection::vec("[a-zA-Z0-9 äöü€\\n]{0,8}", 1..6),
            cuts in prop::collection::vec(any::<usize>(), 0..12),
        ) {
            let body = sample_body(&fragments);
            let whole = decode_all(&body, &[]);
            let split = decode_all(&body, &cuts);
            prop_assert_eq!(&whole, &split);

            let text: String = split
                .iter()
                .filter_map(|e| match e {
                    SseEvent::Data(d) => Some(parse_completion_fragment(d).unwrap()),
                    SseEvent::Done => None,
                })
                .collect();
            prop_assert_eq!(text, fragments.concat());
            prop_assert_eq!(split.last(), Some(&SseEvent::Done));
        }
    }
}
