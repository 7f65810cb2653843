//! Incremental decoder for concatenated JSON objects in a byte stream.
//!
//! The decoder accumulates incoming chunks in a byte buffer, skips anything
//! preceding the next `{`, and repeatedly tries to split one complete JSON
//! value off the front. Object boundaries are found by byte-level delimiter
//! matching that tracks string literals and escape sequences; scanning
//! bytes rather than chars means a multi-byte UTF-8 character split across
//! chunks never trips the decoder (all JSON delimiters are ASCII and never
//! occur inside UTF-8 continuation sequences).

use bytes::{Buf, Bytes, BytesMut};
use futures::stream::Stream;
use serde_json::Value;
use std::borrow::Cow;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::error::{GeminiError, ResponseError};

/// Outcome of scanning the buffer for one complete top-level JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    /// A balanced value occupies `buf[..end]`.
    Complete { end: usize },
    /// The buffer holds a prefix of a value; wait for more bytes.
    NeedMore,
}

/// Scan for a complete JSON object starting at offset 0.
///
/// Tracks brace/bracket depth outside of string literals and skips over
/// escape sequences inside them. Mismatched delimiter kinds (`{..]`) still
/// balance here; they are caught by the real parse and reported as
/// malformed.
fn scan_object(buf: &[u8]) -> Scan {
    if buf.first() != Some(&b'{') {
        return Scan::NeedMore;
    }

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &byte) in buf.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                depth -= 1;
                if depth == 0 {
                    return Scan::Complete { end: i + 1 };
                }
            }
            _ => {}
        }
    }

    Scan::NeedMore
}

/// Escape raw C0 control bytes that occur inside string literals.
///
/// Upstream services occasionally emit unescaped newlines or tabs inside
/// generated text, which a strict JSON grammar rejects. Rewriting them to
/// `\u00XX` lets `serde_json` accept the value. Returns the input slice
/// unchanged when no rewriting is needed.
fn escape_control_bytes(raw: &[u8]) -> Cow<'_, [u8]> {
    let mut out: Option<Vec<u8>> = None;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &byte) in raw.iter().enumerate() {
        let control = in_string && !escaped && byte < 0x20;
        if control && out.is_none() {
            let mut copied = Vec::with_capacity(raw.len() + 8);
            copied.extend_from_slice(&raw[..i]);
            out = Some(copied);
        }

        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
        } else if byte == b'"' {
            in_string = true;
        }

        if let Some(v) = out.as_mut() {
            if control {
                v.extend_from_slice(format!("\\u{byte:04x}").as_bytes());
            } else {
                v.push(byte);
            }
        }
    }

    match out {
        Some(v) => Cow::Owned(v),
        None => Cow::Borrowed(raw),
    }
}

/// Pure incremental decoder state: a byte buffer holding not-yet-decoded
/// input.
///
/// The buffer invariant: between calls it is either empty or starts at the
/// opening brace of the next (possibly still incomplete) object; consumed
/// bytes and stray separator bytes are discarded eagerly.
///
/// ```
/// use gemini_stream::streaming::ObjectBuffer;
///
/// let mut buffer = ObjectBuffer::new();
/// buffer.push(br#"{"a":1}{"b":"#);
/// assert_eq!(buffer.next_object().unwrap().unwrap()["a"], 1);
/// assert!(buffer.next_object().is_none()); // second object incomplete
/// buffer.push(b"2}");
/// assert_eq!(buffer.next_object().unwrap().unwrap()["b"], 2);
/// ```
pub struct ObjectBuffer {
    buf: BytesMut,
}

impl ObjectBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self {
            buf: BytesMut::new(),
        }
    }

    /// Append a chunk and discard any prefix preceding the next `{`.
    pub fn push(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
        self.trim_to_object_start();
    }

    /// Try to split one complete object off the front of the buffer.
    ///
    /// Returns `None` while the buffer holds only a prefix of a value;
    /// nothing is discarded in that case. A balanced slice that still fails
    /// to parse is returned as a `MalformedObject` error.
    pub fn next_object(&mut self) -> Option<Result<Value, GeminiError>> {
        match scan_object(&self.buf) {
            Scan::NeedMore => None,
            Scan::Complete { end } => {
                let raw = self.buf.split_to(end);
                self.trim_to_object_start();

                let text = escape_control_bytes(&raw);
                match serde_json::from_slice::<Value>(&text) {
                    Ok(value) => Some(Ok(value)),
                    Err(e) => Some(Err(GeminiError::Response(ResponseError::MalformedObject {
                        message: e.to_string(),
                        fragment: String::from_utf8_lossy(&raw).into_owned(),
                    }))),
                }
            }
        }
    }

    /// Number of buffered bytes not yet decoded.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    fn trim_to_object_start(&mut self) {
        match self.buf.iter().position(|&b| b == b'{') {
            Some(0) => {}
            Some(pos) => self.buf.advance(pos),
            None => self.buf.clear(),
        }
    }
}

impl Default for ObjectBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Stream adapter decoding a byte-chunk stream into JSON objects.
///
/// Pull-based: the inner stream is polled only when the buffer holds no
/// further complete object, so decoded objects are yielded strictly in the
/// order their closing bytes arrived. A transport error or a malformed
/// object ends the stream after being yielded. Trailing bytes left in the
/// buffer at end-of-stream are dropped.
pub struct JsonObjectStream {
    inner: Pin<Box<dyn Stream<Item = Result<Bytes, GeminiError>> + Send>>,
    buffer: ObjectBuffer,
    finished: bool,
    failed: bool,
}

impl JsonObjectStream {
    /// Create a decoder over the given byte-chunk stream.
    pub fn new(inner: Pin<Box<dyn Stream<Item = Result<Bytes, GeminiError>> + Send>>) -> Self {
        Self {
            inner,
            buffer: ObjectBuffer::new(),
            finished: false,
            failed: false,
        }
    }
}

impl Stream for JsonObjectStream {
    type Item = Result<Value, GeminiError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if this.failed {
            return Poll::Ready(None);
        }

        loop {
            if let Some(result) = this.buffer.next_object() {
                if result.is_err() {
                    this.failed = true;
                }
                return Poll::Ready(Some(result));
            }

            if this.finished {
                return Poll::Ready(None);
            }

            match this.inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(chunk))) => this.buffer.push(&chunk),
                Poll::Ready(Some(Err(e))) => {
                    this.failed = true;
                    return Poll::Ready(Some(Err(e)));
                }
                Poll::Ready(None) => {
                    this.finished = true;
                    let leftover = this.buffer.pending();
                    if leftover > 0 {
                        tracing::debug!(
                            leftover_bytes = leftover,
                            "stream ended with unparsed trailing bytes"
                        );
                    }
                    return Poll::Ready(None);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_simple_object() {
        let buf = br#"{"key": "value"}"#;
        assert_eq!(scan_object(buf), Scan::Complete { end: buf.len() });
    }

    #[test]
    fn test_scan_stops_at_first_object() {
        let buf = br#"{"outer": {"inner": "value"}}{"next": 1}"#;
        assert_eq!(scan_object(buf), Scan::Complete { end: 29 });
    }

    #[test]
    fn test_scan_ignores_braces_in_strings() {
        let buf = br#"{"key": "value with } brace"}"#;
        assert_eq!(scan_object(buf), Scan::Complete { end: buf.len() });
    }

    #[test]
    fn test_scan_incomplete() {
        assert_eq!(scan_object(br#"{"key": "value"#), Scan::NeedMore);
    }

    #[test]
    fn test_scan_escaped_quote() {
        let buf = br#"{"key": "value with \" quote"}"#;
        assert_eq!(scan_object(buf), Scan::Complete { end: buf.len() });
    }

    #[test]
    fn test_scan_escaped_backslash_before_closing_quote() {
        let buf = br#"{"key": "value with \\ backslash"}"#;
        assert_eq!(scan_object(buf), Scan::Complete { end: buf.len() });
    }

    #[test]
    fn test_scan_nested_arrays() {
        let buf = br#"{"array": [{"nested": "value"}]}"#;
        assert_eq!(scan_object(buf), Scan::Complete { end: buf.len() });
    }

    #[test]
    fn test_scan_requires_object_start() {
        assert_eq!(scan_object(b"  some text  "), Scan::NeedMore);
        assert_eq!(scan_object(b""), Scan::NeedMore);
    }

    #[test]
    fn test_escape_leaves_clean_input_borrowed() {
        let raw = br#"{"a":"plain text"}"#;
        assert!(matches!(escape_control_bytes(raw), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_rewrites_raw_newline_in_string() {
        let raw = b"{\"a\":\"line1\nline2\"}";
        let escaped = escape_control_bytes(raw);
        assert_eq!(&escaped[..], br#"{"a":"line1\u000aline2"}"#);
        let value: Value = serde_json::from_slice(&escaped).unwrap();
        assert_eq!(value["a"], "line1\nline2");
    }

    #[test]
    fn test_escape_ignores_control_bytes_outside_strings() {
        let raw = b"{\"a\":1}\n";
        assert!(matches!(escape_control_bytes(raw), Cow::Borrowed(_)));
    }

    #[test]
    fn test_buffer_object_split_across_pushes() {
        // Scenario: {"a":1}{"b: arrives first, 2} arrives later
        let mut buffer = ObjectBuffer::new();
        buffer.push(br#"{"a":1}{"b":"#);

        let first = buffer.next_object().unwrap().unwrap();
        assert_eq!(first["a"], 1);
        assert!(buffer.next_object().is_none());

        buffer.push(b"2}");
        let second = buffer.next_object().unwrap().unwrap();
        assert_eq!(second["b"], 2);
    }

    #[test]
    fn test_buffer_skips_leading_junk() {
        let mut buffer = ObjectBuffer::new();
        buffer.push(br#"junk{"x":"#);
        assert!(buffer.next_object().is_none());

        buffer.push(b"true}");
        let value = buffer.next_object().unwrap().unwrap();
        assert_eq!(value, serde_json::json!({"x": true}));
    }

    #[test]
    fn test_buffer_back_to_back_objects_single_push() {
        let mut buffer = ObjectBuffer::new();
        buffer.push(br#"{"a":1}{"b":2}{"c":3}"#);

        let keys: Vec<String> = std::iter::from_fn(|| buffer.next_object())
            .map(|r| r.unwrap().as_object().unwrap().keys().next().unwrap().clone())
            .collect();
        assert_eq!(keys, ["a", "b", "c"]);
        assert_eq!(buffer.pending(), 0);
    }

    #[test]
    fn test_buffer_dangling_fragment_never_emits() {
        let mut buffer = ObjectBuffer::new();
        buffer.push(br#"{"a":1}{"b":"#);

        assert!(buffer.next_object().unwrap().is_ok());
        assert!(buffer.next_object().is_none());
        // The dangling fragment stays buffered, untouched
        assert_eq!(buffer.pending(), 5);
    }

    #[test]
    fn test_buffer_junk_only_chunk_clears() {
        let mut buffer = ObjectBuffer::new();
        buffer.push(b"[\n ,");
        assert_eq!(buffer.pending(), 0);
        assert!(buffer.next_object().is_none());
    }

    #[test]
    fn test_buffer_utf8_char_split_across_pushes() {
        let text = r#"{"a":"héllo"}"#.as_bytes();
        // Cut inside the two-byte encoding of 'é'
        let cut = text.iter().position(|&b| b == 0xc3).unwrap() + 1;
        let mut buffer = ObjectBuffer::new();
        buffer.push(&text[..cut]);
        assert!(buffer.next_object().is_none());

        buffer.push(&text[cut..]);
        let value = buffer.next_object().unwrap().unwrap();
        assert_eq!(value["a"], "héllo");
    }

    #[test]
    fn test_buffer_balanced_but_invalid_is_malformed() {
        let mut buffer = ObjectBuffer::new();
        buffer.push(br#"{"a":]}"#);

        // Mismatched delimiter kinds balance in the scanner but fail to
        // parse; that surfaces as a hard error, not as "need more bytes".
        let result = buffer.next_object().unwrap();
        match result {
            Err(GeminiError::Response(ResponseError::MalformedObject { fragment, .. })) => {
                assert!(fragment.contains("{\"a\":"));
            }
            other => panic!("expected malformed object, got {other:?}"),
        }
    }

    #[test]
    fn test_buffer_array_framed_stream() {
        // The documented streamGenerateContent framing
        let mut buffer = ObjectBuffer::new();
        buffer.push(b"[{\"n\":1},\n{\"n\":2}]");

        assert_eq!(buffer.next_object().unwrap().unwrap()["n"], 1);
        assert_eq!(buffer.next_object().unwrap().unwrap()["n"], 2);
        assert!(buffer.next_object().is_none());
        assert_eq!(buffer.pending(), 0);
    }
}
