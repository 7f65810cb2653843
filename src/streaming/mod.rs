//! Streaming support for Generative Language API responses.
//!
//! Streamed response bodies are a sequence of JSON objects split across
//! network chunks at arbitrary byte positions. There is no framing to rely
//! on beyond the objects themselves: no length prefixes, no newline
//! delimiters, no SSE `data:` lines. Depending on the endpoint the objects
//! arrive either back-to-back or wrapped in `[...],` array framing; both
//! decode identically here, because anything before an object's opening
//! brace is skipped as stray bytes.
//!
//! - [`ObjectBuffer`] is the pure incremental decoder: feed it byte chunks,
//!   pull out complete `serde_json::Value` objects.
//! - [`JsonObjectStream`] drives an `ObjectBuffer` from a byte-chunk
//!   stream, yielding each object as soon as its closing delimiter has
//!   arrived.
//! - [`StreamAccumulator`] combines typed response chunks into one final
//!   response.

mod accumulator;
mod object_stream;

pub use accumulator::StreamAccumulator;
pub use object_stream::{JsonObjectStream, ObjectBuffer};
