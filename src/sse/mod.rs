//! SSE (Server-Sent Events) normalizer
//!
//! Turns SSE text and ad-hoc event objects into replayable
//! `{timestamp, value}` records.
//! SSE format handled here:
//! - `event:<type>` - opens an event
//! - `data:<payload>` - payload line (the last one in an event wins)
//! - Empty line - signals end of event
//! - Anything else - ignored
//!
//! # Module structure
//! - `events` - Line and record types (SseLine, PendingEvent, NormalizedRecord)
//! - `format` - Canonical re-serialization (format_sse_value)
//! - `parser` - Stream parsing (SseParser, convert_sse_data)
//! - `object` - Object conversion (convert_from_object)
//! - `timestamp` - Timestamp strategies

mod events;
mod format;
mod object;
mod parser;
mod timestamp;

// Re-export public types
pub use events::{NormalizedRecord, PendingEvent, SseLine};
pub use format::format_sse_value;
pub use object::{
    convert_from_object, convert_from_object_with, SourceObject, DEFAULT_EVENT_NAME,
};
pub use parser::{
    convert_multiple_sse_events, convert_sse_data, convert_sse_data_with, parse_sse_line,
    ParseOptions, SseParser,
};
pub use timestamp::{timestamp_from_payload, TimestampStrategy};

pub(crate) use timestamp::{is_truthy, value_to_text};
