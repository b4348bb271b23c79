//! Conversion of loosely-typed event objects.
//!
//! An object such as `{"event": "message", "sseId": "abc", "content": "hi"}`
//! becomes a single record. Recognized keys:
//!
//! - `event` - event name, `"message"` when absent
//! - `data` - payload; strings pass through, anything else is JSON-encoded
//! - `timestamp` - record timestamp, ahead of the caller's fallback
//!
//! Without `data`, the payload is every other key, JSON-encoded in its
//! original order.

use serde_json::{Map, Value};

use crate::sse::events::NormalizedRecord;
use crate::sse::format::format_sse_value;
use crate::sse::timestamp::{fallback_or_now, is_truthy, value_to_text};
use crate::traits::{Clock, SystemClock};

/// A loosely-typed event object.
pub type SourceObject = Map<String, Value>;

/// Event name used when the object has none.
pub const DEFAULT_EVENT_NAME: &str = "message";

const CONSUMED_KEYS: [&str; 3] = ["event", "data", "timestamp"];

/// Convert an object into one record with an explicit clock.
pub fn convert_from_object_with(
    object: &SourceObject,
    fallback_timestamp: Option<&str>,
    clock: &dyn Clock,
) -> NormalizedRecord {
    let event_name = object
        .get("event")
        .filter(|v| is_truthy(v))
        .map(value_to_text)
        .unwrap_or_else(|| DEFAULT_EVENT_NAME.to_string());

    let payload = match object.get("data").filter(|v| is_truthy(v)) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => Value::Object(remaining_fields(object)).to_string(),
    };

    let timestamp = match object.get("timestamp").filter(|v| is_truthy(v)) {
        Some(ts) => value_to_text(ts),
        None => fallback_or_now(fallback_timestamp, clock),
    };

    NormalizedRecord::new(timestamp, format_sse_value(&event_name, Some(&payload)))
}

/// Convert an object into one record, reading the system clock if needed.
pub fn convert_from_object(
    object: &SourceObject,
    fallback_timestamp: Option<&str>,
) -> NormalizedRecord {
    convert_from_object_with(object, fallback_timestamp, &SystemClock)
}

fn remaining_fields(object: &SourceObject) -> Map<String, Value> {
    object
        .iter()
        .filter(|(key, _)| !CONSUMED_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
