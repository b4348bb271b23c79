//! Line and record types for the SSE normalizer.

use serde::{Deserialize, Serialize};

/// A single input line, classified by prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseLine {
    /// `event:<name>` - name is everything after the prefix, untrimmed
    Event(String),
    /// `data:<payload>` - payload is everything after the prefix, untrimmed
    Data(String),
    /// Empty or whitespace-only line - ends the pending event
    Blank,
    /// Anything else (comments, `id:`, `retry:`, noise)
    Other(String),
}

/// Event being accumulated while scanning lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEvent {
    pub event_name: String,
    /// Last `data:` payload seen for this event.
    pub data: Option<String>,
}

impl PendingEvent {
    pub fn new(event_name: impl Into<String>) -> Self {
        Self {
            event_name: event_name.into(),
            data: None,
        }
    }
}

/// One replayable event: when it happened and its canonical SSE text.
///
/// `timestamp` stays a string so epoch values from upstream systems keep
/// their exact formatting. `value` always ends with a single blank line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub timestamp: String,
    pub value: String,
}

impl NormalizedRecord {
    pub fn new(timestamp: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serializes_timestamp_before_value() {
        let record = NormalizedRecord::new("1753968218605", "event:ping\n\n");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"timestamp":"1753968218605","value":"event:ping\n\n"}"#
        );
    }

    #[test]
    fn test_record_deserializes_from_preset_file_entry() {
        let json = r#"{"timestamp":"100","value":"event:message\ndata:{}\n\n"}"#;
        let record: NormalizedRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.timestamp, "100");
        assert!(record.value.starts_with("event:message\n"));
    }

    #[test]
    fn test_pending_event_starts_without_data() {
        let pending = PendingEvent::new("message");
        assert_eq!(pending.event_name, "message");
        assert!(pending.data.is_none());
    }
}
