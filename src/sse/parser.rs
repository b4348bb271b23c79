//! SSE stream parsing logic
//!
//! Contains the line classifier, the stateful [`SseParser`] that groups lines
//! into events and emits [`NormalizedRecord`]s, and the whole-blob entry
//! points built on top of it.

use crate::sse::events::{NormalizedRecord, PendingEvent, SseLine};
use crate::sse::format::format_sse_value;
use crate::sse::timestamp::{Stamper, TimestampStrategy};
use crate::traits::{Clock, JitterSource, RandomJitter, SystemClock};

/// Options for a single stream-parse call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Used when no timestamp can be derived from the payload, or as the
    /// seed for synthetic timestamps.
    pub base_timestamp: Option<String>,
    pub strategy: TimestampStrategy,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_timestamp(mut self, base_timestamp: Option<impl Into<String>>) -> Self {
        self.base_timestamp = base_timestamp.map(Into::into);
        self
    }

    pub fn with_strategy(mut self, strategy: TimestampStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Classify a single line by prefix.
///
/// Prefixes are matched exactly (`event:` and `data:`, no leading space) and
/// the remainder is kept verbatim.
pub fn parse_sse_line(line: &str) -> SseLine {
    if let Some(rest) = line.strip_prefix("event:") {
        return SseLine::Event(rest.to_string());
    }

    if let Some(rest) = line.strip_prefix("data:") {
        return SseLine::Data(rest.to_string());
    }

    if line.trim().is_empty() {
        return SseLine::Blank;
    }

    SseLine::Other(line.to_string())
}

/// Stateful parser that accumulates lines and emits normalized records.
///
/// One parser is used per input blob; it holds no state beyond the pending
/// event and the running timestamp.
pub struct SseParser<'a> {
    pending: Option<PendingEvent>,
    stamper: Stamper,
    clock: &'a dyn Clock,
    jitter: &'a mut dyn JitterSource,
}

impl<'a> SseParser<'a> {
    pub fn new(
        options: &ParseOptions,
        clock: &'a dyn Clock,
        jitter: &'a mut dyn JitterSource,
    ) -> Self {
        Self {
            pending: None,
            stamper: Stamper::new(options.strategy, options.base_timestamp.as_deref(), clock),
            clock,
            jitter,
        }
    }

    /// Feed one line (without its trailing newline).
    ///
    /// Returns the record completed by this line, if any: a blank line closes
    /// the pending event, and an `event:` line closes the previous one before
    /// opening a new one.
    pub fn feed_line(&mut self, line: &str) -> Option<NormalizedRecord> {
        let line = line.strip_suffix('\r').unwrap_or(line);

        match parse_sse_line(line) {
            SseLine::Event(name) => {
                let flushed = self.flush();
                self.pending = Some(PendingEvent::new(name));
                flushed
            }
            SseLine::Data(payload) => {
                match self.pending.as_mut() {
                    Some(pending) => {
                        if pending.data.is_some() {
                            tracing::trace!(
                                "Repeated data line for event '{}', keeping the last one",
                                pending.event_name
                            );
                        }
                        pending.data = Some(payload);
                    }
                    None => tracing::trace!("Data line outside of an event ignored"),
                }
                None
            }
            SseLine::Blank => self.flush(),
            SseLine::Other(text) => {
                tracing::trace!("Ignoring SSE line: {}", text);
                None
            }
        }
    }

    /// Flush whatever is still pending at end of input.
    pub fn finish(mut self) -> Option<NormalizedRecord> {
        self.flush()
    }

    /// Whether an event is currently being accumulated.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn flush(&mut self) -> Option<NormalizedRecord> {
        let pending = self.pending.take()?;
        let payload = pending.data.as_deref();
        let timestamp = self.stamper.stamp(payload, self.clock, &mut *self.jitter);
        tracing::debug!(
            event = %pending.event_name,
            timestamp = %timestamp,
            "Flushed SSE event"
        );
        Some(NormalizedRecord::new(
            timestamp,
            format_sse_value(&pending.event_name, payload),
        ))
    }
}

/// Parse a whole SSE blob with an explicit clock and jitter source.
pub fn convert_sse_data_with(
    raw: &str,
    options: &ParseOptions,
    clock: &dyn Clock,
    jitter: &mut dyn JitterSource,
) -> Vec<NormalizedRecord> {
    let mut parser = SseParser::new(options, clock, jitter);
    let mut records: Vec<NormalizedRecord> = raw
        .trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
        .split('\n')
        .filter_map(|line| parser.feed_line(line))
        .collect();
    records.extend(parser.finish());
    records
}

/// Parse a whole SSE blob using payload-derived timestamps and the system
/// clock.
pub fn convert_sse_data(raw: &str, base_timestamp: Option<&str>) -> Vec<NormalizedRecord> {
    let options = ParseOptions::new().with_base_timestamp(base_timestamp);
    let mut jitter = RandomJitter::from_entropy();
    convert_sse_data_with(raw, &options, &SystemClock, &mut jitter)
}

/// Alias of [`convert_sse_data`]; a blob already carries any number of
/// events.
pub fn convert_multiple_sse_events(
    raw: &str,
    base_timestamp: Option<&str>,
) -> Vec<NormalizedRecord> {
    convert_sse_data(raw, base_timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{FixedClock, FixedJitter};

    fn parse(raw: &str, base: Option<&str>) -> Vec<NormalizedRecord> {
        let options = ParseOptions::new().with_base_timestamp(base);
        convert_sse_data_with(raw, &options, &FixedClock(999), &mut FixedJitter(100))
    }

    // Tests for parse_sse_line

    #[test]
    fn test_parse_event_line() {
        assert_eq!(
            parse_sse_line("event:message"),
            SseLine::Event("message".to_string())
        );
        // Remainder is not trimmed
        assert_eq!(
            parse_sse_line("event: message"),
            SseLine::Event(" message".to_string())
        );
    }

    #[test]
    fn test_parse_data_line() {
        assert_eq!(
            parse_sse_line("data:{\"x\":1}"),
            SseLine::Data("{\"x\":1}".to_string())
        );
        assert_eq!(parse_sse_line("data:"), SseLine::Data(String::new()));
    }

    #[test]
    fn test_parse_blank_line() {
        assert_eq!(parse_sse_line(""), SseLine::Blank);
        assert_eq!(parse_sse_line("   \t"), SseLine::Blank);
    }

    #[test]
    fn test_parse_other_line() {
        assert_eq!(
            parse_sse_line(": keep-alive"),
            SseLine::Other(": keep-alive".to_string())
        );
        assert_eq!(
            parse_sse_line("id: 42"),
            SseLine::Other("id: 42".to_string())
        );
    }

    // Tests for SseParser

    #[test]
    fn test_parser_emits_on_blank_line() {
        let clock = FixedClock(1);
        let mut jitter = FixedJitter(100);
        let options = ParseOptions::new().with_base_timestamp(Some("500"));
        let mut parser = SseParser::new(&options, &clock, &mut jitter);

        assert!(parser.feed_line("event:message").is_none());
        assert!(parser.feed_line("data:hello").is_none());
        assert!(parser.has_pending());

        let record = parser.feed_line("").unwrap();
        assert_eq!(record.timestamp, "500");
        assert_eq!(record.value, "event:message\ndata:hello\n\n");
        assert!(!parser.has_pending());
        assert!(parser.finish().is_none());
    }

    #[test]
    fn test_parser_flushes_on_next_event_line() {
        let clock = FixedClock(1);
        let mut jitter = FixedJitter(100);
        let options = ParseOptions::new();
        let mut parser = SseParser::new(&options, &clock, &mut jitter);

        parser.feed_line("event:a");
        parser.feed_line("data:1");
        let first = parser.feed_line("event:b").unwrap();
        assert_eq!(first.value, "event:a\ndata:1\n\n");

        parser.feed_line("data:2");
        let second = parser.finish().unwrap();
        assert_eq!(second.value, "event:b\ndata:2\n\n");
    }

    #[test]
    fn test_parser_last_data_line_wins() {
        let records = parse("event:message\ndata:first\ndata:second\n\n", None);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value, "event:message\ndata:second\n\n");
    }

    #[test]
    fn test_parser_strips_carriage_returns() {
        let records = parse("event:message\r\ndata:hi\r\n\r\nevent:ping\r\n", None);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].value, "event:message\ndata:hi\n\n");
        assert_eq!(records[1].value, "event:ping\n\n");
    }

    // Tests for convert_sse_data_with

    #[test]
    fn test_convert_embedded_timestamp_wins() {
        let raw = "event:message\ndata:{\"timestamp\":\"1753968218605\"}\n\n";
        let records = parse(raw, Some("1753968218000"));
        assert_eq!(
            records,
            vec![NormalizedRecord::new("1753968218605", raw)]
        );
    }

    #[test]
    fn test_convert_back_to_back_events() {
        let records = parse("event:a\ndata:1\nevent:b\ndata:2\n\n", Some("7"));
        assert_eq!(
            records,
            vec![
                NormalizedRecord::new("7", "event:a\ndata:1\n\n"),
                NormalizedRecord::new("7", "event:b\ndata:2\n\n"),
            ]
        );
    }

    #[test]
    fn test_convert_non_json_payload_falls_back() {
        let records = parse("event:message\ndata:not json at all\n\n", Some("123"));
        assert_eq!(records[0].timestamp, "123");

        let records = parse("event:message\ndata:not json at all\n\n", None);
        assert_eq!(records[0].timestamp, "999");
    }

    #[test]
    fn test_convert_ignores_data_before_first_event() {
        let records = parse("data:orphan\n\n: comment\nevent:real\ndata:x\n", None);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value, "event:real\ndata:x\n\n");
    }

    #[test]
    fn test_convert_empty_and_garbage_input() {
        assert!(parse("", None).is_empty());
        assert!(parse("   \n\n  ", None).is_empty());
        assert!(parse("hello\nworld\n: comment", None).is_empty());
    }

    #[test]
    fn test_convert_event_without_data() {
        let records = parse("event:ping\n\n", Some("1"));
        assert_eq!(records[0].value, "event:ping\n\n");
    }

    #[test]
    fn test_convert_synthetic_strategy_ignores_payload() {
        let options = ParseOptions::new()
            .with_base_timestamp(Some("1000"))
            .with_strategy(TimestampStrategy::Synthetic);
        let raw = "event:a\ndata:{\"timestamp\":\"5\"}\n\nevent:b\n\nevent:c\n\n";
        let records =
            convert_sse_data_with(raw, &options, &FixedClock(0), &mut FixedJitter(300));
        let stamps: Vec<&str> = records.iter().map(|r| r.timestamp.as_str()).collect();
        assert_eq!(stamps, vec!["1000", "1300", "1600"]);
    }

    #[test]
    fn test_convert_uses_system_clock_without_fallback() {
        let before = chrono::Utc::now().timestamp_millis();
        let records = convert_sse_data("event:ping\n\n", None);
        let after = chrono::Utc::now().timestamp_millis();

        let stamp: i64 = records[0].timestamp.parse().unwrap();
        assert!(stamp >= before && stamp <= after);
    }

    #[test]
    fn test_convert_multiple_matches_single() {
        let raw = "event:a\ndata:{\"timestamp\":\"1\"}\n\nevent:b\ndata:{\"timestamp\":\"2\"}\n\n";
        assert_eq!(
            convert_multiple_sse_events(raw, None),
            convert_sse_data(raw, None)
        );
    }
}
