//! Request-level conversion service shared by the CLI, HTTP and tool
//! adapters.
//!
//! [`Converter`] bundles the timestamp strategy and the injected clock so each
//! adapter makes the same calls into the [`crate::sse`] core:
//!
//! ```
//! use sseconv::converter::{Converter, InputFormat};
//! use sseconv::traits::FixedClock;
//!
//! let converter = Converter::new().with_clock(FixedClock(1_000));
//! let records = converter
//!     .convert_raw("event:ping\n\n", InputFormat::Single, None)
//!     .unwrap();
//! assert_eq!(records[0].timestamp, "1000");
//! ```

mod batch;
pub mod params;
mod preset;

pub use batch::{BatchItemError, BatchOutcome};
pub use preset::{generate_preset_data, render_records, PresetFile, DEFAULT_PRESET_FILENAME};

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConvertError, ConvertResult};
use crate::sse::{
    convert_from_object_with, convert_sse_data_with, NormalizedRecord, ParseOptions,
    SourceObject, TimestampStrategy,
};
use crate::traits::{Clock, RandomJitter, SystemClock};

/// How raw input text should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// SSE text (any number of events)
    #[default]
    Single,
    /// SSE text; same parse as `Single`
    Multiple,
    /// A JSON object converted with the object rules
    Object,
}

impl InputFormat {
    /// Parse a format name. Unknown or missing names fall back to `Single`.
    pub fn from_name(name: Option<&str>) -> Self {
        match name.map(str::trim) {
            Some("multiple") => InputFormat::Multiple,
            Some("object") => InputFormat::Object,
            _ => InputFormat::Single,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputFormat::Single => "single",
            InputFormat::Multiple => "multiple",
            InputFormat::Object => "object",
        }
    }
}

/// Conversion entry point with a fixed strategy and clock.
#[derive(Clone)]
pub struct Converter {
    clock: Arc<dyn Clock>,
    strategy: TimestampStrategy,
    jitter_seed: Option<u64>,
}

impl Default for Converter {
    fn default() -> Self {
        Self {
            clock: Arc::new(SystemClock),
            strategy: TimestampStrategy::default(),
            jitter_seed: None,
        }
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("strategy", &self.strategy)
            .field("jitter_seed", &self.jitter_seed)
            .finish_non_exhaustive()
    }
}

impl Converter {
    /// Payload-derived timestamps, system clock.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_strategy(mut self, strategy: TimestampStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Make synthetic timestamps reproducible.
    pub fn with_jitter_seed(mut self, seed: u64) -> Self {
        self.jitter_seed = Some(seed);
        self
    }

    pub fn strategy(&self) -> TimestampStrategy {
        self.strategy
    }

    /// Stream-parse SSE text.
    pub fn parse_stream(&self, raw: &str, base_timestamp: Option<&str>) -> Vec<NormalizedRecord> {
        let options = ParseOptions::new()
            .with_base_timestamp(base_timestamp)
            .with_strategy(self.strategy);
        let mut jitter = match self.jitter_seed {
            Some(seed) => RandomJitter::seeded(seed),
            None => RandomJitter::from_entropy(),
        };
        convert_sse_data_with(raw, &options, self.clock.as_ref(), &mut jitter)
    }

    /// Convert an event object.
    pub fn convert_object(
        &self,
        object: &SourceObject,
        fallback_timestamp: Option<&str>,
    ) -> NormalizedRecord {
        convert_from_object_with(object, fallback_timestamp, self.clock.as_ref())
    }

    /// Convert a JSON value that must be an object.
    pub fn convert_object_value(
        &self,
        value: &Value,
        fallback_timestamp: Option<&str>,
    ) -> ConvertResult<NormalizedRecord> {
        match value {
            Value::Object(object) => Ok(self.convert_object(object, fallback_timestamp)),
            _ => Err(ConvertError::invalid_input("sseObject must be a JSON object")),
        }
    }

    /// Convert raw text according to `format`.
    ///
    /// Only `Object` can fail, when the text is not a JSON object.
    pub fn convert_raw(
        &self,
        raw: &str,
        format: InputFormat,
        base_timestamp: Option<&str>,
    ) -> ConvertResult<Vec<NormalizedRecord>> {
        match format {
            InputFormat::Single | InputFormat::Multiple => {
                Ok(self.parse_stream(raw, base_timestamp))
            }
            InputFormat::Object => {
                let parsed: Value = serde_json::from_str(raw).map_err(ConvertError::invalid_json)?;
                match parsed {
                    Value::Object(object) => Ok(vec![self.convert_object(&object, base_timestamp)]),
                    _ => Err(ConvertError::invalid_json("expected a JSON object")),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::FixedClock;
    use serde_json::json;

    fn converter() -> Converter {
        Converter::new().with_clock(FixedClock(1_000))
    }

    #[test]
    fn test_strategy_defaults_to_payload_derived() {
        assert_eq!(converter().strategy(), TimestampStrategy::PayloadDerived);
        let synthetic = converter().with_strategy(TimestampStrategy::Synthetic);
        assert_eq!(synthetic.strategy(), TimestampStrategy::Synthetic);
    }

    #[test]
    fn test_input_format_from_name() {
        assert_eq!(InputFormat::from_name(None), InputFormat::Single);
        assert_eq!(InputFormat::from_name(Some("multiple")), InputFormat::Multiple);
        assert_eq!(InputFormat::from_name(Some("object")), InputFormat::Object);
        assert_eq!(InputFormat::from_name(Some("weird")), InputFormat::Single);
    }

    #[test]
    fn test_convert_raw_single_and_multiple_agree() {
        let raw = "event:a\ndata:1\n\nevent:b\ndata:2\n\n";
        let single = converter().convert_raw(raw, InputFormat::Single, Some("5")).unwrap();
        let multiple = converter()
            .convert_raw(raw, InputFormat::Multiple, Some("5"))
            .unwrap();
        assert_eq!(single.len(), 2);
        assert_eq!(single, multiple);
    }

    #[test]
    fn test_convert_raw_object() {
        let records = converter()
            .convert_raw(r#"{"event":"message","content":"hi"}"#, InputFormat::Object, Some("100"))
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].timestamp, "100");
        assert_eq!(records[0].value, "event:message\ndata:{\"content\":\"hi\"}\n\n");
    }

    #[test]
    fn test_convert_raw_object_rejects_bad_json() {
        let err = converter()
            .convert_raw("event:message", InputFormat::Object, None)
            .unwrap_err();
        assert!(matches!(err, ConvertError::InvalidJson { .. }));

        let err = converter()
            .convert_raw("[1, 2]", InputFormat::Object, None)
            .unwrap_err();
        assert!(matches!(err, ConvertError::InvalidJson { .. }));
    }

    #[test]
    fn test_convert_object_value_requires_object() {
        assert!(converter()
            .convert_object_value(&json!({"event": "x"}), None)
            .is_ok());
        let err = converter()
            .convert_object_value(&json!("text"), None)
            .unwrap_err();
        assert!(matches!(err, ConvertError::InvalidInput { .. }));
    }

    #[test]
    fn test_seeded_synthetic_is_reproducible() {
        let converter = Converter::new()
            .with_clock(FixedClock(0))
            .with_strategy(TimestampStrategy::Synthetic)
            .with_jitter_seed(11);
        let raw = "event:a\n\nevent:b\n\nevent:c\n\n";
        let first = converter.parse_stream(raw, Some("1000"));
        let second = converter.parse_stream(raw, Some("1000"));
        assert_eq!(first, second);
        assert_eq!(first[0].timestamp, "1000");
    }
}
