//! Loosely-typed request arguments.
//!
//! HTTP bodies and tool-call arguments come from workflow tools that are not
//! strict about types. These helpers turn them into what the converter needs,
//! or into a [`ConvertError`] naming the offending parameter.

use serde_json::Value;

use crate::error::{ConvertError, ConvertResult, UNRESOLVED_TEMPLATE_MARKER};
use crate::sse::{is_truthy, value_to_text};

/// Optional scalar argument as text; absent, `null`, `""`, `0` and `false`
/// count as not given.
pub fn optional_text(value: Option<&Value>) -> Option<String> {
    value.filter(|v| is_truthy(v)).map(value_to_text)
}

/// Resolve the `rawData` argument to SSE text.
///
/// Accepts a string, an object carrying the text in `sseData`, or an array
/// whose first element carries it. Anything else is stringified, with array
/// elements joined by commas. A string that still contains an unrendered
/// template placeholder is rejected.
pub fn resolve_raw_data(value: Option<&Value>) -> ConvertResult<String> {
    let value = value
        .filter(|v| is_truthy(v))
        .ok_or_else(|| ConvertError::input_missing("rawData"))?;

    match value {
        Value::String(raw) if raw.contains(UNRESOLVED_TEMPLATE_MARKER) => {
            Err(ConvertError::UnresolvedTemplate { raw: raw.clone() })
        }
        Value::String(raw) => Ok(raw.clone()),
        Value::Array(items) => match items.first().and_then(|first| first.get("sseData")) {
            Some(inner) if is_truthy(inner) => {
                tracing::debug!("Unwrapping rawData[0].sseData");
                Ok(value_to_text(inner))
            }
            _ => Ok(coerce_text(value)),
        },
        Value::Object(object) => match object.get("sseData") {
            Some(inner) if is_truthy(inner) => {
                tracing::debug!("Unwrapping rawData.sseData");
                Ok(value_to_text(inner))
            }
            _ => Ok(value_to_text(value)),
        },
        other => Ok(coerce_text(other)),
    }
}

/// Loose stringification: arrays flatten to comma-joined elements and `null`
/// becomes empty, so `["event:a\n\n"]` yields the SSE text itself.
fn coerce_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Array(items) => items.iter().map(coerce_text).collect::<Vec<_>>().join(","),
        other => value_to_text(other),
    }
}

/// Required object argument.
pub fn required_object<'a>(value: Option<&'a Value>, parameter: &str) -> ConvertResult<&'a Value> {
    match value.filter(|v| is_truthy(v)) {
        Some(object) if object.is_object() => Ok(object),
        Some(_) => Err(ConvertError::invalid_input(format!(
            "{} must be a JSON object",
            parameter
        ))),
        None => Err(ConvertError::input_missing(parameter)),
    }
}

/// Required array argument.
pub fn required_array<'a>(value: Option<&'a Value>, parameter: &str) -> ConvertResult<&'a [Value]> {
    match value {
        Some(Value::Array(items)) => Ok(items.as_slice()),
        _ => Err(ConvertError::input_missing(format!(
            "{} (must be an array)",
            parameter
        ))),
    }
}
