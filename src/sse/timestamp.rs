//! Timestamp derivation for normalized records.
//!
//! Two strategies exist:
//!
//! - [`TimestampStrategy::PayloadDerived`] (default) takes the `timestamp`
//!   field embedded in the JSON payload, then the caller's fallback, then the
//!   clock.
//! - [`TimestampStrategy::Synthetic`] ignores payloads and produces a
//!   monotonically increasing series seeded from the fallback (or the clock),
//!   spaced by a random increment. Useful for replay pacing.
//!
//! JSON values are judged the way upstream producers judge them: `null`,
//! `false`, `0` and `""` count as absent.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::traits::{Clock, JitterSource};

/// How a flushed event gets its timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampStrategy {
    /// Embedded `timestamp` > fallback > clock.
    #[default]
    PayloadDerived,
    /// Fallback-or-clock seed, advanced by jitter after every record.
    Synthetic,
}

impl TimestampStrategy {
    /// Parse a user-facing strategy name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "payload" | "payload_derived" | "payload-derived" => Some(Self::PayloadDerived),
            "synthetic" => Some(Self::Synthetic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PayloadDerived => "payload",
            Self::Synthetic => "synthetic",
        }
    }
}

/// Whether a JSON value counts as present.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render a JSON value as plain text: strings unquoted, numbers with their
/// original digits, containers as compact JSON.
pub(crate) fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// Treat an empty fallback the same as no fallback.
pub(crate) fn non_empty(fallback: Option<&str>) -> Option<&str> {
    fallback.filter(|f| !f.is_empty())
}

/// Extract the `timestamp` field from a JSON payload, if there is a usable one.
///
/// Non-JSON payloads and payloads that are not objects yield `None`.
pub fn timestamp_from_payload(payload: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(payload).ok()?;
    parsed
        .get("timestamp")
        .filter(|ts| is_truthy(ts))
        .map(value_to_text)
}

/// Fallback chain shared by the parser and the object converter.
pub(crate) fn fallback_or_now(fallback: Option<&str>, clock: &dyn Clock) -> String {
    match non_empty(fallback) {
        Some(fallback) => fallback.to_string(),
        None => clock.now_millis().to_string(),
    }
}

/// Per-parse timestamp state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Stamper {
    PayloadDerived { fallback: Option<String> },
    Synthetic { next: i64 },
}

impl Stamper {
    pub(crate) fn new(
        strategy: TimestampStrategy,
        fallback: Option<&str>,
        clock: &dyn Clock,
    ) -> Self {
        let fallback = non_empty(fallback);
        match strategy {
            TimestampStrategy::PayloadDerived => Stamper::PayloadDerived {
                fallback: fallback.map(str::to_string),
            },
            TimestampStrategy::Synthetic => {
                let seed = fallback.and_then(|f| f.trim().parse::<i64>().ok());
                if seed.is_none() && fallback.is_some() {
                    tracing::debug!(
                        "Synthetic seed {:?} is not epoch milliseconds, using clock",
                        fallback
                    );
                }
                Stamper::Synthetic {
                    next: seed.unwrap_or_else(|| clock.now_millis()),
                }
            }
        }
    }

    /// Timestamp for the event being flushed.
    pub(crate) fn stamp(
        &mut self,
        payload: Option<&str>,
        clock: &dyn Clock,
        jitter: &mut dyn JitterSource,
    ) -> String {
        match self {
            Stamper::PayloadDerived { fallback } => payload
                .filter(|p| !p.is_empty())
                .and_then(timestamp_from_payload)
                .unwrap_or_else(|| fallback_or_now(fallback.as_deref(), clock)),
            Stamper::Synthetic { next } => {
                let current = *next;
                *next = current.saturating_add(jitter.next_increment());
                current.to_string()
            }
        }
    }
}
