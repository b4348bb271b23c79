//! Batch conversion with per-item error collection.

use serde::Serialize;
use serde_json::Value;

use super::{Converter, InputFormat};
use crate::error::{ConvertError, ConvertResult};
use crate::sse::NormalizedRecord;

/// A batch item that failed to convert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchItemError {
    /// Position of the item in the submitted list
    pub index: usize,
    pub item: Value,
    pub error: String,
}

/// Result of converting a heterogeneous list of items.
///
/// Every item either succeeds or lands in `errors`, so
/// `success_count + error_count() == total_items`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    /// Records from all successful items, in item order
    pub records: Vec<NormalizedRecord>,
    pub total_items: usize,
    pub success_count: usize,
    pub errors: Vec<BatchItemError>,
}

impl BatchOutcome {
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// True only when no item failed.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Converter {
    /// Convert each item independently.
    ///
    /// Strings are converted according to `format`, objects with the object
    /// rules. Anything else is recorded as an error for that index and the
    /// batch continues.
    pub fn convert_batch(
        &self,
        items: &[Value],
        format: InputFormat,
        base_timestamp: Option<&str>,
    ) -> BatchOutcome {
        let mut outcome = BatchOutcome {
            total_items: items.len(),
            ..BatchOutcome::default()
        };

        for (index, item) in items.iter().enumerate() {
            match self.convert_item(item, format, base_timestamp) {
                Ok(records) => {
                    outcome.success_count += 1;
                    outcome.records.extend(records);
                }
                Err(err) => {
                    tracing::warn!(index, code = err.error_code(), "Batch item failed: {}", err);
                    outcome.errors.push(BatchItemError {
                        index,
                        item: item.clone(),
                        error: err.to_string(),
                    });
                }
            }
        }

        outcome
    }

    fn convert_item(
        &self,
        item: &Value,
        format: InputFormat,
        base_timestamp: Option<&str>,
    ) -> ConvertResult<Vec<NormalizedRecord>> {
        match item {
            Value::String(raw) => self.convert_raw(raw, format, base_timestamp),
            Value::Object(object) => Ok(vec![self.convert_object(object, base_timestamp)]),
            _ => Err(ConvertError::invalid_input("Item must be a string or object")),
        }
    }
}
