//! Preset file rendering.
//!
//! A preset file is the pretty-printed JSON array of records that a mock
//! server replays.

use serde::Serialize;
use serde_json::Value;

use crate::error::ConvertResult;
use crate::sse::NormalizedRecord;

pub const DEFAULT_PRESET_FILENAME: &str = "converted-data.json";

/// Generated preset file contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetFile {
    pub filename: String,
    pub content: String,
    pub item_count: usize,
}

/// Render already-converted items as a preset file.
///
/// Items are written as given; they are not re-validated.
pub fn generate_preset_data(items: &[Value], filename: Option<&str>) -> ConvertResult<PresetFile> {
    let filename = filename
        .filter(|f| !f.trim().is_empty())
        .unwrap_or(DEFAULT_PRESET_FILENAME);

    Ok(PresetFile {
        filename: filename.to_string(),
        content: serde_json::to_string_pretty(items)?,
        item_count: items.len(),
    })
}

/// Pretty-print records the way preset files store them.
pub fn render_records(records: &[NormalizedRecord]) -> ConvertResult<String> {
    Ok(serde_json::to_string_pretty(records)?)
}
