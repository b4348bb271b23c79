//! `tools/call` implementations.
//!
//! Conversion failures are reported inside the tool result (`isError`), not
//! as JSON-RPC errors, so the calling agent can read the message.

use serde_json::{Map, Value};

use super::protocol::CallToolResult;
use crate::converter::params::{optional_text, required_array, required_object, resolve_raw_data};
use crate::converter::{generate_preset_data, Converter, InputFormat};
use crate::error::ConvertResult;

pub(super) type Arguments = Map<String, Value>;

pub(super) fn convert_sse_data(converter: &Converter, args: &Arguments) -> CallToolResult {
    match render_sse_data(converter, args) {
        Ok(text) => CallToolResult::text(text),
        Err(e) => {
            tracing::debug!("convert_sse_data failed: {}", e);
            CallToolResult::error(format!("Conversion failed: {}", e))
        }
    }
}

fn render_sse_data(converter: &Converter, args: &Arguments) -> ConvertResult<String> {
    let raw = resolve_raw_data(args.get("rawData"))?;
    let base_timestamp = optional_text(args.get("baseTimestamp"));
    let format = InputFormat::from_name(args.get("format").and_then(Value::as_str));

    let records = converter.convert_raw(&raw, format, base_timestamp.as_deref())?;
    Ok(format!(
        "Conversion succeeded! Generated {} events.\n\nResult:\n{}",
        records.len(),
        serde_json::to_string_pretty(&records)?
    ))
}

pub(super) fn convert_sse_object(converter: &Converter, args: &Arguments) -> CallToolResult {
    match render_sse_object(converter, args) {
        Ok(text) => CallToolResult::text(text),
        Err(e) => CallToolResult::error(format!("Object conversion failed: {}", e)),
    }
}

fn render_sse_object(converter: &Converter, args: &Arguments) -> ConvertResult<String> {
    let object = required_object(args.get("sseObject"), "sseObject")?;
    let timestamp = optional_text(args.get("timestamp"));

    let record = converter.convert_object_value(object, timestamp.as_deref())?;
    Ok(format!(
        "Object conversion succeeded!\n\nResult:\n{}",
        serde_json::to_string_pretty(&record)?
    ))
}

pub(super) fn generate_preset(args: &Arguments) -> CallToolResult {
    match render_preset(args) {
        Ok(text) => CallToolResult::text(text),
        Err(e) => CallToolResult::error(format!("Preset data generation failed: {}", e)),
    }
}

fn render_preset(args: &Arguments) -> ConvertResult<String> {
    let items = required_array(args.get("sseDataArray"), "sseDataArray")?;
    let preset = generate_preset_data(items, args.get("filename").and_then(Value::as_str))?;
    Ok(format!(
        "Preset data generated! Filename: {}\n\nFile content:\n{}\n\nSave this content to preset-data/{} to replay it.",
        preset.filename, preset.content, preset.filename
    ))
}
