//! Request and response bodies of the HTTP service.
//!
//! Request fields are kept as raw JSON values: callers are workflow tools
//! that send numbers for timestamps, wrap text in objects, and so on. The
//! handlers normalize them through [`crate::converter::params`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::converter::{BatchItemError, InputFormat, PresetFile};
use crate::sse::NormalizedRecord;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertSseDataRequest {
    pub raw_data: Option<Value>,
    pub base_timestamp: Option<Value>,
    pub format: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertSseObjectRequest {
    pub sse_object: Option<Value>,
    pub timestamp: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePresetRequest {
    pub sse_data_array: Option<Value>,
    pub filename: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchConvertRequest {
    pub items: Option<Value>,
    pub base_timestamp: Option<Value>,
    pub format: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ToolsResponse {
    pub tools: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct ConvertSseDataResponse {
    pub success: bool,
    pub data: Vec<NormalizedRecord>,
    pub count: usize,
    pub format: InputFormat,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ConvertSseObjectResponse {
    pub success: bool,
    pub data: NormalizedRecord,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct GeneratePresetResponse {
    pub success: bool,
    pub data: PresetFile,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchConvertResponse {
    pub success: bool,
    pub data: Vec<NormalizedRecord>,
    pub total_items: usize,
    pub success_count: usize,
    pub error_count: usize,
    /// Records produced across all successful items
    pub record_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<BatchItemError>>,
    pub message: String,
}

/// Failure envelope shared by every route.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_data_received: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_endpoints: Option<Vec<&'static str>>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            raw_data_received: None,
            available_endpoints: None,
        }
    }
}
