//! Catalog of the conversion operations exposed by the adapters.
//!
//! The HTTP service lists these at `GET /api/tools` and the tool server
//! advertises them through `tools/list` with JSON-schema input descriptions.
//! Both views are rendered from [`TOOLS`].

use serde_json::{json, Map, Value};

pub const CONVERT_SSE_DATA: &str = "convert_sse_data";
pub const CONVERT_SSE_OBJECT: &str = "convert_sse_object";
pub const GENERATE_PRESET_DATA: &str = "generate_preset_data";

/// JSON type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Object,
    /// Array of objects
    Array,
}

impl ParamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Object => "object",
            ParamKind::Array => "array",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ToolParam {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub description: &'static str,
    /// Allowed values, empty when unrestricted
    pub allowed: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    /// HTTP route serving this tool
    pub endpoint: &'static str,
    pub params: &'static [ToolParam],
}

pub const TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: CONVERT_SSE_DATA,
        description: "Convert a raw SSE data stream into replayable {timestamp, value} records",
        endpoint: "/api/convert/sse-data",
        params: &[
            ToolParam {
                name: "rawData",
                kind: ParamKind::String,
                required: true,
                description: "Raw SSE text, e.g. \"event:message\\ndata:{\\\"sseId\\\":\\\"123\\\"}\\n\\n\"",
                allowed: &[],
            },
            ToolParam {
                name: "baseTimestamp",
                kind: ParamKind::String,
                required: false,
                description: "Fallback timestamp, defaults to the current time",
                allowed: &[],
            },
            ToolParam {
                name: "format",
                kind: ParamKind::String,
                required: false,
                description: "Input format: single (one stream), multiple (same as single), object (JSON object)",
                allowed: &["single", "multiple", "object"],
            },
        ],
    },
    ToolSpec {
        name: CONVERT_SSE_OBJECT,
        description: "Convert an SSE event object into a replayable record",
        endpoint: "/api/convert/sse-object",
        params: &[
            ToolParam {
                name: "sseObject",
                kind: ParamKind::Object,
                required: true,
                description: "Event object with event, data, sseId and other fields",
                allowed: &[],
            },
            ToolParam {
                name: "timestamp",
                kind: ParamKind::String,
                required: false,
                description: "Fallback timestamp",
                allowed: &[],
            },
        ],
    },
    ToolSpec {
        name: GENERATE_PRESET_DATA,
        description: "Render converted records as preset file content",
        endpoint: "/api/generate/preset-data",
        params: &[
            ToolParam {
                name: "sseDataArray",
                kind: ParamKind::Array,
                required: true,
                description: "Converted SSE records",
                allowed: &[],
            },
            ToolParam {
                name: "filename",
                kind: ParamKind::String,
                required: false,
                description: "Name of the generated file",
                allowed: &[],
            },
        ],
    },
];

/// Look up a tool by name.
pub fn find_tool(name: &str) -> Option<&'static ToolSpec> {
    TOOLS.iter().find(|tool| tool.name == name)
}

impl ToolSpec {
    /// Entry for the HTTP `GET /api/tools` listing.
    pub fn http_descriptor(&self) -> Value {
        let parameters: Map<String, Value> = self
            .params
            .iter()
            .map(|param| {
                let mut entry = json!({
                    "type": param.kind.as_str(),
                    "required": param.required,
                    "description": param.description,
                });
                if !param.allowed.is_empty() {
                    entry["enum"] = json!(param.allowed);
                }
                (param.name.to_string(), entry)
            })
            .collect();

        json!({
            "name": self.name,
            "description": self.description,
            "endpoint": self.endpoint,
            "method": "POST",
            "parameters": parameters,
        })
    }

    /// JSON schema describing the tool arguments.
    pub fn input_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .params
            .iter()
            .map(|param| {
                let mut schema = json!({
                    "type": param.kind.as_str(),
                    "description": param.description,
                });
                if param.kind == ParamKind::Array {
                    schema["items"] = json!({ "type": "object" });
                }
                if !param.allowed.is_empty() {
                    schema["enum"] = json!(param.allowed);
                }
                (param.name.to_string(), schema)
            })
            .collect();

        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|param| param.required)
            .map(|param| param.name)
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Entry for the tool server's `tools/list` result.
    pub fn tool_descriptor(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema(),
        })
    }
}
