//! Tool server speaking JSON-RPC 2.0 over newline-delimited stdio.
//!
//! Each input line is one request; each reply is written as one line.
//! Notifications get no reply. Logging must stay on stderr, since stdout
//! carries the protocol.

pub mod protocol;
mod tools;

use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::converter::Converter;
use crate::tools::{find_tool, CONVERT_SSE_DATA, CONVERT_SSE_OBJECT, GENERATE_PRESET_DATA, TOOLS};
use protocol::{
    error_codes, JsonRpcError, JsonRpcRequest, JsonRpcResponse, DEFAULT_PROTOCOL_VERSION,
};

/// Name announced in the `initialize` handshake.
pub const SERVER_NAME: &str = "sse-format-converter";

#[derive(Debug, Clone, Default)]
pub struct McpServer {
    converter: Converter,
}

impl McpServer {
    pub fn new(converter: Converter) -> Self {
        Self { converter }
    }

    /// Handle one input line. Returns the encoded reply, if any.
    pub fn handle_line(&self, line: &str) -> Option<String> {
        let response = match serde_json::from_str::<Value>(line) {
            Ok(message) => self.handle_message(message)?,
            Err(e) => {
                tracing::warn!("Unparseable request: {}", e);
                parse_error(e)
            }
        };
        encode(&response)
    }

    /// Well-formed JSON that is not a request gets Invalid Request, echoing
    /// whatever id it carries.
    fn handle_message(&self, message: Value) -> Option<JsonRpcResponse> {
        let id = message.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(message) {
            Ok(request) => self.handle_request(request),
            Err(e) => {
                tracing::warn!("Invalid request: {}", e);
                Some(JsonRpcResponse::failure(
                    id,
                    JsonRpcError::new(
                        error_codes::INVALID_REQUEST,
                        format!("Invalid request: {}", e),
                    ),
                ))
            }
        }
    }

    /// Dispatch a decoded request. Notifications yield `None`.
    pub fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        tracing::debug!(method = %request.method, "Tool server request");

        if request.is_notification() {
            tracing::debug!("Notification {} acknowledged", request.method);
            return None;
        }
        let id = request.id.clone().unwrap_or_default();

        if request.jsonrpc.as_deref().is_some_and(|v| v != protocol::JSONRPC_VERSION) {
            return Some(JsonRpcResponse::failure(
                id,
                JsonRpcError::new(error_codes::INVALID_REQUEST, "Unsupported jsonrpc version"),
            ));
        }

        let outcome = match request.method.as_str() {
            "initialize" => Ok(self.initialize(request.params.as_ref())),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({
                "tools": TOOLS.iter().map(|tool| tool.tool_descriptor()).collect::<Vec<_>>(),
            })),
            "tools/call" => self.call_tool(request.params.as_ref()),
            other => Err(JsonRpcError::new(
                error_codes::METHOD_NOT_FOUND,
                format!("Method not found: {}", other),
            )),
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    fn initialize(&self, params: Option<&Value>) -> Value {
        let protocol_version = params
            .and_then(|p| p.get("protocolVersion"))
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_PROTOCOL_VERSION);

        json!({
            "protocolVersion": protocol_version,
            "capabilities": { "tools": {} },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION"),
            },
        })
    }

    fn call_tool(&self, params: Option<&Value>) -> Result<Value, JsonRpcError> {
        let name = params
            .and_then(|p| p.get("name"))
            .and_then(Value::as_str)
            .ok_or_else(|| JsonRpcError::new(error_codes::INVALID_PARAMS, "Missing tool name"))?;

        let empty = tools::Arguments::new();
        let args = match params.and_then(|p| p.get("arguments")) {
            None | Some(Value::Null) => &empty,
            Some(Value::Object(args)) => args,
            Some(_) => {
                return Err(JsonRpcError::new(
                    error_codes::INVALID_PARAMS,
                    "Tool arguments must be an object",
                ))
            }
        };

        let tool = find_tool(name).ok_or_else(|| {
            JsonRpcError::new(error_codes::INVALID_PARAMS, format!("Unknown tool: {}", name))
        })?;

        tracing::info!(tool = tool.name, "Tool call");

        let result = match tool.name {
            CONVERT_SSE_DATA => tools::convert_sse_data(&self.converter, args),
            CONVERT_SSE_OBJECT => tools::convert_sse_object(&self.converter, args),
            GENERATE_PRESET_DATA => tools::generate_preset(args),
            other => {
                return Err(JsonRpcError::new(
                    error_codes::INTERNAL_ERROR,
                    format!("Tool {} has no handler", other),
                ))
            }
        };

        serde_json::to_value(result)
            .map_err(|e| JsonRpcError::new(error_codes::INTERNAL_ERROR, e.to_string()))
    }

    /// Serve requests from `reader` until end of input.
    ///
    /// A line that is not valid UTF-8 gets a Parse error reply; only a failing
    /// transport ends the loop early.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> color_eyre::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }
            let reply = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.handle_line(line),
                Err(e) => {
                    tracing::warn!("Request line is not valid UTF-8: {}", e);
                    encode(&parse_error(e))
                }
            };
            if let Some(mut reply) = reply {
                reply.push('\n');
                writer.write_all(reply.as_bytes()).await?;
                writer.flush().await?;
            }
        }
        tracing::info!("Tool server input closed");
        Ok(())
    }
}

fn parse_error(e: impl std::fmt::Display) -> JsonRpcResponse {
    JsonRpcResponse::failure(
        Value::Null,
        JsonRpcError::new(error_codes::PARSE_ERROR, format!("Parse error: {}", e)),
    )
}

fn encode(response: &JsonRpcResponse) -> Option<String> {
    match serde_json::to_string(response) {
        Ok(encoded) => Some(encoded),
        Err(e) => {
            tracing::error!("Failed to encode response: {}", e);
            None
        }
    }
}

/// Run the tool server on the process's stdin and stdout.
pub async fn run_stdio(converter: Converter) -> color_eyre::Result<()> {
    tracing::info!(
        strategy = converter.strategy().as_str(),
        "{} running on stdio",
        SERVER_NAME
    );
    let server = McpServer::new(converter);
    server
        .serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::FixedClock;

    fn server() -> McpServer {
        McpServer::new(Converter::new().with_clock(FixedClock(5)))
    }

    fn reply(line: &str) -> Value {
        let encoded = server().handle_line(line).expect("expected a reply");
        serde_json::from_str(&encoded).unwrap()
    }

    #[test]
    fn test_initialize_announces_tools() {
        let value = reply(r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#);
        assert_eq!(value["id"], 1);
        assert_eq!(value["result"]["serverInfo"]["name"], SERVER_NAME);
        assert_eq!(value["result"]["protocolVersion"], DEFAULT_PROTOCOL_VERSION);
        assert!(value["result"]["capabilities"]["tools"].is_object());
    }

    #[test]
    fn test_initialize_echoes_protocol_version() {
        let value = reply(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2025-03-26"}}"#,
        );
        assert_eq!(value["result"]["protocolVersion"], "2025-03-26");
    }

    #[test]
    fn test_notification_gets_no_reply() {
        let line = r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#;
        assert!(server().handle_line(line).is_none());
    }

    #[test]
    fn test_tools_list() {
        let value = reply(r#"{"jsonrpc":"2.0","id":"a","method":"tools/list"}"#);
        let tools = value["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 3);
        assert_eq!(tools[0]["name"], CONVERT_SSE_DATA);
        assert!(tools[0]["inputSchema"]["properties"]["rawData"].is_object());
    }

    #[test]
    fn test_unknown_method() {
        let value = reply(r#"{"jsonrpc":"2.0","id":2,"method":"resources/list"}"#);
        assert_eq!(value["error"]["code"], error_codes::METHOD_NOT_FOUND);
    }

    #[test]
    fn test_parse_error() {
        let value = reply("{not json");
        assert_eq!(value["error"]["code"], error_codes::PARSE_ERROR);
        assert_eq!(value["id"], Value::Null);
    }

    #[test]
    fn test_request_without_method_is_invalid_request() {
        let value = reply(r#"{"jsonrpc":"2.0","id":7}"#);
        assert_eq!(value["error"]["code"], error_codes::INVALID_REQUEST);
        assert_eq!(value["id"], 7);
    }

    #[test]
    fn test_non_object_message_is_invalid_request() {
        let value = reply("[1, 2]");
        assert_eq!(value["error"]["code"], error_codes::INVALID_REQUEST);
        assert_eq!(value["id"], Value::Null);
    }

    #[test]
    fn test_null_id_gets_a_reply() {
        let value = reply(r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#);
        assert_eq!(value["id"], Value::Null);
        assert_eq!(value["result"], json!({}));
    }

    #[test]
    fn test_wrong_version_request_is_rejected() {
        let value = reply(r#"{"jsonrpc":"1.0","id":8,"method":"ping"}"#);
        assert_eq!(value["id"], 8);
        assert_eq!(value["error"]["code"], error_codes::INVALID_REQUEST);
    }

    #[test]
    fn test_wrong_version_notification_gets_no_reply() {
        let line = r#"{"jsonrpc":"1.0","method":"notifications/initialized"}"#;
        assert!(server().handle_line(line).is_none());
    }

    #[test]
    fn test_unknown_tool_is_protocol_error() {
        let value = reply(
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"rm_rf","arguments":{}}}"#,
        );
        assert_eq!(value["error"]["code"], error_codes::INVALID_PARAMS);
        assert_eq!(value["error"]["message"], "Unknown tool: rm_rf");
    }

    #[test]
    fn test_tool_failure_is_result_error() {
        let value = reply(
            r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"convert_sse_data"}}"#,
        );
        assert_eq!(value["result"]["isError"], true);
        assert_eq!(
            value["result"]["content"][0]["text"],
            "Conversion failed: Missing required parameter: rawData"
        );
    }

    #[test]
    fn test_tool_call_success() {
        let value = reply(
            r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"convert_sse_data","arguments":{"rawData":"event:ping\n\n"}}}"#,
        );
        assert!(value["result"].get("isError").is_none());
        let text = value["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("Generated 1 events"));
        assert!(text.contains("\"timestamp\": \"5\""));
    }

    #[tokio::test]
    async fn test_serve_writes_one_line_per_reply() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            "\n",
        );
        let mut output = Vec::new();
        server().serve(input.as_bytes(), &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["id"], 1);
        assert_eq!(first["result"], json!({}));
    }

    #[tokio::test]
    async fn test_serve_survives_invalid_utf8_line() {
        let input: &[u8] = b"\xff\xfe garbage\n{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n";
        let mut output = Vec::new();
        server().serve(input, &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["id"], Value::Null);
        assert_eq!(lines[0]["error"]["code"], error_codes::PARSE_ERROR);
        assert_eq!(lines[1]["id"], 1);
        assert_eq!(lines[1]["result"], json!({}));
    }

    #[tokio::test]
    async fn test_serve_handles_crlf_and_missing_final_newline() {
        let input = "{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\r\n{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"ping\"}";
        let mut output = Vec::new();
        server().serve(input.as_bytes(), &mut output).await.unwrap();
        assert_eq!(String::from_utf8(output).unwrap().lines().count(), 2);
    }
}
