use super::tool_catalog::{tool_descriptors, TOOL_NAMES};
use crate::ports::inbound::CatalogToolsPort;
use crate::shared::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

/// MCP Protocol Version
pub const MCP_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "pyxis-mcp";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

const PARSE_ERROR: i32 = -32700;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;

#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Value,
}

#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    jsonrpc: &'static str,
    id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

impl JsonRpcResponse {
    fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

fn parse_arguments<A: DeserializeOwned>(tool: &str, arguments: Value) -> std::result::Result<A, String> {
    serde_json::from_value(arguments)
        .map_err(|e| format!("Invalid arguments for {}: {}", tool, e))
}

/// McpServer exposes a [`CatalogToolsPort`] over newline-delimited JSON-RPC
///
/// Each input line is one request; each answer is written as one line.
/// Notifications (requests without an id) are handled but never answered.
///
/// # Type Parameters
/// * `T` - CatalogToolsPort implementation that executes the tools
pub struct McpServer<T> {
    tools: T,
}

impl<T: CatalogToolsPort> McpServer<T> {
    pub fn new(tools: T) -> Self {
        Self { tools }
    }

    /// Serves stdin/stdout until EOF
    pub async fn run(&self) -> Result<()> {
        let reader = tokio::io::BufReader::new(tokio::io::stdin());
        self.serve(reader, tokio::io::stdout()).await
    }

    /// Serves any line-oriented stream until EOF
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("MCP server starting on stdio");
        let mut line = String::new();

        loop {
            line.clear();
            let bytes_read = reader.read_line(&mut line).await?;
            if bytes_read == 0 {
                info!("EOF received, shutting down");
                break;
            }

            if let Some(response) = self.handle_line(&line).await {
                debug!("Sending: {}", response);
                writer.write_all(response.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }

        Ok(())
    }

    /// Handles one raw input line, returning the serialized answer if one is due
    pub async fn handle_line(&self, line: &str) -> Option<String> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        debug!("Received: {}", trimmed);

        let response = match serde_json::from_str::<JsonRpcRequest>(trimmed) {
            Ok(request) if request.id.is_none() => {
                debug!("Handling notification: {}", request.method);
                return None;
            }
            Ok(request) => self.handle_request(request).await,
            Err(e) => {
                // Without a usable id there is nobody to answer
                let id = serde_json::from_str::<Value>(trimmed)
                    .ok()
                    .and_then(|raw| raw.get("id").cloned())
                    .filter(|id| !id.is_null());
                match id {
                    Some(id) => {
                        JsonRpcResponse::error(Some(id), PARSE_ERROR, format!("Parse error: {}", e))
                    }
                    None => {
                        debug!("Parse error without id, not responding: {}", e);
                        return None;
                    }
                }
            }
        };

        match serde_json::to_string(&response) {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::error!("Failed to serialize response: {}", e);
                None
            }
        }
    }

    async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id;

        match request.method.as_str() {
            "initialize" => self.handle_initialize(id, &request.params),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::success(id, json!({ "tools": tool_descriptors() })),
            "tools/call" => self.handle_tool_call(id, request.params).await,
            other => {
                JsonRpcResponse::error(id, METHOD_NOT_FOUND, format!("Method not found: {}", other))
            }
        }
    }

    fn handle_initialize(&self, id: Option<Value>, params: &Value) -> JsonRpcResponse {
        if let Some(name) = params
            .get("clientInfo")
            .and_then(|info| info.get("name"))
            .and_then(Value::as_str)
        {
            info!("MCP client connected: {}", name);
        }

        JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": MCP_VERSION,
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": SERVER_VERSION
                },
                "capabilities": {
                    "tools": {}
                }
            }),
        )
    }

    async fn handle_tool_call(&self, id: Option<Value>, params: Value) -> JsonRpcResponse {
        let start_time = std::time::Instant::now();
        let tool_name = params.get("name").and_then(Value::as_str).unwrap_or("");
        let arguments = match params.get("arguments") {
            None | Some(Value::Null) => json!({}),
            Some(arguments) => arguments.clone(),
        };

        let result = self.dispatch(tool_name, arguments).await;
        info!(
            tool = tool_name,
            duration_ms = start_time.elapsed().as_millis() as u64,
            success = result.is_ok(),
            "Tool execution completed"
        );

        match result {
            Ok(text) => JsonRpcResponse::success(
                id,
                json!({
                    "content": [{
                        "type": "text",
                        "text": text
                    }]
                }),
            ),
            Err(message) => JsonRpcResponse::error(id, INVALID_PARAMS, message),
        }
    }

    /// Runs a tool by name. `Err` only for unknown tools or malformed arguments;
    /// catalog failures are already part of the returned text.
    async fn dispatch(&self, tool: &str, arguments: Value) -> std::result::Result<String, String> {
        let text = match tool {
            "search_images" => {
                self.tools
                    .search_images(parse_arguments(tool, arguments)?)
                    .await
            }
            "get_image_details" => {
                self.tools
                    .get_image_details(parse_arguments(tool, arguments)?)
                    .await
            }
            "get_image_vulnerabilities" => {
                self.tools
                    .get_image_vulnerabilities(parse_arguments(tool, arguments)?)
                    .await
            }
            "search_certification_projects" => {
                self.tools
                    .search_certification_projects(parse_arguments(tool, arguments)?)
                    .await
            }
            "get_certification_project_details" => {
                self.tools
                    .get_certification_project_details(parse_arguments(tool, arguments)?)
                    .await
            }
            "search_operators" => {
                self.tools
                    .search_operators(parse_arguments(tool, arguments)?)
                    .await
            }
            "get_operator_details" => {
                self.tools
                    .get_operator_details(parse_arguments(tool, arguments)?)
                    .await
            }
            "search_repositories" => {
                self.tools
                    .search_repositories(parse_arguments(tool, arguments)?)
                    .await
            }
            _ => {
                return Err(format!(
                    "Unknown tool: {} (available: {})",
                    tool,
                    TOOL_NAMES.join(", ")
                ))
            }
        };
        Ok(text)
    }
}
