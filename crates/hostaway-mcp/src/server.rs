//! Stdio server speaking line-delimited JSON-RPC 2.0.
//!
//! Handles the tool subset of the Model Context Protocol: `initialize`,
//! `ping`, `tools/list` and `tools/call`. Requests are processed one at a
//! time; notifications get no response.

use anyhow::{Context, Result};
use hostaway_core::ApiClient;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use crate::tools::{call_tool, tool_definitions};

/// Protocol revision reported when the client doesn't ask for one
const PROTOCOL_VERSION: &str = "2024-11-05";

const SERVER_NAME: &str = "hostaway-mcp";

// JSON-RPC error codes
const PARSE_ERROR: i64 = -32700;
const INVALID_REQUEST: i64 = -32600;
const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;
const INTERNAL_ERROR: i64 = -32603;

#[derive(Debug, Deserialize)]
struct RpcRequest {
    #[serde(default)]
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Value,
}

#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

#[derive(Debug)]
struct RpcError {
    code: i64,
    message: String,
}

impl RpcError {
    fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

fn error_response(id: Value, error: RpcError) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": error.code, "message": error.message }
    })
}

pub struct Server {
    api: ApiClient,
}

impl Server {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Serve requests from stdin until it closes.
    pub async fn run(&self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        while let Some(line) = lines.next_line().await.context("Failed to read from stdin")? {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(response) = self.handle_line(&line).await {
                let mut out = serde_json::to_string(&response)?;
                out.push('\n');
                stdout
                    .write_all(out.as_bytes())
                    .await
                    .context("Failed to write to stdout")?;
                stdout.flush().await?;
            }
        }

        info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handle one message; `None` for notifications.
    pub async fn handle_line(&self, line: &str) -> Option<Value> {
        let message: Value = match serde_json::from_str(line) {
            Ok(message) => message,
            Err(e) => {
                return Some(error_response(
                    Value::Null,
                    RpcError::new(PARSE_ERROR, format!("Parse error: {}", e)),
                ))
            }
        };

        let request: RpcRequest = match serde_json::from_value(message) {
            Ok(request) => request,
            Err(e) => {
                return Some(error_response(
                    Value::Null,
                    RpcError::new(INVALID_REQUEST, format!("Invalid request: {}", e)),
                ))
            }
        };

        let Some(id) = request.id else {
            debug!(method = %request.method, "Notification received");
            return None;
        };

        Some(match self.dispatch(&request.method, request.params).await {
            Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
            Err(error) => error_response(id, error),
        })
    }

    async fn dispatch(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        debug!(method, "Request received");
        match method {
            "initialize" => {
                let version = params
                    .get("protocolVersion")
                    .and_then(Value::as_str)
                    .unwrap_or(PROTOCOL_VERSION);
                Ok(json!({
                    "protocolVersion": version,
                    "capabilities": { "tools": {} },
                    "serverInfo": {
                        "name": SERVER_NAME,
                        "version": env!("CARGO_PKG_VERSION"),
                    }
                }))
            }
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": tool_definitions() })),
            "tools/call" => {
                let call: CallParams = serde_json::from_value(params)
                    .map_err(|e| RpcError::new(INVALID_PARAMS, format!("Invalid params: {}", e)))?;
                let result = call_tool(&self.api, &call.name, call.arguments).await;
                serde_json::to_value(result)
                    .map_err(|e| RpcError::new(INTERNAL_ERROR, e.to_string()))
            }
            other => Err(RpcError::new(
                METHOD_NOT_FOUND,
                format!("Method not found: {}", other),
            )),
        }
    }
}
