//! JSON-RPC dispatch and newline-delimited transport

use super::error::{Error, Result};
use super::model::*;
use super::server::{RequestContext, RoleServer, ServerHandler};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};
use tracing::{debug, error, info, warn};

pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC request structure. A missing `id` marks a notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    pub fn new(id: impl Into<Value>, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Some(id.into()),
            method: method.into(),
            params,
        }
    }
}

/// JSON-RPC response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, error: &Error) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code: error.json_rpc_code(),
                message: error.to_string(),
                data: None,
            }),
        }
    }
}

/// JSON-RPC error structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Why the transport loop stopped
#[derive(Debug)]
pub enum QuitReason {
    ClientDisconnected,
    ServerError(Error),
}

/// Dispatches JSON-RPC messages to a `ServerHandler`
#[derive(Clone)]
pub struct McpService<H: ServerHandler> {
    handler: H,
}

impl<H: ServerHandler> McpService<H> {
    pub fn new(handler: H) -> Self {
        Self { handler }
    }

    /// Handle one request. Notifications never produce a response.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let context = RequestContext::<RoleServer>::new();
        debug!(
            request_id = %context.request_id,
            "Handling MCP request: {}", request.method
        );

        let Some(id) = request.id else {
            self.handle_notification(&request.method);
            return None;
        };

        let result = if request.jsonrpc == JSONRPC_VERSION {
            self.dispatch(&request.method, request.params, context).await
        } else {
            Err(Error::invalid_request(format!(
                "unsupported jsonrpc version '{}'",
                request.jsonrpc
            )))
        };
        Some(match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => {
                warn!("MCP request {} failed: {}", request.method, e);
                JsonRpcResponse::failure(id, &e)
            }
        })
    }

    fn handle_notification(&self, method: &str) {
        match method {
            "notifications/initialized" => info!("MCP client initialized"),
            "notifications/cancelled" => debug!("Client cancelled a request"),
            other => debug!("Ignoring notification: {}", other),
        }
    }

    async fn dispatch(
        &self,
        method: &str,
        params: Option<Value>,
        context: RequestContext<RoleServer>,
    ) -> Result<Value> {
        match method {
            "ping" => {
                self.handler.ping(context).await?;
                Ok(Value::Object(serde_json::Map::new()))
            }
            "initialize" => {
                let params: InitializeRequestParam = required_params(method, params)?;
                if let Some(client) = &params.client_info {
                    info!("MCP client connected: {} {}", client.name, client.version);
                }
                to_value(self.handler.initialize(params, context).await?)
            }
            "tools/list" => {
                let params: PaginatedRequestParam = optional_params(params)?;
                to_value(self.handler.list_tools(params, context).await?)
            }
            "tools/call" => {
                let params: CallToolRequestParam = required_params(method, params)?;
                to_value(self.handler.call_tool(params, context).await?)
            }
            other => Err(Error::method_not_found(other)),
        }
    }

    /// Handle one raw line of input, returning the serialized response if any
    pub async fn handle_line(&self, line: &str) -> Option<String> {
        let response = match serde_json::from_str::<JsonRpcRequest>(line) {
            Ok(request) => self.handle_request(request).await?,
            Err(e) => {
                warn!("Failed to parse JSON-RPC request: {}", e);
                JsonRpcResponse::failure(Value::Null, &Error::parse_error(e.to_string()))
            }
        };

        match serde_json::to_string(&response) {
            Ok(line) => Some(line),
            Err(e) => {
                error!("Failed to serialize response: {}", e);
                None
            }
        }
    }

    /// Serve newline-delimited JSON-RPC until the reader closes
    pub async fn serve<R, W>(self, reader: R, writer: W) -> Result<QuitReason>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines_read = FramedRead::new(reader, LinesCodec::new());
        let mut lines_write = FramedWrite::new(writer, LinesCodec::new());

        while let Some(line) = lines_read.next().await {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    error!("I/O error reading request: {}", e);
                    return Ok(QuitReason::ClientDisconnected);
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            debug!("Received request: {}", line);

            if let Some(response) = self.handle_line(line.trim()).await {
                debug!("Sending response: {}", response);
                if let Err(e) = lines_write.send(response).await {
                    error!("Failed to send response: {}", e);
                    return Ok(QuitReason::ServerError(Error::connection_error(
                        e.to_string(),
                    )));
                }
            }
        }

        info!("MCP client disconnected");
        Ok(QuitReason::ClientDisconnected)
    }

    /// Serve over the process's stdin/stdout
    pub async fn serve_stdio(self) -> Result<QuitReason> {
        info!("MCP service started on stdio transport");
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }
}

fn required_params<T: DeserializeOwned>(method: &str, params: Option<Value>) -> Result<T> {
    match params {
        Some(params) => {
            serde_json::from_value(params).map_err(|e| Error::invalid_params(e.to_string()))
        }
        None => Err(Error::invalid_params(format!(
            "Missing parameters for {method}"
        ))),
    }
}

fn optional_params<T: DeserializeOwned + Default>(params: Option<Value>) -> Result<T> {
    match params {
        None | Some(Value::Null) => Ok(T::default()),
        Some(params) => {
            serde_json::from_value(params).map_err(|e| Error::invalid_params(e.to_string()))
        }
    }
}

fn to_value<T: Serialize>(value: T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| Error::internal_error(e.to_string()))
}
