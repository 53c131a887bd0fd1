//! MCP server for MirAIe air conditioners
//!
//! Implements the tools-only [`ServerHandler`] on top of the shared
//! control service. Tool failures never become protocol errors; they are
//! returned as text blocks flagged `isError`.

use crate::config::McpConfig;
use crate::logging::LoggingMiddleware;
use crate::mcp::error::Result;
use crate::mcp::{
    CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
    PaginatedRequestParam, RequestContext, RoleServer, ServerCapabilities, ServerHandler,
    ServerInfo, SUPPORTED_PROTOCOL_VERSIONS,
};
use crate::services::ControlService;
use crate::tools::{self, ToolContext};
use serde_json::Value;
use std::time::Instant;
use tracing::debug;

#[derive(Clone)]
pub struct MiraieMcpServer {
    tools: ToolContext,
    config: McpConfig,
}

impl MiraieMcpServer {
    pub fn new(control: ControlService, config: McpConfig) -> Self {
        Self {
            tools: ToolContext::new(control),
            config,
        }
    }

    pub fn control(&self) -> &ControlService {
        &self.tools.control
    }
}

#[async_trait::async_trait]
impl ServerHandler for MiraieMcpServer {
    async fn ping(&self, _context: RequestContext<RoleServer>) -> Result<()> {
        debug!("Ping request received");
        Ok(())
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: SUPPORTED_PROTOCOL_VERSIONS[0].to_string(),
            capabilities: ServerCapabilities::tools_only(),
            server_info: Implementation {
                name: self.config.name.clone(),
                version: self.config.version.clone(),
            },
            instructions: Some(
                "Controls Panasonic MirAIe air conditioners. \
                 Turn units on or off, set temperature, fan, HVAC, preset and swing modes, \
                 and inspect device status."
                    .into(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: PaginatedRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult> {
        Ok(ListToolsResult {
            tools: tools::tool_definitions(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult> {
        let params = request
            .arguments
            .clone()
            .map(Value::Object)
            .unwrap_or(Value::Null);
        LoggingMiddleware::log_tool_call(&request.name, &params);
        debug!(request_id = %context.request_id, "Dispatching tool {}", request.name);

        let started = Instant::now();
        let output = tools::call_tool(&self.tools, &request.name, request.arguments).await;
        LoggingMiddleware::log_tool_response(
            &request.name,
            started.elapsed().as_millis() as u64,
            !output.is_error,
        );

        Ok(if output.is_error {
            CallToolResult::error_text(output.text)
        } else {
            CallToolResult::success(vec![Content::text(output.text)])
        })
    }
}
