//! Server handler trait and per-request context

use super::error::Result;
use super::model::*;
use async_trait::async_trait;
use uuid::Uuid;

/// Protocol revisions this server can speak, newest first
pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2025-06-18", "2025-03-26", "2024-11-05"];

/// Server role marker type
#[derive(Debug, Clone)]
pub struct RoleServer;

/// Per-request context; the id ties handler logs to the dispatch log line
#[derive(Debug, Clone)]
pub struct RequestContext<Role> {
    pub request_id: Uuid,
    _role: std::marker::PhantomData<Role>,
}

impl<Role> RequestContext<Role> {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            _role: std::marker::PhantomData,
        }
    }
}

impl<Role> Default for RequestContext<Role> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handler for a tools-only MCP server
#[async_trait]
pub trait ServerHandler: Send + Sync + Clone + 'static {
    /// Name, version and capabilities announced during `initialize`
    fn get_info(&self) -> ServerInfo;

    /// Health check - responds to ping requests
    async fn ping(&self, _context: RequestContext<RoleServer>) -> Result<()> {
        Ok(())
    }

    /// Negotiate the protocol version: echo the client's if supported,
    /// otherwise answer with our newest.
    async fn initialize(
        &self,
        request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ServerInfo> {
        let mut info = self.get_info();
        if SUPPORTED_PROTOCOL_VERSIONS.contains(&request.protocol_version.as_str()) {
            info.protocol_version = request.protocol_version;
        }
        Ok(info)
    }

    async fn list_tools(
        &self,
        request: PaginatedRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult>;

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult>;
}
