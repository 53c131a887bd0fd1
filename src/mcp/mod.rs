//! Minimal Model Context Protocol server layer
//!
//! JSON-RPC 2.0 over newline-delimited stdio, exposing the `initialize`,
//! `ping`, `tools/list` and `tools/call` methods.

pub mod error;
pub mod model;
pub mod server;
pub mod service;

pub use error::Error;
pub use model::*;
pub use server::{RequestContext, RoleServer, ServerHandler, SUPPORTED_PROTOCOL_VERSIONS};
pub use service::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, McpService, QuitReason};
