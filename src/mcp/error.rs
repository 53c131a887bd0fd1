//! JSON-RPC level errors for the MCP layer

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// MCP protocol result type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that surface as JSON-RPC error objects
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Error {
    /// Invalid request format
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Method not found
    #[error("Method not found: {method}")]
    MethodNotFound { method: String },

    /// Invalid parameters
    #[error("Invalid parameters: {message}")]
    InvalidParams { message: String },

    /// Internal server error
    #[error("Internal error: {message}")]
    InternalError { message: String },

    /// Parse error
    #[error("Parse error: {message}")]
    ParseError { message: String },

    /// Transport error
    #[error("Connection error: {message}")]
    ConnectionError { message: String },
}

impl Error {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn method_not_found(method: impl Into<String>) -> Self {
        Self::MethodNotFound {
            method: method.into(),
        }
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams {
            message: message.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    pub fn connection_error(message: impl Into<String>) -> Self {
        Self::ConnectionError {
            message: message.into(),
        }
    }

    /// Get the JSON-RPC error code for this error
    pub fn json_rpc_code(&self) -> i32 {
        match self {
            Error::InvalidRequest { .. } => -32600,
            Error::MethodNotFound { .. } => -32601,
            Error::InvalidParams { .. } => -32602,
            Error::InternalError { .. } => -32603,
            Error::ParseError { .. } => -32700,
            Error::ConnectionError { .. } => -32001,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::connection_error(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::parse_error(err.to_string())
    }
}

impl From<Error> for crate::error::MiraieError {
    fn from(err: Error) -> Self {
        crate::error::MiraieError::mcp(err.to_string())
    }
}
