//! Error types for the MirAIe gateways
//!
//! A single error enum is shared by the device layer, the control service
//! and both gateways. Each gateway maps the variants onto its own error
//! channel (HTTP status codes, MCP text blocks or JSON-RPC errors).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for MirAIe operations
pub type Result<T> = std::result::Result<T, MiraieError>;

/// Error kinds raised by the device layer and the gateways
#[derive(Error, Debug)]
pub enum MiraieError {
    /// Connection errors (session could not be opened or was lost)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Authentication errors
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Device control errors reported by the device library
    #[error("Device control error: {0}")]
    DeviceControl(String),

    /// Invalid input errors (out-of-range values, unknown enum strings)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A named device does not exist in the current session
    #[error("Device '{0}' not found")]
    DeviceNotFound(String),

    /// The device manager was used outside an open session
    #[error("Device manager not initialized: {0}")]
    NotInitialized(String),

    /// The device does not support the requested operation
    #[error("{operation} control not available for {device}")]
    Unsupported { device: String, operation: String },

    /// MCP protocol errors
    #[error("MCP protocol error: {0}")]
    Mcp(String),

    /// JSON errors
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Machine-readable error codes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConnectionLost,
    InvalidCredentials,
    ConfigurationInvalid,
    DeviceNotFound,
    DeviceControlFailed,
    DeviceTypeUnsupported,
    InvalidInput,
    ParsingFailed,
    ProtocolViolation,
    UnexpectedState,
    InternalError,
}

impl ErrorCode {
    /// Get numeric error code
    pub fn as_number(&self) -> u32 {
        match self {
            ErrorCode::ConnectionLost => 1003,
            ErrorCode::InvalidCredentials => 1101,
            ErrorCode::ConfigurationInvalid => 1202,
            ErrorCode::DeviceNotFound => 1301,
            ErrorCode::DeviceControlFailed => 1303,
            ErrorCode::DeviceTypeUnsupported => 1304,
            ErrorCode::ParsingFailed => 1401,
            ErrorCode::InvalidInput => 1402,
            ErrorCode::ProtocolViolation => 1701,
            ErrorCode::UnexpectedState => 1903,
            ErrorCode::InternalError => 1901,
        }
    }

    /// Get error category
    pub fn category(&self) -> &'static str {
        match self.as_number() {
            1000..=1099 => "connection",
            1100..=1199 => "authentication",
            1200..=1299 => "configuration",
            1300..=1399 => "device",
            1400..=1499 => "data",
            1700..=1799 => "protocol",
            1900..=1999 => "internal",
            _ => "unknown",
        }
    }
}

impl MiraieError {
    /// Create a connection error
    pub fn connection<S: Into<String>>(msg: S) -> Self {
        Self::Connection(msg.into())
    }

    /// Create an authentication error
    pub fn authentication<S: Into<String>>(msg: S) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a device control error
    pub fn device_control<S: Into<String>>(msg: S) -> Self {
        Self::DeviceControl(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a device-not-found error for the given friendly name
    pub fn device_not_found<S: Into<String>>(name: S) -> Self {
        Self::DeviceNotFound(name.into())
    }

    /// Create a usage error for access outside an open session
    pub fn not_initialized<S: Into<String>>(msg: S) -> Self {
        Self::NotInitialized(msg.into())
    }

    /// Create an unsupported-capability error
    pub fn unsupported<D: Into<String>, O: Into<String>>(device: D, operation: O) -> Self {
        Self::Unsupported {
            device: device.into(),
            operation: operation.into(),
        }
    }

    /// Create an MCP protocol error
    pub fn mcp<S: Into<String>>(msg: S) -> Self {
        Self::Mcp(msg.into())
    }

    /// Map the error onto its machine-readable code
    pub fn to_error_code(&self) -> ErrorCode {
        match self {
            MiraieError::Connection(_) => ErrorCode::ConnectionLost,
            MiraieError::Authentication(_) => ErrorCode::InvalidCredentials,
            MiraieError::Config(_) => ErrorCode::ConfigurationInvalid,
            MiraieError::DeviceControl(_) => ErrorCode::DeviceControlFailed,
            MiraieError::InvalidInput(_) => ErrorCode::InvalidInput,
            MiraieError::DeviceNotFound(_) => ErrorCode::DeviceNotFound,
            MiraieError::NotInitialized(_) => ErrorCode::UnexpectedState,
            MiraieError::Unsupported { .. } => ErrorCode::DeviceTypeUnsupported,
            MiraieError::Mcp(_) => ErrorCode::ProtocolViolation,
            MiraieError::Json(_) => ErrorCode::ParsingFailed,
            MiraieError::Io(_) => ErrorCode::InternalError,
        }
    }

    /// Whether the caller supplied bad input
    pub fn is_client_error(&self) -> bool {
        matches!(self, MiraieError::InvalidInput(_))
    }

    /// Whether the error names a device that does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, MiraieError::DeviceNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_not_found_message() {
        let error = MiraieError::device_not_found("Bedroom");
        assert_eq!(error.to_string(), "Device 'Bedroom' not found");
        assert!(error.is_not_found());
        assert_eq!(error.to_error_code(), ErrorCode::DeviceNotFound);
    }

    #[test]
    fn test_unsupported_message() {
        let error = MiraieError::unsupported("Hall AC", "Preset mode");
        assert_eq!(
            error.to_string(),
            "Preset mode control not available for Hall AC"
        );
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(ErrorCode::DeviceNotFound.category(), "device");
        assert_eq!(ErrorCode::InvalidInput.category(), "data");
        assert_eq!(ErrorCode::InvalidCredentials.category(), "authentication");
        assert_eq!(
            MiraieError::invalid_input("x").to_error_code().as_number(),
            1402
        );
    }
}
