//! Logging setup with optional daily-rotated file output
//!
//! Logs always go to stderr, since stdout carries the MCP protocol in
//! stdio mode. Tool invocations are logged through [`LoggingMiddleware`],
//! which scrubs credential-like argument keys first.

use crate::config::LoggingConfig;
use crate::error::{MiraieError, Result};
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

const DEFAULT_LOG_FILE: &str = "miraie-mcp.log";

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Filter directive, e.g. `info` or `miraie_mcp_rust=debug`
    pub filter: String,

    /// Optional file sink, rotated daily
    pub file_path: Option<PathBuf>,

    /// ANSI colours on stderr
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file_path: None,
            ansi: true,
        }
    }
}

impl From<&LoggingConfig> for LogConfig {
    fn from(config: &LoggingConfig) -> Self {
        Self {
            filter: config.level.clone(),
            file_path: config.file.clone(),
            ..Self::default()
        }
    }
}

impl LogConfig {
    /// Force debug output regardless of the configured filter
    pub fn with_debug(mut self, debug: bool) -> Self {
        if debug {
            self.filter = "debug".to_string();
        }
        self
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.filter).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Initialize the global subscriber
pub fn init_logging(config: LogConfig) -> Result<()> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.ansi)
        .with_target(true);

    let file_layer = match &config.file_path {
        Some(path) => {
            let directory = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            };
            std::fs::create_dir_all(&directory)?;
            let file_name = path
                .file_name()
                .map(|name| name.to_os_string())
                .unwrap_or_else(|| DEFAULT_LOG_FILE.into());
            let appender = tracing_appender::rolling::daily(directory, file_name);
            Some(fmt::layer().with_writer(appender).with_ansi(false))
        }
        None => None,
    };

    let subscriber = tracing_subscriber::registry()
        .with(config.env_filter())
        .with(stderr_layer)
        .with(file_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| MiraieError::config(format!("Failed to initialize logging: {e}")))
}

/// Logging middleware for MCP tools
pub struct LoggingMiddleware;

impl LoggingMiddleware {
    const SENSITIVE_KEYS: [&'static str; 6] =
        ["password", "secret", "token", "api_key", "auth", "credential"];

    pub fn log_tool_call(tool_name: &str, params: &Value) {
        let sanitized = Self::sanitize_params(params);
        tracing::info!(tool = tool_name, params = %sanitized, "MCP tool called");
    }

    pub fn log_tool_response(tool_name: &str, duration_ms: u64, success: bool) {
        if success {
            tracing::info!(tool = tool_name, duration_ms, "MCP tool completed");
        } else {
            tracing::warn!(tool = tool_name, duration_ms, "MCP tool returned an error");
        }
    }

    /// Replace values under credential-like keys, recursively
    pub fn sanitize_params(params: &Value) -> Value {
        match params {
            Value::Object(map) => {
                let sanitized: Map<String, Value> = map
                    .iter()
                    .map(|(key, value)| {
                        let lower = key.to_lowercase();
                        if Self::SENSITIVE_KEYS.iter().any(|s| lower.contains(s)) {
                            (key.clone(), Value::String("[REDACTED]".to_string()))
                        } else {
                            (key.clone(), Self::sanitize_params(value))
                        }
                    })
                    .collect();
                Value::Object(sanitized)
            }
            Value::Array(items) => Value::Array(items.iter().map(Self::sanitize_params).collect()),
            other => other.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sanitize_params() {
        let params = json!({
            "device_name": "Bedroom",
            "password": "hunter2",
            "nested": {"authToken": "abc", "fan_mode": "low"},
            "list": [{"api_key": "k"}]
        });
        let sanitized = LoggingMiddleware::sanitize_params(&params);
        assert_eq!(sanitized["device_name"], "Bedroom");
        assert_eq!(sanitized["password"], "[REDACTED]");
        assert_eq!(sanitized["nested"]["authToken"], "[REDACTED]");
        assert_eq!(sanitized["nested"]["fan_mode"], "low");
        assert_eq!(sanitized["list"][0]["api_key"], "[REDACTED]");
    }

    #[test]
    fn test_log_config_from_settings() {
        let settings = LoggingConfig {
            level: "warn".to_string(),
            file: Some(PathBuf::from("/tmp/miraie.log")),
        };
        let config = LogConfig::from(&settings);
        assert_eq!(config.filter, "warn");
        assert_eq!(config.with_debug(true).filter, "debug");
    }
}
