//! Configuration management for the MirAIe gateways
//!
//! Values are resolved in order: built-in defaults, an optional TOML file,
//! environment variables, then command line flags (applied by the binary).
//! `validate` runs once at startup, before the device session is opened.

pub mod credentials;

use crate::client::simulated::{FleetConfig, SimulatedConnector};
use crate::client::MiraieConnector;
use crate::error::{MiraieError, Result};
use credentials::{AuthType, MiraieCredentials};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::{env, time::Duration};

/// Lowest temperature accepted by the gateways, in °C
pub const MIN_TEMPERATURE: i64 = 16;
/// Highest temperature accepted by the gateways, in °C
pub const MAX_TEMPERATURE: i64 = 30;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// MirAIe account configuration
    pub miraie: MiraieConfig,

    /// REST gateway configuration
    pub http: HttpConfig,

    /// MCP server identification
    pub mcp: McpConfig,

    /// Control service tuning
    pub control: ControlConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// MirAIe account configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MiraieConfig {
    /// Mobile number, email or username
    pub login_id: Option<String>,

    /// Account password
    #[serde(skip_serializing)]
    pub password: Option<String>,

    /// Kind of login id
    pub auth_type: AuthType,

    /// Simulated fleet definition used in offline mode
    pub fleet_file: Option<PathBuf>,
}

/// REST gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
    /// Permissive CORS for browser clients
    pub enable_cors: bool,
}

/// MCP server identification
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct McpConfig {
    /// Server name reported in `initialize`
    pub name: String,

    /// Server version reported in `initialize`
    pub version: String,
}

/// Control service tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Pause between the steps of the test sequence
    #[serde(with = "humantime_serde")]
    pub test_step_delay: Duration,

    /// Target temperature used by the test sequence
    pub test_temperature: i64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log to file (path); rotated daily
    pub file: Option<PathBuf>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            enable_cors: false,
        }
    }
}

impl Default for McpConfig {
    fn default() -> Self {
        Self {
            name: "panasonic-miraie-ac".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            test_step_delay: Duration::from_secs(2),
            test_temperature: 24,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from an optional TOML file, then the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            MiraieError::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        toml::from_str(&raw)
            .map_err(|e| MiraieError::config(format!("Invalid config {}: {e}", path.display())))
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Override values from environment variables
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(login_id) = env::var("MIRAIE_LOGIN_ID") {
            self.miraie.login_id = Some(login_id);
        }

        if let Ok(password) = env::var("MIRAIE_PASSWORD") {
            self.miraie.password = Some(password);
        }

        if let Ok(auth_type) = env::var("MIRAIE_AUTH_TYPE") {
            self.miraie.auth_type = auth_type.parse()?;
        }

        if let Ok(fleet_file) = env::var("MIRAIE_FLEET_FILE") {
            self.miraie.fleet_file = Some(PathBuf::from(fleet_file));
        }

        if let Ok(host) = env::var("MIRAIE_HTTP_HOST") {
            self.http.host = host;
        }

        if let Ok(port) = env::var("MIRAIE_HTTP_PORT") {
            self.http.port = port
                .parse()
                .map_err(|e| MiraieError::config(format!("Invalid MIRAIE_HTTP_PORT: {e}")))?;
        }

        if let Ok(log_file) = env::var("MIRAIE_LOG_FILE") {
            self.logging.file = Some(PathBuf::from(log_file));
        }

        if let Ok(level) = env::var("RUST_LOG") {
            self.logging.level = level;
        }

        Ok(())
    }

    /// Credentials assembled from the account section
    pub fn credentials(&self) -> MiraieCredentials {
        MiraieCredentials::new(
            self.miraie.login_id.clone().unwrap_or_default(),
            self.miraie.password.clone().unwrap_or_default(),
            self.miraie.auth_type,
        )
    }

    /// Fleet used by the simulated connector
    pub fn fleet(&self) -> Result<FleetConfig> {
        match &self.miraie.fleet_file {
            Some(path) => FleetConfig::from_file(path),
            None => Ok(FleetConfig::default()),
        }
    }

    /// Device backend for this run. Only the simulated fleet is linked in,
    /// so anything but offline mode is refused instead of pretending to
    /// reach the MirAIe cloud.
    pub fn connector(&self, offline: bool) -> Result<Arc<dyn MiraieConnector>> {
        if !offline {
            return Err(MiraieError::config(
                "No MirAIe cloud connector is linked into this build; \
                 run with --offline to control the simulated fleet",
            ));
        }
        let connector = SimulatedConnector::new(self.fleet()?).without_credentials();
        Ok(Arc::new(connector))
    }

    /// Validate configuration. Credentials are only required when a real
    /// account session is opened.
    pub fn validate(&self, offline: bool) -> Result<()> {
        if !offline {
            self.credentials().validate()?;
        }

        if self.http.host.trim().is_empty() {
            return Err(MiraieError::config("HTTP host cannot be empty"));
        }

        if self.http.port == 0 {
            return Err(MiraieError::config("HTTP port must be greater than zero"));
        }

        if !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&self.control.test_temperature) {
            return Err(MiraieError::config(format!(
                "Test temperature must be between {MIN_TEMPERATURE}-{MAX_TEMPERATURE}°C"
            )));
        }

        if self.mcp.name.is_empty() {
            return Err(MiraieError::config("MCP server name cannot be empty"));
        }

        Ok(())
    }
}
