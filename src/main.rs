//! MirAIe gateway server - main entry point
//!
//! `stdio` runs the MCP tool server for desktop assistants, `http` runs the
//! REST API. Both open the device session once at startup and close it on
//! shutdown.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use miraie_mcp_rust::{
    config::credentials::AuthType,
    logging::{init_logging, LogConfig},
    mcp::{McpService, QuitReason},
    ControlService, DeviceManager, MiraieMcpServer, ServerConfig,
};
use std::path::PathBuf;
use tracing::{info, warn};

/// MirAIe gateway configuration
#[derive(Parser, Debug)]
#[command(name = "miraie-mcp-server")]
#[command(about = "REST and MCP gateways for Panasonic MirAIe air conditioners")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    transport: TransportCommand,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// TOML configuration file
    #[arg(long, global = true, env = "MIRAIE_CONFIG")]
    config: Option<PathBuf>,

    /// MirAIe login id (mobile number, email or username)
    #[arg(long, global = true)]
    login_id: Option<String>,

    /// MirAIe password
    #[arg(long, global = true)]
    password: Option<String>,

    /// Kind of login id
    #[arg(long, global = true)]
    auth_type: Option<AuthType>,

    /// Run against the simulated fleet without credentials
    #[arg(long, global = true)]
    offline: bool,
}

#[derive(Subcommand, Debug)]
enum TransportCommand {
    /// Run the MCP tool server over stdio
    Stdio,
    /// Run the REST API
    Http {
        /// Listen address
        #[arg(long)]
        host: Option<String>,

        /// Listen port
        #[arg(short, long)]
        port: Option<u16>,

        /// Enable CORS (permissive mode)
        #[arg(long)]
        enable_cors: bool,
    },
}

impl Cli {
    /// Layer command line flags over file and environment settings
    fn server_config(&self) -> Result<ServerConfig> {
        let mut config =
            ServerConfig::load(self.config.as_deref()).context("Failed to load configuration")?;

        if let Some(login_id) = &self.login_id {
            config.miraie.login_id = Some(login_id.clone());
        }
        if let Some(password) = &self.password {
            config.miraie.password = Some(password.clone());
        }
        if let Some(auth_type) = self.auth_type {
            config.miraie.auth_type = auth_type;
        }
        if let TransportCommand::Http {
            host,
            port,
            enable_cors,
        } = &self.transport
        {
            if let Some(host) = host {
                config.http.host = host.clone();
            }
            if let Some(port) = port {
                config.http.port = *port;
            }
            config.http.enable_cors |= *enable_cors;
        }

        config
            .validate(self.offline)
            .context("Invalid configuration")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.server_config()?;

    let stdio = matches!(cli.transport, TransportCommand::Stdio);
    let log_config = LogConfig {
        ansi: !stdio,
        ..LogConfig::from(&config.logging)
    }
    .with_debug(cli.debug);
    init_logging(log_config).context("Failed to initialize logging")?;

    info!(
        "Starting MirAIe gateway v{}",
        env!("CARGO_PKG_VERSION")
    );

    let connector = config
        .connector(cli.offline)
        .context("Failed to select device backend")?;
    info!("Offline mode: using the simulated fleet");

    let manager = DeviceManager::open(connector, config.credentials())
        .await
        .context("Failed to open device session")?;
    let control = ControlService::new(manager.clone(), config.control.clone());

    match cli.transport {
        TransportCommand::Stdio => {
            let server = MiraieMcpServer::new(control, config.mcp.clone());
            let service = McpService::new(server);

            let reason = tokio::select! {
                reason = service.serve_stdio() => reason?,
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown signal received");
                    QuitReason::ClientDisconnected
                }
            };
            if let QuitReason::ServerError(e) = reason {
                warn!("MCP service stopped with error: {}", e);
            }
            manager.exit().await?;
        }
        TransportCommand::Http { .. } => {
            #[cfg(feature = "http-server")]
            {
                use miraie_mcp_rust::http_transport::HttpServer;
                HttpServer::new(control, config.http.clone()).start().await?;
            }

            #[cfg(not(feature = "http-server"))]
            {
                drop(control);
                manager.exit().await?;
                anyhow::bail!("HTTP transport requires the 'http-server' feature");
            }
        }
    }

    info!("MirAIe gateway stopped");
    Ok(())
}
