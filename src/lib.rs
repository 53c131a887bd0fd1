//! REST and MCP gateways for Panasonic MirAIe air conditioners
//!
//! Both gateways share one [`services::DeviceManager`] session and the
//! [`services::ControlService`] built on it:
//!
//! - [`http_transport`] serves a small JSON REST API (feature `http-server`)
//! - [`server`] implements an MCP tool server over stdio
//!
//! Device access goes through the traits in [`client`]. The crate ships a
//! simulated fleet; a cloud adapter plugs in by implementing
//! [`client::MiraieConnector`].

pub mod client;
pub mod config;
pub mod error;
#[cfg(feature = "http-server")]
pub mod http_transport;
pub mod logging;
pub mod mcp;
pub mod server;
pub mod services;
pub mod tools;

pub use config::ServerConfig;
pub use error::{MiraieError, Result};
pub use server::MiraieMcpServer;
pub use services::{ControlService, DeviceManager};
