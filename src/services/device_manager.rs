//! Device session lifecycle
//!
//! The manager opens the device library session on `enter`, captures the
//! device list, and closes the session on `exit`. Device access outside
//! that window is a usage error.

use crate::client::{DeviceHandle, MiraieApi, MiraieConnector};
use crate::config::credentials::MiraieCredentials;
use crate::error::{MiraieError, Result};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

struct Session {
    api: Box<dyn MiraieApi>,
    devices: Vec<DeviceHandle>,
}

/// Owns the device library session shared by both gateways
pub struct DeviceManager {
    connector: Arc<dyn MiraieConnector>,
    credentials: MiraieCredentials,
    session: RwLock<Option<Session>>,
}

impl DeviceManager {
    pub fn new(connector: Arc<dyn MiraieConnector>, credentials: MiraieCredentials) -> Self {
        Self {
            connector,
            credentials,
            session: RwLock::new(None),
        }
    }

    /// Construct the manager and open its session
    pub async fn open(
        connector: Arc<dyn MiraieConnector>,
        credentials: MiraieCredentials,
    ) -> Result<Arc<Self>> {
        let manager = Arc::new(Self::new(connector, credentials));
        manager.enter().await?;
        Ok(manager)
    }

    /// Open the session. No-op when already open.
    pub async fn enter(&self) -> Result<()> {
        let mut session = self.session.write().await;
        if session.is_some() {
            return Ok(());
        }

        let mut api = self.connector.connect(&self.credentials).await?;
        if let Err(e) = api.initialize().await {
            if let Err(close_err) = api.close().await {
                warn!("Failed to close half-open session: {}", close_err);
            }
            return Err(e);
        }

        let devices = api.devices();
        info!("Initialized AC Manager with {} devices", devices.len());
        for device in &devices {
            info!("  - {}", device.friendly_name());
        }

        *session = Some(Session { api, devices });
        Ok(())
    }

    /// Close the session. No-op when already closed.
    pub async fn exit(&self) -> Result<()> {
        let taken = self.session.write().await.take();
        if let Some(mut session) = taken {
            session.api.close().await?;
            info!("Closed AC Manager session");
        }
        Ok(())
    }

    pub async fn is_initialized(&self) -> bool {
        self.session.read().await.is_some()
    }

    /// Case-insensitive lookup by friendly name; first match wins
    pub async fn get_device_by_name(&self, name: &str) -> Result<Option<DeviceHandle>> {
        let session = self.session.read().await;
        let session = session.as_ref().ok_or_else(not_initialized)?;
        let wanted = name.to_lowercase();
        Ok(session
            .devices
            .iter()
            .find(|device| device.friendly_name().to_lowercase() == wanted)
            .cloned())
    }

    /// Like `get_device_by_name`, but a missing device is an error
    pub async fn find_device(&self, name: &str) -> Result<DeviceHandle> {
        self.get_device_by_name(name)
            .await?
            .ok_or_else(|| MiraieError::device_not_found(name))
    }

    /// All devices in account order
    pub async fn get_all_devices(&self) -> Result<Vec<DeviceHandle>> {
        let session = self.session.read().await;
        let session = session.as_ref().ok_or_else(not_initialized)?;
        Ok(session.devices.clone())
    }

    pub async fn device_count(&self) -> Result<usize> {
        let session = self.session.read().await;
        Ok(session.as_ref().ok_or_else(not_initialized)?.devices.len())
    }
}

fn not_initialized() -> MiraieError {
    MiraieError::not_initialized("DeviceManager not initialized. Open the session first.")
}
