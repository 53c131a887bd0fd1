//! Simulated MirAIe fleet
//!
//! In-process devices that accept every command the cloud library would,
//! keep a state snapshot, and append each accepted command to a shared
//! journal. Used by `--offline` mode and by the test-suite.

use super::{
    AcDevice, DeviceCapabilities, DeviceHandle, DeviceState, FanMode, HvacMode, MiraieApi,
    MiraieConnector, PresetMode, SwingMode,
};
use crate::config::credentials::MiraieCredentials;
use crate::error::{MiraieError, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

/// Definition of one simulated unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatedDeviceConfig {
    pub name: String,
    pub device_id: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_true")]
    pub preset_mode: bool,
    #[serde(default = "default_true")]
    pub vertical_swing: bool,
    #[serde(default = "default_true")]
    pub horizontal_swing: bool,
    #[serde(default = "default_true")]
    pub state_report: bool,
    /// Offline units reject every command
    #[serde(default = "default_true")]
    pub online: bool,
    #[serde(default)]
    pub room_temperature: Option<f64>,
}

fn default_model() -> String {
    "CS-SU12XKYWT".to_string()
}

fn default_true() -> bool {
    true
}

impl SimulatedDeviceConfig {
    pub fn new(name: impl Into<String>, device_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            device_id: device_id.into(),
            model: default_model(),
            preset_mode: true,
            vertical_swing: true,
            horizontal_swing: true,
            state_report: true,
            online: true,
            room_temperature: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_capabilities(mut self, capabilities: DeviceCapabilities) -> Self {
        self.preset_mode = capabilities.preset_mode;
        self.vertical_swing = capabilities.vertical_swing;
        self.horizontal_swing = capabilities.horizontal_swing;
        self.state_report = capabilities.state_report;
        self
    }

    pub fn offline(mut self) -> Self {
        self.online = false;
        self
    }

    fn capabilities(&self) -> DeviceCapabilities {
        DeviceCapabilities {
            preset_mode: self.preset_mode,
            vertical_swing: self.vertical_swing,
            horizontal_swing: self.horizontal_swing,
            state_report: self.state_report,
        }
    }
}

/// Fleet definition, loadable from TOML:
///
/// ```toml
/// [[devices]]
/// name = "Living Room"
/// device_id = "dev-001"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetConfig {
    #[serde(default)]
    pub devices: Vec<SimulatedDeviceConfig>,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            devices: vec![
                SimulatedDeviceConfig::new("Living Room", "sim-ac-001")
                    .with_model("CS-NU18XKY5W"),
                SimulatedDeviceConfig::new("Bedroom", "sim-ac-002"),
            ],
        }
    }
}

impl FleetConfig {
    pub fn new(devices: Vec<SimulatedDeviceConfig>) -> Self {
        Self { devices }
    }

    /// Load a fleet definition from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            MiraieError::config(format!(
                "Failed to read fleet file {}: {e}",
                path.display()
            ))
        })?;
        toml::from_str(&raw).map_err(|e| {
            MiraieError::config(format!("Invalid fleet file {}: {e}", path.display()))
        })
    }
}

/// A command accepted by a simulated device
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCommand {
    TurnOn,
    TurnOff,
    SetTemperature(i64),
    SetFanMode(FanMode),
    SetHvacMode(HvacMode),
    SetPresetMode(PresetMode),
    SetVerticalSwing(SwingMode),
    SetHorizontalSwing(SwingMode),
}

/// Journal entry: which device received which command
#[derive(Debug, Clone, PartialEq)]
pub struct CommandRecord {
    pub device: String,
    pub command: DeviceCommand,
}

/// Append-only log shared by every device of a fleet
#[derive(Debug, Clone, Default)]
pub struct CommandJournal {
    entries: Arc<Mutex<Vec<CommandRecord>>>,
}

impl CommandJournal {
    pub fn new() -> Self {
        Self::default()
    }

    async fn record(&self, device: &str, command: DeviceCommand) {
        self.entries.lock().await.push(CommandRecord {
            device: device.to_string(),
            command,
        });
    }

    pub async fn entries(&self) -> Vec<CommandRecord> {
        self.entries.lock().await.clone()
    }

    /// Devices that received `command`, in the order they received it
    pub async fn devices_for(&self, command: &DeviceCommand) -> Vec<String> {
        self.entries
            .lock()
            .await
            .iter()
            .filter(|record| &record.command == command)
            .map(|record| record.device.clone())
            .collect()
    }

    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }
}

/// In-process air conditioner
pub struct SimulatedDevice {
    config: SimulatedDeviceConfig,
    state: RwLock<DeviceState>,
    journal: CommandJournal,
}

impl SimulatedDevice {
    pub fn new(config: SimulatedDeviceConfig, journal: CommandJournal) -> Self {
        let state = DeviceState {
            online: config.online,
            room_temperature: config.room_temperature,
            ..DeviceState::default()
        };
        Self {
            config,
            state: RwLock::new(state),
            journal,
        }
    }

    async fn apply<F>(&self, command: DeviceCommand, update: F) -> Result<()>
    where
        F: FnOnce(&mut DeviceState),
    {
        if !self.config.online {
            return Err(MiraieError::device_control(format!(
                "{} is offline",
                self.config.name
            )));
        }

        debug!(device = %self.config.name, ?command, "Simulated command");
        {
            let mut state = self.state.write().await;
            update(&mut state);
            state.updated_at = Utc::now();
        }
        self.journal.record(&self.config.name, command).await;
        Ok(())
    }
}

#[async_trait]
impl AcDevice for SimulatedDevice {
    fn friendly_name(&self) -> &str {
        &self.config.name
    }

    fn device_id(&self) -> &str {
        &self.config.device_id
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    fn capabilities(&self) -> DeviceCapabilities {
        self.config.capabilities()
    }

    async fn turn_on(&self) -> Result<()> {
        self.apply(DeviceCommand::TurnOn, |s| s.is_on = true).await
    }

    async fn turn_off(&self) -> Result<()> {
        self.apply(DeviceCommand::TurnOff, |s| s.is_on = false).await
    }

    async fn set_temperature(&self, celsius: i64) -> Result<()> {
        self.apply(DeviceCommand::SetTemperature(celsius), |s| {
            s.target_temperature = celsius as f64
        })
        .await
    }

    async fn set_fan_mode(&self, mode: FanMode) -> Result<()> {
        self.apply(DeviceCommand::SetFanMode(mode), |s| s.fan_mode = mode)
            .await
    }

    async fn set_hvac_mode(&self, mode: HvacMode) -> Result<()> {
        self.apply(DeviceCommand::SetHvacMode(mode), |s| s.hvac_mode = mode)
            .await
    }

    async fn set_preset_mode(&self, mode: PresetMode) -> Result<()> {
        if !self.config.preset_mode {
            return Err(MiraieError::unsupported(&self.config.name, "Preset mode"));
        }
        self.apply(DeviceCommand::SetPresetMode(mode), |s| s.preset_mode = mode)
            .await
    }

    async fn set_vertical_swing(&self, mode: SwingMode) -> Result<()> {
        if !self.config.vertical_swing {
            return Err(MiraieError::unsupported(
                &self.config.name,
                "Vertical swing mode",
            ));
        }
        self.apply(DeviceCommand::SetVerticalSwing(mode), |s| {
            s.vertical_swing = mode
        })
        .await
    }

    async fn set_horizontal_swing(&self, mode: SwingMode) -> Result<()> {
        if !self.config.horizontal_swing {
            return Err(MiraieError::unsupported(
                &self.config.name,
                "Horizontal swing mode",
            ));
        }
        self.apply(DeviceCommand::SetHorizontalSwing(mode), |s| {
            s.horizontal_swing = mode
        })
        .await
    }

    async fn state(&self) -> Result<DeviceState> {
        if !self.config.state_report {
            return Err(MiraieError::unsupported(&self.config.name, "State"));
        }
        Ok(self.state.read().await.clone())
    }
}

/// Session over a simulated fleet
pub struct SimulatedApi {
    fleet: FleetConfig,
    journal: CommandJournal,
    devices: Vec<DeviceHandle>,
}

#[async_trait]
impl MiraieApi for SimulatedApi {
    async fn initialize(&mut self) -> Result<()> {
        self.devices = self
            .fleet
            .devices
            .iter()
            .cloned()
            .map(|config| {
                Arc::new(SimulatedDevice::new(config, self.journal.clone())) as DeviceHandle
            })
            .collect();
        Ok(())
    }

    fn devices(&self) -> Vec<DeviceHandle> {
        self.devices.clone()
    }

    async fn close(&mut self) -> Result<()> {
        self.devices.clear();
        Ok(())
    }
}

/// Connector producing [`SimulatedApi`] sessions
#[derive(Debug, Clone)]
pub struct SimulatedConnector {
    fleet: FleetConfig,
    journal: CommandJournal,
    require_credentials: bool,
}

impl SimulatedConnector {
    pub fn new(fleet: FleetConfig) -> Self {
        Self {
            fleet,
            journal: CommandJournal::new(),
            require_credentials: true,
        }
    }

    /// Accept empty credentials (offline mode)
    pub fn without_credentials(mut self) -> Self {
        self.require_credentials = false;
        self
    }

    pub fn journal(&self) -> CommandJournal {
        self.journal.clone()
    }
}

impl Default for SimulatedConnector {
    fn default() -> Self {
        Self::new(FleetConfig::default())
    }
}

#[async_trait]
impl MiraieConnector for SimulatedConnector {
    async fn connect(&self, credentials: &MiraieCredentials) -> Result<Box<dyn MiraieApi>> {
        if self.require_credentials && !credentials.is_complete() {
            return Err(MiraieError::authentication(
                "login id and password are required",
            ));
        }

        info!(
            "Opening simulated MirAIe session ({} devices, auth type {})",
            self.fleet.devices.len(),
            credentials.auth_type
        );

        Ok(Box::new(SimulatedApi {
            fleet: self.fleet.clone(),
            journal: self.journal.clone(),
            devices: Vec::new(),
        }))
    }
}
