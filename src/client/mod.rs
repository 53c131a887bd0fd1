//! Device library adapter seam
//!
//! The gateways never talk to the MirAIe cloud directly. They go through
//! three traits:
//!
//! - [`MiraieConnector`] builds an API session from credentials
//! - [`MiraieApi`] is an open session exposing the account's devices
//! - [`AcDevice`] is one air conditioner
//!
//! A cloud adapter implements these traits outside this crate. The
//! [`simulated`] module provides an in-process fleet used for offline
//! operation and tests.

pub mod modes;
pub mod simulated;

pub use modes::{FanMode, HvacMode, PresetMode, SwingMode};

use crate::config::credentials::MiraieCredentials;
use crate::error::{MiraieError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Optional operations a device supports beyond power and temperature
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceCapabilities {
    pub preset_mode: bool,
    pub vertical_swing: bool,
    pub horizontal_swing: bool,
    pub state_report: bool,
}

impl DeviceCapabilities {
    /// Every optional operation enabled
    pub fn full() -> Self {
        Self {
            preset_mode: true,
            vertical_swing: true,
            horizontal_swing: true,
            state_report: true,
        }
    }

    /// Names of the operations that can be invoked on the device
    pub fn operations(&self) -> Vec<&'static str> {
        let mut ops = vec![
            "turn_on",
            "turn_off",
            "set_temperature",
            "set_fan_mode",
            "set_hvac_mode",
        ];
        if self.preset_mode {
            ops.push("set_preset_mode");
        }
        if self.vertical_swing {
            ops.push("set_vertical_swing_mode");
        }
        if self.horizontal_swing {
            ops.push("set_horizontal_swing_mode");
        }
        if self.state_report {
            ops.push("get_state");
        }
        ops
    }
}

/// Snapshot of a device's reported state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceState {
    pub is_on: bool,
    pub online: bool,
    pub target_temperature: f64,
    pub room_temperature: Option<f64>,
    pub hvac_mode: HvacMode,
    pub fan_mode: FanMode,
    pub preset_mode: PresetMode,
    pub vertical_swing: SwingMode,
    pub horizontal_swing: SwingMode,
    pub updated_at: DateTime<Utc>,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self {
            is_on: false,
            online: true,
            target_temperature: 24.0,
            room_temperature: None,
            hvac_mode: HvacMode::Cool,
            fan_mode: FanMode::Auto,
            preset_mode: PresetMode::None,
            vertical_swing: SwingMode::AUTO,
            horizontal_swing: SwingMode::AUTO,
            updated_at: Utc::now(),
        }
    }
}

/// One air conditioner handled by the device library
#[async_trait]
pub trait AcDevice: Send + Sync {
    /// Friendly (user-assigned) name; the lookup key
    fn friendly_name(&self) -> &str;

    /// Opaque device identifier
    fn device_id(&self) -> &str;

    /// Model string reported by the cloud
    fn model(&self) -> &str;

    fn capabilities(&self) -> DeviceCapabilities;

    async fn turn_on(&self) -> Result<()>;

    async fn turn_off(&self) -> Result<()>;

    async fn set_temperature(&self, celsius: i64) -> Result<()>;

    async fn set_fan_mode(&self, mode: FanMode) -> Result<()>;

    async fn set_hvac_mode(&self, mode: HvacMode) -> Result<()>;

    async fn set_preset_mode(&self, _mode: PresetMode) -> Result<()> {
        Err(MiraieError::unsupported(self.friendly_name(), "Preset mode"))
    }

    async fn set_vertical_swing(&self, _mode: SwingMode) -> Result<()> {
        Err(MiraieError::unsupported(
            self.friendly_name(),
            "Vertical swing mode",
        ))
    }

    async fn set_horizontal_swing(&self, _mode: SwingMode) -> Result<()> {
        Err(MiraieError::unsupported(
            self.friendly_name(),
            "Horizontal swing mode",
        ))
    }

    async fn state(&self) -> Result<DeviceState> {
        Err(MiraieError::unsupported(self.friendly_name(), "State"))
    }
}

/// Shared handle to a device
pub type DeviceHandle = Arc<dyn AcDevice>;

/// An open session with the device library
#[async_trait]
pub trait MiraieApi: Send + Sync {
    /// Authenticate and fetch the device list
    async fn initialize(&mut self) -> Result<()>;

    /// Devices discovered by `initialize`, in account order
    fn devices(&self) -> Vec<DeviceHandle>;

    /// Tear the session down
    async fn close(&mut self) -> Result<()>;
}

/// Factory for API sessions
#[async_trait]
pub trait MiraieConnector: Send + Sync {
    async fn connect(&self, credentials: &MiraieCredentials) -> Result<Box<dyn MiraieApi>>;
}
