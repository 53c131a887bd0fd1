//! Fleet control helpers
//!
//! Plain operations over the device manager that the REST gateway exposes
//! one-to-one, plus target resolution shared with the MCP tools.

use crate::client::{DeviceCapabilities, DeviceHandle, DeviceState};
use crate::config::{ControlConfig, MAX_TEMPERATURE, MIN_TEMPERATURE};
use crate::error::{MiraieError, Result};
use crate::services::device_manager::DeviceManager;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

/// Which devices a command applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    All,
    Named(String),
}

impl Target {
    /// An absent or empty name means every device. Other names are kept verbatim.
    pub fn from_optional(name: Option<&str>) -> Self {
        match name {
            Some(name) if !name.is_empty() => Target::Named(name.to_string()),
            _ => Target::All,
        }
    }
}

/// Single-device action accepted by `control_device_by_name`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    On,
    Off,
    Temp,
}

impl FromStr for ControlAction {
    type Err = MiraieError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "on" => Ok(ControlAction::On),
            "off" => Ok(ControlAction::Off),
            "temp" => Ok(ControlAction::Temp),
            other => Err(MiraieError::invalid_input(format!(
                "Invalid action '{other}'. Use 'on', 'off' or 'temp'"
            ))),
        }
    }
}

/// Status entry returned by `get_device_status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceStatus {
    pub name: String,
    pub device_id: String,
    pub model: String,
    pub capabilities: DeviceCapabilities,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<DeviceState>,
}

/// Reject temperatures outside the supported range
pub fn validate_temperature(temperature: i64) -> Result<i64> {
    if (MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&temperature) {
        Ok(temperature)
    } else {
        Err(MiraieError::invalid_input(format!(
            "Temperature must be between {MIN_TEMPERATURE}-{MAX_TEMPERATURE}°C"
        )))
    }
}

/// Fleet-level operations over a shared device manager
#[derive(Clone)]
pub struct ControlService {
    manager: Arc<DeviceManager>,
    config: ControlConfig,
}

impl ControlService {
    pub fn new(manager: Arc<DeviceManager>, config: ControlConfig) -> Self {
        Self { manager, config }
    }

    pub fn manager(&self) -> &Arc<DeviceManager> {
        &self.manager
    }

    /// Devices addressed by `target`, in account order
    pub async fn resolve(&self, target: &Target) -> Result<Vec<DeviceHandle>> {
        match target {
            Target::All => self.manager.get_all_devices().await,
            Target::Named(name) => Ok(vec![self.manager.find_device(name).await?]),
        }
    }

    pub async fn get_device_status(&self) -> Result<Vec<DeviceStatus>> {
        let devices = self.manager.get_all_devices().await?;
        let mut statuses = Vec::with_capacity(devices.len());
        for device in devices {
            let capabilities = device.capabilities();
            let state = if capabilities.state_report {
                device.state().await.ok()
            } else {
                None
            };
            statuses.push(DeviceStatus {
                name: device.friendly_name().to_string(),
                device_id: device.device_id().to_string(),
                model: device.model().to_string(),
                capabilities,
                state,
            });
        }
        Ok(statuses)
    }

    pub async fn turn_on_all(&self) -> Result<String> {
        let devices = self.manager.get_all_devices().await?;
        for device in &devices {
            debug!("Turning on {}", device.friendly_name());
            device.turn_on().await?;
        }
        info!("Turned on {} devices", devices.len());
        Ok(format!("Turned on {} devices", devices.len()))
    }

    pub async fn turn_off_all(&self) -> Result<String> {
        let devices = self.manager.get_all_devices().await?;
        for device in &devices {
            debug!("Turning off {}", device.friendly_name());
            device.turn_off().await?;
        }
        info!("Turned off {} devices", devices.len());
        Ok(format!("Turned off {} devices", devices.len()))
    }

    pub async fn set_temperature_all(&self, temperature: i64) -> Result<String> {
        let temperature = validate_temperature(temperature)?;
        let devices = self.manager.get_all_devices().await?;
        for device in &devices {
            device.set_temperature(temperature).await?;
        }
        info!("Set temperature to {}°C for {} devices", temperature, devices.len());
        Ok(format!(
            "Set temperature to {temperature}°C for {} devices",
            devices.len()
        ))
    }

    pub async fn control_device_by_name(
        &self,
        name: &str,
        action: &str,
        temperature: Option<i64>,
    ) -> Result<String> {
        let action: ControlAction = action.parse()?;
        let device = self.manager.find_device(name).await?;

        let message = match action {
            ControlAction::On => {
                device.turn_on().await?;
                format!("Turned on {}", device.friendly_name())
            }
            ControlAction::Off => {
                device.turn_off().await?;
                format!("Turned off {}", device.friendly_name())
            }
            ControlAction::Temp => {
                let temperature = temperature.ok_or_else(|| {
                    MiraieError::invalid_input("Temperature is required for 'temp' action")
                })?;
                let temperature = validate_temperature(temperature)?;
                device.set_temperature(temperature).await?;
                format!("Set {} to {temperature}°C", device.friendly_name())
            }
        };

        info!("{}", message);
        Ok(message)
    }

    /// Exercise the fleet: on, set the test temperature, off
    pub async fn run_test_sequence(&self) -> Result<String> {
        info!("Running AC test sequence");
        let mut log = vec!["Test sequence started".to_string()];

        log.push(self.turn_on_all().await?);
        tokio::time::sleep(self.config.test_step_delay).await;

        log.push(self.set_temperature_all(self.config.test_temperature).await?);
        tokio::time::sleep(self.config.test_step_delay).await;

        log.push(self.turn_off_all().await?);
        log.push("Test sequence completed".to_string());

        Ok(log.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::simulated::{CommandJournal, DeviceCommand, SimulatedConnector};
    use crate::config::credentials::{AuthType, MiraieCredentials};
    use std::time::Duration;

    async fn service() -> (ControlService, CommandJournal) {
        let connector = SimulatedConnector::default();
        let journal = connector.journal();
        let manager = DeviceManager::open(
            Arc::new(connector),
            MiraieCredentials::new("9876543210", "secret", AuthType::Mobile),
        )
        .await
        .unwrap();
        let config = ControlConfig {
            test_step_delay: Duration::ZERO,
            ..ControlConfig::default()
        };
        (ControlService::new(manager, config), journal)
    }

    #[test]
    fn test_target_from_optional() {
        assert_eq!(Target::from_optional(None), Target::All);
        assert_eq!(Target::from_optional(Some("")), Target::All);
        assert_eq!(
            Target::from_optional(Some("  ")),
            Target::Named("  ".to_string())
        );
        assert_eq!(
            Target::from_optional(Some(" Bedroom ")),
            Target::Named(" Bedroom ".to_string())
        );
        assert_eq!(
            Target::from_optional(Some("Bedroom")),
            Target::Named("Bedroom".to_string())
        );
    }

    #[test]
    fn test_temperature_bounds() {
        assert!(validate_temperature(16).is_ok());
        assert!(validate_temperature(30).is_ok());
        assert!(validate_temperature(15).is_err());
        assert!(validate_temperature(31).is_err());
    }

    #[tokio::test]
    async fn test_turn_on_all_in_list_order() {
        let (service, journal) = service().await;
        let message = service.turn_on_all().await.unwrap();
        assert_eq!(message, "Turned on 2 devices");
        assert_eq!(
            journal.devices_for(&DeviceCommand::TurnOn).await,
            vec!["Living Room", "Bedroom"]
        );
    }

    #[tokio::test]
    async fn test_control_by_name() {
        let (service, journal) = service().await;
        let message = service
            .control_device_by_name("bedroom", "temp", Some(22))
            .await
            .unwrap();
        assert_eq!(message, "Set Bedroom to 22°C");
        assert_eq!(
            journal.devices_for(&DeviceCommand::SetTemperature(22)).await,
            vec!["Bedroom"]
        );

        let err = service
            .control_device_by_name("Garage", "on", None)
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let err = service
            .control_device_by_name("Bedroom", "temp", None)
            .await
            .unwrap_err();
        assert!(err.is_client_error());

        let err = service
            .control_device_by_name("Bedroom", "blast", None)
            .await
            .unwrap_err();
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_status_includes_state() {
        let (service, _) = service().await;
        service.turn_on_all().await.unwrap();
        let statuses = service.get_device_status().await.unwrap();
        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses[0].name, "Living Room");
        assert!(statuses[0].state.as_ref().unwrap().is_on);
    }

    #[tokio::test]
    async fn test_run_test_sequence() {
        let (service, journal) = service().await;
        let log = service.run_test_sequence().await.unwrap();
        assert!(log.contains("Turned on 2 devices"));
        assert!(log.contains("Set temperature to 24°C for 2 devices"));
        assert!(log.ends_with("Test sequence completed"));

        let commands: Vec<_> = journal
            .entries()
            .await
            .into_iter()
            .map(|r| r.command)
            .collect();
        assert_eq!(commands.len(), 6);
        assert_eq!(commands[0], DeviceCommand::TurnOn);
        assert_eq!(commands[5], DeviceCommand::TurnOff);
    }
}
