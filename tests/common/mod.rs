//! Shared fixtures: a control service over an in-process simulated fleet

#![allow(dead_code)]

use miraie_mcp_rust::client::simulated::{
    CommandJournal, FleetConfig, SimulatedConnector, SimulatedDeviceConfig,
};
use miraie_mcp_rust::client::DeviceCapabilities;
use miraie_mcp_rust::config::credentials::{AuthType, MiraieCredentials};
use miraie_mcp_rust::config::ControlConfig;
use miraie_mcp_rust::{ControlService, DeviceManager};
use std::sync::Arc;
use std::time::Duration;

pub struct TestFleet {
    pub control: ControlService,
    pub journal: CommandJournal,
}

pub fn test_credentials() -> MiraieCredentials {
    MiraieCredentials::new("9876543210", "test_password", AuthType::Mobile)
}

/// Three units: a fully featured one, a basic one and one that is offline
pub fn mixed_fleet() -> FleetConfig {
    FleetConfig::new(vec![
        SimulatedDeviceConfig::new("Living Room", "ac-001")
            .with_model("CS-NU18XKY5W")
            .with_capabilities(DeviceCapabilities::full()),
        SimulatedDeviceConfig::new("Bedroom", "ac-002")
            .with_capabilities(DeviceCapabilities::default()),
        SimulatedDeviceConfig::new("Garage", "ac-003").offline(),
    ])
}

pub async fn start_fleet(fleet: FleetConfig) -> TestFleet {
    let connector = SimulatedConnector::new(fleet);
    let journal = connector.journal();
    let manager = DeviceManager::open(Arc::new(connector), test_credentials())
        .await
        .expect("simulated session opens");
    let config = ControlConfig {
        test_step_delay: Duration::ZERO,
        ..ControlConfig::default()
    };
    TestFleet {
        control: ControlService::new(manager, config),
        journal,
    }
}

pub async fn default_fleet() -> TestFleet {
    start_fleet(FleetConfig::default()).await
}
