//! Device session lifecycle tests against the simulated connector

use miraie_mcp_rust::client::simulated::{FleetConfig, SimulatedConnector};
use miraie_mcp_rust::config::credentials::{AuthType, MiraieCredentials};
use miraie_mcp_rust::{DeviceManager, MiraieError, ServerConfig};
use pretty_assertions::assert_eq;
use std::sync::Arc;

mod common;
use common::test_credentials;

const FLEET_TOML: &str = r#"
[[devices]]
name = "Study"
device_id = "dev-100"
model = "CS-XU12XKYF"

[[devices]]
name = "Nursery"
device_id = "dev-101"
preset_mode = false
state_report = false
"#;

#[tokio::test]
async fn test_fleet_file_drives_device_list() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fleet.toml");
    std::fs::write(&path, FLEET_TOML).unwrap();

    let mut config = ServerConfig::default();
    config.miraie.fleet_file = Some(path);
    let fleet = config.fleet().unwrap();

    let manager = DeviceManager::open(
        Arc::new(SimulatedConnector::new(fleet)),
        test_credentials(),
    )
    .await
    .unwrap();

    let devices = manager.get_all_devices().await.unwrap();
    let names: Vec<_> = devices.iter().map(|d| d.friendly_name()).collect();
    assert_eq!(names, vec!["Study", "Nursery"]);
    assert_eq!(devices[0].model(), "CS-XU12XKYF");

    let nursery = manager.find_device("NURSERY").await.unwrap();
    assert!(!nursery.capabilities().preset_mode);
    assert!(nursery.capabilities().vertical_swing);
}

#[tokio::test]
async fn test_invalid_fleet_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fleet.toml");
    std::fs::write(&path, "[[devices]]\nname = 42\n").unwrap();

    let err = FleetConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, MiraieError::Config(_)));
}

#[tokio::test]
async fn test_offline_connector_accepts_empty_credentials() {
    let empty = MiraieCredentials::new("", "", AuthType::Mobile);

    let strict = DeviceManager::new(Arc::new(SimulatedConnector::default()), empty.clone());
    assert!(matches!(
        strict.enter().await,
        Err(MiraieError::Authentication(_))
    ));

    let offline = DeviceManager::open(
        Arc::new(SimulatedConnector::default().without_credentials()),
        empty,
    )
    .await
    .unwrap();
    assert_eq!(offline.device_count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_session_can_be_reopened() {
    let manager = DeviceManager::open(
        Arc::new(SimulatedConnector::default()),
        test_credentials(),
    )
    .await
    .unwrap();

    manager.exit().await.unwrap();
    assert!(matches!(
        manager.get_device_by_name("Bedroom").await,
        Err(MiraieError::NotInitialized(_))
    ));

    manager.enter().await.unwrap();
    assert!(manager.get_device_by_name("Bedroom").await.unwrap().is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_lookups_share_one_session() {
    let manager = DeviceManager::open(
        Arc::new(SimulatedConnector::default()),
        test_credentials(),
    )
    .await
    .unwrap();

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let manager = manager.clone();
            tokio::spawn(async move {
                let name = if i % 2 == 0 { "living room" } else { "BEDROOM" };
                let device = manager.find_device(name).await.unwrap();
                device.turn_on().await.unwrap();
                device.device_id().to_string()
            })
        })
        .collect();

    for handle in handles {
        let id = handle.await.unwrap();
        assert!(id == "sim-ac-001" || id == "sim-ac-002");
    }

    let state = manager
        .find_device("Bedroom")
        .await
        .unwrap()
        .state()
        .await
        .unwrap();
    assert!(state.is_on);
}
