//! REST gateway tests driven through the axum router

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use miraie_mcp_rust::client::simulated::{DeviceCommand, FleetConfig};
use miraie_mcp_rust::http_transport::create_router;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;
use common::{default_fleet, mixed_fleet, start_fleet};

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_root_and_health_always_succeed() {
    let fleet = start_fleet(mixed_fleet()).await;
    let app = create_router(fleet.control.clone(), false);

    let (status, body) = send(app.clone(), "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "MirAIe AC Control API");
    assert_eq!(body["version"], "1.0.0");
    assert!(body["endpoints"]["POST /device/control"].is_string());

    // Still healthy after the device session has been closed
    fleet.control.manager().exit().await.unwrap();
    let (status, body) = send(app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "MirAIe AC Control API");
}

#[tokio::test]
async fn test_get_devices_envelope() {
    let fleet = default_fleet().await;
    let app = create_router(fleet.control.clone(), false);

    let (status, body) = send(app, "GET", "/devices", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Retrieved device status successfully");
    let devices = body["data"].as_array().unwrap();
    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0]["name"], "Living Room");
    assert_eq!(devices[0]["device_id"], "sim-ac-001");
    assert_eq!(devices[1]["model"], "CS-SU12XKYWT");
}

#[tokio::test]
async fn test_turn_on_and_off_all_in_list_order() {
    let fleet = default_fleet().await;
    let app = create_router(fleet.control.clone(), false);

    let (status, body) = send(app.clone(), "POST", "/devices/on", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "message": "Turned on 2 devices"}));

    let (status, body) = send(app, "POST", "/devices/off", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Turned off 2 devices");

    let order = vec!["Living Room".to_string(), "Bedroom".to_string()];
    assert_eq!(fleet.journal.devices_for(&DeviceCommand::TurnOn).await, order);
    assert_eq!(fleet.journal.devices_for(&DeviceCommand::TurnOff).await, order);
}

#[rstest]
#[case(15)]
#[case(31)]
#[case(-5)]
#[case(100)]
#[tokio::test]
async fn test_out_of_range_temperature_is_rejected(#[case] temperature: i64) {
    let fleet = default_fleet().await;
    let app = create_router(fleet.control.clone(), false);

    let (status, body) = send(
        app.clone(),
        "POST",
        "/devices/temperature",
        Some(json!({"temperature": temperature})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Temperature must be between 16-30°C");

    for action in ["temp", "on"] {
        let (status, body) = send(
            app.clone(),
            "POST",
            "/device/control",
            Some(json!({"device_name": "Bedroom", "action": action, "temperature": temperature})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Temperature must be between 16-30°C");
    }

    assert!(fleet.journal.entries().await.is_empty());
}

#[rstest]
#[case(16)]
#[case(30)]
#[tokio::test]
async fn test_boundary_temperatures_are_accepted(#[case] temperature: i64) {
    let fleet = default_fleet().await;
    let app = create_router(fleet.control.clone(), false);

    let (status, body) = send(
        app,
        "POST",
        "/devices/temperature",
        Some(json!({"temperature": temperature})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        format!("Set temperature to {temperature}°C for 2 devices")
    );
}

#[tokio::test]
async fn test_control_single_device() {
    let fleet = default_fleet().await;
    let app = create_router(fleet.control.clone(), false);

    let (status, body) = send(
        app.clone(),
        "POST",
        "/device/control",
        Some(json!({"device_name": "bedroom", "action": "on"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Turned on Bedroom");

    let (status, body) = send(
        app,
        "POST",
        "/device/control",
        Some(json!({"device_name": "Living Room", "action": "temp", "temperature": 21})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Set Living Room to 21°C");
}

#[rstest]
#[case("on")]
#[case("off")]
#[case("temp")]
#[tokio::test]
async fn test_unknown_device_is_not_found(#[case] action: &str) {
    let fleet = default_fleet().await;
    let app = create_router(fleet.control.clone(), false);

    let (status, body) = send(
        app,
        "POST",
        "/device/control",
        Some(json!({"device_name": "Attic", "action": action, "temperature": 22})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Device 'Attic' not found");
}

#[tokio::test]
async fn test_temp_action_requires_temperature() {
    let fleet = default_fleet().await;
    let app = create_router(fleet.control.clone(), false);

    let (status, body) = send(
        app,
        "POST",
        "/device/control",
        Some(json!({"device_name": "Bedroom", "action": "temp"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Temperature is required for 'temp' action");
}

#[tokio::test]
async fn test_unknown_action_is_bad_request() {
    let fleet = default_fleet().await;
    let app = create_router(fleet.control.clone(), false);

    let (status, body) = send(
        app,
        "POST",
        "/device/control",
        Some(json!({"device_name": "Bedroom", "action": "blast"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Invalid action 'blast'. Use 'on', 'off' or 'temp'");
}

#[tokio::test]
async fn test_malformed_body_is_unprocessable() {
    let fleet = default_fleet().await;
    let app = create_router(fleet.control.clone(), false);

    let (status, _) = send(
        app,
        "POST",
        "/devices/temperature",
        Some(json!({"temperature": "warm"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_device_failure_is_server_error_with_prefix() {
    let fleet = start_fleet(mixed_fleet()).await;
    let app = create_router(fleet.control.clone(), false);

    let (status, body) = send(app.clone(), "POST", "/devices/on", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["detail"],
        "Failed to turn on devices: Device control error: Garage is offline"
    );

    let (status, body) = send(
        app,
        "POST",
        "/device/control",
        Some(json!({"device_name": "Garage", "action": "off"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .starts_with("Failed to control device: "));
}

#[tokio::test]
async fn test_closed_session_is_server_error() {
    let fleet = default_fleet().await;
    fleet.control.manager().exit().await.unwrap();
    let app = create_router(fleet.control.clone(), false);

    let (status, body) = send(app, "GET", "/devices", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .starts_with("Failed to get devices: "));
}

#[tokio::test]
async fn test_run_test_sequence() {
    let fleet = start_fleet(FleetConfig::default()).await;
    let app = create_router(fleet.control.clone(), true);

    let (status, body) = send(app, "POST", "/test", None).await;
    assert_eq!(status, StatusCode::OK);
    let log = body["message"].as_str().unwrap();
    assert!(log.starts_with("Test sequence started"));
    assert!(log.contains("Set temperature to 24°C for 2 devices"));
    assert!(log.ends_with("Test sequence completed"));
    assert_eq!(
        fleet
            .journal
            .devices_for(&DeviceCommand::SetTemperature(24))
            .await
            .len(),
        2
    );
}
