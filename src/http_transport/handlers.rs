//! Route handlers

use super::{ApiError, ApiResponse, ApiResult, AppState, API_VERSION, SERVICE_NAME};
use crate::services::validate_temperature;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceControlRequest {
    pub device_name: String,
    pub action: String,
    #[serde(default)]
    pub temperature: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemperatureRequest {
    pub temperature: i64,
}

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": SERVICE_NAME,
        "version": API_VERSION,
        "endpoints": {
            "GET /devices": "Get all device status",
            "POST /devices/on": "Turn on all devices",
            "POST /devices/off": "Turn off all devices",
            "POST /devices/temperature": "Set temperature for all devices",
            "POST /device/control": "Control specific device",
            "POST /test": "Run test sequence"
        }
    }))
}

pub async fn health() -> Json<Value> {
    debug!("Health check requested");
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

pub async fn get_devices(State(state): State<Arc<AppState>>) -> ApiResult {
    const CONTEXT: &str = "Failed to get devices";
    let devices = state
        .control
        .get_device_status()
        .await
        .map_err(|e| ApiError::from_service(CONTEXT, e))?;
    let data =
        serde_json::to_value(devices).map_err(|e| ApiError::from_service(CONTEXT, e.into()))?;

    Ok(Json(
        ApiResponse::ok("Retrieved device status successfully").with_data(data),
    ))
}

pub async fn turn_on_devices(State(state): State<Arc<AppState>>) -> ApiResult {
    let message = state
        .control
        .turn_on_all()
        .await
        .map_err(|e| ApiError::from_service("Failed to turn on devices", e))?;
    Ok(Json(ApiResponse::ok(message)))
}

pub async fn turn_off_devices(State(state): State<Arc<AppState>>) -> ApiResult {
    let message = state
        .control
        .turn_off_all()
        .await
        .map_err(|e| ApiError::from_service("Failed to turn off devices", e))?;
    Ok(Json(ApiResponse::ok(message)))
}

pub async fn set_devices_temperature(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TemperatureRequest>,
) -> ApiResult {
    const CONTEXT: &str = "Failed to set temperature";
    let temperature =
        validate_temperature(request.temperature).map_err(|e| ApiError::from_service(CONTEXT, e))?;

    let message = state
        .control
        .set_temperature_all(temperature)
        .await
        .map_err(|e| ApiError::from_service(CONTEXT, e))?;
    Ok(Json(ApiResponse::ok(message)))
}

pub async fn control_device(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DeviceControlRequest>,
) -> ApiResult {
    const CONTEXT: &str = "Failed to control device";

    if request.action == "temp" && request.temperature.is_none() {
        return Err(ApiError::bad_request(
            "Temperature is required for 'temp' action",
        ));
    }
    // A temperature is range-checked even when the action ignores it
    if let Some(temperature) = request.temperature {
        validate_temperature(temperature).map_err(|e| ApiError::from_service(CONTEXT, e))?;
    }

    let message = state
        .control
        .control_device_by_name(&request.device_name, &request.action, request.temperature)
        .await
        .map_err(|e| ApiError::from_service(CONTEXT, e))?;
    Ok(Json(ApiResponse::ok(message)))
}

pub async fn run_test(State(state): State<Arc<AppState>>) -> ApiResult {
    let message = state
        .control
        .run_test_sequence()
        .await
        .map_err(|e| ApiError::from_service("Test failed", e))?;
    Ok(Json(ApiResponse::ok(message)))
}
