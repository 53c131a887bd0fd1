//! Read-only device tools

use crate::error::Result;
use crate::tools::{ToolArgs, ToolContext};
use serde_json::{json, Value};

pub async fn get_device_status(context: &ToolContext) -> Result<String> {
    let devices = context.control.manager().get_all_devices().await?;
    let entries: Vec<Value> = devices
        .iter()
        .map(|device| {
            json!({
                "name": device.friendly_name(),
                "device_id": device.device_id(),
                "model": device.model(),
            })
        })
        .collect();

    let result = json!({
        "device_count": devices.len(),
        "devices": entries,
    });
    Ok(serde_json::to_string_pretty(&result)?)
}

pub async fn get_device_details(context: &ToolContext, args: &ToolArgs) -> Result<String> {
    let name = args.required_str("device_name")?;
    let device = context.control.manager().find_device(name).await?;
    let capabilities = device.capabilities();

    let current_state = if capabilities.state_report {
        match device.state().await {
            Ok(state) => serde_json::to_value(state)?,
            Err(_) => json!("unavailable"),
        }
    } else {
        json!("unavailable")
    };

    let details = json!({
        "name": device.friendly_name(),
        "device_id": device.device_id(),
        "model": device.model(),
        "capabilities": capabilities,
        "available_operations": capabilities.operations(),
        "current_state": current_state,
    });
    Ok(serde_json::to_string_pretty(&details)?)
}
