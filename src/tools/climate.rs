//! Temperature and operating-mode tools
//!
//! The mode setters report one line per device. A device that lacks the
//! control gets a "not available" line instead of failing the whole call.

use crate::client::{DeviceHandle, FanMode, HvacMode, PresetMode};
use crate::error::{MiraieError, Result};
use crate::services::Target;
use crate::tools::{ToolArgs, ToolContext};
use std::fmt::Display;
use std::future::Future;
use tracing::debug;

pub async fn set_temperature(context: &ToolContext, args: &ToolArgs) -> Result<String> {
    let temperature = args.required_i64("temperature")?;
    match args.target()? {
        Target::All => {
            let devices = context.control.manager().get_all_devices().await?;
            for device in &devices {
                device.set_temperature(temperature).await?;
            }
            Ok(format!(
                "Set temperature to {temperature}°C for {} devices",
                devices.len()
            ))
        }
        Target::Named(name) => {
            let device = context.control.manager().find_device(&name).await?;
            device.set_temperature(temperature).await?;
            Ok(format!("Set {} to {temperature}°C", device.friendly_name()))
        }
    }
}

pub async fn set_fan_mode(context: &ToolContext, args: &ToolArgs) -> Result<String> {
    let mode: FanMode = args.required_enum("fan_mode")?;
    apply_each(context, args, "fan mode", mode, |device| async move {
        device.set_fan_mode(mode).await
    })
    .await
}

pub async fn set_mode(context: &ToolContext, args: &ToolArgs) -> Result<String> {
    let mode: HvacMode = args.required_enum("mode")?;
    apply_each(context, args, "mode", mode, |device| async move {
        device.set_hvac_mode(mode).await
    })
    .await
}

pub async fn set_preset_mode(context: &ToolContext, args: &ToolArgs) -> Result<String> {
    let mode: PresetMode = args.required_enum("preset_mode")?;
    apply_each(context, args, "preset mode", mode, |device| async move {
        device.set_preset_mode(mode).await
    })
    .await
}

pub async fn set_vertical_swing_mode(context: &ToolContext, args: &ToolArgs) -> Result<String> {
    let mode = args.required_swing("vertical_swing_mode")?;
    apply_each(context, args, "vertical swing mode", mode, |device| async move {
        device.set_vertical_swing(mode).await
    })
    .await
}

pub async fn set_horizontal_swing_mode(context: &ToolContext, args: &ToolArgs) -> Result<String> {
    let mode = args.required_swing("horizontal_swing_mode")?;
    apply_each(
        context,
        args,
        "horizontal swing mode",
        mode,
        |device| async move { device.set_horizontal_swing(mode).await },
    )
    .await
}

/// Apply `op` to every targeted device, collecting one line per device
async fn apply_each<V, F, Fut>(
    context: &ToolContext,
    args: &ToolArgs,
    what: &str,
    value: V,
    op: F,
) -> Result<String>
where
    V: Display,
    F: Fn(DeviceHandle) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let devices = context.control.resolve(&args.target()?).await?;
    let mut lines = Vec::with_capacity(devices.len());

    for device in devices {
        let name = device.friendly_name().to_string();
        match op(device).await {
            Ok(()) => lines.push(format!("Set {name} {what} to {value}")),
            Err(e @ MiraieError::Unsupported { .. }) => {
                debug!("{}", e);
                lines.push(e.to_string());
            }
            Err(e) => return Err(e),
        }
    }

    Ok(lines.join("\n"))
}
