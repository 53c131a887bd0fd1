//! MCP tool implementations for MirAIe air conditioner control
//!
//! Tools resolve their target devices through the shared control service.
//! Every failure is rendered as a text block so the client always gets a
//! readable answer rather than a protocol error.

pub mod args;
pub mod climate;
pub mod definitions;
pub mod power;
pub mod status;

pub use args::ToolArgs;
pub use definitions::tool_definitions;

use crate::error::{MiraieError, Result};
use crate::services::ControlService;
use serde_json::{Map, Value};
use tracing::warn;

/// Outcome of a tool call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub text: String,
    pub is_error: bool,
}

impl ToolOutput {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Shared tool context for all MCP tools
#[derive(Clone)]
pub struct ToolContext {
    pub control: ControlService,
}

impl ToolContext {
    pub fn new(control: ControlService) -> Self {
        Self { control }
    }
}

/// Names of every tool, in advertised order
pub const TOOL_NAMES: [&str; 10] = [
    "get_device_status",
    "turn_on_device",
    "turn_off_device",
    "set_temperature",
    "set_fan_mode",
    "set_mode",
    "get_device_details",
    "set_preset_mode",
    "set_vertical_swing_mode",
    "set_horizontal_swing_mode",
];

/// Run a tool by name and render its outcome as text
pub async fn call_tool(
    context: &ToolContext,
    name: &str,
    arguments: Option<Map<String, Value>>,
) -> ToolOutput {
    let args = ToolArgs::new(arguments.unwrap_or_default());

    let result = match name {
        "get_device_status" => status::get_device_status(context).await,
        "get_device_details" => status::get_device_details(context, &args).await,
        "turn_on_device" => power::turn_on_device(context, &args).await,
        "turn_off_device" => power::turn_off_device(context, &args).await,
        "set_temperature" => climate::set_temperature(context, &args).await,
        "set_fan_mode" => climate::set_fan_mode(context, &args).await,
        "set_mode" => climate::set_mode(context, &args).await,
        "set_preset_mode" => climate::set_preset_mode(context, &args).await,
        "set_vertical_swing_mode" => climate::set_vertical_swing_mode(context, &args).await,
        "set_horizontal_swing_mode" => climate::set_horizontal_swing_mode(context, &args).await,
        unknown => return ToolOutput::error(format!("Error: Unknown tool '{unknown}'")),
    };

    render(name, result)
}

fn render(name: &str, result: Result<String>) -> ToolOutput {
    match result {
        Ok(text) => ToolOutput::ok(text),
        Err(MiraieError::DeviceNotFound(device)) => {
            ToolOutput::error(format!("Error: Device '{device}' not found"))
        }
        Err(e) => {
            let message = format!("Error executing {name}: {e}");
            let code = e.to_error_code();
            warn!(
                code = code.as_number(),
                category = code.category(),
                "{}",
                message
            );
            ToolOutput::error(message)
        }
    }
}
