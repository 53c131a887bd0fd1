//! Tool metadata advertised through `tools/list`

use crate::client::{FanMode, HvacMode, PresetMode, SwingMode};
use crate::config::{MAX_TEMPERATURE, MIN_TEMPERATURE};
use crate::mcp::Tool;
use serde_json::{json, Value};

fn tool(name: &str, description: &str, input_schema: Value) -> Tool {
    Tool {
        name: name.to_string(),
        description: description.to_string(),
        input_schema,
    }
}

fn device_name_property(purpose: &str) -> Value {
    json!({
        "type": "string",
        "description": format!("Name of the device {purpose} (optional - if not provided, applies to all devices)")
    })
}

/// Schema for the tools that set one enumerated value
fn enum_setter_schema(key: &str, description: &str, values: &[&str], purpose: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            key: {
                "type": "string",
                "description": description,
                "enum": values
            },
            "device_name": device_name_property(purpose)
        },
        "required": [key]
    })
}

pub fn tool_definitions() -> Vec<Tool> {
    vec![
        tool(
            "get_device_status",
            "Get status of all AC devices including their names and IDs",
            json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        ),
        tool(
            "turn_on_device",
            "Turn on a specific AC device by name, or all devices if no name specified",
            json!({
                "type": "object",
                "properties": {
                    "device_name": device_name_property("to turn on")
                },
                "required": []
            }),
        ),
        tool(
            "turn_off_device",
            "Turn off a specific AC device by name, or all devices if no name specified",
            json!({
                "type": "object",
                "properties": {
                    "device_name": device_name_property("to turn off")
                },
                "required": []
            }),
        ),
        tool(
            "set_temperature",
            "Set temperature for a specific AC device by name, or all devices if no name specified",
            json!({
                "type": "object",
                "properties": {
                    "temperature": {
                        "type": "integer",
                        "description": format!(
                            "Temperature to set in Celsius (typically {MIN_TEMPERATURE}-{MAX_TEMPERATURE})"
                        ),
                        "minimum": MIN_TEMPERATURE,
                        "maximum": MAX_TEMPERATURE
                    },
                    "device_name": device_name_property("to set temperature for")
                },
                "required": ["temperature"]
            }),
        ),
        tool(
            "set_fan_mode",
            "Set fan mode for a specific AC device by name, or all devices if no name specified",
            enum_setter_schema(
                "fan_mode",
                "Fan mode to set",
                &FanMode::ADVERTISED,
                "to set fan mode for",
            ),
        ),
        tool(
            "set_mode",
            "Set HVAC mode for a specific AC device by name, or all devices if no name specified",
            enum_setter_schema(
                "mode",
                "HVAC mode to set",
                &HvacMode::ADVERTISED,
                "to set mode for",
            ),
        ),
        tool(
            "get_device_details",
            "Get detailed information about a specific AC device",
            json!({
                "type": "object",
                "properties": {
                    "device_name": {
                        "type": "string",
                        "description": "Name of the device to get details for"
                    }
                },
                "required": ["device_name"]
            }),
        ),
        tool(
            "set_preset_mode",
            "Set preset mode for a specific AC device by name, or all devices if no name specified",
            enum_setter_schema(
                "preset_mode",
                "Preset mode to set",
                &PresetMode::ADVERTISED,
                "to set preset mode for",
            ),
        ),
        tool(
            "set_vertical_swing_mode",
            "Set vertical swing mode for a specific AC device by name, or all devices if no name specified",
            enum_setter_schema(
                "vertical_swing_mode",
                "Vertical swing position (0 = auto swing)",
                &SwingMode::ADVERTISED,
                "to set vertical swing mode for",
            ),
        ),
        tool(
            "set_horizontal_swing_mode",
            "Set horizontal swing mode for a specific AC device by name, or all devices if no name specified",
            enum_setter_schema(
                "horizontal_swing_mode",
                "Horizontal swing position (0 = auto swing)",
                &SwingMode::ADVERTISED,
                "to set horizontal swing mode for",
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::TOOL_NAMES;

    #[test]
    fn test_definitions_match_dispatch_names() {
        let names: Vec<_> = tool_definitions().into_iter().map(|t| t.name).collect();
        assert_eq!(names, TOOL_NAMES);
    }

    #[test]
    fn test_enum_schemas() {
        let tools = tool_definitions();
        let fan = tools.iter().find(|t| t.name == "set_fan_mode").unwrap();
        assert_eq!(
            fan.input_schema["properties"]["fan_mode"]["enum"],
            json!(["auto", "low", "medium", "high"])
        );
        assert_eq!(fan.input_schema["required"], json!(["fan_mode"]));

        let temp = tools.iter().find(|t| t.name == "set_temperature").unwrap();
        assert_eq!(temp.input_schema["properties"]["temperature"]["minimum"], 16);
        assert_eq!(temp.input_schema["properties"]["temperature"]["maximum"], 30);
    }
}
