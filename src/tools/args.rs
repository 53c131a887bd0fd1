//! Argument extraction for tool calls

use crate::client::SwingMode;
use crate::error::{MiraieError, Result};
use crate::services::Target;
use serde_json::{Map, Value};
use std::str::FromStr;

/// Arguments of a single tool call
#[derive(Debug, Clone, Default)]
pub struct ToolArgs {
    values: Map<String, Value>,
}

impl ToolArgs {
    pub fn new(values: Map<String, Value>) -> Self {
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key).filter(|value| !value.is_null())
    }

    pub fn optional_str(&self, key: &str) -> Result<Option<&str>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(MiraieError::invalid_input(format!(
                "Argument '{key}' must be a string, got {other}"
            ))),
        }
    }

    pub fn required_str(&self, key: &str) -> Result<&str> {
        self.optional_str(key)?.ok_or_else(|| missing(key))
    }

    /// Integer argument. Whole floats such as `22.0` are accepted.
    pub fn required_i64(&self, key: &str) -> Result<i64> {
        let value = self.get(key).ok_or_else(|| missing(key))?;
        if let Some(n) = value.as_i64() {
            return Ok(n);
        }
        match value.as_f64() {
            Some(f) if f.fract() == 0.0 => Ok(f as i64),
            _ => Err(MiraieError::invalid_input(format!(
                "Argument '{key}' must be an integer, got {value}"
            ))),
        }
    }

    /// Parse a string argument into one of the mode enums
    pub fn required_enum<T>(&self, key: &str) -> Result<T>
    where
        T: FromStr<Err = MiraieError>,
    {
        self.required_str(key)?.parse()
    }

    /// Swing positions arrive as `"3"` per the schema, but bare numbers are
    /// accepted too.
    pub fn required_swing(&self, key: &str) -> Result<SwingMode> {
        match self.get(key).ok_or_else(|| missing(key))? {
            Value::String(s) => s.parse(),
            Value::Number(n) => n
                .as_u64()
                .and_then(|n| u8::try_from(n).ok())
                .map(SwingMode::new)
                .unwrap_or_else(|| {
                    Err(MiraieError::invalid_input(format!(
                        "'{n}' is not a valid SwingMode"
                    )))
                }),
            other => Err(MiraieError::invalid_input(format!(
                "'{other}' is not a valid SwingMode"
            ))),
        }
    }

    /// Target selected by the optional `device_name` argument
    pub fn target(&self) -> Result<Target> {
        Ok(Target::from_optional(self.optional_str("device_name")?))
    }
}

fn missing(key: &str) -> MiraieError {
    MiraieError::invalid_input(format!("Missing required argument '{key}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::FanMode;
    use serde_json::json;

    fn args(value: Value) -> ToolArgs {
        match value {
            Value::Object(map) => ToolArgs::new(map),
            _ => ToolArgs::default(),
        }
    }

    #[test]
    fn test_target_selection() {
        assert_eq!(args(json!({})).target().unwrap(), Target::All);
        assert_eq!(
            args(json!({"device_name": ""})).target().unwrap(),
            Target::All
        );
        assert_eq!(
            args(json!({"device_name": null})).target().unwrap(),
            Target::All
        );
        assert_eq!(
            args(json!({"device_name": "Bedroom"})).target().unwrap(),
            Target::Named("Bedroom".to_string())
        );
        assert_eq!(
            args(json!({"device_name": "   "})).target().unwrap(),
            Target::Named("   ".to_string())
        );
        assert!(args(json!({"device_name": 7})).target().is_err());
    }

    #[test]
    fn test_integer_arguments() {
        assert_eq!(
            args(json!({"temperature": 22})).required_i64("temperature").unwrap(),
            22
        );
        assert_eq!(
            args(json!({"temperature": 22.0})).required_i64("temperature").unwrap(),
            22
        );
        assert!(args(json!({"temperature": 22.5}))
            .required_i64("temperature")
            .is_err());
        let err = args(json!({})).required_i64("temperature").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid input: Missing required argument 'temperature'"
        );
    }

    #[test]
    fn test_enum_and_swing_arguments() {
        let fan: FanMode = args(json!({"fan_mode": "high"}))
            .required_enum("fan_mode")
            .unwrap();
        assert_eq!(fan, FanMode::High);
        assert!(args(json!({"fan_mode": "turbo"}))
            .required_enum::<FanMode>("fan_mode")
            .is_err());

        let swing = args(json!({"vertical_swing_mode": "3"}))
            .required_swing("vertical_swing_mode")
            .unwrap();
        assert_eq!(swing.position(), 3);
        let swing = args(json!({"vertical_swing_mode": 5}))
            .required_swing("vertical_swing_mode")
            .unwrap();
        assert_eq!(swing.position(), 5);
        assert!(args(json!({"vertical_swing_mode": "9"}))
            .required_swing("vertical_swing_mode")
            .is_err());
        assert!(args(json!({"vertical_swing_mode": 300}))
            .required_swing("vertical_swing_mode")
            .is_err());
    }
}
