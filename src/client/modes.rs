//! Operating parameter enumerations for MirAIe air conditioners
//!
//! Every enum parses from the lowercase strings the gateways accept and
//! rejects anything else with an invalid-input error naming the value.

use crate::error::{MiraieError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fan speed setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FanMode {
    Auto,
    Low,
    Medium,
    High,
    Quiet,
}

impl FanMode {
    /// Values advertised in tool schemas
    pub const ADVERTISED: [&'static str; 4] = ["auto", "low", "medium", "high"];

    pub fn as_str(&self) -> &'static str {
        match self {
            FanMode::Auto => "auto",
            FanMode::Low => "low",
            FanMode::Medium => "medium",
            FanMode::High => "high",
            FanMode::Quiet => "quiet",
        }
    }
}

impl FromStr for FanMode {
    type Err = MiraieError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "auto" => Ok(FanMode::Auto),
            "low" => Ok(FanMode::Low),
            "medium" => Ok(FanMode::Medium),
            "high" => Ok(FanMode::High),
            "quiet" => Ok(FanMode::Quiet),
            other => Err(invalid_value(other, "FanMode")),
        }
    }
}

/// HVAC operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HvacMode {
    Auto,
    Cool,
    Heat,
    Dry,
    Fan,
}

impl HvacMode {
    pub const ADVERTISED: [&'static str; 5] = ["auto", "cool", "heat", "dry", "fan"];

    pub fn as_str(&self) -> &'static str {
        match self {
            HvacMode::Auto => "auto",
            HvacMode::Cool => "cool",
            HvacMode::Heat => "heat",
            HvacMode::Dry => "dry",
            HvacMode::Fan => "fan",
        }
    }
}

impl FromStr for HvacMode {
    type Err = MiraieError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "auto" => Ok(HvacMode::Auto),
            "cool" => Ok(HvacMode::Cool),
            "heat" => Ok(HvacMode::Heat),
            "dry" => Ok(HvacMode::Dry),
            "fan" => Ok(HvacMode::Fan),
            other => Err(invalid_value(other, "HVACMode")),
        }
    }
}

/// Preset (economy / boost) mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetMode {
    None,
    Eco,
    Boost,
}

impl PresetMode {
    pub const ADVERTISED: [&'static str; 3] = ["none", "eco", "boost"];

    pub fn as_str(&self) -> &'static str {
        match self {
            PresetMode::None => "none",
            PresetMode::Eco => "eco",
            PresetMode::Boost => "boost",
        }
    }
}

impl FromStr for PresetMode {
    type Err = MiraieError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "none" => Ok(PresetMode::None),
            "eco" => Ok(PresetMode::Eco),
            "boost" => Ok(PresetMode::Boost),
            other => Err(invalid_value(other, "PresetMode")),
        }
    }
}

/// Louvre position. `0` lets the unit swing automatically, `1`..`5` are
/// fixed positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SwingMode(u8);

impl SwingMode {
    pub const AUTO: SwingMode = SwingMode(0);
    pub const MAX_POSITION: u8 = 5;
    pub const ADVERTISED: [&'static str; 6] = ["0", "1", "2", "3", "4", "5"];

    pub fn new(position: u8) -> Result<Self> {
        if position <= Self::MAX_POSITION {
            Ok(SwingMode(position))
        } else {
            Err(invalid_value(&position.to_string(), "SwingMode"))
        }
    }

    pub fn position(&self) -> u8 {
        self.0
    }

    pub fn is_auto(&self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<u8> for SwingMode {
    type Error = MiraieError;

    fn try_from(value: u8) -> Result<Self> {
        SwingMode::new(value)
    }
}

impl From<SwingMode> for u8 {
    fn from(mode: SwingMode) -> Self {
        mode.0
    }
}

impl FromStr for SwingMode {
    type Err = MiraieError;

    fn from_str(value: &str) -> Result<Self> {
        value
            .parse::<u8>()
            .map_err(|_| invalid_value(value, "SwingMode"))
            .and_then(|position| {
                SwingMode::new(position).map_err(|_| invalid_value(value, "SwingMode"))
            })
    }
}

impl fmt::Display for SwingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for FanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for HvacMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PresetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn invalid_value(value: &str, type_name: &str) -> MiraieError {
    MiraieError::invalid_input(format!("'{value}' is not a valid {type_name}"))
}
